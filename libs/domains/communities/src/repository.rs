use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CommunityError, CommunityResult};
use crate::models::{Community, Member, ModifyCommunity, RegisterCommunity};

/// Repository trait for Community and Member persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// Store a new community registered by `registrant`
    async fn create(&self, input: RegisterCommunity, registrant: i32) -> CommunityResult<Community>;

    /// Get a community by ID
    async fn get_by_id(&self, id: i32) -> CommunityResult<Option<Community>>;

    /// List all communities, oldest first
    async fn list_all(&self) -> CommunityResult<Vec<Community>>;

    /// Apply a modification; fails with `NotFound` if the community is absent
    async fn update(
        &self,
        id: i32,
        input: ModifyCommunity,
        modifier: i32,
    ) -> CommunityResult<Community>;

    /// Delete a community (and its memberships) by ID
    async fn delete(&self, id: i32) -> CommunityResult<bool>;

    async fn is_member(&self, community_id: i32, user_id: i32) -> CommunityResult<bool>;

    /// Insert a membership and increment `member_count` as one unit.
    ///
    /// Fails with `NotFound` for an unknown community and `AlreadyMember`
    /// if the pair already exists.
    async fn add_member(
        &self,
        community_id: i32,
        user_id: i32,
        registrant: Option<i32>,
    ) -> CommunityResult<Member>;

    /// Delete a membership and decrement `member_count` as one unit.
    ///
    /// Returns `false` if the user was not a member.
    async fn remove_member(&self, community_id: i32, user_id: i32) -> CommunityResult<bool>;
}

#[derive(Debug, Default)]
struct CommunityStore {
    communities: HashMap<i32, Community>,
    members: HashMap<(i32, i32), Member>,
    last_community_id: i32,
    last_member_id: i32,
}

/// In-memory implementation of CommunityRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCommunityRepository {
    store: Arc<RwLock<CommunityStore>>,
}

impl InMemoryCommunityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommunityRepository for InMemoryCommunityRepository {
    async fn create(&self, input: RegisterCommunity, registrant: i32) -> CommunityResult<Community> {
        let mut store = self.store.write().await;

        store.last_community_id += 1;
        let community = Community::new(store.last_community_id, input, registrant, Utc::now());
        store.communities.insert(community.id, community.clone());

        tracing::info!(community_id = community.id, "Created community");
        Ok(community)
    }

    async fn get_by_id(&self, id: i32) -> CommunityResult<Option<Community>> {
        let store = self.store.read().await;
        Ok(store.communities.get(&id).cloned())
    }

    async fn list_all(&self) -> CommunityResult<Vec<Community>> {
        let store = self.store.read().await;

        let mut result: Vec<Community> = store.communities.values().cloned().collect();
        result.sort_by_key(|c| c.id);

        Ok(result)
    }

    async fn update(
        &self,
        id: i32,
        input: ModifyCommunity,
        modifier: i32,
    ) -> CommunityResult<Community> {
        let mut store = self.store.write().await;

        let community = store
            .communities
            .get_mut(&id)
            .ok_or(CommunityError::NotFound(id))?;
        community.apply_modification(input, modifier, Utc::now());
        let updated = community.clone();

        tracing::info!(community_id = id, "Updated community");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> CommunityResult<bool> {
        let mut store = self.store.write().await;

        if store.communities.remove(&id).is_none() {
            return Ok(false);
        }
        store.members.retain(|(community_id, _), _| *community_id != id);

        tracing::info!(community_id = id, "Deleted community");
        Ok(true)
    }

    async fn is_member(&self, community_id: i32, user_id: i32) -> CommunityResult<bool> {
        let store = self.store.read().await;
        Ok(store.members.contains_key(&(community_id, user_id)))
    }

    async fn add_member(
        &self,
        community_id: i32,
        user_id: i32,
        registrant: Option<i32>,
    ) -> CommunityResult<Member> {
        let mut store = self.store.write().await;

        if !store.communities.contains_key(&community_id) {
            return Err(CommunityError::NotFound(community_id));
        }
        if store.members.contains_key(&(community_id, user_id)) {
            return Err(CommunityError::AlreadyMember {
                community_id,
                user_id,
            });
        }

        store.last_member_id += 1;
        let member = Member::new(
            store.last_member_id,
            community_id,
            user_id,
            registrant,
            Utc::now(),
        );
        store.members.insert((community_id, user_id), member.clone());
        if let Some(community) = store.communities.get_mut(&community_id) {
            community.add_member();
        }

        tracing::info!(community_id, user_id, "Member joined community");
        Ok(member)
    }

    async fn remove_member(&self, community_id: i32, user_id: i32) -> CommunityResult<bool> {
        let mut store = self.store.write().await;

        if store.members.remove(&(community_id, user_id)).is_none() {
            return Ok(false);
        }
        if let Some(community) = store.communities.get_mut(&community_id) {
            community.remove_member();
        }

        tracing::info!(community_id, user_id, "Member left community");
        Ok(true)
    }
}
