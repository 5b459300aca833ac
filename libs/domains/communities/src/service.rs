use identity_client::{IdentityClient, require_admin};
use std::sync::Arc;
use validator::Validate;

use crate::error::{CommunityError, CommunityResult};
use crate::models::{
    Community, JoinMember, Member, MembershipStatus, ModifyCommunity, RegisterCommunity,
};
use crate::repository::CommunityRepository;

/// Service layer for Community business logic
#[derive(Clone)]
pub struct CommunityService<R: CommunityRepository> {
    repository: Arc<R>,
    identity: Arc<dyn IdentityClient>,
}

impl<R: CommunityRepository> CommunityService<R> {
    pub fn new(repository: R, identity: Arc<dyn IdentityClient>) -> Self {
        Self {
            repository: Arc::new(repository),
            identity,
        }
    }

    /// Register a new community; the registrant must be an admin
    pub async fn register_community(&self, input: RegisterCommunity) -> CommunityResult<Community> {
        input
            .validate()
            .map_err(|e| CommunityError::Validation(e.to_string()))?;

        let registrant = require_admin(self.identity.as_ref(), input.registrant).await?;

        self.repository.create(input, registrant).await
    }

    /// Modify the display fields of a community; the modifier must be an admin
    pub async fn modify_community(
        &self,
        id: i32,
        input: ModifyCommunity,
    ) -> CommunityResult<Community> {
        input
            .validate()
            .map_err(|e| CommunityError::Validation(e.to_string()))?;

        let modifier = require_admin(self.identity.as_ref(), input.modifier).await?;

        self.repository.update(id, input, modifier).await
    }

    /// Delete a community; the acting user must be an admin
    pub async fn delete_community(&self, id: i32, user_id: Option<i32>) -> CommunityResult<()> {
        require_admin(self.identity.as_ref(), user_id).await?;

        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(CommunityError::NotFound(id));
        }

        Ok(())
    }

    /// Get a community by ID
    pub async fn get_community(&self, id: i32) -> CommunityResult<Community> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CommunityError::NotFound(id))
    }

    pub async fn list_communities(&self) -> CommunityResult<Vec<Community>> {
        self.repository.list_all().await
    }

    /// Join a community.
    ///
    /// Unless the community allows self-join, the secret number must match
    /// exactly.
    pub async fn join_member(&self, community_id: i32, input: JoinMember) -> CommunityResult<Member> {
        let community = self.get_community(community_id).await?;

        if self.repository.is_member(community_id, input.user_id).await? {
            return Err(CommunityError::AlreadyMember {
                community_id,
                user_id: input.user_id,
            });
        }

        if !community.can_join(input.secret_number.as_deref()) {
            return Err(CommunityError::InvalidSecret(community_id));
        }

        self.repository
            .add_member(community_id, input.user_id, input.registrant)
            .await
    }

    /// Leave a community
    pub async fn leave_member(
        &self,
        community_id: i32,
        user_id: i32,
    ) -> CommunityResult<MembershipStatus> {
        let removed = self.repository.remove_member(community_id, user_id).await?;

        if !removed {
            return Err(CommunityError::NotAMember {
                community_id,
                user_id,
            });
        }

        Ok(MembershipStatus {
            community_id,
            user_id,
            is_member: false,
        })
    }

    pub async fn check_membership(
        &self,
        community_id: i32,
        user_id: i32,
    ) -> CommunityResult<MembershipStatus> {
        let is_member = self.repository.is_member(community_id, user_id).await?;

        Ok(MembershipStatus {
            community_id,
            user_id,
            is_member,
        })
    }
}
