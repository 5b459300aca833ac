use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};

use crate::{
    entity::{communities, members},
    error::{CommunityError, CommunityResult},
    models::{Community, Member, ModifyCommunity, RegisterCommunity},
    repository::CommunityRepository,
};

pub struct PgCommunityRepository {
    db: DatabaseConnection,
}

impl PgCommunityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load a community row with a `FOR UPDATE` lock held until the
    /// transaction ends
    async fn lock_community(
        txn: &DatabaseTransaction,
        id: i32,
    ) -> CommunityResult<communities::Model> {
        communities::Entity::find_by_id(id)
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or(CommunityError::NotFound(id))
    }

    async fn set_member_count(
        txn: &DatabaseTransaction,
        community: communities::Model,
        member_count: i64,
    ) -> Result<(), DbErr> {
        let mut active: communities::ActiveModel = community.into();
        active.member_count = Set(member_count);
        active.update(txn).await?;
        Ok(())
    }
}

#[async_trait]
impl CommunityRepository for PgCommunityRepository {
    async fn create(&self, input: RegisterCommunity, registrant: i32) -> CommunityResult<Community> {
        let txn = self.db.begin().await?;

        let model = communities::new_active_model(input, registrant, Utc::now())
            .insert(&txn)
            .await?;

        txn.commit().await?;

        tracing::info!(community_id = model.id, "Created community");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> CommunityResult<Option<Community>> {
        let model = communities::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn list_all(&self) -> CommunityResult<Vec<Community>> {
        let models = communities::Entity::find()
            .order_by_asc(communities::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(
        &self,
        id: i32,
        input: ModifyCommunity,
        modifier: i32,
    ) -> CommunityResult<Community> {
        let txn = self.db.begin().await?;

        // Lock so a concurrent join's member_count write is not overwritten
        let model = Self::lock_community(&txn, id).await?;

        let mut community: Community = model.into();
        community.apply_modification(input, modifier, Utc::now());

        let active: communities::ActiveModel = community.into();
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(community_id = id, "Updated community");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> CommunityResult<bool> {
        let txn = self.db.begin().await?;

        let result = communities::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        if result.rows_affected > 0 {
            tracing::info!(community_id = id, "Deleted community");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn is_member(&self, community_id: i32, user_id: i32) -> CommunityResult<bool> {
        let count = members::Entity::find()
            .filter(members::Column::CommunityId.eq(community_id))
            .filter(members::Column::UserId.eq(user_id))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn add_member(
        &self,
        community_id: i32,
        user_id: i32,
        registrant: Option<i32>,
    ) -> CommunityResult<Member> {
        let txn = self.db.begin().await?;

        let community = Self::lock_community(&txn, community_id).await?;

        let inserted = members::new_active_model(community_id, user_id, registrant, Utc::now())
            .insert(&txn)
            .await;

        let member = match inserted {
            Ok(member) => member,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(CommunityError::AlreadyMember {
                    community_id,
                    user_id,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let member_count = community.member_count + 1;
        Self::set_member_count(&txn, community, member_count).await?;

        txn.commit().await?;

        tracing::info!(community_id, user_id, member_count, "Member joined community");
        Ok(member.into())
    }

    async fn remove_member(&self, community_id: i32, user_id: i32) -> CommunityResult<bool> {
        let txn = self.db.begin().await?;

        let community = match Self::lock_community(&txn, community_id).await {
            Ok(community) => community,
            Err(CommunityError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e),
        };

        let result = members::Entity::delete_many()
            .filter(members::Column::CommunityId.eq(community_id))
            .filter(members::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Ok(false);
        }

        let member_count = (community.member_count - 1).max(0);
        Self::set_member_count(&txn, community, member_count).await?;

        txn.commit().await?;

        tracing::info!(community_id, user_id, member_count, "Member left community");
        Ok(true)
    }
}
