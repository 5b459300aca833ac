use async_trait::async_trait;
use chrono::Utc;
use domain_communities::entity::communities;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};

use crate::{
    entity::{comments, posts},
    error::{PostError, PostResult},
    models::{Comment, CreateComment, CreatePost, Post, UpdateComment, UpdatePost},
    repository::PostRepository,
};

pub struct PgPostRepository {
    db: DatabaseConnection,
}

impl PgPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create_post(&self, input: CreatePost, registrant: i32) -> PostResult<Post> {
        let txn = self.db.begin().await?;

        // FOR SHARE keeps the community from being deleted before commit
        let community = communities::Entity::find_by_id(input.community_id)
            .lock_shared()
            .one(&txn)
            .await?;
        if community.is_none() {
            return Err(PostError::CommunityNotFound(input.community_id));
        }

        let model = posts::new_active_model(input, registrant, Utc::now())
            .insert(&txn)
            .await?;

        txn.commit().await?;

        tracing::info!(post_id = model.id, community_id = model.community_id, "Created post");
        Ok(model.into())
    }

    async fn get_post(&self, id: i32) -> PostResult<Option<Post>> {
        let model = posts::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn list_by_community(&self, community_id: i32) -> PostResult<Vec<Post>> {
        let models = posts::Entity::find()
            .filter(posts::Column::CommunityId.eq(community_id))
            .order_by_desc(posts::Column::RegisteredTime)
            .order_by_desc(posts::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update_post(&self, id: i32, input: UpdatePost, modifier: i32) -> PostResult<Post> {
        let txn = self.db.begin().await?;

        let model = posts::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(PostError::PostNotFound(id))?;

        let mut post: Post = model.into();
        post.apply_update(input, modifier, Utc::now());

        let active: posts::ActiveModel = post.into();
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(post_id = id, "Updated post");
        Ok(updated.into())
    }

    async fn delete_post(&self, id: i32) -> PostResult<bool> {
        let txn = self.db.begin().await?;

        let result = posts::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        if result.rows_affected > 0 {
            tracing::info!(post_id = id, "Deleted post");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn create_comment(
        &self,
        post_id: i32,
        input: CreateComment,
        registrant: i32,
    ) -> PostResult<Comment> {
        let txn = self.db.begin().await?;

        let post = posts::Entity::find_by_id(post_id)
            .lock_shared()
            .one(&txn)
            .await?;
        if post.is_none() {
            return Err(PostError::PostNotFound(post_id));
        }

        let model = comments::new_active_model(post_id, input, registrant, Utc::now())
            .insert(&txn)
            .await?;

        txn.commit().await?;

        tracing::info!(comment_id = model.id, post_id, "Created comment");
        Ok(model.into())
    }

    async fn get_comment(&self, id: i32) -> PostResult<Option<Comment>> {
        let model = comments::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn list_comments(&self, post_id: i32) -> PostResult<Vec<Comment>> {
        let models = comments::Entity::find()
            .filter(comments::Column::PostId.eq(post_id))
            .order_by_asc(comments::Column::RegisteredTime)
            .order_by_asc(comments::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update_comment(
        &self,
        id: i32,
        input: UpdateComment,
        modifier: i32,
    ) -> PostResult<Comment> {
        let txn = self.db.begin().await?;

        let model = comments::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(PostError::CommentNotFound(id))?;

        let mut comment: Comment = model.into();
        comment.apply_update(input, modifier, Utc::now());

        let active: comments::ActiveModel = comment.into();
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(comment_id = id, "Updated comment");
        Ok(updated.into())
    }

    async fn delete_comment(&self, id: i32) -> PostResult<bool> {
        let txn = self.db.begin().await?;

        let result = comments::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        if result.rows_affected > 0 {
            tracing::info!(comment_id = id, "Deleted comment");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
