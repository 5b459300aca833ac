use identity_client::{IdentityClient, require_user};
use std::sync::Arc;
use validator::Validate;

use crate::error::{PostError, PostResult};
use crate::models::{
    Comment, CreateComment, CreatePost, Post, PostDetail, UpdateComment, UpdatePost,
};
use crate::repository::PostRepository;

/// Service layer for Post and Comment business logic
#[derive(Clone)]
pub struct PostService<R: PostRepository> {
    repository: Arc<R>,
    identity: Arc<dyn IdentityClient>,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repository: R, identity: Arc<dyn IdentityClient>) -> Self {
        Self {
            repository: Arc::new(repository),
            identity,
        }
    }

    /// Create a post in an existing community
    pub async fn create_post(&self, input: CreatePost) -> PostResult<Post> {
        input
            .validate()
            .map_err(|e| PostError::Validation(e.to_string()))?;

        let registrant = require_user(self.identity.as_ref(), input.registrant).await?;

        self.repository.create_post(input, registrant).await
    }

    /// Get a post with its comments, oldest comment first
    pub async fn get_post(&self, id: i32) -> PostResult<PostDetail> {
        let post = self
            .repository
            .get_post(id)
            .await?
            .ok_or(PostError::PostNotFound(id))?;
        let comments = self.repository.list_comments(id).await?;

        Ok(PostDetail { post, comments })
    }

    /// Posts of a community, newest first
    pub async fn list_posts(&self, community_id: i32) -> PostResult<Vec<Post>> {
        self.repository.list_by_community(community_id).await
    }

    pub async fn update_post(&self, id: i32, input: UpdatePost) -> PostResult<Post> {
        input
            .validate()
            .map_err(|e| PostError::Validation(e.to_string()))?;

        let modifier = require_user(self.identity.as_ref(), input.modifier).await?;

        self.repository.update_post(id, input, modifier).await
    }

    pub async fn delete_post(&self, id: i32, user_id: Option<i32>) -> PostResult<()> {
        require_user(self.identity.as_ref(), user_id).await?;

        if !self.repository.delete_post(id).await? {
            return Err(PostError::PostNotFound(id));
        }

        Ok(())
    }

    /// Comment on an existing post
    pub async fn create_comment(&self, post_id: i32, input: CreateComment) -> PostResult<Comment> {
        input
            .validate()
            .map_err(|e| PostError::Validation(e.to_string()))?;

        let registrant = require_user(self.identity.as_ref(), input.registrant).await?;

        self.repository
            .create_comment(post_id, input, registrant)
            .await
    }

    /// Comments of a post, oldest first. Fails for an unknown post.
    pub async fn list_comments(&self, post_id: i32) -> PostResult<Vec<Comment>> {
        if self.repository.get_post(post_id).await?.is_none() {
            return Err(PostError::PostNotFound(post_id));
        }

        self.repository.list_comments(post_id).await
    }

    pub async fn get_comment(&self, id: i32) -> PostResult<Comment> {
        self.repository
            .get_comment(id)
            .await?
            .ok_or(PostError::CommentNotFound(id))
    }

    pub async fn update_comment(&self, id: i32, input: UpdateComment) -> PostResult<Comment> {
        input
            .validate()
            .map_err(|e| PostError::Validation(e.to_string()))?;

        let modifier = require_user(self.identity.as_ref(), input.modifier).await?;

        self.repository.update_comment(id, input, modifier).await
    }

    pub async fn delete_comment(&self, id: i32, user_id: Option<i32>) -> PostResult<()> {
        require_user(self.identity.as_ref(), user_id).await?;

        if !self.repository.delete_comment(id).await? {
            return Err(PostError::CommentNotFound(id));
        }

        Ok(())
    }
}
