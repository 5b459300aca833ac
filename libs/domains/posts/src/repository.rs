use async_trait::async_trait;
use chrono::Utc;
use domain_communities::{CommunityRepository, InMemoryCommunityRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{PostError, PostResult};
use crate::models::{Comment, CreateComment, CreatePost, Post, UpdateComment, UpdatePost};

/// Repository trait for Post and Comment persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Store a new post; fails with `CommunityNotFound` if the community is absent
    async fn create_post(&self, input: CreatePost, registrant: i32) -> PostResult<Post>;

    async fn get_post(&self, id: i32) -> PostResult<Option<Post>>;

    /// Posts of a community, newest first
    async fn list_by_community(&self, community_id: i32) -> PostResult<Vec<Post>>;

    async fn update_post(&self, id: i32, input: UpdatePost, modifier: i32) -> PostResult<Post>;

    /// Delete a post (and its comments) by ID
    async fn delete_post(&self, id: i32) -> PostResult<bool>;

    /// Store a new comment; fails with `PostNotFound` if the post is absent
    async fn create_comment(
        &self,
        post_id: i32,
        input: CreateComment,
        registrant: i32,
    ) -> PostResult<Comment>;

    async fn get_comment(&self, id: i32) -> PostResult<Option<Comment>>;

    /// Comments of a post, oldest first
    async fn list_comments(&self, post_id: i32) -> PostResult<Vec<Comment>>;

    async fn update_comment(
        &self,
        id: i32,
        input: UpdateComment,
        modifier: i32,
    ) -> PostResult<Comment>;

    async fn delete_comment(&self, id: i32) -> PostResult<bool>;
}

#[derive(Debug, Default)]
struct PostStore {
    posts: HashMap<i32, Post>,
    comments: HashMap<i32, Comment>,
    last_post_id: i32,
    last_comment_id: i32,
}

/// In-memory implementation of PostRepository (for development/testing).
///
/// Community existence is checked against the shared in-memory community
/// store.
#[derive(Debug, Clone)]
pub struct InMemoryPostRepository {
    communities: InMemoryCommunityRepository,
    store: Arc<RwLock<PostStore>>,
}

impl InMemoryPostRepository {
    pub fn new(communities: InMemoryCommunityRepository) -> Self {
        Self {
            communities,
            store: Arc::new(RwLock::new(PostStore::default())),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(&self, input: CreatePost, registrant: i32) -> PostResult<Post> {
        if self.communities.get_by_id(input.community_id).await?.is_none() {
            return Err(PostError::CommunityNotFound(input.community_id));
        }

        let mut store = self.store.write().await;

        store.last_post_id += 1;
        let post = Post::new(store.last_post_id, input, registrant, Utc::now());
        store.posts.insert(post.id, post.clone());

        tracing::info!(post_id = post.id, community_id = post.community_id, "Created post");
        Ok(post)
    }

    async fn get_post(&self, id: i32) -> PostResult<Option<Post>> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn list_by_community(&self, community_id: i32) -> PostResult<Vec<Post>> {
        let store = self.store.read().await;

        let mut result: Vec<Post> = store
            .posts
            .values()
            .filter(|p| p.community_id == community_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            b.registered_time
                .cmp(&a.registered_time)
                .then(b.id.cmp(&a.id))
        });

        Ok(result)
    }

    async fn update_post(&self, id: i32, input: UpdatePost, modifier: i32) -> PostResult<Post> {
        let mut store = self.store.write().await;

        let post = store.posts.get_mut(&id).ok_or(PostError::PostNotFound(id))?;
        post.apply_update(input, modifier, Utc::now());
        let updated = post.clone();

        tracing::info!(post_id = id, "Updated post");
        Ok(updated)
    }

    async fn delete_post(&self, id: i32) -> PostResult<bool> {
        let mut store = self.store.write().await;

        if store.posts.remove(&id).is_none() {
            return Ok(false);
        }
        store.comments.retain(|_, c| c.post_id != id);

        tracing::info!(post_id = id, "Deleted post");
        Ok(true)
    }

    async fn create_comment(
        &self,
        post_id: i32,
        input: CreateComment,
        registrant: i32,
    ) -> PostResult<Comment> {
        let mut store = self.store.write().await;

        if !store.posts.contains_key(&post_id) {
            return Err(PostError::PostNotFound(post_id));
        }

        store.last_comment_id += 1;
        let comment = Comment::new(store.last_comment_id, post_id, input, registrant, Utc::now());
        store.comments.insert(comment.id, comment.clone());

        tracing::info!(comment_id = comment.id, post_id, "Created comment");
        Ok(comment)
    }

    async fn get_comment(&self, id: i32) -> PostResult<Option<Comment>> {
        let store = self.store.read().await;
        Ok(store.comments.get(&id).cloned())
    }

    async fn list_comments(&self, post_id: i32) -> PostResult<Vec<Comment>> {
        let store = self.store.read().await;

        let mut result: Vec<Comment> = store
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            a.registered_time
                .cmp(&b.registered_time)
                .then(a.id.cmp(&b.id))
        });

        Ok(result)
    }

    async fn update_comment(
        &self,
        id: i32,
        input: UpdateComment,
        modifier: i32,
    ) -> PostResult<Comment> {
        let mut store = self.store.write().await;

        let comment = store
            .comments
            .get_mut(&id)
            .ok_or(PostError::CommentNotFound(id))?;
        comment.apply_update(input, modifier, Utc::now());
        let updated = comment.clone();

        tracing::info!(comment_id = id, "Updated comment");
        Ok(updated)
    }

    async fn delete_comment(&self, id: i32) -> PostResult<bool> {
        let mut store = self.store.write().await;

        if store.comments.remove(&id).is_none() {
            return Ok(false);
        }

        tracing::info!(comment_id = id, "Deleted comment");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostType;
    use domain_communities::{CommunityType, RegisterCommunity};

    async fn repo_with_community() -> (InMemoryPostRepository, i32) {
        let communities = InMemoryCommunityRepository::new();
        let community = communities
            .create(
                RegisterCommunity {
                    community_type: CommunityType::Hobby,
                    thumbnail: None,
                    name: "Gardeners".to_string(),
                    description: None,
                    manager_id: "mgr".to_string(),
                    manager_name: "Manager".to_string(),
                    manager_email: "mgr@example.com".to_string(),
                    registrant: Some(1),
                    secret_number: None,
                    allow_self_join: true,
                },
                1,
            )
            .await
            .unwrap();

        (InMemoryPostRepository::new(communities), community.id)
    }

    fn create_post(community_id: i32, title: &str) -> CreatePost {
        CreatePost {
            title: title.to_string(),
            content: "content".to_string(),
            post_type: PostType::General,
            community_id,
            registrant: Some(2),
        }
    }

    fn create_comment(content: &str) -> CreateComment {
        CreateComment {
            content: content.to_string(),
            registrant: Some(2),
        }
    }

    #[tokio::test]
    async fn test_create_post_requires_community() {
        let (repo, _) = repo_with_community().await;

        let err = repo.create_post(create_post(77, "orphan"), 2).await.unwrap_err();
        assert!(matches!(err, PostError::CommunityNotFound(77)));
    }

    #[tokio::test]
    async fn test_posts_listed_newest_first() {
        let (repo, community_id) = repo_with_community().await;

        let first = repo.create_post(create_post(community_id, "first"), 2).await.unwrap();
        let second = repo.create_post(create_post(community_id, "second"), 2).await.unwrap();

        let posts = repo.list_by_community(community_id).await.unwrap();
        let ids: Vec<i32> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        assert!(repo.list_by_community(community_id + 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_comments_listed_oldest_first() {
        let (repo, community_id) = repo_with_community().await;
        let post = repo.create_post(create_post(community_id, "p"), 2).await.unwrap();

        let first = repo.create_comment(post.id, create_comment("a"), 2).await.unwrap();
        let second = repo.create_comment(post.id, create_comment("b"), 3).await.unwrap();

        let comments = repo.list_comments(post.id).await.unwrap();
        let ids: Vec<i32> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_comment_on_missing_post() {
        let (repo, _) = repo_with_community().await;

        let err = repo.create_comment(5, create_comment("a"), 2).await.unwrap_err();
        assert!(matches!(err, PostError::PostNotFound(5)));
    }

    #[tokio::test]
    async fn test_delete_post_drops_comments() {
        let (repo, community_id) = repo_with_community().await;
        let post = repo.create_post(create_post(community_id, "p"), 2).await.unwrap();
        let comment = repo.create_comment(post.id, create_comment("a"), 2).await.unwrap();

        assert!(repo.delete_post(post.id).await.unwrap());
        assert!(repo.get_comment(comment.id).await.unwrap().is_none());
        assert!(!repo.delete_post(post.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_comment() {
        let (repo, _) = repo_with_community().await;

        let err = repo
            .update_comment(
                3,
                UpdateComment {
                    content: "x".to_string(),
                    modifier: Some(2),
                },
                2,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PostError::CommentNotFound(3)));
    }
}
