use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Post category
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "post_type")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PostType {
    #[sea_orm(string_value = "notice")]
    Notice,
    #[sea_orm(string_value = "general")]
    General,
    #[sea_orm(string_value = "question")]
    Question,
    #[sea_orm(string_value = "share")]
    Share,
}

/// Post entity - authored inside a community
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub post_type: PostType,
    pub community_id: i32,
    pub registered_time: DateTime<Utc>,
    pub registrant: i32,
    pub modified_time: DateTime<Utc>,
    pub modifier: i32,
}

/// Comment entity - attached to a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub post_id: i32,
    pub registered_time: DateTime<Utc>,
    pub registrant: i32,
    pub modified_time: DateTime<Utc>,
    pub modifier: i32,
}

/// A post together with its comments, oldest comment first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// DTO for creating a post
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePost {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub post_type: PostType,
    pub community_id: i32,
    /// Acting user; must be a known user
    pub registrant: Option<i32>,
}

/// DTO for updating a post
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePost {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub post_type: Option<PostType>,
    pub modifier: Option<i32>,
}

/// DTO for commenting on a post; the post comes from the path
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
    pub registrant: Option<i32>,
}

/// DTO for replacing a comment's content
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateComment {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
    pub modifier: Option<i32>,
}

/// Query parameters carrying the acting user of a delete
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct DeleteParams {
    pub user_id: Option<i32>,
}

/// Query parameters for listing posts
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ListPostsParams {
    /// Community whose posts to list
    pub community_id: i32,
}

impl Post {
    pub fn new(id: i32, input: CreatePost, registrant: i32, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            content: input.content,
            post_type: input.post_type,
            community_id: input.community_id,
            registered_time: now,
            registrant,
            modified_time: now,
            modifier: registrant,
        }
    }

    /// Overlay title, content and type; the community never changes
    pub fn apply_update(&mut self, input: UpdatePost, modifier: i32, now: DateTime<Utc>) {
        if let Some(title) = input.title {
            self.title = title;
        }
        if let Some(content) = input.content {
            self.content = content;
        }
        if let Some(post_type) = input.post_type {
            self.post_type = post_type;
        }
        self.modifier = modifier;
        self.modified_time = now;
    }
}

impl Comment {
    pub fn new(
        id: i32,
        post_id: i32,
        input: CreateComment,
        registrant: i32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content: input.content,
            post_id,
            registered_time: now,
            registrant,
            modified_time: now,
            modifier: registrant,
        }
    }

    pub fn apply_update(&mut self, input: UpdateComment, modifier: i32, now: DateTime<Utc>) {
        self.content = input.content;
        self.modifier = modifier;
        self.modified_time = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_post() -> CreatePost {
        CreatePost {
            title: "Welcome".to_string(),
            content: "First post".to_string(),
            post_type: PostType::Notice,
            community_id: 4,
            registrant: Some(2),
        }
    }

    #[test]
    fn test_new_post_stamps_creator() {
        let now = Utc::now();
        let post = Post::new(1, create_post(), 2, now);

        assert_eq!(post.community_id, 4);
        assert_eq!(post.registrant, 2);
        assert_eq!(post.modifier, 2);
        assert_eq!(post.modified_time, now);
    }

    #[test]
    fn test_post_update_overlays_given_fields() {
        let registered = Utc::now();
        let mut post = Post::new(1, create_post(), 2, registered);

        let later = registered + chrono::Duration::seconds(5);
        post.apply_update(
            UpdatePost {
                post_type: Some(PostType::Question),
                ..Default::default()
            },
            3,
            later,
        );

        assert_eq!(post.post_type, PostType::Question);
        assert_eq!(post.title, "Welcome");
        assert_eq!(post.modifier, 3);
        assert_eq!(post.registrant, 2);
        assert_eq!(post.modified_time, later);
        assert_eq!(post.registered_time, registered);
    }

    #[test]
    fn test_comment_update_replaces_content() {
        let now = Utc::now();
        let mut comment = Comment::new(
            1,
            9,
            CreateComment {
                content: "Nice".to_string(),
                registrant: Some(2),
            },
            2,
            now,
        );

        comment.apply_update(
            UpdateComment {
                content: "Very nice".to_string(),
                modifier: Some(5),
            },
            5,
            now,
        );

        assert_eq!(comment.content, "Very nice");
        assert_eq!(comment.post_id, 9);
        assert_eq!(comment.modifier, 5);
        assert_eq!(comment.registrant, 2);
    }

    #[test]
    fn test_post_detail_flattens_post() {
        let post = Post::new(1, create_post(), 2, Utc::now());
        let detail = PostDetail {
            post,
            comments: vec![],
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["post_type"], "notice");
        assert!(json["comments"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_create_post_validation() {
        let mut input = create_post();
        input.title = String::new();
        input.content = String::new();

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("content"));
    }
}
