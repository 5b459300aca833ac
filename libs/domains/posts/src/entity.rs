use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

// ===== Posts Entity =====

pub mod posts {
    use super::*;
    use crate::models::{CreatePost, Post, PostType};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "posts")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub title: String,
        #[sea_orm(column_type = "Text")]
        pub content: String,
        pub post_type: PostType,
        pub community_id: i32,
        pub registered_time: DateTimeWithTimeZone,
        pub registrant: i32,
        pub modified_time: DateTimeWithTimeZone,
        pub modifier: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "domain_communities::entity::communities::Entity",
            from = "Column::CommunityId",
            to = "domain_communities::entity::communities::Column::Id",
            on_delete = "Cascade"
        )]
        Community,
        #[sea_orm(has_many = "super::comments::Entity")]
        Comments,
    }

    impl Related<domain_communities::entity::communities::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Community.def()
        }
    }

    impl Related<super::comments::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Comments.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for Post {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                title: model.title,
                content: model.content,
                post_type: model.post_type,
                community_id: model.community_id,
                registered_time: model.registered_time.into(),
                registrant: model.registrant,
                modified_time: model.modified_time.into(),
                modifier: model.modifier,
            }
        }
    }

    impl From<Post> for ActiveModel {
        fn from(post: Post) -> Self {
            ActiveModel {
                id: Set(post.id),
                title: Set(post.title),
                content: Set(post.content),
                post_type: Set(post.post_type),
                community_id: Set(post.community_id),
                registered_time: Set(post.registered_time.into()),
                registrant: Set(post.registrant),
                modified_time: Set(post.modified_time.into()),
                modifier: Set(post.modifier),
            }
        }
    }

    pub fn new_active_model(
        input: CreatePost,
        registrant: i32,
        now: chrono::DateTime<chrono::Utc>,
    ) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            title: Set(input.title),
            content: Set(input.content),
            post_type: Set(input.post_type),
            community_id: Set(input.community_id),
            registered_time: Set(now.into()),
            registrant: Set(registrant),
            modified_time: Set(now.into()),
            modifier: Set(registrant),
        }
    }
}

// ===== Comments Entity =====

pub mod comments {
    use super::*;
    use crate::models::{Comment, CreateComment};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "comments")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        #[sea_orm(column_type = "Text")]
        pub content: String,
        pub post_id: i32,
        pub registered_time: DateTimeWithTimeZone,
        pub registrant: i32,
        pub modified_time: DateTimeWithTimeZone,
        pub modifier: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::posts::Entity",
            from = "Column::PostId",
            to = "super::posts::Column::Id",
            on_delete = "Cascade"
        )]
        Post,
    }

    impl Related<super::posts::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Post.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for Comment {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                content: model.content,
                post_id: model.post_id,
                registered_time: model.registered_time.into(),
                registrant: model.registrant,
                modified_time: model.modified_time.into(),
                modifier: model.modifier,
            }
        }
    }

    impl From<Comment> for ActiveModel {
        fn from(comment: Comment) -> Self {
            ActiveModel {
                id: Set(comment.id),
                content: Set(comment.content),
                post_id: Set(comment.post_id),
                registered_time: Set(comment.registered_time.into()),
                registrant: Set(comment.registrant),
                modified_time: Set(comment.modified_time.into()),
                modifier: Set(comment.modifier),
            }
        }
    }

    pub fn new_active_model(
        post_id: i32,
        input: CreateComment,
        registrant: i32,
        now: chrono::DateTime<chrono::Utc>,
    ) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            content: Set(input.content),
            post_id: Set(post_id),
            registered_time: Set(now.into()),
            registrant: Set(registrant),
            modified_time: Set(now.into()),
            modifier: Set(registrant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateComment, Post, PostType};
    use chrono::Utc;

    #[test]
    fn test_post_model_into_domain() {
        let now = Utc::now();
        let model = posts::Model {
            id: 11,
            title: "Hello".to_string(),
            content: "World".to_string(),
            post_type: PostType::Share,
            community_id: 2,
            registered_time: now.into(),
            registrant: 5,
            modified_time: now.into(),
            modifier: 6,
        };

        let post: Post = model.into();
        assert_eq!(post.id, 11);
        assert_eq!(post.post_type, PostType::Share);
        assert_eq!(post.registered_time, now);
        assert_eq!(post.modifier, 6);
    }

    #[test]
    fn test_new_comment_leaves_id_to_store() {
        let active = comments::new_active_model(
            3,
            CreateComment {
                content: "Hi".to_string(),
                registrant: Some(4),
            },
            4,
            Utc::now(),
        );

        assert!(matches!(active.id, NotSet));
        assert!(matches!(active.post_id, Set(3)));
        assert!(matches!(active.modifier, Set(4)));
    }
}
