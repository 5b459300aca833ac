use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

// ===== Communities Entity =====

pub mod communities {
    use super::*;
    use crate::models::CommunityType;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "communities")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        #[sea_orm(column_name = "type")]
        pub community_type: CommunityType,
        #[sea_orm(column_type = "Text", nullable)]
        pub thumbnail: Option<String>,
        pub name: String,
        #[sea_orm(column_type = "Text", nullable)]
        pub description: Option<String>,
        pub manager_id: String,
        pub manager_name: String,
        pub manager_email: String,
        pub member_count: i64,
        pub registered_time: DateTimeWithTimeZone,
        pub registrant: i32,
        pub modified_time: DateTimeWithTimeZone,
        pub modifier: i32,
        pub secret_number: Option<String>,
        pub allow_self_join: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::members::Entity")]
        Members,
    }

    impl Related<super::members::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Members.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Community {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                community_type: model.community_type,
                thumbnail: model.thumbnail,
                name: model.name,
                description: model.description,
                manager_id: model.manager_id,
                manager_name: model.manager_name,
                manager_email: model.manager_email,
                member_count: model.member_count,
                registered_time: model.registered_time.into(),
                registrant: model.registrant,
                modified_time: model.modified_time.into(),
                modifier: model.modifier,
                secret_number: model.secret_number,
                allow_self_join: model.allow_self_join,
            }
        }
    }

    // Full overwrite of an existing row; the id must already exist
    impl From<crate::models::Community> for ActiveModel {
        fn from(community: crate::models::Community) -> Self {
            ActiveModel {
                id: Set(community.id),
                community_type: Set(community.community_type),
                thumbnail: Set(community.thumbnail),
                name: Set(community.name),
                description: Set(community.description),
                manager_id: Set(community.manager_id),
                manager_name: Set(community.manager_name),
                manager_email: Set(community.manager_email),
                member_count: Set(community.member_count),
                registered_time: Set(community.registered_time.into()),
                registrant: Set(community.registrant),
                modified_time: Set(community.modified_time.into()),
                modifier: Set(community.modifier),
                secret_number: Set(community.secret_number),
                allow_self_join: Set(community.allow_self_join),
            }
        }
    }

    /// Insert model for a new registration; the store assigns the id
    pub fn new_active_model(
        input: crate::models::RegisterCommunity,
        registrant: i32,
        now: chrono::DateTime<chrono::Utc>,
    ) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            community_type: Set(input.community_type),
            thumbnail: Set(input.thumbnail),
            name: Set(input.name),
            description: Set(input.description),
            manager_id: Set(input.manager_id),
            manager_name: Set(input.manager_name),
            manager_email: Set(input.manager_email),
            member_count: Set(0),
            registered_time: Set(now.into()),
            registrant: Set(registrant),
            modified_time: Set(now.into()),
            modifier: Set(registrant),
            secret_number: Set(input.secret_number),
            allow_self_join: Set(input.allow_self_join),
        }
    }
}

// ===== Members Entity =====

pub mod members {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "members")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub community_id: i32,
        pub user_id: i32,
        pub joined_time: DateTimeWithTimeZone,
        pub registrant: Option<i32>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::communities::Entity",
            from = "Column::CommunityId",
            to = "super::communities::Column::Id",
            on_delete = "Cascade"
        )]
        Community,
    }

    impl Related<super::communities::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Community.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Member {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                community_id: model.community_id,
                user_id: model.user_id,
                joined_time: model.joined_time.into(),
                registrant: model.registrant,
            }
        }
    }

    pub fn new_active_model(
        community_id: i32,
        user_id: i32,
        registrant: Option<i32>,
        now: chrono::DateTime<chrono::Utc>,
    ) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            community_id: Set(community_id),
            user_id: Set(user_id),
            joined_time: Set(now.into()),
            registrant: Set(registrant),
        }
    }
}
