use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Community category
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "community_type")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CommunityType {
    #[sea_orm(string_value = "study")]
    Study,
    #[sea_orm(string_value = "hobby")]
    Hobby,
    #[sea_orm(string_value = "project")]
    Project,
    #[sea_orm(string_value = "official")]
    Official,
    #[sea_orm(string_value = "etc")]
    Etc,
}

/// Community entity - a group users can join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Community {
    pub id: i32,
    #[serde(rename = "type")]
    pub community_type: CommunityType,
    pub thumbnail: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub manager_id: String,
    pub manager_name: String,
    pub manager_email: String,
    /// Number of current members, maintained on join/leave
    pub member_count: i64,
    pub registered_time: DateTime<Utc>,
    pub registrant: i32,
    pub modified_time: DateTime<Utc>,
    pub modifier: i32,
    /// Join passphrase; never included in responses
    #[serde(skip_serializing, default)]
    pub secret_number: Option<String>,
    pub allow_self_join: bool,
}

/// Membership of a user in a community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub id: i32,
    pub community_id: i32,
    pub user_id: i32,
    pub joined_time: DateTime<Utc>,
    pub registrant: Option<i32>,
}

/// DTO for registering a new community
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterCommunity {
    #[serde(rename = "type")]
    pub community_type: CommunityType,
    pub thumbnail: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub manager_id: String,
    #[validate(length(min = 1, max = 100))]
    pub manager_name: String,
    #[validate(email)]
    pub manager_email: String,
    /// Acting user; must be an admin
    pub registrant: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub secret_number: Option<String>,
    #[serde(default)]
    pub allow_self_join: bool,
}

/// DTO for modifying a community.
///
/// Only the display fields can change; manager contact, secret number,
/// registrant and member count are fixed after registration.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ModifyCommunity {
    #[serde(rename = "type")]
    pub community_type: Option<CommunityType>,
    pub thumbnail: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Acting user; must be an admin
    pub modifier: Option<i32>,
}

/// DTO for joining a community
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct JoinMember {
    pub user_id: i32,
    pub registrant: Option<i32>,
    pub secret_number: Option<String>,
}

/// Query parameters carrying the acting user of a delete
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct DeleteParams {
    pub user_id: Option<i32>,
}

/// Result of a membership check or a leave
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MembershipStatus {
    pub community_id: i32,
    pub user_id: i32,
    pub is_member: bool,
}

impl Community {
    /// Create a new community from a registration; `member_count` starts at 0
    pub fn new(id: i32, input: RegisterCommunity, registrant: i32, now: DateTime<Utc>) -> Self {
        Self {
            id,
            community_type: input.community_type,
            thumbnail: input.thumbnail,
            name: input.name,
            description: input.description,
            manager_id: input.manager_id,
            manager_name: input.manager_name,
            manager_email: input.manager_email,
            member_count: 0,
            registered_time: now,
            registrant,
            modified_time: now,
            modifier: registrant,
            secret_number: input.secret_number,
            allow_self_join: input.allow_self_join,
        }
    }

    /// Overlay the modifiable fields and stamp the modification
    pub fn apply_modification(&mut self, input: ModifyCommunity, modifier: i32, now: DateTime<Utc>) {
        if let Some(community_type) = input.community_type {
            self.community_type = community_type;
        }
        if let Some(thumbnail) = input.thumbnail {
            self.thumbnail = Some(thumbnail);
        }
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(description) = input.description {
            self.description = Some(description);
        }
        self.modifier = modifier;
        self.modified_time = now;
    }

    /// Whether `given` unlocks this community. A community without a
    /// secret can only be joined when self-join is allowed.
    pub fn accepts_secret(&self, given: Option<&str>) -> bool {
        match (self.secret_number.as_deref(), given) {
            (Some(secret), Some(given)) => secret == given,
            _ => false,
        }
    }

    pub fn can_join(&self, secret_number: Option<&str>) -> bool {
        self.allow_self_join || self.accepts_secret(secret_number)
    }

    pub fn add_member(&mut self) {
        self.member_count += 1;
    }

    /// Decrement the member count, never below zero
    pub fn remove_member(&mut self) {
        self.member_count = (self.member_count - 1).max(0);
    }
}

impl Member {
    pub fn new(
        id: i32,
        community_id: i32,
        user_id: i32,
        registrant: Option<i32>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            community_id,
            user_id,
            joined_time: now,
            registrant,
        }
    }
}
