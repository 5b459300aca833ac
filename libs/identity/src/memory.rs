use async_trait::async_trait;
use std::collections::HashSet;

use crate::IdentityClient;

/// [`IdentityClient`] with a fixed set of users and admins.
///
/// Admins are users too.
#[derive(Clone, Debug, Default)]
pub struct InMemoryIdentityClient {
    users: HashSet<i32>,
    admins: HashSet<i32>,
}

impl InMemoryIdentityClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: i32) -> Self {
        self.users.insert(user_id);
        self
    }

    pub fn with_admin(mut self, user_id: i32) -> Self {
        self.users.insert(user_id);
        self.admins.insert(user_id);
        self
    }
}

#[async_trait]
impl IdentityClient for InMemoryIdentityClient {
    async fn check_user_exists(&self, user_id: i32) -> bool {
        self.users.contains(&user_id)
    }

    async fn check_user_is_admin(&self, user_id: i32) -> bool {
        self.admins.contains(&user_id)
    }
}
