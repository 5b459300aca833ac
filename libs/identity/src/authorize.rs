use thiserror::Error;

use crate::IdentityClient;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("User id is required")]
    MissingUser,

    #[error("User {0} is not a valid user")]
    InvalidUser(i32),

    #[error("User {0} is not an admin")]
    NotAdmin(i32),
}

/// Returns the user id if it names an existing user.
pub async fn require_user<C>(client: &C, user_id: Option<i32>) -> Result<i32, AuthorizationError>
where
    C: IdentityClient + ?Sized,
{
    let user_id = user_id.ok_or(AuthorizationError::MissingUser)?;

    if client.check_user_exists(user_id).await {
        Ok(user_id)
    } else {
        Err(AuthorizationError::InvalidUser(user_id))
    }
}

/// Returns the user id if it names an admin.
pub async fn require_admin<C>(client: &C, user_id: Option<i32>) -> Result<i32, AuthorizationError>
where
    C: IdentityClient + ?Sized,
{
    let user_id = user_id.ok_or(AuthorizationError::MissingUser)?;

    if client.check_user_is_admin(user_id).await {
        Ok(user_id)
    } else {
        Err(AuthorizationError::NotAdmin(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryIdentityClient;
    use std::sync::Arc;

    fn identity() -> InMemoryIdentityClient {
        InMemoryIdentityClient::new().with_admin(1).with_user(2)
    }

    #[tokio::test]
    async fn test_require_user() {
        let client = identity();

        assert_eq!(require_user(&client, Some(2)).await, Ok(2));
        assert_eq!(require_user(&client, Some(1)).await, Ok(1));
        assert_eq!(
            require_user(&client, Some(9)).await,
            Err(AuthorizationError::InvalidUser(9))
        );
        assert_eq!(
            require_user(&client, None).await,
            Err(AuthorizationError::MissingUser)
        );
    }

    #[tokio::test]
    async fn test_require_admin() {
        let client = identity();

        assert_eq!(require_admin(&client, Some(1)).await, Ok(1));
        assert_eq!(
            require_admin(&client, Some(2)).await,
            Err(AuthorizationError::NotAdmin(2))
        );
        assert_eq!(
            require_admin(&client, None).await,
            Err(AuthorizationError::MissingUser)
        );
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let client: Arc<dyn IdentityClient> = Arc::new(identity());
        assert_eq!(require_admin(client.as_ref(), Some(1)).await, Ok(1));
    }
}
