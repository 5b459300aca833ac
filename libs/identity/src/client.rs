use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::IdentityConfig;

/// Answers "does this user exist" and "is this user an admin".
///
/// Implementations never fail: anything that prevents a definite
/// positive answer is reported as `false`.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn check_user_exists(&self, user_id: i32) -> bool;

    async fn check_user_is_admin(&self, user_id: i32) -> bool;
}

/// Envelope returned by the identity service
#[derive(Debug, Deserialize)]
struct CheckResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<bool>,
}

/// [`IdentityClient`] backed by the identity service's REST API
#[derive(Clone, Debug)]
pub struct HttpIdentityClient {
    client: Client,
    base_url: String,
}

impl HttpIdentityClient {
    pub fn new(config: IdentityConfig) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn check(&self, endpoint: &str, user_id: i32) -> bool {
        let url = format!("{}/user/client/{}/{}", self.base_url, endpoint, user_id);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(user_id, url = %url, error = %e, "Identity service request failed");
                return false;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(user_id, url = %url, status = %status, "Identity service returned an error status");
            return false;
        }

        match response.json::<CheckResponse>().await {
            Ok(body) => {
                let confirmed = body.success && body.data == Some(true);
                if !confirmed {
                    debug!(
                        user_id,
                        endpoint,
                        message = body.message.as_deref().unwrap_or_default(),
                        "Identity check not confirmed"
                    );
                }
                confirmed
            }
            Err(e) => {
                warn!(user_id, url = %url, error = %e, "Identity service returned a malformed body");
                false
            }
        }
    }
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn check_user_exists(&self, user_id: i32) -> bool {
        self.check("check", user_id).await
    }

    async fn check_user_is_admin(&self, user_id: i32) -> bool {
        self.check("checkAdmin", user_id).await
    }
}
