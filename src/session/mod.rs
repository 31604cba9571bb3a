use serde::{Deserialize, Serialize};

use crate::api::{AdminApi, Transport};
use crate::error::{AdminError, AdminResult};

/// A logged-in admin account. The token is never refreshed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixSession {
    pub homeserver: String,
    pub access_token: String,
    pub user_id: String,
    #[serde(default)]
    pub device_id: Option<String>,
}

/// Response from the password login endpoint
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    user_id: String,
    #[serde(default)]
    device_id: Option<String>,
}

impl MatrixSession {
    /// Log in with a password, without syncing
    pub async fn login<T: Transport>(
        api: &AdminApi<T>,
        homeserver: &str,
        username: &str,
        password: &str,
    ) -> AdminResult<Self> {
        let response = api.login(username, password, homeserver).await?;

        if !response.is_success() {
            return Err(AdminError::Login {
                status: response.status,
                body: response.body,
            });
        }

        let login: LoginResponse =
            serde_json::from_str(&response.body).map_err(|_| AdminError::Login {
                status: response.status,
                body: response.body.clone(),
            })?;

        tracing::info!("Logged in to {} as {}", homeserver, login.user_id);

        Ok(Self {
            homeserver: homeserver.trim_end_matches('/').to_string(),
            access_token: login.access_token,
            user_id: login.user_id,
            device_id: login.device_id,
        })
    }

    /// Wrap a token obtained elsewhere
    pub fn from_token(
        homeserver: impl Into<String>,
        user_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        let homeserver: String = homeserver.into();
        Self {
            homeserver: homeserver.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            user_id: user_id.into(),
            device_id: None,
        }
    }

    pub fn token(&self) -> &str {
        &self.access_token
    }
}
