use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

use crate::admin::{DEFAULT_PARKING_ROOM, DEFAULT_SHUTDOWN_MESSAGE, DEFAULT_SHUTDOWN_ROOM_NAME};
use crate::error::{AdminError, AdminResult};

pub const DEFAULT_HOMESERVER: &str = "https://matrix.org";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub homeserver: String,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Room (id or alias) that receives a copy of every outcome line
    pub log_room: Option<String>,
    pub parking_room_id: String,
    pub shutdown_room_name: String,
    pub shutdown_message: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            homeserver: DEFAULT_HOMESERVER.to_string(),
            username: None,
            password: None,
            log_room: None,
            parking_room_id: DEFAULT_PARKING_ROOM.to_string(),
            shutdown_room_name: DEFAULT_SHUTDOWN_ROOM_NAME.to_string(),
            shutdown_message: DEFAULT_SHUTDOWN_MESSAGE.to_string(),
        }
    }
}

impl AdminConfig {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply `MATRIX_*` overrides read through `var`
    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = var("MATRIX_HOMESERVER") {
            self.homeserver = v;
        }
        if let Some(v) = var("MATRIX_ADMIN_USER") {
            self.username = Some(v);
        }
        if let Some(v) = var("MATRIX_ADMIN_PASSWORD") {
            self.password = Some(v);
        }
        if let Some(v) = var("MATRIX_LOG_ROOM") {
            self.log_room = Some(v).filter(|room| !room.is_empty());
        }

        // Workflow defaults
        if let Some(v) = var("MATRIX_PARKING_ROOM") {
            self.parking_room_id = v;
        }
        if let Some(v) = var("MATRIX_SHUTDOWN_ROOM_NAME") {
            self.shutdown_room_name = v;
        }
        if let Some(v) = var("MATRIX_SHUTDOWN_MESSAGE") {
            self.shutdown_message = v;
        }

        self
    }

    /// Check the homeserver is an absolute http(s) URL
    pub fn validate(&self) -> AdminResult<()> {
        let url = Url::parse(&self.homeserver)
            .map_err(|e| AdminError::config(format!("homeserver '{}': {}", self.homeserver, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(AdminError::config(format!(
                "homeserver '{}': unsupported scheme '{}'",
                self.homeserver, other
            ))),
        }
    }

    pub fn username(&self) -> AdminResult<&str> {
        self.username
            .as_deref()
            .ok_or(AdminError::MissingCredential("username (MATRIX_ADMIN_USER or --user)"))
    }

    pub fn password(&self) -> AdminResult<&str> {
        self.password
            .as_deref()
            .ok_or(AdminError::MissingCredential("password (MATRIX_ADMIN_PASSWORD or --password)"))
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AdminConfig> = Lazy::new(AdminConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AdminConfig {
    &CONFIG
}
