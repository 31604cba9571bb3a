//! Homeserver admin endpoints.
//!
//! One method per endpoint. Every identifier placed in a path is
//! percent-encoded, and the access token goes either into an
//! `Authorization: Bearer` header or the `access_token` query parameter,
//! whichever the endpoint historically accepts.

pub mod transport;
pub mod types;

use reqwest::Method;
use serde_json::json;

use crate::error::AdminResult;
pub use transport::{ReqwestTransport, Transport};
pub use types::{AdminRequest, AdminResponse};

const CLIENT_PREFIX: &str = "_matrix/client/r0";

/// Percent-encode one path segment (room id, alias or user id)
pub fn escape(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Full URL of a client-server endpoint below `homeserver`
pub fn endpoint(homeserver: &str, path: &str) -> String {
    format!("{}/{}/{}", homeserver.trim_end_matches('/'), CLIENT_PREFIX, path)
}

/// Stateless admin API service. Holds nothing but the transport.
#[derive(Debug, Clone)]
pub struct AdminApi<T> {
    transport: T,
}

impl Default for AdminApi<ReqwestTransport> {
    fn default() -> Self {
        Self::new(ReqwestTransport::new())
    }
}

impl<T: Transport> AdminApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Remove a room from the public room directory
    pub async fn delete_room_listing(
        &self,
        access_token: &str,
        room_id: &str,
        homeserver: &str,
    ) -> AdminResult<AdminResponse> {
        let url = endpoint(homeserver, &format!("directory/list/room/{}", escape(room_id)));
        self.transport
            .send(AdminRequest::new(Method::DELETE, url).bearer(access_token))
            .await
    }

    /// Look up the room an alias points to.
    ///
    /// The directory lookup is sent without credentials.
    pub async fn get_alias(
        &self,
        _access_token: &str,
        alias: &str,
        homeserver: &str,
    ) -> AdminResult<AdminResponse> {
        let url = endpoint(homeserver, &format!("directory/room/{}", escape(alias)));
        self.transport.send(AdminRequest::new(Method::GET, url)).await
    }

    pub async fn delete_alias(
        &self,
        access_token: &str,
        alias: &str,
        homeserver: &str,
    ) -> AdminResult<AdminResponse> {
        let url = endpoint(homeserver, &format!("directory/room/{}", escape(alias)));
        self.transport
            .send(AdminRequest::new(Method::DELETE, url).access_token(access_token))
            .await
    }

    /// Point `alias` at `room_id`
    pub async fn put_alias(
        &self,
        access_token: &str,
        alias: &str,
        room_id: &str,
        homeserver: &str,
    ) -> AdminResult<AdminResponse> {
        let url = endpoint(homeserver, &format!("directory/room/{}", escape(alias)));
        let request = AdminRequest::new(Method::PUT, url)
            .access_token(access_token)
            .json(json!({ "room_id": room_id }));
        self.transport.send(request).await
    }

    /// Evict everyone from `room_id` into a new room owned by `user_id`
    pub async fn shutdown_room(
        &self,
        access_token: &str,
        user_id: &str,
        room_id: &str,
        message: &str,
        new_room_name: &str,
        homeserver: &str,
    ) -> AdminResult<AdminResponse> {
        let url = endpoint(homeserver, &format!("admin/shutdown_room/{}", escape(room_id)));
        let request = AdminRequest::new(Method::POST, url)
            .access_token(access_token)
            .json(json!({
                "new_room_user_id": user_id,
                "message": message,
                "room_name": new_room_name,
            }));
        self.transport.send(request).await
    }

    pub async fn quarantine_media(
        &self,
        access_token: &str,
        room_id: &str,
        homeserver: &str,
    ) -> AdminResult<AdminResponse> {
        let url = endpoint(homeserver, &format!("admin/quarantine_media/{}", escape(room_id)));
        self.transport
            .send(AdminRequest::new(Method::POST, url).access_token(access_token))
            .await
    }

    pub async fn deactivate_user(
        &self,
        access_token: &str,
        user_id: &str,
        homeserver: &str,
    ) -> AdminResult<AdminResponse> {
        let url = endpoint(homeserver, &format!("admin/deactivate/{}", escape(user_id)));
        self.transport
            .send(AdminRequest::new(Method::POST, url).bearer(access_token))
            .await
    }

    /// Password login. Does not start a sync.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        homeserver: &str,
    ) -> AdminResult<AdminResponse> {
        let request = AdminRequest::new(Method::POST, endpoint(homeserver, "login")).json(json!({
            "type": "m.login.password",
            "user": username,
            "password": password,
        }));
        self.transport.send(request).await
    }

    pub async fn join_room(
        &self,
        access_token: &str,
        room_id_or_alias: &str,
        homeserver: &str,
    ) -> AdminResult<AdminResponse> {
        let url = endpoint(homeserver, &format!("join/{}", escape(room_id_or_alias)));
        self.transport
            .send(AdminRequest::new(Method::POST, url).bearer(access_token))
            .await
    }

    /// Send an `m.text` message carrying both a plain and an HTML body
    pub async fn send_html_message(
        &self,
        access_token: &str,
        room_id: &str,
        txn_id: &str,
        plain: &str,
        html: &str,
        homeserver: &str,
    ) -> AdminResult<AdminResponse> {
        let url = endpoint(
            homeserver,
            &format!(
                "rooms/{}/send/m.room.message/{}",
                escape(room_id),
                escape(txn_id)
            ),
        );
        let request = AdminRequest::new(Method::PUT, url)
            .bearer(access_token)
            .json(json!({
                "msgtype": "m.text",
                "body": plain,
                "format": "org.matrix.custom.html",
                "formatted_body": html,
            }));
        self.transport.send(request).await
    }
}
