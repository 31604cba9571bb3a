use async_trait::async_trait;
use uuid::Uuid;

use crate::api::{AdminApi, Transport};
use crate::error::{AdminError, AdminResult};
use crate::events::{AdminEvent, EventSink};
use crate::session::MatrixSession;

/// Mirrors every event into a chat room as a preformatted block.
///
/// The room is joined once at construction. Each event is also passed on to
/// `inner`, so the room is a copy of the log rather than a replacement.
pub struct RoomSink<T> {
    api: AdminApi<T>,
    session: MatrixSession,
    room_id: String,
    inner: Box<dyn EventSink>,
}

impl<T: Transport> RoomSink<T> {
    pub async fn join(
        api: AdminApi<T>,
        session: MatrixSession,
        room: &str,
        inner: Box<dyn EventSink>,
    ) -> AdminResult<Self> {
        let response = api.join_room(session.token(), room, &session.homeserver).await?;
        if !response.is_success() {
            return Err(AdminError::config(format!(
                "cannot join log room '{}' ({}): {}",
                room, response.status, response.body
            )));
        }
        // Aliases resolve to the joined room id
        let room_id = response.str_field("room_id").unwrap_or_else(|| room.to_string());

        tracing::debug!("Mirroring admin events into {}", room_id);

        Ok(Self {
            api,
            session,
            room_id,
            inner,
        })
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[async_trait]
impl<T: Transport> EventSink for RoomSink<T> {
    async fn emit(&self, event: &AdminEvent) {
        self.inner.emit(event).await;

        let html = format!("<pre><code>{}</code></pre>", escape_html(&event.message));
        let txn_id = Uuid::new_v4().simple().to_string();
        let sent = self
            .api
            .send_html_message(
                self.session.token(),
                &self.room_id,
                &txn_id,
                &event.message,
                &html,
                &self.session.homeserver,
            )
            .await;

        match sent {
            Ok(response) if response.is_success() => {}
            Ok(response) => tracing::warn!(
                "Failed to mirror event into {} ({}): {}",
                self.room_id,
                response.status,
                response.body
            ),
            Err(e) => tracing::warn!("Failed to mirror event into {}: {}", self.room_id, e),
        }
    }
}
