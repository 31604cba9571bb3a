//! Moderation workflows on top of the admin API.
//!
//! Every workflow issues its calls in a fixed order and never short-circuits:
//! a failed step is reported (info line plus raw body at error level) and the
//! next step still runs. Only transport failures abort a workflow.

pub mod report;

use std::sync::Arc;

use crate::api::{AdminApi, AdminResponse, Transport};
use crate::config::AdminConfig;
use crate::error::AdminResult;
use crate::events::{AdminEvent, EventSink, TracingSink};
use crate::session::MatrixSession;

pub use report::{AdminAction, StepOutcome, StepResult, WorkflowReport};

pub const DEFAULT_PARKING_ROOM: &str = "!GrRRLYVADFUBjqnEwX:matrix.org";
pub const DEFAULT_SHUTDOWN_ROOM_NAME: &str = "Room unavailable";
pub const DEFAULT_SHUTDOWN_MESSAGE: &str =
    "This room has been removed from the matrix.org homeserver due to violating the terms of use.";

/// Rendering of a room id the alias lookup could not produce
const UNRESOLVED: &str = "null";

/// Values substituted when a workflow caller leaves them out
#[derive(Debug, Clone)]
pub struct WorkflowDefaults {
    pub parking_room_id: String,
    pub shutdown_room_name: String,
    pub shutdown_message: String,
}

impl Default for WorkflowDefaults {
    fn default() -> Self {
        Self {
            parking_room_id: DEFAULT_PARKING_ROOM.to_string(),
            shutdown_room_name: DEFAULT_SHUTDOWN_ROOM_NAME.to_string(),
            shutdown_message: DEFAULT_SHUTDOWN_MESSAGE.to_string(),
        }
    }
}

impl From<&AdminConfig> for WorkflowDefaults {
    fn from(config: &AdminConfig) -> Self {
        Self {
            parking_room_id: config.parking_room_id.clone(),
            shutdown_room_name: config.shutdown_room_name.clone(),
            shutdown_message: config.shutdown_message.clone(),
        }
    }
}

/// One authenticated admin session.
pub struct AdminSession<T> {
    session: MatrixSession,
    api: AdminApi<T>,
    events: Arc<dyn EventSink>,
    defaults: WorkflowDefaults,
}

impl<T: Transport> AdminSession<T> {
    pub fn new(session: MatrixSession, api: AdminApi<T>, events: Arc<dyn EventSink>) -> Self {
        Self {
            session,
            api,
            events,
            defaults: WorkflowDefaults::default(),
        }
    }

    /// Log in and emit outcomes through `tracing`
    pub async fn login(
        api: AdminApi<T>,
        homeserver: &str,
        username: &str,
        password: &str,
    ) -> AdminResult<Self> {
        let session = MatrixSession::login(&api, homeserver, username, password).await?;
        Ok(Self::new(session, api, Arc::new(TracingSink)))
    }

    pub fn with_defaults(mut self, defaults: WorkflowDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn session(&self) -> &MatrixSession {
        &self.session
    }

    fn token(&self) -> &str {
        self.session.token()
    }

    fn homeserver(&self) -> &str {
        &self.session.homeserver
    }

    /// Emit the outcome line for one step, plus the raw body when it failed
    async fn record(
        &self,
        action: AdminAction,
        target: &str,
        response: AdminResponse,
        description: String,
        reason: &str,
    ) -> StepResult {
        let step = StepResult::new(action, target, response);

        let line = format!("{}: {}\nReason: {}", description, step.outcome().label(), reason);
        self.events
            .emit(
                &AdminEvent::info(line)
                    .with_field("action", action.as_str())
                    .with_field("target", target)
                    .with_field("status", step.status)
                    .with_field("reason", reason),
            )
            .await;

        if !step.is_success() {
            self.events
                .emit(
                    &AdminEvent::error(step.body.clone())
                        .with_field("action", action.as_str())
                        .with_field("status", step.status),
                )
                .await;
        }

        step
    }

    /// Alias lookup shared by the alias workflows; emits nothing
    async fn lookup_alias(&self, alias: &str) -> AdminResult<(Option<String>, StepResult)> {
        let response = self.api.get_alias(self.token(), alias, self.homeserver()).await?;
        let room_id = response.str_field("room_id");
        if room_id.is_none() {
            tracing::debug!("Alias '{}' did not resolve ({})", alias, response.status);
        }
        Ok((room_id, StepResult::new(AdminAction::ResolveAlias, alias, response)))
    }

    pub async fn deactivate_user(&self, user_id: &str, reason: &str) -> AdminResult<WorkflowReport> {
        let mut report = WorkflowReport::new("deactivate_user", Some(reason));

        let response = self
            .api
            .deactivate_user(self.token(), user_id, self.homeserver())
            .await?;
        let step = self
            .record(
                AdminAction::DeactivateUser,
                user_id,
                response,
                format!("Deactivating account '{}'", user_id),
                reason,
            )
            .await;
        report.push(step);

        Ok(report)
    }

    /// Take an alias away from its room and point it at a parking room.
    ///
    /// The re-assignment is attempted even if the removal failed.
    pub async fn park_alias(
        &self,
        alias: &str,
        reason: &str,
        parking_room_id: Option<&str>,
    ) -> AdminResult<WorkflowReport> {
        let parking_room_id = parking_room_id.unwrap_or(self.defaults.parking_room_id.as_str());
        let mut report = WorkflowReport::new("park_alias", Some(reason));

        let (room_id, lookup) = self.lookup_alias(alias).await?;
        report.room_id = room_id.clone();
        report.lookup = Some(lookup);

        let response = self.api.delete_alias(self.token(), alias, self.homeserver()).await?;
        let step = self
            .record(
                AdminAction::DeleteAlias,
                alias,
                response,
                format!(
                    "Removing alias '{}' from '{}'",
                    alias,
                    room_id.as_deref().unwrap_or(UNRESOLVED)
                ),
                reason,
            )
            .await;
        report.push(step);

        let response = self
            .api
            .put_alias(self.token(), alias, parking_room_id, self.homeserver())
            .await?;
        let step = self
            .record(
                AdminAction::PutAlias,
                alias,
                response,
                format!("Parking alias '{}' (parking spot: '{}')", alias, parking_room_id),
                reason,
            )
            .await;
        report.push(step);

        Ok(report)
    }

    pub async fn assign_alias(
        &self,
        room_id: &str,
        alias: &str,
        reason: &str,
    ) -> AdminResult<WorkflowReport> {
        let mut report = WorkflowReport::new("assign_alias", Some(reason));
        report.room_id = Some(room_id.to_string());

        let response = self
            .api
            .put_alias(self.token(), alias, room_id, self.homeserver())
            .await?;
        let step = self
            .record(
                AdminAction::PutAlias,
                alias,
                response,
                format!("Assigning alias '{}' to '{}'", alias, room_id),
                reason,
            )
            .await;
        report.push(step);

        Ok(report)
    }

    pub async fn delete_alias(&self, alias: &str, reason: &str) -> AdminResult<WorkflowReport> {
        let mut report = WorkflowReport::new("delete_alias", Some(reason));

        let (room_id, lookup) = self.lookup_alias(alias).await?;
        report.room_id = room_id.clone();
        report.lookup = Some(lookup);

        let response = self.api.delete_alias(self.token(), alias, self.homeserver()).await?;
        let step = self
            .record(
                AdminAction::DeleteAlias,
                alias,
                response,
                format!(
                    "Deleting alias '{}' from '{}'",
                    alias,
                    room_id.as_deref().unwrap_or(UNRESOLVED)
                ),
                reason,
            )
            .await;
        report.push(step);

        Ok(report)
    }

    /// Room id an alias currently points to, `None` if the lookup failed
    pub async fn resolve_alias(&self, alias: &str) -> AdminResult<Option<String>> {
        let (room_id, step) = self.lookup_alias(alias).await?;
        self.events
            .emit(
                &AdminEvent::info(format!(
                    "Resolving alias '{}' to '{}': {}",
                    alias,
                    room_id.as_deref().unwrap_or(UNRESOLVED),
                    step.outcome().label()
                ))
                .with_field("action", AdminAction::ResolveAlias.as_str())
                .with_field("target", alias)
                .with_field("status", step.status),
            )
            .await;

        if !step.is_success() {
            self.events
                .emit(
                    &AdminEvent::error(step.body)
                        .with_field("action", AdminAction::ResolveAlias.as_str())
                        .with_field("status", step.status),
                )
                .await;
        }

        Ok(room_id)
    }

    /// Remove a room from the public directory
    pub async fn delist_room(&self, room_id: &str, reason: &str) -> AdminResult<WorkflowReport> {
        let mut report = WorkflowReport::new("delist_room", Some(reason));
        report.room_id = Some(room_id.to_string());

        let response = self
            .api
            .delete_room_listing(self.token(), room_id, self.homeserver())
            .await?;
        let step = self
            .record(
                AdminAction::DelistRoom,
                room_id,
                response,
                format!("Delisting room '{}'", room_id),
                reason,
            )
            .await;
        report.push(step);

        Ok(report)
    }

    /// Shut the room down, then quarantine its media regardless of how the
    /// shutdown went.
    pub async fn shutdown_room_and_quarantine_media(
        &self,
        room_id: &str,
        reason: &str,
        message: Option<&str>,
        new_room_name: Option<&str>,
    ) -> AdminResult<WorkflowReport> {
        let message = message.unwrap_or(self.defaults.shutdown_message.as_str());
        let new_room_name = new_room_name.unwrap_or(self.defaults.shutdown_room_name.as_str());
        let mut report = WorkflowReport::new("shutdown_room_and_quarantine_media", Some(reason));
        report.room_id = Some(room_id.to_string());

        let response = self
            .api
            .shutdown_room(
                self.token(),
                &self.session.user_id,
                room_id,
                message,
                new_room_name,
                self.homeserver(),
            )
            .await?;
        let step = self
            .record(
                AdminAction::ShutdownRoom,
                room_id,
                response,
                format!(
                    "Shutting down room '{}' (new room name '{}'; message: '{}')",
                    room_id, new_room_name, message
                ),
                reason,
            )
            .await;
        report.push(step);

        let response = self
            .api
            .quarantine_media(self.token(), room_id, self.homeserver())
            .await?;
        let quarantined = response.u64_field("num_quarantined").unwrap_or(0);
        report.num_quarantined = Some(quarantined);
        let step = self
            .record(
                AdminAction::QuarantineMedia,
                room_id,
                response,
                format!(
                    "Quarantining media in '{}'; quarantining {} items",
                    room_id, quarantined
                ),
                reason,
            )
            .await;
        report.push(step);

        Ok(report)
    }
}
