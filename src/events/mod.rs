//! Structured outcome events.
//!
//! Admin workflows never touch the global logger directly; they emit
//! `AdminEvent`s into whatever `EventSink` the session was built with.

pub mod room;

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use room::RoomSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminEvent {
    pub level: EventLevel,
    pub message: String,
    pub fields: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl AdminEvent {
    pub fn new(level: EventLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: Map::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(EventLevel::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(EventLevel::Error, message)
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: &AdminEvent);
}

/// Forwards events to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl EventSink for TracingSink {
    async fn emit(&self, event: &AdminEvent) {
        let fields = Value::Object(event.fields.clone());
        match event.level {
            EventLevel::Info => tracing::info!(fields = %fields, "{}", event.message),
            EventLevel::Error => tracing::error!(fields = %fields, "{}", event.message),
        }
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AdminEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AdminEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn at_level(&self, level: EventLevel) -> Vec<AdminEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn emit(&self, event: &AdminEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
