pub mod admin;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod session;

pub use admin::{AdminSession, WorkflowReport};
pub use api::{AdminApi, ReqwestTransport, Transport};
pub use error::{AdminError, AdminResult};
pub use session::MatrixSession;

#[cfg(test)]
pub mod testing;
