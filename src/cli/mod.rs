pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::admin::{AdminSession, WorkflowDefaults};
use crate::api::{AdminApi, ReqwestTransport};
use crate::config::AdminConfig;
use crate::events::{RoomSink, TracingSink};

#[derive(Parser)]
#[command(name = "mxadmin")]
#[command(about = "mxadmin - moderation client for the Matrix homeserver admin API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Homeserver base URL (overrides MATRIX_HOMESERVER)")]
    pub homeserver: Option<String>,

    #[arg(long, global = true, help = "Admin username (overrides MATRIX_ADMIN_USER)")]
    pub user: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Admin password; visible in the process list, prefer MATRIX_ADMIN_PASSWORD or .env"
    )]
    pub password: Option<String>,

    #[arg(long, global = true, help = "Room that receives a copy of every outcome line")]
    pub log_room: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "User account moderation")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Room directory alias management")]
    Alias {
        #[command(subcommand)]
        cmd: commands::alias::AliasCommands,
    },

    #[command(about = "Room delisting and shutdown")]
    Room {
        #[command(subcommand)]
        cmd: commands::room::RoomCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

impl Cli {
    /// Environment config with command line flags layered on top
    pub fn config(&self) -> AdminConfig {
        let mut config = crate::config::config().clone();
        if let Some(homeserver) = &self.homeserver {
            config.homeserver = homeserver.clone();
        }
        if let Some(user) = &self.user {
            config.username = Some(user.clone());
        }
        if let Some(password) = &self.password {
            config.password = Some(password.clone());
        }
        if let Some(room) = &self.log_room {
            config.log_room = Some(room.clone());
        }
        config
    }
}

/// Log in and, when a log room is configured, mirror events into it
pub async fn connect(config: &AdminConfig) -> anyhow::Result<AdminSession<ReqwestTransport>> {
    config.validate()?;

    let api = AdminApi::default();
    let admin = AdminSession::login(
        api.clone(),
        &config.homeserver,
        config.username()?,
        config.password()?,
    )
    .await?
    .with_defaults(WorkflowDefaults::from(config));

    match &config.log_room {
        Some(room) => {
            let sink = RoomSink::join(api, admin.session().clone(), room, Box::new(TracingSink)).await?;
            Ok(admin.with_events(Arc::new(sink)))
        }
        None => Ok(admin),
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = cli.config();
    let admin = connect(&config).await?;

    match cli.command {
        Commands::User { cmd } => commands::user::handle(cmd, &admin, output_format).await,
        Commands::Alias { cmd } => commands::alias::handle(cmd, &admin, output_format).await,
        Commands::Room { cmd } => commands::room::handle(cmd, &admin, output_format).await,
    }
}
