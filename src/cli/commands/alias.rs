use clap::Subcommand;

use crate::admin::AdminSession;
use crate::api::Transport;
use crate::cli::utils::{output_report, output_resolved};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AliasCommands {
    #[command(about = "Move an alias off its room and onto a parking room")]
    Park {
        #[arg(help = "Alias, e.g. #room:matrix.org")]
        alias: String,
        #[arg(long, help = "Reason recorded in the log")]
        reason: String,
        #[arg(long, help = "Parking room id (defaults to MATRIX_PARKING_ROOM)")]
        parking_room: Option<String>,
    },

    #[command(about = "Point an alias at a room")]
    Assign {
        #[arg(help = "Target room id")]
        room_id: String,
        #[arg(help = "Alias to assign")]
        alias: String,
        #[arg(long, help = "Reason recorded in the log")]
        reason: String,
    },

    #[command(about = "Delete an alias")]
    Delete {
        #[arg(help = "Alias to delete")]
        alias: String,
        #[arg(long, help = "Reason recorded in the log")]
        reason: String,
    },

    #[command(about = "Show the room an alias points to")]
    Resolve {
        #[arg(help = "Alias to resolve")]
        alias: String,
    },
}

pub async fn handle<T: Transport>(
    cmd: AliasCommands,
    admin: &AdminSession<T>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        AliasCommands::Park { alias, reason, parking_room } => {
            let report = admin
                .park_alias(&alias, &reason, parking_room.as_deref())
                .await?;
            output_report(&output_format, &report)
        }
        AliasCommands::Assign { room_id, alias, reason } => {
            let report = admin.assign_alias(&room_id, &alias, &reason).await?;
            output_report(&output_format, &report)
        }
        AliasCommands::Delete { alias, reason } => {
            let report = admin.delete_alias(&alias, &reason).await?;
            output_report(&output_format, &report)
        }
        AliasCommands::Resolve { alias } => {
            let room_id = admin.resolve_alias(&alias).await?;
            output_resolved(&output_format, &alias, room_id.as_deref())
        }
    }
}
