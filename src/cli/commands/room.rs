use clap::Subcommand;

use crate::admin::AdminSession;
use crate::api::Transport;
use crate::cli::utils::output_report;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum RoomCommands {
    #[command(about = "Remove a room from the public room directory")]
    Delist {
        #[arg(help = "Room id")]
        room_id: String,
        #[arg(long, help = "Reason recorded in the log")]
        reason: String,
    },

    #[command(about = "Shut a room down and quarantine its media")]
    Shutdown {
        #[arg(help = "Room id")]
        room_id: String,
        #[arg(long, help = "Reason recorded in the log")]
        reason: String,
        #[arg(long, help = "Notice posted to evicted members")]
        message: Option<String>,
        #[arg(long, help = "Name of the room members are moved to")]
        room_name: Option<String>,
    },
}

pub async fn handle<T: Transport>(
    cmd: RoomCommands,
    admin: &AdminSession<T>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        RoomCommands::Delist { room_id, reason } => {
            let report = admin.delist_room(&room_id, &reason).await?;
            output_report(&output_format, &report)
        }
        RoomCommands::Shutdown { room_id, reason, message, room_name } => {
            let report = admin
                .shutdown_room_and_quarantine_media(
                    &room_id,
                    &reason,
                    message.as_deref(),
                    room_name.as_deref(),
                )
                .await?;
            output_report(&output_format, &report)
        }
    }
}
