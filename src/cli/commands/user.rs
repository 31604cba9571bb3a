use clap::Subcommand;

use crate::admin::AdminSession;
use crate::api::Transport;
use crate::cli::utils::output_report;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Deactivate a user account")]
    Deactivate {
        #[arg(help = "Full user id, e.g. @spammer:matrix.org")]
        user_id: String,
        #[arg(long, help = "Reason recorded in the log")]
        reason: String,
    },
}

pub async fn handle<T: Transport>(
    cmd: UserCommands,
    admin: &AdminSession<T>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Deactivate { user_id, reason } => {
            let report = admin.deactivate_user(&user_id, &reason).await?;
            output_report(&output_format, &report)
        }
    }
}
