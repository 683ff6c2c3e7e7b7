//! Notification CLI commands

use clap::Subcommand;

use super::CliContext;
use crate::display::format_notification_list;
use crate::error::PulseResult;
use crate::models::NotificationKind;
use crate::services::notification::unread_count;
use crate::services::NotificationService;

/// Notification subcommands
#[derive(Subcommand)]
pub enum NotificationCommands {
    /// List notifications
    List,

    /// Post a notification
    Add {
        message: String,
        /// warning, success or info
        #[arg(short = 't', long = "type", default_value = "info")]
        kind: String,
    },
}

/// Handle a notification command
pub fn handle_notification_command(ctx: &CliContext, cmd: NotificationCommands) -> PulseResult<()> {
    let client = ctx.client()?;
    let service = NotificationService::new(&client);

    match cmd {
        NotificationCommands::List => {
            let notifications = service.list()?;
            print!(
                "{}",
                format_notification_list(&notifications, &ctx.settings.date_format)
            );
            if !notifications.is_empty() {
                println!("\n{} unread", unread_count(&notifications));
            }
        }
        NotificationCommands::Add { message, kind } => {
            let created = service.create(NotificationKind::parse(&kind), &message)?;
            println!("Posted {} notification (ID: {})", created.kind, created.id);
        }
    }

    Ok(())
}
