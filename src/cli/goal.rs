//! Savings goal CLI commands

use chrono::Local;
use clap::Subcommand;

use super::transaction::{parse_amount, parse_date};
use super::CliContext;
use crate::display::format_goal_list;
use crate::error::PulseResult;
use crate::services::goal::find_goal;
use crate::services::GoalService;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List goals with their progress
    List,

    /// Create a goal
    Add {
        /// What you are saving for
        title: String,
        /// Target amount (e.g., "5000")
        target: String,
        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Put money toward a goal
    Contribute {
        /// Goal ID or title
        goal: String,
        /// Amount to add (e.g., "250")
        amount: String,
    },

    /// Delete a goal
    Delete {
        /// Goal ID or title
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(ctx: &CliContext, cmd: GoalCommands) -> PulseResult<()> {
    let client = ctx.client()?;
    let service = GoalService::new(&client);

    match cmd {
        GoalCommands::List => {
            let goals = service.list()?;
            let today = Local::now().date_naive();
            print!(
                "{}",
                format_goal_list(&goals, ctx.symbol(), &ctx.settings.date_format, today)
            );
        }
        GoalCommands::Add {
            title,
            target,
            date,
        } => {
            let target = parse_amount(&target)?;
            let date = date.as_deref().map(parse_date).transpose()?;
            let goal = service.create(&title, target, date)?;
            println!(
                "Created goal: {} (target {})",
                goal.title,
                ctx.settings.format_money(goal.target_amount)
            );
            println!("  ID: {}", goal.id);
        }
        GoalCommands::Contribute { goal, amount } => {
            let amount = parse_amount(&amount)?;
            let goals = service.list()?;
            let current = find_goal(&goals, &goal)?;
            let updated = service.contribute(current, amount)?;
            println!(
                "Added {} to {}: {} of {} ({}%)",
                ctx.settings.format_money(amount),
                updated.title,
                ctx.settings.format_money(updated.current_amount),
                ctx.settings.format_money(updated.target_amount),
                updated.progress_percent()
            );
            if updated.is_complete() {
                println!("Goal reached!");
            }
        }
        GoalCommands::Delete { goal } => {
            let goals = service.list()?;
            let current = find_goal(&goals, &goal)?;
            service.delete(&current.id)?;
            println!("Deleted goal {}", current.title);
        }
    }

    Ok(())
}
