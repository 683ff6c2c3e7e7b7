//! Dashboard command
//!
//! An all-time overview of balances, cash flow, spending categories and
//! goals. Unlike `analyze`, lists that fail to load are shown empty.

use std::path::PathBuf;

use clap::Args;

use super::{local_snapshot, CliContext};
use crate::analytics::FinancialOverview;
use crate::display::format_overview;
use crate::error::PulseResult;
use crate::services::load_overview_data;

#[derive(Args, Debug, Default)]
pub struct DashboardArgs {
    /// Use the snapshot saved by `sync` instead of the backend
    #[arg(long, conflicts_with = "input")]
    pub offline: bool,

    /// Use a snapshot file instead of the backend
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Print the overview as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the backend's AI insight
    #[arg(long)]
    pub no_ai: bool,
}

/// Handle the dashboard command
pub fn handle_dashboard_command(ctx: &CliContext, args: DashboardArgs) -> PulseResult<()> {
    let (data, insight) = match local_snapshot(ctx, args.offline, args.input.as_deref())? {
        Some(snapshot) => (load_overview_data(&snapshot)?, None),
        None => {
            let client = ctx.client()?;
            let data = load_overview_data(&client)?;
            let insight = if args.no_ai || args.json {
                None
            } else {
                match client.ai_analysis() {
                    Ok(analysis) => Some(analysis.insight),
                    Err(e) if e.is_auth_failure() => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "AI insight unavailable");
                        None
                    }
                }
            };
            (data, insight)
        }
    };

    for list in &data.missing {
        eprintln!("Warning: could not load {}; showing none.", list);
    }

    let overview = FinancialOverview::compute(&data.accounts, &data.transactions, &data.goals);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
    } else {
        print!(
            "{}",
            format_overview(
                &overview,
                ctx.symbol(),
                &ctx.settings.date_format,
                insight.as_deref()
            )
        );
    }
    Ok(())
}
