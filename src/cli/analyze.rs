//! Analysis CLI commands
//!
//! `analyze`, `insights` and `check-purchase` compute locally from a freshly
//! loaded dataset (or a snapshot); `ai` and `analyze --server` show what the
//! backend computes. `sync` saves the dataset for offline use.

use std::path::PathBuf;

use chrono::Utc;
use clap::Args;

use super::{CliContext, DataArgs};
use crate::analytics::{AnalysisContext, BudgetAnalysis, BudgetAnalyticsEngine};
use crate::client::types::PurchaseRequest;
use crate::client::Session;
use crate::display::{format_ai_analysis, format_analysis, format_insights, format_purchase_check};
use crate::error::{PulseError, PulseResult};
use crate::export::export_budget_progress_file;
use crate::models::Money;
use crate::services::load_dataset;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write budget progress to a CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Show the backend's own analysis instead of computing one
    #[arg(long, conflicts_with_all = ["offline", "input", "csv"])]
    pub server: bool,
}

#[derive(Args, Debug)]
pub struct CheckPurchaseArgs {
    /// Purchase amount (e.g., "250" or "249.99")
    pub amount: String,

    /// Category the purchase would fall under
    #[arg(short, long)]
    pub category: Option<String>,

    #[command(flatten)]
    pub data: DataArgs,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Load the dataset and analyze the requested month
fn run_analysis(ctx: &CliContext, data: &DataArgs) -> PulseResult<BudgetAnalysis> {
    let month = data.month()?;
    let snapshot = data.load(ctx)?;
    Ok(BudgetAnalyticsEngine::analyze(
        &snapshot.budgets,
        &snapshot.transactions,
        &snapshot.accounts,
        &AnalysisContext::now(month),
    ))
}

pub fn handle_analyze_command(ctx: &CliContext, args: AnalyzeArgs) -> PulseResult<()> {
    if args.server {
        let month = match args.data.month {
            Some(_) => Some(args.data.month()?),
            None => None,
        };
        let value = ctx.client()?.analyze_budgets(month)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let analysis = run_analysis(ctx, &args.data)?;

    if let Some(path) = &args.csv {
        export_budget_progress_file(&analysis, path)?;
        if !args.json {
            println!("Exported {} budgets to {}", analysis.budgets.len(), path.display());
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", format_analysis(&analysis, ctx.symbol()));
    }
    Ok(())
}

pub fn handle_insights_command(ctx: &CliContext, data: DataArgs, json: bool) -> PulseResult<()> {
    let analysis = run_analysis(ctx, &data)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis.insights)?);
    } else {
        println!("Insights for {}\n", analysis.month);
        print!("{}", format_insights(&analysis.insights, ctx.symbol()));
    }
    Ok(())
}

pub fn handle_check_purchase_command(ctx: &CliContext, args: CheckPurchaseArgs) -> PulseResult<()> {
    let amount = Money::parse(&args.amount)
        .map_err(|e| PulseError::Validation(format!("Invalid amount: {}", e)))?;
    if !amount.is_positive() {
        return Err(PulseError::Validation(
            "Amount must be greater than zero".into(),
        ));
    }
    let category = args
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let check = if args.data.is_local() {
        run_analysis(ctx, &args.data)?.check_purchase(amount, category)
    } else {
        ctx.client()?.check_purchase(&PurchaseRequest {
            amount,
            category: category.map(str::to_string),
        })?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&check)?);
    } else {
        print!("{}", format_purchase_check(&check, amount, ctx.symbol()));
    }
    Ok(())
}

pub fn handle_ai_command(ctx: &CliContext, json: bool) -> PulseResult<()> {
    let analysis = ctx.client()?.ai_analysis()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", format_ai_analysis(&analysis, ctx.symbol()));
    }
    Ok(())
}

/// Fetch everything and save it as the offline snapshot
///
/// The stored profile is refreshed at the same time.
pub fn handle_sync_command(ctx: &CliContext) -> PulseResult<()> {
    let client = ctx.client()?;
    let session = client.session().ok_or(PulseError::NotLoggedIn)?;
    let user = client.get_user(&session.user_id()?)?;
    Session::new(session.token.clone(), user.clone()).save(&ctx.paths)?;

    let mut snapshot = load_dataset(&client)?;
    snapshot.user = Some(user);
    snapshot.saved_at = Some(Utc::now());
    // Goals are not needed for analysis; a failed fetch still saves the rest
    match client.list_goals() {
        Ok(goals) => snapshot.goals = goals,
        Err(e) if e.is_auth_failure() => return Err(e),
        Err(e) => tracing::warn!(error = %e, "goals not synced"),
    }

    let path = ctx.paths.snapshot_file();
    snapshot.save(&path)?;
    tracing::info!(path = %path.display(), "snapshot saved");

    println!(
        "Synced {} budgets, {} transactions, {} accounts and {} goals to {}",
        snapshot.budgets.len(),
        snapshot.transactions.len(),
        snapshot.accounts.len(),
        snapshot.goals.len(),
        path.display()
    );
    Ok(())
}
