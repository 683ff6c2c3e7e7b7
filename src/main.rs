use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use budget_pulse::cli::{
    handle_account_command, handle_ai_command, handle_analyze_command, handle_budget_command,
    handle_check_purchase_command, handle_dashboard_command, handle_goal_command,
    handle_insights_command, handle_login, handle_logout, handle_notification_command,
    handle_register, handle_sync_command, handle_transaction_command, handle_whoami,
    AccountCommands, AnalyzeArgs, BudgetCommands, CheckPurchaseArgs, CliContext, DashboardArgs,
    DataArgs, GoalCommands, NotificationCommands, TransactionCommands,
};
use budget_pulse::client::Session;
use budget_pulse::config::{PulsePaths, Settings};
use budget_pulse::error::{PulseError, PulseResult};

#[derive(Parser)]
#[command(
    name = "budget-pulse",
    version,
    about = "Budget analytics for your personal-finance backend",
    long_about = "budget-pulse loads your budgets, transactions, accounts and goals \
                  and reports how each month is going: cash flow, savings rate, \
                  per-budget health and prioritized insights."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with your email address
    Login {
        email: String,
    },

    /// Create an account on the backend and log in
    Register {
        username: String,
        email: String,
        /// Monthly income (e.g., "4500")
        #[arg(long)]
        income: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Overview of balances, spending and goals across all records
    Dashboard(DashboardArgs),

    /// Analyze a month: summary, budget progress and insights
    Analyze(AnalyzeArgs),

    /// Show prioritized insights for a month
    Insights {
        #[command(flatten)]
        data: DataArgs,
        /// Print insights as JSON
        #[arg(long)]
        json: bool,
    },

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// List or post notifications
    #[command(subcommand, alias = "notification")]
    Notifications(NotificationCommands),

    /// Check whether a purchase fits your budget
    CheckPurchase(CheckPurchaseArgs),

    /// Show the backend's AI analysis
    Ai {
        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save budgets, transactions, accounts and goals for offline use
    Sync,

    /// Show or change configuration
    Config {
        /// Set the backend base URL
        #[arg(long)]
        api_url: Option<String>,
        /// Set the currency symbol used in reports
        #[arg(long)]
        currency: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let paths = PulsePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let ctx = CliContext::new(paths, settings);

    if let Err(err) = run(&ctx, cli.command) {
        if err.is_auth_failure() {
            Session::clear(&ctx.paths)?;
            tracing::warn!("stored session cleared");
        }
        return Err(err.into());
    }
    Ok(())
}

fn run(ctx: &CliContext, command: Commands) -> PulseResult<()> {
    match command {
        Commands::Login { email } => handle_login(ctx, &email),
        Commands::Register {
            username,
            email,
            income,
        } => handle_register(ctx, &username, &email, income.as_deref()),
        Commands::Logout => handle_logout(ctx),
        Commands::Whoami => handle_whoami(ctx),
        Commands::Dashboard(args) => handle_dashboard_command(ctx, args),
        Commands::Analyze(args) => handle_analyze_command(ctx, args),
        Commands::Insights { data, json } => handle_insights_command(ctx, data, json),
        Commands::Budget(cmd) => handle_budget_command(ctx, cmd),
        Commands::Txn(cmd) => handle_transaction_command(ctx, cmd),
        Commands::Account(cmd) => handle_account_command(ctx, cmd),
        Commands::Goal(cmd) => handle_goal_command(ctx, cmd),
        Commands::Notifications(cmd) => handle_notification_command(ctx, cmd),
        Commands::CheckPurchase(args) => handle_check_purchase_command(ctx, args),
        Commands::Ai { json } => handle_ai_command(ctx, json),
        Commands::Sync => handle_sync_command(ctx),
        Commands::Config { api_url, currency } => handle_config(ctx, api_url, currency),
    }
}

fn handle_config(
    ctx: &CliContext,
    api_url: Option<String>,
    currency: Option<String>,
) -> PulseResult<()> {
    if api_url.is_some() || currency.is_some() {
        let mut settings = ctx.settings.clone();
        if let Some(url) = api_url {
            let url = url.trim().trim_end_matches('/').to_string();
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(PulseError::Validation(format!(
                    "API URL must start with http:// or https://, got '{}'",
                    url
                )));
            }
            settings.api_base_url = url;
        }
        if let Some(symbol) = currency {
            settings.currency_symbol = symbol;
        }
        settings.save(&ctx.paths)?;
        println!("Configuration saved.");
        return Ok(());
    }

    let session = Session::load(&ctx.paths)?;
    println!("budget-pulse Configuration");
    println!("==========================");
    println!("Base directory:   {}", ctx.paths.base_dir().display());
    println!("Settings file:    {}", ctx.paths.settings_file().display());
    println!("Snapshot file:    {}", ctx.paths.snapshot_file().display());
    println!();
    println!("Settings:");
    println!("  API base URL:    {}", ctx.settings.api_base_url);
    println!("  Currency symbol: {}", ctx.settings.currency_symbol);
    println!("  Date format:     {}", ctx.settings.date_format);
    println!("  Request timeout: {}s", ctx.settings.request_timeout_secs);
    println!();
    match session {
        Some(s) => println!("Logged in as {}", s.user.email),
        None => println!("Not logged in"),
    }
    Ok(())
}
