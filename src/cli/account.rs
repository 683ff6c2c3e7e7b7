//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use super::CliContext;
use crate::display::format_account_list;
use crate::error::{PulseError, PulseResult};
use crate::models::{AccountType, Money};
use crate::services::AccountService;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// List all accounts
    List,
    /// Create a new account
    Add {
        /// Account name
        name: String,
        /// Account type (checking, savings, credit, cash, investment)
        #[arg(short = 't', long = "type", default_value = "checking")]
        account_type: String,
        /// Starting balance (e.g., "1000.00" or "1000")
        #[arg(short, long)]
        balance: Option<String>,
    },
}

/// Handle an account command
pub fn handle_account_command(ctx: &CliContext, cmd: AccountCommands) -> PulseResult<()> {
    let client = ctx.client()?;
    let service = AccountService::new(&client);

    match cmd {
        AccountCommands::List => {
            let accounts = service.list()?;
            print!("{}", format_account_list(&accounts, ctx.symbol()));
        }
        AccountCommands::Add {
            name,
            account_type,
            balance,
        } => {
            let balance = balance
                .as_deref()
                .map(|b| {
                    Money::parse(b)
                        .map_err(|e| PulseError::Validation(format!("Invalid balance: {}", e)))
                })
                .transpose()?;

            let account = service.create(&name, AccountType::parse(&account_type), balance)?;
            println!("Created account: {} ({})", account.name, account.account_type);
            println!("  ID: {}", account.id);
            println!("  Balance: {}", ctx.settings.format_money(account.balance));
        }
    }

    Ok(())
}
