//! Transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{CliContext, DataArgs};
use crate::analytics::transactions_in_month;
use crate::client::types::TransactionUpdate;
use crate::display::format_transaction_list;
use crate::error::{PulseError, PulseResult};
use crate::models::{AccountId, Money, Transaction, TransactionType};
use crate::services::transaction::find_transaction;
use crate::services::{TransactionDraft, TransactionService};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions for a month, newest first
    List {
        #[command(flatten)]
        data: DataArgs,
        /// Show every month
        #[arg(long, conflicts_with = "month")]
        all: bool,
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Record a transaction
    Add {
        /// Amount (e.g., "42.50")
        amount: String,
        /// income, expense or transfer
        #[arg(value_name = "TYPE")]
        kind: String,
        /// Category name
        category: String,
        /// Account ID
        #[arg(short, long)]
        account: Option<String>,
        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// Transaction date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Change fields of a transaction
    Edit {
        /// Transaction ID
        id: String,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        account: Option<String>,
        #[arg(short = 'D', long)]
        description: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

pub(super) fn parse_amount(s: &str) -> PulseResult<Money> {
    Money::parse(s).map_err(|e| PulseError::Validation(format!("Invalid amount: {}", e)))
}

fn parse_kind(s: &str) -> PulseResult<TransactionType> {
    TransactionType::parse(s).ok_or_else(|| {
        PulseError::Validation(format!(
            "Invalid transaction type: '{}'. Valid types: income, expense, transfer",
            s
        ))
    })
}

pub(super) fn parse_date(s: &str) -> PulseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        PulseError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Handle a transaction command
pub fn handle_transaction_command(ctx: &CliContext, cmd: TransactionCommands) -> PulseResult<()> {
    match cmd {
        TransactionCommands::List { data, all, limit } => {
            let transactions: Vec<Transaction> = if data.is_local() {
                data.load(ctx)?.transactions
            } else {
                TransactionService::new(&ctx.client()?).list()?
            };

            let mut shown: Vec<&Transaction> = if all {
                transactions.iter().collect()
            } else {
                transactions_in_month(&transactions, data.month()?)
            };
            shown.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
            if let Some(limit) = limit {
                shown.truncate(limit);
            }

            print!(
                "{}",
                format_transaction_list(&shown, ctx.symbol(), &ctx.settings.date_format)
            );
        }
        TransactionCommands::Add {
            amount,
            kind,
            category,
            account,
            description,
            date,
        } => {
            let mut draft = TransactionDraft::new(parse_amount(&amount)?, parse_kind(&kind)?, category);
            draft.account_id = account.map(AccountId::new);
            draft.description = description;
            draft.date = date.as_deref().map(parse_date).transpose()?;
            draft.validate()?;

            let client = ctx.client()?;
            let txn = TransactionService::new(&client).create(draft)?;
            println!("Recorded {} (ID: {})", txn, txn.id);
        }
        TransactionCommands::Edit {
            id,
            amount,
            kind,
            category,
            account,
            description,
            date,
        } => {
            let update = TransactionUpdate {
                account_id: account.map(AccountId::new),
                amount: amount.as_deref().map(parse_amount).transpose()?,
                kind: kind
                    .as_deref()
                    .map(|k| parse_kind(k).map(|k| k.to_string()))
                    .transpose()?,
                category,
                description,
                transaction_date: date
                    .as_deref()
                    .map(|d| parse_date(d).map(|d| d.format("%Y-%m-%d").to_string()))
                    .transpose()?,
            };

            let client = ctx.client()?;
            let service = TransactionService::new(&client);
            let transactions = service.list()?;
            let current = find_transaction(&transactions, &id)?;
            let txn = service.update(current, update)?;
            println!("Updated {}", txn);
        }
        TransactionCommands::Delete { id } => {
            let client = ctx.client()?;
            let service = TransactionService::new(&client);
            let transactions = service.list()?;
            let current = find_transaction(&transactions, &id)?;
            service.delete(&current.id)?;
            println!("Deleted {}", current);
        }
    }

    Ok(())
}
