//! Budget CLI commands
//!
//! Budgets are percentage allocations of monthly income, one per category.

use clap::Subcommand;

use super::CliContext;
use crate::display::{format_budget_list, format_category_catalog};
use crate::error::PulseResult;
use crate::services::budget::{find_budget, unknown_category_note};
use crate::services::BudgetService;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List budgets
    List,

    /// Create a budget for a category
    Add {
        /// Category name, exactly as used on transactions
        category: String,
        /// Share of monthly income (0-100)
        percentage: f64,
    },

    /// Change a budget's percentage
    Set {
        /// Budget ID or category name
        budget: String,
        /// New share of monthly income (0-100)
        percentage: f64,
    },

    /// Delete a budget
    Delete {
        /// Budget ID or category name
        budget: String,
    },

    /// Show the category catalog
    Categories,
}

/// Handle a budget command
pub fn handle_budget_command(ctx: &CliContext, cmd: BudgetCommands) -> PulseResult<()> {
    if let BudgetCommands::Categories = cmd {
        print!("{}", format_category_catalog());
        return Ok(());
    }

    let client = ctx.client()?;
    let service = BudgetService::new(&client);

    match cmd {
        BudgetCommands::List => {
            let budgets = service.list()?;
            print!("{}", format_budget_list(&budgets));
        }
        BudgetCommands::Add {
            category,
            percentage,
        } => {
            let budget = service.create(&category, percentage)?;
            println!(
                "Created budget for {}: {}% of income (ID: {})",
                budget.category, budget.percentage, budget.id
            );
            if let Some(note) = unknown_category_note(&budget.category) {
                println!("Note: {}", note);
            }
        }
        BudgetCommands::Set { budget, percentage } => {
            let budgets = service.list()?;
            let current = find_budget(&budgets, &budget)?;
            match service.update_percentage(current, percentage)? {
                Some(updated) => println!(
                    "Updated {}: {}% -> {}%",
                    updated.category, current.percentage, updated.percentage
                ),
                None => println!(
                    "{} is already at {}%; nothing to change.",
                    current.category, current.percentage
                ),
            }
        }
        BudgetCommands::Delete { budget } => {
            let budgets = service.list()?;
            let current = find_budget(&budgets, &budget)?;
            service.delete(&current.id)?;
            println!("Deleted budget for {}", current.category);
        }
        BudgetCommands::Categories => {}
    }

    Ok(())
}
