//! Dashboard view

use super::report::{double_separator, format_bar, format_header, format_percentage, separator, truncate};
use crate::analytics::FinancialOverview;
use crate::models::{Money, TransactionType};

const WIDTH: usize = 60;

/// Render the overview; `insight` is the backend's one-line AI summary, if any
pub fn format_overview(
    overview: &FinancialOverview,
    symbol: &str,
    date_format: &str,
    insight: Option<&str>,
) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut out = String::new();

    out.push_str(&format_header("Financial overview", WIDTH));
    out.push('\n');
    out.push_str(&double_separator(WIDTH));
    out.push('\n');
    out.push_str(&format!("  Total balance:  {:>16}\n", money(overview.total_balance)));
    out.push_str(&format!("  Income:         {:>16}\n", money(overview.total_income)));
    out.push_str(&format!("  Expenses:       {:>16}\n", money(overview.total_expenses)));
    out.push_str(&format!("  Active goals:   {:>16}\n", overview.active_goals));
    out.push_str(&format!(
        "  Health score:   {:>12}/100  {}\n",
        overview.health_score,
        format_bar(f64::from(overview.health_score), 100.0, 10)
    ));

    if let Some(text) = insight.map(str::trim).filter(|t| !t.is_empty()) {
        out.push('\n');
        out.push_str(&format!("  AI insight: {}\n", text));
    }

    if !overview.expense_breakdown.is_empty() {
        out.push('\n');
        out.push_str("Spending by category\n");
        out.push_str(&separator(WIDTH));
        out.push('\n');
        for entry in &overview.expense_breakdown {
            out.push_str(&format!(
                "  {:<18} {:>14} {:>6}  {}\n",
                truncate(&entry.category, 18),
                money(entry.amount),
                format_percentage(entry.share),
                format_bar(entry.share, 100.0, 12)
            ));
        }
    }

    if !overview.goals.is_empty() {
        out.push('\n');
        out.push_str("Your goals\n");
        out.push_str(&separator(WIDTH));
        out.push('\n');
        for goal in &overview.goals {
            out.push_str(&format!(
                "  {:<18} {} {:>3}%  {} / {}\n",
                truncate(&goal.title, 18),
                format_bar(f64::from(goal.percent), 100.0, 10),
                goal.percent,
                money(goal.current_amount),
                money(goal.target_amount)
            ));
        }
    }

    if !overview.recent_transactions.is_empty() {
        out.push('\n');
        out.push_str("Recent activity\n");
        out.push_str(&separator(WIDTH));
        out.push('\n');
        for txn in &overview.recent_transactions {
            let sign = match txn.kind {
                TransactionType::Income => "+",
                TransactionType::Expense => "-",
                TransactionType::Transfer => " ",
            };
            out.push_str(&format!(
                "  {}  {:<24} {}{}\n",
                txn.transaction_date.format(date_format),
                truncate(txn.label(), 24),
                sign,
                money(txn.amount)
            ));
        }
    }

    out
}
