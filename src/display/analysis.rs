//! Month analysis views
//!
//! Renders a [`BudgetAnalysis`] as a summary block, a budget table and an
//! insight list.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{
    double_separator, format_bar, format_header, format_percentage, separator, truncate,
};
use crate::analytics::{AIInsight, BudgetAnalysis, BudgetStatus, BudgetWithProgress, InsightPriority, MonthlySummary};
use crate::models::Money;

const WIDTH: usize = 72;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Alloc")]
    allocation: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "")]
    bar: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Health")]
    health: String,
}

fn status_marker(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::OnTrack => "✓ on track",
        BudgetStatus::Warning => "! warning",
        BudgetStatus::Exceeded => "✗ exceeded",
        BudgetStatus::UnderUtilized => "~ under used",
    }
}

/// Cash-flow block for a month
pub fn format_summary(summary: &MonthlySummary, symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut out = String::new();
    out.push_str(&format!("  Income:            {:>14}\n", money(summary.total_income)));
    out.push_str(&format!("  Expenses:          {:>14}\n", money(summary.total_expenses)));
    out.push_str(&format!("  Transfers:         {:>14}\n", money(summary.total_transfers)));
    out.push_str(&format!("  Net cash flow:     {:>14}\n", money(summary.net_cashflow)));
    out.push_str(&format!("  Starting balance:  {:>14}\n", money(summary.starting_balance)));
    out.push_str(&format!("  Ending balance:    {:>14}\n", money(summary.ending_balance)));
    out.push_str(&format!(
        "  Savings rate:      {:>14}\n",
        format_percentage(summary.savings_rate)
    ));
    out.push_str(&format!(
        "  Expense ratio:     {:>14}\n",
        format_percentage(summary.expense_ratio)
    ));
    out
}

/// Budget progress as a table
pub fn format_budget_table(budgets: &[BudgetWithProgress], symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set. Add one with `budget-pulse budget add <category> <percent>`.\n"
            .to_string();
    }

    let rows: Vec<BudgetRow> = budgets
        .iter()
        .map(|b| BudgetRow {
            category: truncate(&b.budget.category, 18),
            allocation: format!("{}%", b.budget.percentage),
            budgeted: b.budgeted_amount.format_with_symbol(symbol),
            spent: b.spent.format_with_symbol(symbol),
            remaining: b.remaining.format_with_symbol(symbol),
            used: format_percentage(b.percentage_used),
            bar: format_bar(b.percentage_used, 100.0, 10),
            status: status_marker(b.status).to_string(),
            health: format!("{:.0}", b.health_score),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    format!("{}\n", table)
}

/// Pace details for budgets projected to overshoot
pub fn format_pace_notes(budgets: &[BudgetWithProgress], symbol: &str) -> String {
    budgets
        .iter()
        .filter(|b| b.projected_over_budget() && b.status != BudgetStatus::Exceeded)
        .map(|b| {
            format!(
                "  {} is on pace for {} ({} a day) against {} budgeted\n",
                b.budget.category,
                b.projected_spend.format_with_symbol(symbol),
                b.daily_average.format_with_symbol(symbol),
                b.budgeted_amount.format_with_symbol(symbol)
            )
        })
        .collect()
}

fn priority_marker(priority: InsightPriority) -> &'static str {
    match priority {
        InsightPriority::High => "[HIGH]",
        InsightPriority::Medium => "[MED] ",
        InsightPriority::Low => "[LOW] ",
    }
}

/// Insights as a list, in the order given
pub fn format_insights(insights: &[AIInsight], symbol: &str) -> String {
    if insights.is_empty() {
        return "No insights for this month.\n".to_string();
    }

    let mut out = String::new();
    for insight in insights {
        out.push_str(&format!(
            "{} {} ({})\n",
            priority_marker(insight.priority),
            insight.title,
            insight.kind
        ));
        out.push_str(&format!("       {}\n", insight.description));
        if let Some(impact) = insight.impact {
            out.push_str(&format!("       Impact: {}\n", impact.format_with_symbol(symbol)));
        }
        if let Some(action) = &insight.action {
            match action.potential_savings {
                Some(savings) => out.push_str(&format!(
                    "       Action: {} (could save {})\n",
                    action.description,
                    savings.format_with_symbol(symbol)
                )),
                None => out.push_str(&format!("       Action: {}\n", action.description)),
            }
        }
        out.push_str(&format!("       id: {}\n", insight.id));
    }
    out
}

/// Full month report
pub fn format_analysis(analysis: &BudgetAnalysis, symbol: &str) -> String {
    let mut out = String::new();
    out.push_str(&double_separator(WIDTH));
    out.push('\n');
    out.push_str(&format_header(&format!("Budget analysis for {}", analysis.month), WIDTH));
    out.push('\n');
    out.push_str(&double_separator(WIDTH));
    out.push('\n');
    out.push_str(&format_summary(&analysis.summary, symbol));
    out.push('\n');

    out.push_str(&format_budget_table(&analysis.budgets, symbol));
    if let Some(health) = analysis.overall_health() {
        out.push_str(&format!(
            "  Total budgeted {} | spent {} | overall health {:.0}/100\n",
            analysis.total_budgeted().format_with_symbol(symbol),
            analysis.total_spent().format_with_symbol(symbol),
            health
        ));
    }
    let pace = format_pace_notes(&analysis.budgets, symbol);
    if !pace.is_empty() {
        out.push('\n');
        out.push_str(&pace);
    }

    out.push('\n');
    out.push_str(&separator(WIDTH));
    out.push_str("\n  Insights\n");
    out.push_str(&separator(WIDTH));
    out.push('\n');
    out.push_str(&format_insights(&analysis.insights, symbol));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{AnalysisContext, BudgetAnalyticsEngine};
    use crate::models::{Budget, Month, Transaction, TransactionType};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn analysis() -> BudgetAnalysis {
        let date = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        let txns = vec![
            Transaction::new("t1", "a1", TransactionType::Income, "Salary", Money::from_cents(500_000), date(1)),
            Transaction::new("t2", "a1", TransactionType::Expense, "Rent", Money::from_cents(150_000), date(2)),
            Transaction::new("t3", "a1", TransactionType::Expense, "Dining", Money::from_cents(60_000), date(3)),
        ];
        let budgets = vec![Budget::new("b1", "Rent", 30.0), Budget::new("b2", "Dining", 10.0)];
        let ctx = AnalysisContext::new(
            Month::new(2025, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
            Utc.timestamp_millis_opt(0).unwrap(),
        );
        BudgetAnalyticsEngine::analyze(&budgets, &txns, &[], &ctx)
    }

    #[test]
    fn test_summary_block() {
        let a = analysis();
        let text = format_summary(&a.summary, "$");
        assert!(text.contains("$5,000.00"));
        assert!(text.contains("$2,100.00"));
        assert!(text.contains("58%"));
    }

    #[test]
    fn test_budget_table_rows() {
        let a = analysis();
        let table = format_budget_table(&a.budgets, "$");
        assert!(table.contains("Rent"));
        assert!(table.contains("! warning"));
        assert!(table.contains("✗ exceeded"));
        assert!(table.contains("-$100.00"));
    }

    #[test]
    fn test_empty_budgets_hint() {
        assert!(format_budget_table(&[], "$").contains("No budgets set"));
    }

    #[test]
    fn test_full_report() {
        let a = analysis();
        let text = format_analysis(&a, "€");
        assert!(text.contains("Budget analysis for 2025-03"));
        assert!(text.contains("[HIGH] Overspent in Dining"));
        assert!(text.contains("€100.00"));
    }
}
