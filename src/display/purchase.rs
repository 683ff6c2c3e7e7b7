//! Purchase check and server analysis views

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::format_percentage;
use crate::analytics::PurchaseCheck;
use crate::client::AIAnalysis;
use crate::models::Money;

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Recommended")]
    recommended: String,
    #[tabled(rename = "Monthly")]
    amount: String,
    #[tabled(rename = "Why")]
    reasoning: String,
}

/// Verdict, disposable income and any reallocation suggestions
pub fn format_purchase_check(check: &PurchaseCheck, amount: Money, symbol: &str) -> String {
    let mut out = String::new();
    if check.can_afford {
        out.push_str(&format!("✓ You can afford this {} purchase.\n", amount.format_with_symbol(symbol)));
    } else {
        out.push_str(&format!(
            "✗ Think twice about this {} purchase.\n",
            amount.format_with_symbol(symbol)
        ));
    }

    if let Some(advice) = &check.advice {
        out.push_str(&format!("  {}\n", advice));
    }
    if let Some(disposable) = check.disposable_income {
        out.push_str(&format!(
            "  Disposable income: {}\n",
            disposable.format_with_symbol(symbol)
        ));
    }
    if let Some(pct) = check.percentage_of_income(amount) {
        out.push_str(&format!(
            "  This is {} of your disposable income.\n",
            format_percentage(pct)
        ));
    }
    if let Some(impact) = &check.impact {
        out.push_str(&format!("  {}\n", impact));
    }

    if !check.suggestions.is_empty() {
        let rows: Vec<SuggestionRow> = check
            .suggestions
            .iter()
            .map(|s| SuggestionRow {
                priority: s.priority.to_string(),
                category: s.category.clone(),
                current: format!("{}%", s.current_percentage),
                recommended: format!("{}%", s.recommended_percentage),
                amount: if s.suggested_amount.is_positive() {
                    s.suggested_amount.format_with_symbol(symbol)
                } else {
                    "-".to_string()
                },
                reasoning: s.reasoning.clone(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        out.push_str("\nReallocation suggestions\n");
        out.push_str(&format!("{}\n", table));
    }
    out
}

/// The backend's AI analysis, section by section; empty sections are skipped
pub fn format_ai_analysis(analysis: &AIAnalysis, symbol: &str) -> String {
    let mut out = String::new();
    if !analysis.insight.trim().is_empty() {
        out.push_str(&format!("{}\n\n", analysis.insight.trim()));
    }

    if !analysis.spending_analysis.is_empty() {
        out.push_str("Spending trends\n");
        for t in &analysis.spending_analysis {
            out.push_str(&format!(
                "  {:<16} {:<6} {:+.1}%  {}\n",
                t.category, t.trend, t.percentage_change, t.recommendation
            ));
        }
        out.push('\n');
    }

    if !analysis.budget_health.is_empty() {
        out.push_str("Budget health\n");
        for b in &analysis.budget_health {
            out.push_str(&format!(
                "  {:<16} {} of {} spent, {} left ({})\n",
                b.category,
                b.spent.format_with_symbol(symbol),
                b.budgeted.format_with_symbol(symbol),
                b.remaining.format_with_symbol(symbol),
                b.status
            ));
        }
        out.push('\n');
    }

    if !analysis.anomalies.is_empty() {
        out.push_str("Anomalies\n");
        for a in &analysis.anomalies {
            out.push_str(&format!(
                "  {} {} {}: {}\n",
                a.date.get(..10).unwrap_or(&a.date),
                a.amount.format_with_symbol(symbol),
                a.category.as_deref().unwrap_or("uncategorized"),
                a.reason
            ));
        }
        out.push('\n');
    }

    if !analysis.savings_opportunities.is_empty() {
        out.push_str("Savings opportunities\n");
        for s in &analysis.savings_opportunities {
            out.push_str(&format!(
                "  [{}] {} (save {})\n",
                s.difficulty,
                s.suggestion,
                s.potential_savings.format_with_symbol(symbol)
            ));
        }
        out.push('\n');
    }

    if let Some(forecast) = &analysis.cash_flow_forecast {
        out.push_str("Cash flow forecast\n");
        out.push_str(&format!(
            "  Projected balance: {} (risk: {})\n",
            forecast.projected_balance.format_with_symbol(symbol),
            forecast.risk_level
        ));
        if let Some(days) = forecast.days_until_zero {
            out.push_str(&format!("  Balance reaches zero in {} days\n", days));
        }
        for r in &forecast.recommendations {
            out.push_str(&format!("  - {}\n", r));
        }
    }

    if out.is_empty() {
        out.push_str("The backend returned no analysis.\n");
    }
    out
}
