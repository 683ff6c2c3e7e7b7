//! CSV export of budget progress
//!
//! One row per budget for the analyzed month, spreadsheet-compatible.
//! Amounts are plain decimals without currency symbols.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::analytics::BudgetAnalysis;
use crate::error::{PulseError, PulseResult};

#[derive(Serialize)]
struct ProgressRow<'a> {
    month: String,
    budget_id: &'a str,
    category: &'a str,
    percentage: f64,
    budgeted: String,
    spent: String,
    remaining: String,
    percentage_used: String,
    status: String,
    daily_average: String,
    projected_spend: String,
    health_score: String,
    transactions: usize,
}

/// Write budget progress rows to any writer
pub fn export_budget_progress_csv<W: Write>(analysis: &BudgetAnalysis, writer: W) -> PulseResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    for b in &analysis.budgets {
        csv.serialize(ProgressRow {
            month: analysis.month.to_string(),
            budget_id: b.budget.id.as_str(),
            category: &b.budget.category,
            percentage: b.budget.percentage,
            budgeted: format!("{:.2}", b.budgeted_amount.to_decimal()),
            spent: format!("{:.2}", b.spent.to_decimal()),
            remaining: format!("{:.2}", b.remaining.to_decimal()),
            percentage_used: format!("{:.1}", b.percentage_used),
            status: serde_json::to_value(b.status)?
                .as_str()
                .unwrap_or_default()
                .to_string(),
            daily_average: format!("{:.2}", b.daily_average.to_decimal()),
            projected_spend: format!("{:.2}", b.projected_spend.to_decimal()),
            health_score: format!("{:.1}", b.health_score),
            transactions: b.transactions.len(),
        })?;
    }

    csv.flush()
        .map_err(|e| PulseError::Export(format!("Failed to flush CSV: {}", e)))?;
    Ok(())
}

/// Write budget progress to a file, replacing it
pub fn export_budget_progress_file(analysis: &BudgetAnalysis, path: &Path) -> PulseResult<()> {
    let file = File::create(path).map_err(|e| {
        PulseError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    export_budget_progress_csv(analysis, file)?;
    tracing::info!(path = %path.display(), rows = analysis.budgets.len(), "exported budget progress");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{AnalysisContext, BudgetAnalyticsEngine};
    use crate::models::{Budget, Money, Month, Transaction, TransactionType};
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;

    fn analysis() -> BudgetAnalysis {
        let date = |d| NaiveDate::from_ymd_opt(2025, 2, d).unwrap();
        let txns = vec![
            Transaction::new("t1", "a1", TransactionType::Income, "Salary", Money::from_cents(400_000), date(1)),
            Transaction::new("t2", "a1", TransactionType::Expense, "Dining, Bars", Money::from_cents(14_000), date(5)),
        ];
        let budgets = vec![
            Budget::new("b1", "Dining, Bars", 5.0),
            Budget::new("b2", "Rent", 30.0),
        ];
        let ctx = AnalysisContext::new(
            Month::new(2025, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            Utc.timestamp_millis_opt(0).unwrap(),
        );
        BudgetAnalyticsEngine::analyze(&budgets, &txns, &[], &ctx)
    }

    #[test]
    fn test_rows_and_quoting() {
        let mut out = Vec::new();
        export_budget_progress_csv(&analysis(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("month,budget_id,category,percentage,budgeted,spent"));
        assert_eq!(
            lines[1],
            "2025-02,b1,\"Dining, Bars\",5.0,200.00,140.00,60.00,70.0,on_track,5.00,140.00,90.0,1"
        );
        assert!(lines[2].contains(",under_utilized,"));
    }

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("progress.csv");
        export_budget_progress_file(&analysis(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 2);
    }
}
