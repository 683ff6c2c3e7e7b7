//! Insight generation
//!
//! Rule-based observations about the month: budgets that were overspent or
//! left mostly unused, the savings rate, and a spike in yesterday's spending.
//! Insights are regenerated from scratch on every analysis and carry no
//! state beyond the in-memory [`InsightFeed`].

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

use super::progress::{BudgetWithProgress, EXCEEDED_ABOVE, UNDER_UTILIZED_BELOW, UNDER_UTILIZED_MIN_BUDGET, WARNING_ABOVE};
use super::summary::MonthlySummary;
use crate::models::{Money, Month, Transaction};

/// Savings rates below this percentage trigger a warning
pub const LOW_SAVINGS_BELOW: f64 = 10.0;

/// Savings rates above this percentage are celebrated
pub const HIGH_SAVINGS_ABOVE: f64 = 30.0;

/// Savings rate users are nudged toward
pub const TARGET_SAVINGS_PERCENT: f64 = 20.0;

/// Yesterday's spending above this multiple of the daily average is unusual
pub const UNUSUAL_SPENDING_FACTOR: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Opportunity,
    Achievement,
    Suggestion,
    Tip,
    Alert,
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Warning => "warning",
            Self::Opportunity => "opportunity",
            Self::Achievement => "achievement",
            Self::Suggestion => "suggestion",
            Self::Tip => "tip",
            Self::Alert => "alert",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    High,
    Medium,
    Low,
}

impl InsightPriority {
    /// Sort weight; higher comes first
    pub const fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl fmt::Display for InsightPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Something the user can do about an insight
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_savings: Option<Money>,
}

impl InsightAction {
    fn new(kind: &str, description: &str, potential_savings: Money) -> Self {
        Self {
            kind: kind.to_string(),
            description: description.to_string(),
            potential_savings: Some(potential_savings),
        }
    }
}

/// A generated observation about the month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AIInsight {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub priority: InsightPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<InsightAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// Builds insights sharing one generation time
struct InsightBuilder {
    generated_at: DateTime<Utc>,
    millis: i64,
    insights: Vec<AIInsight>,
}

impl InsightBuilder {
    fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            millis: generated_at.timestamp_millis(),
            insights: Vec::new(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        rule: &str,
        category: Option<&str>,
        kind: InsightKind,
        priority: InsightPriority,
        title: String,
        description: String,
        impact: Option<Money>,
        action: Option<InsightAction>,
    ) {
        let id = match category {
            Some(c) => format!("{}-{}-{}", rule, c, self.millis),
            None => format!("{}-{}", rule, self.millis),
        };
        self.insights.push(AIInsight {
            id,
            kind,
            title,
            description,
            priority,
            impact,
            action,
            category: category.map(str::to_string),
            timestamp: self.generated_at,
            read: false,
        });
    }

    fn finish(mut self) -> Vec<AIInsight> {
        // sort_by is stable: equal priorities keep rule order
        self.insights
            .sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()));
        self.insights
    }
}

/// Run every insight rule over one month's analysis
///
/// `progress` and `summary` come from the same month; `month_transactions`
/// is that month's filtered transaction list. The result is ordered by
/// priority, high first.
pub fn generate_insights(
    progress: &[BudgetWithProgress],
    summary: &MonthlySummary,
    month_transactions: &[&Transaction],
    month: Month,
    today: NaiveDate,
    generated_at: DateTime<Utc>,
) -> Vec<AIInsight> {
    let mut out = InsightBuilder::new(generated_at);

    budget_rules(&mut out, progress);
    savings_rules(&mut out, summary);
    unusual_spending_rule(&mut out, month_transactions, month, today);

    out.finish()
}

fn budget_rules(out: &mut InsightBuilder, progress: &[BudgetWithProgress]) {
    for p in progress {
        let category = p.budget.category.as_str();
        let used = p.percentage_used;

        if used > EXCEEDED_ABOVE {
            let over = p.spent - p.budgeted_amount;
            out.push(
                "overspend",
                Some(category),
                InsightKind::Warning,
                InsightPriority::High,
                format!("Overspent in {}", category),
                format!("You've exceeded your {} budget by {}.", category, over),
                Some(over),
                None,
            );
        } else if used > WARNING_ABOVE {
            out.push(
                "warning",
                Some(category),
                InsightKind::Warning,
                InsightPriority::Medium,
                format!("Near limit in {}", category),
                format!("You've used {:.1}% of your {} budget.", used, category),
                None,
                Some(InsightAction::new("reduce", "Reduce spending", p.spent.percent(10.0))),
            );
        } else if used < UNDER_UTILIZED_BELOW && p.budgeted_amount > UNDER_UTILIZED_MIN_BUDGET {
            let unspent = p.budgeted_amount - p.spent;
            out.push(
                "underutilized",
                Some(category),
                InsightKind::Opportunity,
                InsightPriority::Low,
                format!("Under budget in {}", category),
                format!("You've only used {:.1}% of your {} budget.", used, category),
                Some(unspent),
                Some(InsightAction::new(
                    "reallocate",
                    "Reallocate to savings",
                    unspent.percent(50.0),
                )),
            );
        }
    }
}

fn savings_rules(out: &mut InsightBuilder, summary: &MonthlySummary) {
    let income = summary.total_income;
    let saved = income - summary.total_expenses;
    let rate = summary.savings_rate;

    if rate < LOW_SAVINGS_BELOW {
        out.push(
            "low-savings",
            None,
            InsightKind::Warning,
            InsightPriority::High,
            "Low savings rate".to_string(),
            format!(
                "Your savings rate is only {:.1}%. Aim for at least {:.0}%.",
                rate, TARGET_SAVINGS_PERCENT
            ),
            Some(income.percent(TARGET_SAVINGS_PERCENT) - saved),
            Some(InsightAction::new("increase", "Increase savings", income.percent(10.0))),
        );
    } else if rate > HIGH_SAVINGS_ABOVE {
        out.push(
            "high-savings",
            None,
            InsightKind::Achievement,
            InsightPriority::Low,
            "Great savings rate!".to_string(),
            format!(
                "You're saving {:.1}% of your income. Excellent work!",
                rate
            ),
            Some(saved),
            None,
        );
    }
}

fn unusual_spending_rule(
    out: &mut InsightBuilder,
    month_transactions: &[&Transaction],
    month: Month,
    today: NaiveDate,
) {
    let yesterday = today - Duration::days(1);
    let days = i64::from(month.days_in_month());

    let month_expenses: Money = month_transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();
    let yesterday_spent: Money = month_transactions
        .iter()
        .filter(|t| t.is_expense() && t.transaction_date == yesterday)
        .map(|t| t.amount)
        .sum();

    // yesterday > 2 * (expenses / days), compared in whole cents
    if yesterday_spent.cents() * days <= UNUSUAL_SPENDING_FACTOR * month_expenses.cents() {
        return;
    }

    let daily_average = month_expenses.div_round(month.days_in_month());
    let description = if daily_average.is_positive() {
        format!(
            "You spent {} yesterday, which is {:.0}% of your daily average.",
            yesterday_spent,
            yesterday_spent.percentage_of(daily_average)
        )
    } else {
        format!("You spent {} yesterday.", yesterday_spent)
    };

    out.push(
        "unusual-spending",
        None,
        InsightKind::Alert,
        InsightPriority::Medium,
        "Unusual spending detected".to_string(),
        description,
        Some(yesterday_spent - daily_average),
        None,
    );
}

/// In-memory list of insights the user has not dealt with yet
#[derive(Debug, Clone, Default)]
pub struct InsightFeed {
    insights: Vec<AIInsight>,
}

impl InsightFeed {
    pub fn new(insights: Vec<AIInsight>) -> Self {
        Self { insights }
    }

    pub fn insights(&self) -> &[AIInsight] {
        &self.insights
    }

    pub fn len(&self) -> usize {
        self.insights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }

    /// Drop an insight; returns it if it was present
    pub fn dismiss(&mut self, id: &str) -> Option<AIInsight> {
        let pos = self.insights.iter().position(|i| i.id == id)?;
        Some(self.insights.remove(pos))
    }

    /// Act on an insight: it leaves the feed and its action is returned
    pub fn act(&mut self, id: &str) -> Option<InsightAction> {
        self.dismiss(id).and_then(|i| i.action)
    }

    /// Replace the feed with freshly generated insights
    pub fn replace(&mut self, insights: Vec<AIInsight>) {
        self.insights = insights;
    }
}
