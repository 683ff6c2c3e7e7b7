//! Tables for backend records and the category catalog

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_bar, truncate};
use crate::models::category::{self, CategoryKind};
use chrono::{Local, NaiveDate};

use crate::models::{Account, Budget, Goal, Notification, Transaction, User};

#[derive(Tabled)]
struct BudgetListRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Percent")]
    percentage: String,
    #[tabled(rename = "Typical")]
    typical: String,
}

/// Budgets with their allocation and the catalog's typical share
pub fn format_budget_list(budgets: &[Budget]) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let rows: Vec<BudgetListRow> = budgets
        .iter()
        .map(|b| BudgetListRow {
            id: b.id.to_string(),
            category: b.category.clone(),
            percentage: format!("{}%", b.percentage),
            typical: category::find(&b.category)
                .and_then(|c| c.avg_percentage)
                .map(|p| format!("{}%", p))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let total: f64 = crate::models::budget::total_allocated(budgets);
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    format!("{}\nAllocated: {}% of income\n", table, total)
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Transactions as a register, in the order given
pub fn format_transaction_list(transactions: &[&Transaction], symbol: &str, date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|t| {
            let sign = match t.kind {
                crate::models::TransactionType::Income => "+",
                crate::models::TransactionType::Expense => "-",
                crate::models::TransactionType::Transfer => "",
            };
            TransactionRow {
                date: t.transaction_date.format(date_format).to_string(),
                kind: t.kind.to_string(),
                category: t.category.clone(),
                description: truncate(t.description.as_deref().unwrap_or(""), 28),
                amount: format!("{}{}", sign, t.amount.format_with_symbol(symbol)),
                id: t.id.to_string(),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    format!("{}\n", table)
}

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

pub fn format_account_list(accounts: &[Account], symbol: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let rows: Vec<AccountRow> = accounts
        .iter()
        .map(|a| AccountRow {
            id: a.id.to_string(),
            name: a.name.clone(),
            kind: a.account_type.to_string(),
            balance: a.balance.format_with_symbol(symbol),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    format!("{}\n", table)
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Due")]
    due: String,
}

/// Goals with progress bars; due dates are counted from `today`
pub fn format_goal_list(goals: &[Goal], symbol: &str, date_format: &str, today: NaiveDate) -> String {
    if goals.is_empty() {
        return "No goals found.\n".to_string();
    }

    let rows: Vec<GoalRow> = goals
        .iter()
        .map(|g| GoalRow {
            id: g.id.to_string(),
            title: truncate(&g.title, 28),
            saved: g.current_amount.format_with_symbol(symbol),
            target: g.target_amount.format_with_symbol(symbol),
            progress: format!(
                "{} {:>3}%",
                format_bar(f64::from(g.progress_percent()), 100.0, 10),
                g.progress_percent()
            ),
            due: match (g.target_date, g.days_left(today)) {
                (Some(date), Some(days)) if days >= 0 => {
                    format!("{} ({}d)", date.format(date_format), days)
                }
                (Some(date), Some(_)) if !g.is_complete() => {
                    format!("{} (overdue)", date.format(date_format))
                }
                (Some(date), _) => date.format(date_format).to_string(),
                (None, _) => "-".to_string(),
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    format!("{}\n", table)
}

/// Notifications, unread ones flagged with `*`
pub fn format_notification_list(notifications: &[Notification], date_format: &str) -> String {
    if notifications.is_empty() {
        return "No notifications yet. You're all caught up!\n".to_string();
    }

    let mut out = String::new();
    for n in notifications {
        let unread = if n.is_read { " " } else { "*" };
        out.push_str(&format!("{} {}\n", unread, n));
        if let Some(created) = n.created_at {
            out.push_str(&format!(
                "      {}\n",
                created.with_timezone(&Local).format(&format!("{} %H:%M", date_format))
            ));
        }
    }
    out
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Typical")]
    typical: String,
    #[tabled(rename = "Essential")]
    essential: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
}

/// The catalog grouped by kind
pub fn format_category_catalog() -> String {
    let mut out = String::new();
    for (title, kind) in [
        ("Expense categories", CategoryKind::Expense),
        ("Income categories", CategoryKind::Income),
        ("Savings transfers", CategoryKind::Transfer),
    ] {
        let rows: Vec<CategoryRow> = category::CATALOG
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| CategoryRow {
                name: c.name,
                typical: c
                    .avg_percentage
                    .map(|p| format!("{}%", p))
                    .unwrap_or_else(|| "-".to_string()),
                essential: if c.essential { "yes" } else { "" },
                description: c.description,
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        out.push_str(&format!("{}\n{}\n\n", title, table));
    }
    out.push_str("\"Other\" may be used for any transaction type.\n");
    out
}

pub fn format_user(user: &User, symbol: &str) -> String {
    let mut out = format!("Signed in as {} <{}>\n  ID: {}\n", user.username, user.email, user.id);
    if let Some(income) = user.monthly_income {
        out.push_str(&format!(
            "  Stated monthly income: {}\n",
            income.format_with_symbol(symbol)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Money, TransactionType};
    use chrono::NaiveDate;

    #[test]
    fn test_budget_list_shows_typical_share() {
        let budgets = vec![Budget::new("b1", "Rent", 35.0), Budget::new("b2", "Boats", 5.0)];
        let text = format_budget_list(&budgets);
        assert!(text.contains("35%"));
        assert!(text.contains("30%"));
        assert!(text.contains("Allocated: 40% of income"));
    }

    #[test]
    fn test_transaction_list_signs() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let income = Transaction::new("t1", "a1", TransactionType::Income, "Salary", Money::from_cents(100_000), date);
        let expense = Transaction::new("t2", "a1", TransactionType::Expense, "Dining", Money::from_cents(1250), date);
        let text = format_transaction_list(&[&income, &expense], "$", "%d/%m/%Y");
        assert!(text.contains("+$1,000.00"));
        assert!(text.contains("-$12.50"));
        assert!(text.contains("04/03/2025"));
    }

    #[test]
    fn test_account_list() {
        let mut account = Account::new("a1", "Main", AccountType::Checking);
        account.balance = Money::from_cents(123_45);
        let text = format_account_list(&[account], "$");
        assert!(text.contains("Main"));
        assert!(text.contains("$123.45"));
        assert_eq!(format_account_list(&[], "$"), "No accounts found.\n");
    }

    #[test]
    fn test_goal_list() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut trip = Goal::new("g1", "Trip", Money::from_cents(200_000));
        trip.current_amount = Money::from_cents(50_000);
        trip.target_date = NaiveDate::from_ymd_opt(2026, 1, 11);
        let mut late = Goal::new("g2", "Laptop", Money::from_cents(100_000));
        late.target_date = NaiveDate::from_ymd_opt(2025, 12, 1);

        let text = format_goal_list(&[trip, late], "$", "%Y-%m-%d", today);
        assert!(text.contains("$500.00"));
        assert!(text.contains("$2,000.00"));
        assert!(text.contains(" 25%"));
        assert!(text.contains("2026-01-11 (10d)"));
        assert!(text.contains("2025-12-01 (overdue)"));
        assert_eq!(
            format_goal_list(&[], "$", "%Y-%m-%d", today),
            "No goals found.\n"
        );
    }

    #[test]
    fn test_notification_list_flags_unread() {
        let list: Vec<Notification> = serde_json::from_str(
            r#"[{"id":"n1","type":"warning","message":"Over budget","is_read":false},
                {"id":"n2","type":"success","message":"Goal reached","is_read":true}]"#,
        )
        .unwrap();
        let text = format_notification_list(&list, "%Y-%m-%d");
        assert!(text.contains("* [!] Over budget"));
        assert!(text.contains("  [+] Goal reached"));
        assert!(format_notification_list(&[], "%Y-%m-%d").contains("all caught up"));
    }

    #[test]
    fn test_catalog_lists_all_kinds() {
        let text = format_category_catalog();
        assert!(text.contains("Grocery"));
        assert!(text.contains("Salary"));
        assert!(text.contains("Emergency Fund"));
    }
}
