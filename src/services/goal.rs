//! Savings goal service
//!
//! Validated create, contribute and delete operations for goals.

use chrono::NaiveDate;

use crate::client::types::{GoalContribution, NewGoal};
use crate::client::ApiClient;
use crate::error::{PulseError, PulseResult};
use crate::models::{Goal, GoalId, Money};

/// Service for savings goals
pub struct GoalService<'a> {
    api: &'a ApiClient,
}

impl<'a> GoalService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn list(&self) -> PulseResult<Vec<Goal>> {
        self.api.list_goals()
    }

    pub fn create(
        &self,
        title: &str,
        target_amount: Money,
        target_date: Option<NaiveDate>,
    ) -> PulseResult<Goal> {
        let body = new_goal_request(title, target_amount, target_date)?;
        let goal = self.api.create_goal(&body)?;
        tracing::info!(id = %goal.id, title = %goal.title, "created goal");
        Ok(goal)
    }

    /// Add money to a goal and return the goal as it now stands
    pub fn contribute(&self, goal: &Goal, amount: Money) -> PulseResult<Goal> {
        validate_contribution(amount)?;
        self.api
            .contribute_to_goal(&goal.id, &GoalContribution { amount })?;

        let mut updated = goal.clone();
        updated.current_amount += amount;
        tracing::info!(
            id = %goal.id,
            amount = %amount,
            progress = updated.progress_percent(),
            "contributed to goal"
        );
        Ok(updated)
    }

    pub fn delete(&self, id: &GoalId) -> PulseResult<()> {
        self.api.delete_goal(id)?;
        tracing::info!(%id, "deleted goal");
        Ok(())
    }
}

/// Find a goal by ID, or by exact title
pub fn find_goal<'g>(goals: &'g [Goal], key: &str) -> PulseResult<&'g Goal> {
    let key = key.trim();
    goals
        .iter()
        .find(|g| g.id.as_str() == key)
        .or_else(|| goals.iter().find(|g| g.title == key))
        .ok_or_else(|| PulseError::NotFound {
            entity_type: "Goal",
            identifier: key.to_string(),
        })
}

fn new_goal_request(
    title: &str,
    target_amount: Money,
    target_date: Option<NaiveDate>,
) -> PulseResult<NewGoal> {
    let title = title.trim();
    if title.is_empty() {
        return Err(PulseError::Validation("Goal title is required".into()));
    }
    if !target_amount.is_positive() {
        return Err(PulseError::Validation(
            "Target amount must be greater than zero".into(),
        ));
    }
    Ok(NewGoal {
        title: title.to_string(),
        target_amount,
        target_date: target_date.map(|d| d.format("%Y-%m-%d").to_string()),
    })
}

fn validate_contribution(amount: Money) -> PulseResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(PulseError::Validation(
            "Contribution must be greater than zero".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn offline_api() -> ApiClient {
        let settings = Settings {
            api_base_url: "http://127.0.0.1:9/api".to_string(),
            ..Settings::default()
        };
        ApiClient::new(&settings).unwrap()
    }

    #[test]
    fn test_request_validation() {
        let target = Money::from_cents(100_000);
        assert!(new_goal_request(" ", target, None).unwrap_err().is_validation());
        assert!(new_goal_request("Trip", Money::zero(), None)
            .unwrap_err()
            .is_validation());

        let body = new_goal_request(" Trip ", target, NaiveDate::from_ymd_opt(2026, 7, 1)).unwrap();
        assert_eq!(body.title, "Trip");
        assert_eq!(body.target_date.as_deref(), Some("2026-07-01"));
    }

    #[test]
    fn test_contribution_is_checked_before_sending() {
        let api = offline_api();
        let service = GoalService::new(&api);
        let goal = Goal::new("g1", "Trip", Money::from_cents(100_000));

        assert!(service.contribute(&goal, Money::zero()).unwrap_err().is_validation());
        assert!(service
            .contribute(&goal, Money::from_cents(-100))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_find_goal() {
        let goals = vec![
            Goal::new("g1", "Trip", Money::from_cents(100)),
            Goal::new("g2", "Car", Money::from_cents(100)),
        ];
        assert_eq!(find_goal(&goals, "g2").unwrap().title, "Car");
        assert_eq!(find_goal(&goals, " Trip ").unwrap().id.as_str(), "g1");
        assert!(find_goal(&goals, "car").unwrap_err().is_not_found());
    }
}
