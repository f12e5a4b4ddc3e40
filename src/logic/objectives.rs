use chrono::NaiveDate;

use crate::config::AppSettings;
use crate::error::FormError;
use crate::format::{parse_amount_input, parse_date_input};
use crate::models::objective::{NewObjective, Objective, ObjectiveMovement, ObjectivePatch};

pub fn active(objectives: &[Objective]) -> Vec<&Objective> {
    objectives.iter().filter(|o| o.is_active()).collect()
}

pub fn completed(objectives: &[Objective]) -> Vec<&Objective> {
    objectives.iter().filter(|o| !o.is_active()).collect()
}

/// Money currently set aside across every objective, finished or not.
pub fn total_invested(objectives: &[Objective]) -> f64 {
    objectives.iter().map(|o| o.current_value).sum()
}

pub fn total_targets(objectives: &[Objective]) -> f64 {
    objectives
        .iter()
        .filter(|o| o.is_active())
        .map(|o| o.target_value)
        .sum()
}

pub fn progress_percent(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (current / target * 100.0).clamp(0.0, 100.0)
}

/// Negative once the deadline has passed.
pub fn days_remaining(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

pub fn remaining_amount(current: f64, target: f64) -> f64 {
    (target - current).max(0.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObjectiveOverview {
    pub active_count: usize,
    pub completed_count: usize,
    pub total_invested: f64,
    pub total_targets: f64,
}

impl ObjectiveOverview {
    pub fn compute(objectives: &[Objective]) -> Self {
        Self {
            active_count: active(objectives).len(),
            completed_count: completed(objectives).len(),
            total_invested: total_invested(objectives),
            total_targets: total_targets(objectives),
        }
    }

    pub fn overall_progress(&self) -> f64 {
        progress_percent(self.total_invested, self.total_targets)
    }
}

pub struct ObjectiveInput<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub target: &'a str,
    pub initial: &'a str,
    pub deadline: &'a str,
    pub category: &'a str,
}

pub fn validate_objective(
    input: ObjectiveInput<'_>,
    settings: &AppSettings,
) -> Result<NewObjective, FormError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(FormError::Required("Title"));
    }
    let target_value = parse_amount_input(input.target, settings)
        .ok_or(FormError::InvalidAmount("Target"))?;
    if target_value <= 0.0 {
        return Err(FormError::NotPositive("Target"));
    }
    let current_value = if input.initial.trim().is_empty() {
        None
    } else {
        let initial = parse_amount_input(input.initial, settings)
            .ok_or(FormError::InvalidAmount("Initial amount"))?;
        if initial < 0.0 {
            return Err(FormError::InvalidAmount("Initial amount"));
        }
        Some(initial)
    };
    let deadline = if input.deadline.trim().is_empty() {
        None
    } else {
        Some(parse_date_input(input.deadline).ok_or(FormError::InvalidDate("Deadline"))?)
    };
    if input.category.trim().is_empty() {
        return Err(FormError::Required("Category"));
    }
    let description = input.description.trim();

    Ok(NewObjective {
        title: title.to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
        target_value,
        current_value,
        deadline,
        category: input.category.to_string(),
    })
}

fn movement(
    amount: &str,
    description: &str,
    settings: &AppSettings,
) -> Result<ObjectiveMovement, FormError> {
    let amount = parse_amount_input(amount, settings).ok_or(FormError::InvalidAmount("Amount"))?;
    if amount <= 0.0 {
        return Err(FormError::NotPositive("Amount"));
    }
    let description = description.trim();
    Ok(ObjectiveMovement {
        amount,
        description: (!description.is_empty()).then(|| description.to_string()),
    })
}

pub fn validate_deposit(
    amount: &str,
    description: &str,
    settings: &AppSettings,
) -> Result<ObjectiveMovement, FormError> {
    movement(amount, description, settings)
}

pub fn validate_withdrawal(
    amount: &str,
    description: &str,
    available: f64,
    settings: &AppSettings,
) -> Result<ObjectiveMovement, FormError> {
    let movement = movement(amount, description, settings)?;
    if movement.amount > available {
        return Err(FormError::ExceedsBalance);
    }
    Ok(movement)
}

/// Edit of an existing objective. Blank fields are left untouched on the server.
pub fn validate_patch(
    target: &str,
    deadline: &str,
    settings: &AppSettings,
) -> Result<ObjectivePatch, FormError> {
    let target_value = if target.trim().is_empty() {
        None
    } else {
        let value = parse_amount_input(target, settings).ok_or(FormError::InvalidAmount("Target"))?;
        if value <= 0.0 {
            return Err(FormError::NotPositive("Target"));
        }
        Some(value)
    };
    let deadline = if deadline.trim().is_empty() {
        None
    } else {
        Some(parse_date_input(deadline).ok_or(FormError::InvalidDate("Deadline"))?)
    };
    Ok(ObjectivePatch {
        target_value,
        deadline,
        ..ObjectivePatch::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::objective::ObjectiveStatus;

    fn objective(id: u32, current: f64, target: f64, status: ObjectiveStatus) -> Objective {
        Objective {
            id,
            slug: format!("goal-{}", id),
            title: format!("Goal {}", id),
            description: String::new(),
            target_value: target,
            current_value: current,
            deadline: None,
            category: "outros".into(),
            category_display: String::new(),
            progress_percentage: 0.0,
            remaining_amount: 0.0,
            days_remaining: None,
            status,
            achieved: status == ObjectiveStatus::Completed,
            created_at: String::new(),
            completed_at: None,
            deposits: Vec::new(),
        }
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress_percent(50.0, 200.0), 25.0);
        assert_eq!(progress_percent(300.0, 200.0), 100.0);
        assert_eq!(progress_percent(-10.0, 200.0), 0.0);
        assert_eq!(progress_percent(10.0, 0.0), 0.0);
    }

    #[test]
    fn remaining_never_negative() {
        assert_eq!(remaining_amount(8500.0, 15000.0), 6500.0);
        assert_eq!(remaining_amount(16000.0, 15000.0), 0.0);
    }

    #[test]
    fn days_remaining_counts_calendar_days() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let deadline = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(days_remaining(deadline, today), 30);
        assert_eq!(days_remaining(today, deadline), -30);
    }

    #[test]
    fn overview_splits_active_and_completed() {
        let objectives = vec![
            objective(1, 8500.0, 15000.0, ObjectiveStatus::Active),
            objective(2, 4200.0, 10000.0, ObjectiveStatus::Active),
            objective(3, 3000.0, 3000.0, ObjectiveStatus::Completed),
        ];
        let overview = ObjectiveOverview::compute(&objectives);
        assert_eq!(overview.active_count, 2);
        assert_eq!(overview.completed_count, 1);
        assert_eq!(overview.total_invested, 15700.0);
        assert_eq!(overview.total_targets, 25000.0);
        assert_eq!(active(&objectives).len(), 2);
        assert_eq!(completed(&objectives)[0].id, 3);
    }

    #[test]
    fn objective_form() {
        let brl = AppSettings::default();
        let input = |target, initial, deadline| ObjectiveInput {
            title: "Emergency fund",
            description: "",
            target,
            initial,
            deadline,
            category: "emergencia",
        };
        let ok = validate_objective(input("10000", "", "2025-06-30"), &brl).unwrap();
        assert_eq!(ok.current_value, None);
        assert_eq!(ok.description, None);
        assert!(ok.deadline.is_some());

        let with_initial = validate_objective(input("10000", "500", ""), &brl).unwrap();
        assert_eq!(with_initial.current_value, Some(500.0));
        assert_eq!(with_initial.deadline, None);

        assert_eq!(
            validate_objective(input("0", "", ""), &brl),
            Err(FormError::NotPositive("Target"))
        );
        assert_eq!(
            validate_objective(input("100", "", "soon"), &brl),
            Err(FormError::InvalidDate("Deadline"))
        );
    }

    #[test]
    fn withdrawal_cannot_exceed_current_value() {
        let brl = AppSettings::default();
        assert_eq!(
            validate_withdrawal("600", "", 500.0, &brl),
            Err(FormError::ExceedsBalance)
        );
        let ok = validate_withdrawal("500", " car repair ", 500.0, &brl).unwrap();
        assert_eq!(ok.description.as_deref(), Some("car repair"));
        assert_eq!(validate_deposit("0", "", &brl), Err(FormError::NotPositive("Amount")));
    }

    #[test]
    fn patch_keeps_blank_fields_out() {
        let brl = AppSettings::default();
        let patch = validate_patch("12000", "", &brl).unwrap();
        assert_eq!(patch.target_value, Some(12000.0));
        assert_eq!(patch.deadline, None);
        assert_eq!(patch.title, None);
        assert_eq!(validate_patch("", "", &brl), Ok(ObjectivePatch::default()));
        assert_eq!(validate_patch("-5", "", &brl), Err(FormError::NotPositive("Target")));
    }
}
