use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::amount;

/// Category slugs accepted by the objectives endpoint, with display labels.
pub const OBJECTIVE_CATEGORIES: &[(&str, &str)] = &[
    ("lazer", "Leisure"),
    ("transporte", "Transport"),
    ("casa", "Home"),
    ("educacao", "Education"),
    ("emergencia", "Emergency"),
    ("investimento", "Investment"),
    ("outros", "Other"),
];

pub fn category_label(slug: &str) -> &str {
    OBJECTIVE_CATEGORIES
        .iter()
        .find(|(key, _)| *key == slug)
        .map(|(_, label)| *label)
        .unwrap_or(slug)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveStatus {
    #[default]
    #[serde(rename = "ativo")]
    Active,
    #[serde(rename = "concluido")]
    Completed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveDeposit {
    pub id: u32,
    /// Withdrawals come back as negative amounts.
    #[serde(with = "amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date_added: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: u32,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "amount")]
    pub target_value: f64,
    #[serde(with = "amount")]
    pub current_value: f64,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub category_display: String,
    #[serde(default, with = "amount")]
    pub progress_percentage: f64,
    #[serde(default, with = "amount")]
    pub remaining_amount: f64,
    #[serde(default)]
    pub days_remaining: Option<i64>,
    #[serde(default)]
    pub status: ObjectiveStatus,
    #[serde(default)]
    pub achieved: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub deposits: Vec<ObjectiveDeposit>,
}

impl Objective {
    pub fn is_active(&self) -> bool {
        self.status == ObjectiveStatus::Active
    }

    pub fn display_category(&self) -> &str {
        if self.category_display.is_empty() {
            category_label(&self.category)
        } else {
            &self.category_display
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewObjective {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "amount")]
    pub target_value: f64,
    #[serde(skip_serializing_if = "Option::is_none", with = "amount::option")]
    pub current_value: Option<f64>,
    pub deadline: Option<NaiveDate>,
    pub category: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ObjectivePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Body of both `add_deposit` and `withdraw`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectiveMovement {
    #[serde(with = "amount")]
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DepositResponse {
    pub objective: Objective,
    pub deposit: ObjectiveDeposit,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WithdrawalResponse {
    pub objective: Objective,
    pub withdrawal: ObjectiveDeposit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objective_status_uses_backend_slugs() {
        let raw = r#"{
            "id": 2, "slug": "trip", "title": "Trip",
            "target_value": "15000.00", "current_value": "8500.00",
            "deadline": "2025-12-31", "category": "lazer",
            "status": "concluido", "deposits": [{"id": 1, "amount": "-50.00"}]
        }"#;
        let objective: Objective = serde_json::from_str(raw).unwrap();
        assert_eq!(objective.status, ObjectiveStatus::Completed);
        assert!(!objective.is_active());
        assert_eq!(objective.display_category(), "Leisure");
        assert_eq!(objective.deposits[0].amount, -50.0);
    }

    #[test]
    fn new_objective_omits_unset_initial_value() {
        let body = NewObjective {
            title: "Car".into(),
            description: None,
            target_value: 45000.0,
            current_value: None,
            deadline: None,
            category: "transporte".into(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("current_value").is_none());
        assert!(json.get("description").is_none());
        assert_eq!(json["deadline"], serde_json::Value::Null);
    }
}
