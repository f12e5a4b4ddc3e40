use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::amount;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    pub role: String,
    #[serde(with = "amount")]
    pub salary: f64,
    pub hiring_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payroll {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub employee: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(with = "amount")]
    pub gross_amount: f64,
    #[serde(with = "amount")]
    pub deductions: f64,
    #[serde(with = "amount")]
    pub net_amount: f64,
    pub payment_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdvancePayment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub employee: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    pub date_given: NaiveDate,
    #[serde(with = "amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_payroll: Option<u32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    #[default]
    Active,
    Closed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: PeriodStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<PayrollPeriodItem>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "amount::option")]
    pub total_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees_count: Option<u32>,
}

impl PayrollPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[default]
    Salary,
    Daily,
    Weekly,
    Bonus,
    Extra,
    Other,
}

impl PaymentType {
    pub const ALL: [PaymentType; 6] = [
        PaymentType::Salary,
        PaymentType::Daily,
        PaymentType::Weekly,
        PaymentType::Bonus,
        PaymentType::Extra,
        PaymentType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentType::Salary => "salary",
            PaymentType::Daily => "daily",
            PaymentType::Weekly => "weekly",
            PaymentType::Bonus => "bonus",
            PaymentType::Extra => "extra",
            PaymentType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentType::Salary => "Salary",
            PaymentType::Daily => "Daily rate",
            PaymentType::Weekly => "Weekly rate",
            PaymentType::Bonus => "Bonus",
            PaymentType::Extra => "Extra",
            PaymentType::Other => "Other",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == raw)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayrollPeriodItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub period: u32,
    pub employee: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    pub payment_type: PaymentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type_display: Option<String>,
    #[serde(with = "amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    #[serde(default)]
    pub is_processed: bool,
    #[serde(default)]
    pub is_advance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClosePeriodResponse {
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_item_without_advance_flag() {
        let raw = r#"{
            "id": 4, "period": 1, "employee": 2,
            "payment_type": "daily", "payment_type_display": "Diária",
            "amount": "120.00", "description": "Tuesday",
            "is_processed": false
        }"#;
        let item: PayrollPeriodItem = serde_json::from_str(raw).unwrap();
        assert!(!item.is_advance);
        assert_eq!(item.payment_type, PaymentType::Daily);
        assert_eq!(item.amount, 120.0);
    }

    #[test]
    fn new_employee_serialises_without_id() {
        let employee = Employee {
            id: None,
            name: "Ana".into(),
            role: "Cook".into(),
            salary: 2500.0,
            hiring_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            termination_date: None,
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["hiring_date"], "2024-02-01");
    }

    #[test]
    fn period_range_is_inclusive() {
        let period = PayrollPeriod {
            id: Some(1),
            name: "March".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            status: PeriodStatus::Active,
            created_at: None,
            closed_at: None,
            items: vec![],
            total_amount: None,
            employees_count: None,
        };
        assert!(period.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }
}
