use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::amount;

pub const MISSING_CATEGORY: &str = "Category not found";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    /// Stand-in for a category id that is not in the loaded reference list.
    pub fn missing(id: u32) -> Self {
        Self {
            id,
            name: MISSING_CATEGORY.to_string(),
            slug: String::new(),
            description: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Incomes and expenses share the same resource shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: u32,
    pub title: String,
    #[serde(with = "amount")]
    pub value: f64,
    #[serde(default)]
    pub description: String,
    pub category: u32,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<u32>,
}

pub type Income = LedgerEntry;
pub type Expense = LedgerEntry;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewLedgerEntry {
    pub title: String,
    #[serde(with = "amount")]
    pub value: f64,
    pub description: String,
    pub category: u32,
    pub date: NaiveDate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

/// Client-side view joining an income or expense with its category.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: u32,
    pub title: String,
    pub amount: f64,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn from_entry(entry: LedgerEntry, kind: TransactionKind, categories: &[Category]) -> Self {
        let category = categories
            .iter()
            .find(|c| c.id == entry.category)
            .cloned()
            .unwrap_or_else(|| Category::missing(entry.category));
        Self {
            id: entry.id,
            title: entry.title,
            amount: entry.value,
            description: entry.description,
            category,
            date: entry.date,
            kind,
        }
    }

    /// Income positive, expense negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillFrequency {
    #[default]
    Monthly,
    Weekly,
    Yearly,
}

impl BillFrequency {
    pub const ALL: [BillFrequency; 3] = [
        BillFrequency::Monthly,
        BillFrequency::Weekly,
        BillFrequency::Yearly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BillFrequency::Monthly => "monthly",
            BillFrequency::Weekly => "weekly",
            BillFrequency::Yearly => "yearly",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BillFrequency::Monthly => "Monthly",
            BillFrequency::Weekly => "Weekly",
            BillFrequency::Yearly => "Yearly",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == raw)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

impl BillStatus {
    pub fn label(self) -> &'static str {
        match self {
            BillStatus::Pending => "Pending",
            BillStatus::Paid => "Paid",
            BillStatus::Overdue => "Overdue",
        }
    }
}

/// Payment record the backend attaches to a bill when it is listed for a
/// specific `(year, month)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeriodPayment {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub status: BillStatus,
    #[serde(default, with = "amount::option")]
    pub amount_paid: Option<f64>,
    #[serde(default)]
    pub payment_date: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecurringBill {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "amount")]
    pub value: f64,
    pub due_day: u32,
    #[serde(default)]
    pub frequency: BillFrequency,
    #[serde(default)]
    pub category: Option<u32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Stored status on the bill itself; superseded by the per-period record.
    #[serde(default)]
    pub status: BillStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_for_period: Option<PeriodPayment>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewRecurringBill {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "amount")]
    pub value: f64,
    pub due_day: u32,
    pub frequency: BillFrequency,
    pub category: Option<u32>,
    pub is_active: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RecurringBillPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkBillPaid {
    pub year: i32,
    pub month: u32,
    #[serde(with = "amount")]
    pub amount_paid: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bill_from_period_listing() {
        let raw = r#"{
            "id": 7,
            "name": "Rent",
            "value": "1200.00",
            "due_day": 10,
            "frequency": "monthly",
            "category": null,
            "is_active": true,
            "status": "pending",
            "created_at": "2024-01-02T10:00:00Z",
            "payment_for_period": {"year": 2024, "month": 3, "status": "paid", "amount_paid": "1150.00"}
        }"#;
        let bill: RecurringBill = serde_json::from_str(raw).unwrap();
        assert_eq!(bill.value, 1200.0);
        let payment = bill.payment_for_period.unwrap();
        assert_eq!(payment.status, BillStatus::Paid);
        assert_eq!(payment.amount_paid, Some(1150.0));
    }

    #[test]
    fn bill_defaults_when_fields_missing() {
        let bill: RecurringBill =
            serde_json::from_str(r#"{"id": 1, "name": "Gym", "value": 90, "due_day": 5}"#).unwrap();
        assert!(bill.is_active);
        assert_eq!(bill.frequency, BillFrequency::Monthly);
        assert!(bill.payment_for_period.is_none());
    }

    #[test]
    fn transaction_falls_back_to_missing_category() {
        let entry = LedgerEntry {
            id: 3,
            title: "Market".into(),
            value: 80.0,
            description: String::new(),
            category: 99,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            user: None,
        };
        let tx = Transaction::from_entry(entry, TransactionKind::Expense, &[]);
        assert_eq!(tx.category.name, MISSING_CATEGORY);
        assert_eq!(tx.category.id, 99);
        assert_eq!(tx.signed_amount(), -80.0);
    }
}
