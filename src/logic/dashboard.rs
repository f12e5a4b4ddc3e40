use chrono::NaiveDate;

use crate::logic::finance::{month_totals, Totals};
use crate::logic::objectives::ObjectiveOverview;
use crate::logic::recurring::{total_paid_across, BillPeriod};
use crate::models::finance::{RecurringBill, Transaction, TransactionKind};
use crate::models::objective::Objective;

pub const RECENT_LIMIT: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct RecentTransaction {
    pub id: u32,
    pub title: String,
    /// Expenses are negative.
    pub amount: f64,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub category: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardSummary {
    pub balance: f64,
    pub month_incomes: f64,
    pub month_expenses: f64,
    pub recurring_paid: f64,
    pub invested: f64,
    pub active_objectives: usize,
    pub completed_objectives: usize,
    pub recent: Vec<RecentTransaction>,
}

impl DashboardSummary {
    /// `paid_bills_per_month` holds the bill listings for January through the
    /// current month; only their paid records count against the balance.
    pub fn compute(
        transactions: &[Transaction],
        paid_bills_per_month: &[Vec<RecurringBill>],
        objectives: &[Objective],
        today: NaiveDate,
    ) -> Self {
        let totals = Totals::compute(transactions);
        let month = month_totals(transactions, BillPeriod::current(today));
        let recurring_paid = total_paid_across(paid_bills_per_month);
        let overview = ObjectiveOverview::compute(objectives);

        let mut recent: Vec<&Transaction> = transactions.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        let recent = recent
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|tx| RecentTransaction {
                id: tx.id,
                title: tx.title.clone(),
                amount: tx.signed_amount(),
                kind: tx.kind,
                date: tx.date,
                category: tx.category.name.clone(),
            })
            .collect();

        Self {
            balance: totals.balance - recurring_paid,
            month_incomes: month.incomes,
            month_expenses: month.expenses,
            recurring_paid,
            invested: overview.total_invested,
            active_objectives: overview.active_count,
            completed_objectives: overview.completed_count,
            recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finance::{BillFrequency, BillStatus, Category, PeriodPayment};
    use crate::models::objective::ObjectiveStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(id: u32, amount: f64, kind: TransactionKind, day: NaiveDate) -> Transaction {
        Transaction {
            id,
            title: format!("tx {}", id),
            amount,
            description: String::new(),
            category: Category::missing(0),
            date: day,
            kind,
        }
    }

    fn paid_bill(value: f64, amount_paid: Option<f64>) -> RecurringBill {
        RecurringBill {
            id: 1,
            name: "Rent".into(),
            description: None,
            value,
            due_day: 5,
            frequency: BillFrequency::Monthly,
            category: None,
            is_active: true,
            status: BillStatus::Pending,
            created_at: None,
            payment_for_period: Some(PeriodPayment {
                id: None,
                year: None,
                month: None,
                status: BillStatus::Paid,
                amount_paid,
                payment_date: None,
            }),
        }
    }

    fn objective(current: f64, status: ObjectiveStatus) -> Objective {
        serde_json::from_value(serde_json::json!({
            "id": 1, "slug": "g", "title": "G",
            "target_value": 1000, "current_value": current,
            "status": if status == ObjectiveStatus::Active { "ativo" } else { "concluido" },
        }))
        .unwrap()
    }

    #[test]
    fn balance_subtracts_paid_recurring_bills() {
        let today = date(2024, 3, 15);
        let transactions = vec![
            tx(1, 5000.0, TransactionKind::Income, date(2024, 3, 1)),
            tx(2, 1000.0, TransactionKind::Income, date(2024, 2, 1)),
            tx(3, 250.0, TransactionKind::Expense, date(2024, 3, 2)),
        ];
        let months = vec![
            vec![paid_bill(1200.0, None)],
            vec![paid_bill(1200.0, Some(1100.0))],
            vec![],
        ];
        let objectives = vec![
            objective(300.0, ObjectiveStatus::Active),
            objective(1000.0, ObjectiveStatus::Completed),
        ];

        let summary = DashboardSummary::compute(&transactions, &months, &objectives, today);
        assert_eq!(summary.recurring_paid, 2300.0);
        assert_eq!(summary.balance, 6000.0 - 250.0 - 2300.0);
        assert_eq!(summary.month_incomes, 5000.0);
        assert_eq!(summary.month_expenses, 250.0);
        assert_eq!(summary.invested, 1300.0);
        assert_eq!(summary.active_objectives, 1);
        assert_eq!(summary.completed_objectives, 1);
    }

    #[test]
    fn recent_keeps_ten_newest_with_signed_expenses() {
        let transactions: Vec<Transaction> = (1..=12)
            .map(|d| tx(d, 10.0, TransactionKind::Expense, date(2024, 1, d)))
            .collect();
        let summary = DashboardSummary::compute(&transactions, &[], &[], date(2024, 1, 31));
        assert_eq!(summary.recent.len(), RECENT_LIMIT);
        assert_eq!(summary.recent[0].date, date(2024, 1, 12));
        assert_eq!(summary.recent[9].date, date(2024, 1, 3));
        assert!(summary.recent.iter().all(|r| r.amount == -10.0));
    }
}
