use std::rc::Rc;

use yew::Reducible;

use super::replace_first;
use crate::logic::finance::sort_newest_first;
use crate::models::finance::{Category, RecurringBill, Transaction, TransactionKind};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FinanceState {
    pub loading: bool,
    pub error: Option<String>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub recurring_bills: Vec<RecurringBill>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FinanceRecord {
    Category(Category),
    Transaction(Transaction),
    Bill(RecurringBill),
}

/// Income and expense ids come from different tables and may collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinanceKey {
    Category(u32),
    Transaction { id: u32, kind: TransactionKind },
    Bill(u32),
}

#[derive(Clone, Debug, PartialEq)]
pub enum FinanceAction {
    Loading,
    Loaded {
        categories: Vec<Category>,
        transactions: Vec<Transaction>,
        recurring_bills: Vec<RecurringBill>,
    },
    Failed(String),
    Added(FinanceRecord),
    Replaced(FinanceRecord),
    Removed(FinanceKey),
    ClearError,
}

impl FinanceState {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }
}

impl Reducible for FinanceState {
    type Action = FinanceAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FinanceAction::Loading => {
                next.loading = true;
                next.error = None;
            }
            FinanceAction::Loaded {
                categories,
                mut transactions,
                recurring_bills,
            } => {
                sort_newest_first(&mut transactions);
                next.loading = false;
                next.categories = categories;
                next.transactions = transactions;
                next.recurring_bills = recurring_bills;
            }
            FinanceAction::Failed(message) => {
                next.loading = false;
                next.error = Some(message);
            }
            FinanceAction::Added(record) => match record {
                FinanceRecord::Category(category) => next.categories.push(category),
                FinanceRecord::Transaction(tx) => next.transactions.insert(0, tx),
                FinanceRecord::Bill(bill) => next.recurring_bills.insert(0, bill),
            },
            FinanceAction::Replaced(record) => match record {
                FinanceRecord::Category(category) => {
                    let id = category.id;
                    replace_first(&mut next.categories, |c| c.id == id, category);
                }
                FinanceRecord::Transaction(tx) => {
                    let (id, kind) = (tx.id, tx.kind);
                    replace_first(
                        &mut next.transactions,
                        |t| t.id == id && t.kind == kind,
                        tx,
                    );
                    sort_newest_first(&mut next.transactions);
                }
                FinanceRecord::Bill(bill) => {
                    let id = bill.id;
                    replace_first(&mut next.recurring_bills, |b| b.id == id, bill);
                }
            },
            FinanceAction::Removed(key) => match key {
                FinanceKey::Category(id) => next.categories.retain(|c| c.id != id),
                FinanceKey::Transaction { id, kind } => next
                    .transactions
                    .retain(|t| !(t.id == id && t.kind == kind)),
                FinanceKey::Bill(id) => next.recurring_bills.retain(|b| b.id != id),
            },
            FinanceAction::ClearError => next.error = None,
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(id: u32, kind: TransactionKind, day: u32) -> Transaction {
        Transaction {
            id,
            title: format!("{:?} {}", kind, id),
            amount: 10.0,
            description: String::new(),
            category: Category::missing(1),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            kind,
        }
    }

    fn loaded(transactions: Vec<Transaction>) -> Rc<FinanceState> {
        Rc::new(FinanceState::loading()).reduce(FinanceAction::Loaded {
            categories: vec![],
            transactions,
            recurring_bills: vec![],
        })
    }

    #[test]
    fn load_cycle() {
        let state = Rc::new(FinanceState::default()).reduce(FinanceAction::Loading);
        assert!(state.loading);
        let state = state.reduce(FinanceAction::Failed("boom".into()));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("boom"));
        let state = state.reduce(FinanceAction::ClearError);
        assert_eq!(state.error, None);
    }

    #[test]
    fn loaded_transactions_are_sorted() {
        let state = loaded(vec![tx(1, TransactionKind::Income, 1), tx(2, TransactionKind::Income, 9)]);
        assert_eq!(state.transactions[0].id, 2);
    }

    #[test]
    fn new_transactions_go_first() {
        let state = loaded(vec![tx(1, TransactionKind::Income, 9)]);
        let state = state.reduce(FinanceAction::Added(FinanceRecord::Transaction(tx(
            5,
            TransactionKind::Expense,
            1,
        ))));
        assert_eq!(state.transactions[0].id, 5);
        assert_eq!(state.transactions.len(), 2);
    }

    #[test]
    fn removal_matches_id_and_kind() {
        let state = loaded(vec![tx(1, TransactionKind::Income, 2), tx(1, TransactionKind::Expense, 1)]);
        let state = state.reduce(FinanceAction::Removed(FinanceKey::Transaction {
            id: 1,
            kind: TransactionKind::Expense,
        }));
        assert_eq!(state.transactions.len(), 1);
        assert_eq!(state.transactions[0].kind, TransactionKind::Income);
    }

    #[test]
    fn bills_are_prepended_and_replaced() {
        let bill = |id: u32, value: f64| -> RecurringBill {
            serde_json::from_value(serde_json::json!({
                "id": id, "name": "Bill", "value": value, "due_day": 5
            }))
            .unwrap()
        };
        let state = Rc::new(FinanceState::default())
            .reduce(FinanceAction::Added(FinanceRecord::Bill(bill(1, 10.0))))
            .reduce(FinanceAction::Added(FinanceRecord::Bill(bill(2, 20.0))));
        assert_eq!(state.recurring_bills[0].id, 2);

        let state = state.reduce(FinanceAction::Replaced(FinanceRecord::Bill(bill(1, 15.0))));
        assert_eq!(state.recurring_bills[1].value, 15.0);

        let state = state.reduce(FinanceAction::Removed(FinanceKey::Bill(2)));
        assert_eq!(state.recurring_bills.len(), 1);
    }
}
