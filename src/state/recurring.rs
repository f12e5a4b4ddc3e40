use std::rc::Rc;

use chrono::NaiveDate;
use yew::Reducible;

use super::replace_first;
use crate::logic::recurring::{apply_payment, BillPeriod};
use crate::models::finance::RecurringBill;

/// Bills as listed for one selected month.
#[derive(Clone, Debug, PartialEq)]
pub struct RecurringPeriodState {
    pub period: BillPeriod,
    pub loading: bool,
    pub error: Option<String>,
    pub bills: Vec<RecurringBill>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RecurringAction {
    /// Switches month; the bill list is refetched for it.
    Select(BillPeriod),
    Loading,
    Loaded {
        period: BillPeriod,
        bills: Vec<RecurringBill>,
    },
    Failed {
        period: BillPeriod,
        message: String,
    },
    /// `period` is the month the payment was sent for.
    MarkedPaid {
        period: BillPeriod,
        bill_id: u32,
        amount: f64,
        paid_on: NaiveDate,
    },
    Added(RecurringBill),
    Replaced(RecurringBill),
    Removed(u32),
    ClearError,
}

impl RecurringPeriodState {
    pub fn new(period: BillPeriod) -> Self {
        Self {
            period,
            loading: true,
            error: None,
            bills: Vec::new(),
        }
    }
}

impl Reducible for RecurringPeriodState {
    type Action = RecurringAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            RecurringAction::Select(period) => {
                if period == next.period {
                    return self;
                }
                next.period = period;
                next.loading = true;
                next.error = None;
                next.bills.clear();
            }
            RecurringAction::Loading => {
                next.loading = true;
                next.error = None;
            }
            RecurringAction::Loaded { period, bills } => {
                // a slower response for a month the user already left
                if period != next.period {
                    return self;
                }
                next.loading = false;
                next.bills = bills;
            }
            RecurringAction::Failed { period, message } => {
                if period != next.period {
                    return self;
                }
                next.loading = false;
                next.error = Some(message);
            }
            RecurringAction::MarkedPaid {
                period,
                bill_id,
                amount,
                paid_on,
            } => {
                // the listing now on screen belongs to another month
                if period != next.period {
                    return self;
                }
                if let Some(bill) = next.bills.iter_mut().find(|b| b.id == bill_id) {
                    apply_payment(bill, period, amount, paid_on);
                }
            }
            RecurringAction::Added(bill) => next.bills.insert(0, bill),
            RecurringAction::Replaced(bill) => {
                let id = bill.id;
                // keep the period record, PATCH answers carry none
                let payment = next
                    .bills
                    .iter()
                    .find(|b| b.id == id)
                    .and_then(|b| b.payment_for_period.clone());
                let mut bill = bill;
                if bill.payment_for_period.is_none() {
                    bill.payment_for_period = payment;
                }
                replace_first(&mut next.bills, |b| b.id == id, bill);
            }
            RecurringAction::Removed(id) => next.bills.retain(|b| b.id != id),
            RecurringAction::ClearError => next.error = None,
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::recurring::is_paid;

    fn bill(id: u32) -> RecurringBill {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": format!("Bill {}", id), "value": 100, "due_day": 10
        }))
        .unwrap()
    }

    fn march() -> BillPeriod {
        BillPeriod {
            year: 2024,
            month: 3,
        }
    }

    #[test]
    fn stale_listing_is_ignored() {
        let state = Rc::new(RecurringPeriodState::new(march()))
            .reduce(RecurringAction::Select(march().next()));
        let state = state.reduce(RecurringAction::Loaded {
            period: march(),
            bills: vec![bill(1)],
        });
        assert!(state.loading);
        assert!(state.bills.is_empty());

        let state = state.reduce(RecurringAction::Loaded {
            period: march().next(),
            bills: vec![bill(2)],
        });
        assert!(!state.loading);
        assert_eq!(state.bills[0].id, 2);
    }

    #[test]
    fn payment_for_a_month_left_behind_is_ignored() {
        let april = march().next();
        let state = Rc::new(RecurringPeriodState::new(march()))
            .reduce(RecurringAction::Loaded {
                period: march(),
                bills: vec![bill(1)],
            })
            .reduce(RecurringAction::Select(april))
            .reduce(RecurringAction::Loaded {
                period: april,
                bills: vec![bill(1)],
            });
        let state = state.reduce(RecurringAction::MarkedPaid {
            period: march(),
            bill_id: 1,
            amount: 100.0,
            paid_on: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
        });
        assert_eq!(state.period, april);
        assert!(!is_paid(&state.bills[0]));
    }

    #[test]
    fn failure_for_a_month_left_behind_is_ignored() {
        let april = march().next();
        let state = Rc::new(RecurringPeriodState::new(march()))
            .reduce(RecurringAction::Select(april))
            .reduce(RecurringAction::Failed {
                period: march(),
                message: "Could not load bills for March 2024".into(),
            });
        assert!(state.loading);
        assert_eq!(state.error, None);

        let state = state.reduce(RecurringAction::Failed {
            period: april,
            message: "Could not load bills for April 2024".into(),
        });
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Could not load bills for April 2024"));
    }

    #[test]
    fn retry_clears_the_error() {
        let state = Rc::new(RecurringPeriodState::new(march()))
            .reduce(RecurringAction::Failed {
                period: march(),
                message: "offline".into(),
            })
            .reduce(RecurringAction::Loading);
        assert!(state.loading);
        assert_eq!(state.error, None);
        let state = state
            .reduce(RecurringAction::Failed {
                period: march(),
                message: "offline".into(),
            })
            .reduce(RecurringAction::ClearError);
        assert_eq!(state.error, None);
    }

    #[test]
    fn marking_paid_updates_the_local_copy() {
        let state = Rc::new(RecurringPeriodState::new(march())).reduce(RecurringAction::Loaded {
            period: march(),
            bills: vec![bill(1), bill(2)],
        });
        let state = state.reduce(RecurringAction::MarkedPaid {
            period: march(),
            bill_id: 2,
            amount: 90.0,
            paid_on: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        });
        assert!(!is_paid(&state.bills[0]));
        assert!(is_paid(&state.bills[1]));
        assert_eq!(
            state.bills[1].payment_for_period.as_ref().unwrap().amount_paid,
            Some(90.0)
        );
    }

    #[test]
    fn replacing_keeps_period_record() {
        let state = Rc::new(RecurringPeriodState::new(march()))
            .reduce(RecurringAction::Loaded {
                period: march(),
                bills: vec![bill(1)],
            })
            .reduce(RecurringAction::MarkedPaid {
                period: march(),
                bill_id: 1,
                amount: 100.0,
                paid_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            });
        let mut renamed = bill(1);
        renamed.name = "Rent".into();
        let state = state.reduce(RecurringAction::Replaced(renamed));
        assert_eq!(state.bills[0].name, "Rent");
        assert!(is_paid(&state.bills[0]));
    }

    #[test]
    fn reselecting_same_month_keeps_bills() {
        let state = Rc::new(RecurringPeriodState::new(march())).reduce(RecurringAction::Loaded {
            period: march(),
            bills: vec![bill(1)],
        });
        let state = state.reduce(RecurringAction::Select(march()));
        assert_eq!(state.bills.len(), 1);
        assert!(!state.loading);
    }
}
