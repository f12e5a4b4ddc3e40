use std::rc::Rc;

use yew::Reducible;

use crate::models::finance::RecurringBill;

/// Bill listings for January..current month, fetched for the balance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaidBillsState {
    pub loading: bool,
    pub months: Vec<Vec<RecurringBill>>,
    /// Months whose listing could not be fetched; they count as nothing paid.
    pub failed_months: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PaidBillsAction {
    Loading,
    Loaded {
        months: Vec<Vec<RecurringBill>>,
        failed_months: Vec<u32>,
    },
}

impl Reducible for PaidBillsState {
    type Action = PaidBillsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            PaidBillsAction::Loading => Self {
                loading: true,
                ..(*self).clone()
            },
            PaidBillsAction::Loaded {
                months,
                failed_months,
            } => Self {
                loading: false,
                months,
                failed_months,
            },
        };
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_keeps_previous_months_until_loaded() {
        let state = Rc::new(PaidBillsState::default()).reduce(PaidBillsAction::Loaded {
            months: vec![vec![], vec![]],
            failed_months: vec![2],
        });
        let state = state.reduce(PaidBillsAction::Loading);
        assert!(state.loading);
        assert_eq!(state.months.len(), 2);
        assert_eq!(state.failed_months, vec![2]);
    }
}
