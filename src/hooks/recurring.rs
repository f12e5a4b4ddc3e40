use std::ops::Deref;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{expire_on_unauthorized, report, today, use_auth, AuthHandle};
use crate::api::{ApiClient, ApiResult};
use crate::error::ApiError;
use crate::logic::recurring::{BillPeriod, PeriodBillSummary};
use crate::models::finance::{MarkBillPaid, RecurringBill};
use crate::state::recurring::{RecurringAction, RecurringPeriodState};

#[derive(Clone, PartialEq)]
pub struct RecurringPeriodData {
    state: UseReducerHandle<RecurringPeriodState>,
    client: ApiClient,
    auth: Option<AuthHandle>,
}

impl Deref for RecurringPeriodData {
    type Target = RecurringPeriodState;

    fn deref(&self) -> &RecurringPeriodState {
        &self.state
    }
}

impl RecurringPeriodData {
    fn checked(&self, err: ApiError) -> ApiError {
        expire_on_unauthorized(self.auth.as_ref(), err)
    }

    pub fn select(&self, period: BillPeriod) {
        self.state.dispatch(RecurringAction::Select(period));
    }

    pub fn summary(&self) -> PeriodBillSummary {
        PeriodBillSummary::compute(&self.state.bills, self.state.period, today())
    }

    fn fetch(&self, period: BillPeriod) {
        let this = self.clone();
        spawn_local(async move {
            match this.client.recurring_bills_for(period).await {
                Ok(bills) => this
                    .state
                    .dispatch(RecurringAction::Loaded { period, bills }),
                Err(err) => {
                    let what = format!("Could not load bills for {}", period.label());
                    let message = report(this.auth.as_ref(), &what, &err);
                    this
                        .state
                        .dispatch(RecurringAction::Failed { period, message });
                }
            }
        });
    }

    pub fn reload(&self) {
        self.state.dispatch(RecurringAction::Loading);
        self.fetch(self.state.period);
    }

    pub fn clear_error(&self) {
        self.state.dispatch(RecurringAction::ClearError);
    }

    /// `amount` defaults to the bill's value when the user leaves it blank.
    pub async fn mark_paid(&self, bill: &RecurringBill, amount: Option<f64>) -> ApiResult<()> {
        let period = self.state.period;
        let amount_paid = amount.unwrap_or(bill.value);
        let body = MarkBillPaid {
            year: period.year,
            month: period.month,
            amount_paid,
        };
        self
            .client
            .mark_bill_paid(bill.id, &body)
            .await
            .map_err(|err| self.checked(err))?;
        log::info!("bill {} paid for {}", bill.id, period.label());
        self.state.dispatch(RecurringAction::MarkedPaid {
            period,
            bill_id: bill.id,
            amount: amount_paid,
            paid_on: today(),
        });
        Ok(())
    }

    /// Mirrors changes made through the finance hook into this month's list.
    pub fn bill_added(&self, bill: RecurringBill) {
        self.state.dispatch(RecurringAction::Added(bill));
    }

    pub fn bill_replaced(&self, bill: RecurringBill) {
        self.state.dispatch(RecurringAction::Replaced(bill));
    }

    pub fn bill_removed(&self, id: u32) {
        self.state.dispatch(RecurringAction::Removed(id));
    }
}

/// Bills with their payment record for the selected month, refetched on
/// every month change.
#[hook]
pub fn use_recurring_period() -> RecurringPeriodData {
    let state = use_reducer(|| RecurringPeriodState::new(BillPeriod::current(today())));
    let auth = use_auth();
    let data = RecurringPeriodData {
        state,
        client: ApiClient::default(),
        auth,
    };

    {
        let data = data.clone();
        let period = data.state.period;
        use_effect_with_deps(
            move |period| {
                data.fetch(*period);
                || ()
            },
            period,
        );
    }

    data
}
