use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{today, use_finance_data, use_objectives};
use crate::api::ApiClient;
use crate::logic::dashboard::DashboardSummary;
use crate::logic::recurring::BillPeriod;
use crate::state::dashboard::{PaidBillsAction, PaidBillsState};

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardData {
    pub summary: DashboardSummary,
    pub loading: bool,
    pub error: Option<String>,
    /// Months whose bill listing failed; the balance treats them as unpaid.
    pub failed_months: Vec<u32>,
}

#[hook]
pub fn use_dashboard() -> DashboardData {
    let finance = use_finance_data();
    let objectives = use_objectives();
    let paid_bills = use_reducer(PaidBillsState::default);

    {
        let paid_bills = paid_bills.clone();
        use_effect_with_deps(
            move |_| {
                paid_bills.dispatch(PaidBillsAction::Loading);
                spawn_local(async move {
                    let client = ApiClient::default();
                    let mut months = Vec::new();
                    let mut failed_months = Vec::new();
                    for period in BillPeriod::current(today()).months_up_to() {
                        match client.recurring_bills_for(period).await {
                            Ok(bills) => months.push(bills),
                            Err(err) => {
                                log::warn!("bills for {} unavailable: {}", period.label(), err);
                                failed_months.push(period.month);
                                months.push(Vec::new());
                            }
                        }
                    }
                    paid_bills.dispatch(PaidBillsAction::Loaded {
                        months,
                        failed_months,
                    });
                });
                || ()
            },
            (),
        );
    }

    let summary = DashboardSummary::compute(
        &finance.transactions,
        &paid_bills.months,
        &objectives.objectives,
        today(),
    );
    let error = finance.error.clone().or_else(|| objectives.error.clone());

    DashboardData {
        summary,
        loading: finance.loading || objectives.loading || paid_bills.loading,
        error,
        failed_months: paid_bills.failed_months.clone(),
    }
}
