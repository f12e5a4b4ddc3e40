use std::ops::Deref;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{expire_on_unauthorized, report, use_auth, AuthHandle};
use crate::api::{ApiClient, ApiResult};
use crate::error::ApiError;
use crate::logic::payroll::{summarize_by_employee, EmployeeSummary, PayrollTotals, PeriodTotals};
use crate::models::payroll::{AdvancePayment, Employee, Payroll, PayrollPeriod, PayrollPeriodItem};
use crate::state::payroll::{PayrollAction, PayrollKey, PayrollRecord, PayrollSnapshot, PayrollState};

#[derive(Clone, PartialEq)]
pub struct PayrollData {
    state: UseReducerHandle<PayrollState>,
    client: ApiClient,
    auth: Option<AuthHandle>,
}

impl Deref for PayrollData {
    type Target = PayrollState;

    fn deref(&self) -> &PayrollState {
        &self.state
    }
}

/// Payroll and advance listings are secondary on the page, so a failure
/// there leaves the lists empty instead of failing the whole load.
async fn fetch_snapshot(client: &ApiClient) -> ApiResult<PayrollSnapshot> {
    let employees = client.employees().await?;
    let payrolls = client.payrolls().await.unwrap_or_else(|err| {
        log::warn!("could not load payrolls: {}", err);
        Vec::new()
    });
    let advances = client.advance_payments().await.unwrap_or_else(|err| {
        log::warn!("could not load advance payments: {}", err);
        Vec::new()
    });
    let periods = client.payroll_periods().await?;
    let active_period = client.active_payroll_period().await?;
    let period_items = match active_period.as_ref().and_then(|p| p.id) {
        Some(id) => client.period_items(Some(id)).await?,
        None => Vec::new(),
    };

    Ok(PayrollSnapshot {
        employees,
        payrolls,
        advances,
        periods,
        active_period,
        period_items,
    })
}

impl PayrollData {
    fn checked(&self, err: ApiError) -> ApiError {
        expire_on_unauthorized(self.auth.as_ref(), err)
    }

    pub fn reload(&self) {
        let this = self.clone();
        self.state.dispatch(PayrollAction::Loading);
        spawn_local(async move {
            match fetch_snapshot(&this.client).await {
                Ok(snapshot) => this
                    .state
                    .dispatch(PayrollAction::Loaded(Box::new(snapshot))),
                Err(err) => {
                    let message = report(this.auth.as_ref(), "Could not load payroll data", &err);
                    this.state.dispatch(PayrollAction::Failed(message));
                }
            }
        });
    }

    pub fn clear_error(&self) {
        self.state.dispatch(PayrollAction::ClearError);
    }

    pub fn period_totals(&self) -> PeriodTotals {
        PeriodTotals::compute(&self.state.period_items)
    }

    pub fn employee_summaries(&self) -> Vec<EmployeeSummary> {
        summarize_by_employee(&self.state.period_items, &self.state.employees)
    }

    pub fn payroll_totals(&self) -> PayrollTotals {
        PayrollTotals::compute(&self.state.payrolls)
    }

    pub async fn add_employee(&self, employee: Employee) -> ApiResult<()> {
        let saved = self
            .client
            .create_employee(&employee)
            .await
            .map_err(|err| self.checked(err))?;
        log::info!("employee {} created", saved.name);
        self.state
            .dispatch(PayrollAction::Added(PayrollRecord::Employee(saved)));
        Ok(())
    }

    pub async fn update_employee(&self, id: u32, employee: Employee) -> ApiResult<()> {
        let saved = self
            .client
            .update_employee(id, &employee)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(PayrollAction::Replaced(PayrollRecord::Employee(saved)));
        Ok(())
    }

    pub async fn delete_employee(&self, id: u32) -> ApiResult<()> {
        self
            .client
            .delete_employee(id)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(PayrollAction::Removed(PayrollKey::Employee(id)));
        Ok(())
    }

    pub async fn add_payroll(&self, payroll: Payroll) -> ApiResult<()> {
        let saved = self
            .client
            .create_payroll(&payroll)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(PayrollAction::Added(PayrollRecord::Payroll(saved)));
        Ok(())
    }

    pub async fn delete_payroll(&self, id: u32) -> ApiResult<()> {
        self
            .client
            .delete_payroll(id)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(PayrollAction::Removed(PayrollKey::Payroll(id)));
        Ok(())
    }

    pub async fn add_advance(&self, advance: AdvancePayment) -> ApiResult<()> {
        let saved = self
            .client
            .create_advance_payment(&advance)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(PayrollAction::Added(PayrollRecord::Advance(saved)));
        Ok(())
    }

    pub async fn delete_advance(&self, id: u32) -> ApiResult<()> {
        self
            .client
            .delete_advance_payment(id)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(PayrollAction::Removed(PayrollKey::Advance(id)));
        Ok(())
    }

    pub async fn create_period(&self, period: PayrollPeriod) -> ApiResult<()> {
        let saved = self
            .client
            .create_payroll_period(&period)
            .await
            .map_err(|err| self.checked(err))?;
        log::info!("payroll period {} opened", saved.name);
        self.state
            .dispatch(PayrollAction::Added(PayrollRecord::Period(saved)));
        Ok(())
    }

    pub async fn delete_period(&self, id: u32) -> ApiResult<()> {
        self
            .client
            .delete_payroll_period(id)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(PayrollAction::Removed(PayrollKey::Period(id)));
        Ok(())
    }

    pub async fn close_period(&self, id: u32) -> ApiResult<()> {
        let response = self
            .client
            .close_payroll_period(id)
            .await
            .map_err(|err| self.checked(err))?;
        if let Some(response) = response {
            log::info!("period {} closed: {}", id, response.status);
        }
        self.state.dispatch(PayrollAction::PeriodClosed(id));
        Ok(())
    }

    pub async fn add_item(&self, item: PayrollPeriodItem) -> ApiResult<()> {
        let saved = self
            .client
            .create_period_item(&item)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(PayrollAction::Added(PayrollRecord::Item(saved)));
        Ok(())
    }

    pub async fn set_item_processed(&self, item: &PayrollPeriodItem, processed: bool) -> ApiResult<()> {
        let id = saved_item_id(item)?;
        let mut changed = item.clone();
        changed.is_processed = processed;
        let saved = self
            .client
            .update_period_item(id, &changed)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(PayrollAction::Replaced(PayrollRecord::Item(saved)));
        Ok(())
    }

    pub async fn delete_item(&self, id: u32) -> ApiResult<()> {
        self
            .client
            .delete_period_item(id)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(PayrollAction::Removed(PayrollKey::Item(id)));
        Ok(())
    }
}

/// Items only get an id once the server has stored them.
fn saved_item_id(item: &PayrollPeriodItem) -> ApiResult<u32> {
    item.id
        .ok_or_else(|| ApiError::Validation("This payment has not been saved yet".to_string()))
}

#[hook]
pub fn use_payroll_data() -> PayrollData {
    let state = use_reducer(PayrollState::loading);
    let auth = use_auth();
    let data = PayrollData {
        state,
        client: ApiClient::default(),
        auth,
    };

    {
        let data = data.clone();
        use_effect_with_deps(
            move |_| {
                data.reload();
                || ()
            },
            (),
        );
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payroll::PaymentType;

    fn item(id: Option<u32>) -> PayrollPeriodItem {
        PayrollPeriodItem {
            id,
            period: 1,
            employee: 2,
            employee_name: None,
            payment_type: PaymentType::Bonus,
            payment_type_display: None,
            amount: 150.0,
            description: String::new(),
            date_added: None,
            is_processed: false,
            is_advance: false,
            payment_date: None,
        }
    }

    #[test]
    fn unsaved_item_cannot_be_toggled() {
        assert_eq!(saved_item_id(&item(Some(7))), Ok(7));
        assert_eq!(
            saved_item_id(&item(None)),
            Err(ApiError::Validation("This payment has not been saved yet".to_string()))
        );
    }
}
