use super::{ApiClient, ApiResult};
use crate::models::payroll::{
    AdvancePayment, ClosePeriodResponse, Employee, Payroll, PayrollPeriod, PayrollPeriodItem,
};

const EMPLOYEES: &str = "/api/payroll/employees/";
const PAYROLLS: &str = "/api/payroll/payrolls/";
const ADVANCES: &str = "/api/payroll/advance-payments/";
const PERIODS: &str = "/api/payroll/payroll-periods/";
const PERIOD_ITEMS: &str = "/api/payroll/payroll-period-items/";

fn detail(collection: &str, id: u32) -> String {
    format!("{}{}/", collection, id)
}

pub fn period_items_path(period: Option<u32>) -> String {
    match period {
        Some(id) => format!("{}?period={}", PERIOD_ITEMS, id),
        None => PERIOD_ITEMS.to_string(),
    }
}

impl ApiClient {
    pub async fn employees(&self) -> ApiResult<Vec<Employee>> {
        self.get_list(EMPLOYEES).await
    }

    pub async fn create_employee(&self, data: &Employee) -> ApiResult<Employee> {
        self.post(EMPLOYEES, data).await
    }

    pub async fn update_employee(&self, id: u32, data: &Employee) -> ApiResult<Employee> {
        self.put(&detail(EMPLOYEES, id), data).await
    }

    pub async fn delete_employee(&self, id: u32) -> ApiResult<()> {
        self.delete(&detail(EMPLOYEES, id)).await
    }

    pub async fn payrolls(&self) -> ApiResult<Vec<Payroll>> {
        self.get_list(PAYROLLS).await
    }

    pub async fn create_payroll(&self, data: &Payroll) -> ApiResult<Payroll> {
        self.post(PAYROLLS, data).await
    }

    pub async fn delete_payroll(&self, id: u32) -> ApiResult<()> {
        self.delete(&detail(PAYROLLS, id)).await
    }

    pub async fn advance_payments(&self) -> ApiResult<Vec<AdvancePayment>> {
        self.get_list(ADVANCES).await
    }

    pub async fn create_advance_payment(&self, data: &AdvancePayment) -> ApiResult<AdvancePayment> {
        self.post(ADVANCES, data).await
    }

    pub async fn delete_advance_payment(&self, id: u32) -> ApiResult<()> {
        self.delete(&detail(ADVANCES, id)).await
    }

    pub async fn payroll_periods(&self) -> ApiResult<Vec<PayrollPeriod>> {
        self.get_list(PERIODS).await
    }

    pub async fn create_payroll_period(&self, data: &PayrollPeriod) -> ApiResult<PayrollPeriod> {
        self.post(PERIODS, data).await
    }

    pub async fn delete_payroll_period(&self, id: u32) -> ApiResult<()> {
        self.delete(&detail(PERIODS, id)).await
    }

    /// `None` when the backend has no open period (it answers 404).
    pub async fn active_payroll_period(&self) -> ApiResult<Option<PayrollPeriod>> {
        match self.get(&format!("{}active_period/", PERIODS)).await {
            Ok(period) => Ok(Some(period)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn close_payroll_period(&self, id: u32) -> ApiResult<Option<ClosePeriodResponse>> {
        self.post_action(&format!("{}close_period/", detail(PERIODS, id)))
            .await
    }

    pub async fn period_items(&self, period: Option<u32>) -> ApiResult<Vec<PayrollPeriodItem>> {
        self.get_list(&period_items_path(period)).await
    }

    pub async fn create_period_item(&self, data: &PayrollPeriodItem) -> ApiResult<PayrollPeriodItem> {
        self.post(PERIOD_ITEMS, data).await
    }

    pub async fn update_period_item(
        &self,
        id: u32,
        data: &PayrollPeriodItem,
    ) -> ApiResult<PayrollPeriodItem> {
        self.put(&detail(PERIOD_ITEMS, id), data).await
    }

    pub async fn delete_period_item(&self, id: u32) -> ApiResult<()> {
        self.delete(&detail(PERIOD_ITEMS, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_listing_filters_by_period() {
        assert_eq!(
            period_items_path(Some(12)),
            "/api/payroll/payroll-period-items/?period=12"
        );
        assert_eq!(period_items_path(None), "/api/payroll/payroll-period-items/");
        assert_eq!(detail(PERIODS, 3), "/api/payroll/payroll-periods/3/");
    }
}
