use super::{ApiClient, ApiResult};
use crate::logic::recurring::BillPeriod;
use crate::models::finance::{
    Category, LedgerEntry, MarkBillPaid, NewCategory, NewLedgerEntry, NewRecurringBill,
    RecurringBill, RecurringBillPatch, TransactionKind,
};

const CATEGORIES: &str = "/api/finance/categories/";
const INCOMES: &str = "/api/finance/incomes/";
const EXPENSES: &str = "/api/finance/expenses/";
const RECURRING_BILLS: &str = "/api/finance/recurring-bills/";

fn ledger_path(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => INCOMES,
        TransactionKind::Expense => EXPENSES,
    }
}

pub fn bills_for_period_path(period: BillPeriod) -> String {
    format!("{}?year={}&month={}", RECURRING_BILLS, period.year, period.month)
}

impl ApiClient {
    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        self.get_list(CATEGORIES).await
    }

    pub async fn create_category(&self, data: &NewCategory) -> ApiResult<Category> {
        self.post(CATEGORIES, data).await
    }

    pub async fn delete_category(&self, id: u32) -> ApiResult<()> {
        self.delete(&format!("{}{}/", CATEGORIES, id)).await
    }

    pub async fn ledger_entries(&self, kind: TransactionKind) -> ApiResult<Vec<LedgerEntry>> {
        self.get_list(ledger_path(kind)).await
    }

    pub async fn create_ledger_entry(
        &self,
        kind: TransactionKind,
        data: &NewLedgerEntry,
    ) -> ApiResult<LedgerEntry> {
        self.post(ledger_path(kind), data).await
    }

    pub async fn update_ledger_entry(
        &self,
        kind: TransactionKind,
        id: u32,
        data: &NewLedgerEntry,
    ) -> ApiResult<LedgerEntry> {
        self.put(&format!("{}{}/", ledger_path(kind), id), data).await
    }

    pub async fn delete_ledger_entry(&self, kind: TransactionKind, id: u32) -> ApiResult<()> {
        self.delete(&format!("{}{}/", ledger_path(kind), id)).await
    }

    pub async fn recurring_bills(&self) -> ApiResult<Vec<RecurringBill>> {
        self.get_list(RECURRING_BILLS).await
    }

    /// Bills annotated with `payment_for_period` for the given month.
    pub async fn recurring_bills_for(&self, period: BillPeriod) -> ApiResult<Vec<RecurringBill>> {
        self.get_list(&bills_for_period_path(period)).await
    }

    pub async fn create_recurring_bill(&self, data: &NewRecurringBill) -> ApiResult<RecurringBill> {
        self.post(RECURRING_BILLS, data).await
    }

    pub async fn update_recurring_bill(
        &self,
        id: u32,
        patch: &RecurringBillPatch,
    ) -> ApiResult<RecurringBill> {
        self.patch(&format!("{}{}/", RECURRING_BILLS, id), patch).await
    }

    pub async fn delete_recurring_bill(&self, id: u32) -> ApiResult<()> {
        self.delete(&format!("{}{}/", RECURRING_BILLS, id)).await
    }

    pub async fn mark_bill_paid(&self, id: u32, data: &MarkBillPaid) -> ApiResult<()> {
        self.post_unit(&format!("{}{}/mark_paid/", RECURRING_BILLS, id), data)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_query_uses_one_based_month() {
        let period = BillPeriod {
            year: 2024,
            month: 3,
        };
        assert_eq!(
            bills_for_period_path(period),
            "/api/finance/recurring-bills/?year=2024&month=3"
        );
    }

    #[test]
    fn ledger_kinds_map_to_their_collections() {
        assert_eq!(ledger_path(TransactionKind::Income), "/api/finance/incomes/");
        assert_eq!(ledger_path(TransactionKind::Expense), "/api/finance/expenses/");
    }
}
