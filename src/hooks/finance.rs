use std::ops::Deref;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{expire_on_unauthorized, report, use_auth, AuthHandle};
use crate::api::{ApiClient, ApiResult};
use crate::error::ApiError;
use crate::logic::finance::{merge_transactions, Totals};
use crate::logic::recurring::active_total;
use crate::models::finance::{
    Category, NewCategory, NewLedgerEntry, NewRecurringBill, RecurringBill, RecurringBillPatch,
    Transaction, TransactionKind,
};
use crate::state::finance::{FinanceAction, FinanceKey, FinanceRecord, FinanceState};

#[derive(Clone, PartialEq)]
pub struct FinanceData {
    state: UseReducerHandle<FinanceState>,
    client: ApiClient,
    auth: Option<AuthHandle>,
}

impl Deref for FinanceData {
    type Target = FinanceState;

    fn deref(&self) -> &FinanceState {
        &self.state
    }
}

async fn fetch_all(client: &ApiClient) -> ApiResult<FinanceAction> {
    let categories = client.categories().await?;
    let incomes = client.ledger_entries(TransactionKind::Income).await?;
    let expenses = client.ledger_entries(TransactionKind::Expense).await?;
    let recurring_bills = client.recurring_bills().await?;

    let transactions = merge_transactions(&categories, incomes, expenses);
    Ok(FinanceAction::Loaded {
        categories,
        transactions,
        recurring_bills,
    })
}

impl FinanceData {
    fn checked(&self, err: ApiError) -> ApiError {
        expire_on_unauthorized(self.auth.as_ref(), err)
    }

    pub fn reload(&self) {
        let this = self.clone();
        self.state.dispatch(FinanceAction::Loading);
        spawn_local(async move {
            match fetch_all(&this.client).await {
                Ok(loaded) => this.state.dispatch(loaded),
                Err(err) => {
                    let message = report(this.auth.as_ref(), "Could not load transactions", &err);
                    this.state.dispatch(FinanceAction::Failed(message));
                }
            }
        });
    }

    pub fn clear_error(&self) {
        self.state.dispatch(FinanceAction::ClearError);
    }

    pub fn totals(&self) -> Totals {
        Totals::compute(&self.state.transactions)
    }

    pub fn recurring_total(&self) -> f64 {
        active_total(&self.state.recurring_bills)
    }

    pub async fn add_transaction(&self, kind: TransactionKind, entry: NewLedgerEntry) -> ApiResult<()> {
        let saved = self
            .client
            .create_ledger_entry(kind, &entry)
            .await
            .map_err(|err| self.checked(err))?;
        let tx = Transaction::from_entry(saved, kind, &self.state.categories);
        self.state
            .dispatch(FinanceAction::Added(FinanceRecord::Transaction(tx)));
        Ok(())
    }

    pub async fn update_transaction(
        &self,
        kind: TransactionKind,
        id: u32,
        entry: NewLedgerEntry,
    ) -> ApiResult<()> {
        let saved = self
            .client
            .update_ledger_entry(kind, id, &entry)
            .await
            .map_err(|err| self.checked(err))?;
        let tx = Transaction::from_entry(saved, kind, &self.state.categories);
        self.state
            .dispatch(FinanceAction::Replaced(FinanceRecord::Transaction(tx)));
        Ok(())
    }

    pub async fn delete_transaction(&self, kind: TransactionKind, id: u32) -> ApiResult<()> {
        self
            .client
            .delete_ledger_entry(kind, id)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(FinanceAction::Removed(FinanceKey::Transaction { id, kind }));
        Ok(())
    }

    pub async fn add_category(&self, data: NewCategory) -> ApiResult<Category> {
        let category = self
            .client
            .create_category(&data)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(FinanceAction::Added(FinanceRecord::Category(category.clone())));
        Ok(category)
    }

    pub async fn delete_category(&self, id: u32) -> ApiResult<()> {
        self
            .client
            .delete_category(id)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(FinanceAction::Removed(FinanceKey::Category(id)));
        Ok(())
    }

    pub async fn add_bill(&self, data: NewRecurringBill) -> ApiResult<RecurringBill> {
        let bill = self
            .client
            .create_recurring_bill(&data)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(FinanceAction::Added(FinanceRecord::Bill(bill.clone())));
        Ok(bill)
    }

    pub async fn update_bill(&self, id: u32, patch: RecurringBillPatch) -> ApiResult<RecurringBill> {
        let bill = self
            .client
            .update_recurring_bill(id, &patch)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(FinanceAction::Replaced(FinanceRecord::Bill(bill.clone())));
        Ok(bill)
    }

    pub async fn delete_bill(&self, id: u32) -> ApiResult<()> {
        self
            .client
            .delete_recurring_bill(id)
            .await
            .map_err(|err| self.checked(err))?;
        self.state.dispatch(FinanceAction::Removed(FinanceKey::Bill(id)));
        Ok(())
    }
}

#[hook]
pub fn use_finance_data() -> FinanceData {
    let state = use_reducer(FinanceState::loading);
    let auth = use_auth();
    let data = FinanceData {
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
