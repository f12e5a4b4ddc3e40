use chrono::NaiveDate;

use crate::config::AppSettings;
use crate::error::FormError;
use crate::format::{parse_amount_input, parse_date_input};
use crate::logic::recurring::BillPeriod;
use crate::models::finance::{
    Category, Expense, Income, NewLedgerEntry, Transaction, TransactionKind,
};

/// Incomes and expenses as one list, newest first. Entries sharing a date
/// keep their input order (incomes before expenses).
pub fn merge_transactions(
    categories: &[Category],
    incomes: Vec<Income>,
    expenses: Vec<Expense>,
) -> Vec<Transaction> {
    let mut transactions: Vec<Transaction> = incomes
        .into_iter()
        .map(|e| Transaction::from_entry(e, TransactionKind::Income, categories))
        .chain(
            expenses
                .into_iter()
                .map(|e| Transaction::from_entry(e, TransactionKind::Expense, categories)),
        )
        .collect();
    sort_newest_first(&mut transactions);
    transactions
}

pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub incomes: f64,
    pub expenses: f64,
    pub balance: f64,
}

impl Totals {
    pub fn compute<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut totals = Self::default();
        for tx in transactions {
            match tx.kind {
                TransactionKind::Income => totals.incomes += tx.amount,
                TransactionKind::Expense => totals.expenses += tx.amount,
            }
        }
        totals.balance = totals.incomes - totals.expenses;
        totals
    }
}

pub fn month_totals(transactions: &[Transaction], period: BillPeriod) -> Totals {
    Totals::compute(transactions.iter().filter(|tx| period.contains(tx.date)))
}

pub fn of_kind(transactions: &[Transaction], kind: TransactionKind) -> Vec<&Transaction> {
    transactions.iter().filter(|tx| tx.kind == kind).collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionForm {
    pub title: String,
    pub amount: String,
    pub description: String,
    pub category: Option<u32>,
    pub date: String,
}

impl TransactionForm {
    pub fn today(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    /// Prefills the form to edit an existing entry.
    pub fn from_transaction(tx: &Transaction) -> Self {
        Self {
            title: tx.title.clone(),
            amount: format!("{:.2}", tx.amount),
            description: tx.description.clone(),
            category: Some(tx.category.id),
            date: tx.date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn validate(&self, settings: &AppSettings) -> Result<NewLedgerEntry, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::Required("Title"));
        }
        let value = parse_amount_input(&self.amount, settings)
            .ok_or(FormError::InvalidAmount("Amount"))?;
        if value <= 0.0 {
            return Err(FormError::NotPositive("Amount"));
        }
        let category = self.category.ok_or(FormError::Required("Category"))?;
        let date = parse_date_input(&self.date).ok_or(FormError::InvalidDate("Date"))?;

        Ok(NewLedgerEntry {
            title: title.to_string(),
            value,
            description: self.description.trim().to_string(),
            category,
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finance::{LedgerEntry, MISSING_CATEGORY};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: u32, title: &str, value: f64, category: u32, day: NaiveDate) -> LedgerEntry {
        LedgerEntry {
            id,
            title: title.to_string(),
            value,
            description: String::new(),
            category,
            date: day,
            user: Some(1),
        }
    }

    fn categories() -> Vec<Category> {
        vec![Category {
            id: 1,
            name: "Work".into(),
            slug: "work".into(),
            description: None,
        }]
    }

    #[test]
    fn merged_list_is_newest_first_and_stable() {
        let incomes = vec![
            entry(1, "Salary", 5000.0, 1, date(2024, 3, 5)),
            entry(2, "Freelance", 800.0, 1, date(2024, 3, 20)),
        ];
        let expenses = vec![
            entry(1, "Market", 250.0, 2, date(2024, 3, 5)),
            entry(2, "Power", 180.0, 1, date(2024, 2, 28)),
        ];

        let merged = merge_transactions(&categories(), incomes, expenses);
        let titles: Vec<&str> = merged.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Freelance", "Salary", "Market", "Power"]);
        assert_eq!(merged[2].category.name, MISSING_CATEGORY);
        assert_eq!(merged[0].category.name, "Work");
    }

    #[test]
    fn totals_and_month_window() {
        let merged = merge_transactions(
            &categories(),
            vec![
                entry(1, "Salary", 5000.0, 1, date(2024, 3, 1)),
                entry(2, "Old", 100.0, 1, date(2024, 2, 29)),
            ],
            vec![entry(3, "Rent", 1200.0, 1, date(2024, 3, 31))],
        );

        let all = Totals::compute(&merged);
        assert_eq!(all.incomes, 5100.0);
        assert_eq!(all.balance, 3900.0);

        let march = month_totals(&merged, BillPeriod { year: 2024, month: 3 });
        assert_eq!(march.incomes, 5000.0);
        assert_eq!(march.expenses, 1200.0);
    }

    #[test]
    fn form_requires_every_field() {
        let brl = AppSettings::default();
        let mut form = TransactionForm::today(date(2024, 3, 10));
        assert_eq!(form.validate(&brl), Err(FormError::Required("Title")));

        form.title = "Salary".into();
        form.amount = "-5".into();
        assert_eq!(form.validate(&brl), Err(FormError::NotPositive("Amount")));

        form.amount = "5000".into();
        assert_eq!(form.validate(&brl), Err(FormError::Required("Category")));

        form.category = Some(1);
        let entry = form.validate(&brl).unwrap();
        assert_eq!(entry.date, date(2024, 3, 10));
        assert_eq!(entry.value, 5000.0);

        form.date = "not a date".into();
        assert_eq!(form.validate(&brl), Err(FormError::InvalidDate("Date")));
    }

    #[test]
    fn editing_round_trips_through_the_form() {
        let brl = AppSettings::default();
        let merged = merge_transactions(
            &categories(),
            vec![entry(7, "Salary", 5000.5, 1, date(2024, 3, 1))],
            Vec::new(),
        );
        let form = TransactionForm::from_transaction(&merged[0]);
        assert_eq!(form.amount, "5000.50");
        assert_eq!(form.date, "2024-03-01");

        let entry = form.validate(&brl).unwrap();
        assert_eq!(entry.value, 5000.5);
        assert_eq!(entry.category, 1);
        assert_eq!(entry.title, "Salary");
    }

    #[test]
    fn form_reads_grouped_amounts_for_the_active_currency() {
        let mut form = TransactionForm::today(date(2024, 3, 10));
        form.title = "Laptop".into();
        form.category = Some(2);

        form.amount = "1.200".into();
        assert_eq!(form.validate(&AppSettings::default()).unwrap().value, 1200.0);

        form.amount = "1,234.56".into();
        let usd = AppSettings::for_currency("USD");
        assert_eq!(form.validate(&usd).unwrap().value, 1234.56);

        form.amount = "1.2.3".into();
        assert_eq!(
            form.validate(&AppSettings::default()),
            Err(FormError::InvalidAmount("Amount"))
        );
    }
}
