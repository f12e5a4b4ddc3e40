//! Per-month payment status of recurring bills.
//!
//! The backend stores one payment record per bill and `(year, month)` and
//! attaches it as `payment_for_period` when bills are listed for a month.
//! Everything else (due date, pending vs overdue) is derived here.

use chrono::{Datelike, NaiveDate};

use crate::config::AppSettings;
use crate::error::FormError;
use crate::format::{month_name, parse_amount_input};
use crate::models::finance::{
    BillFrequency, BillStatus, NewRecurringBill, PeriodPayment, RecurringBill,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BillPeriod {
    pub year: i32,
    pub month: u32,
}

impl BillPeriod {
    pub fn current(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or_else(|| self.first_day())
    }

    pub fn days_in_month(self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// January of the same year through `self`, in order.
    pub fn months_up_to(self) -> Vec<BillPeriod> {
        (1..=self.month)
            .map(|month| BillPeriod {
                year: self.year,
                month,
            })
            .collect()
    }

    pub fn label(self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

/// The bill's due day inside `period`, clamped to the month's length
/// (a bill due on the 31st is due on Feb 28/29).
pub fn due_date(bill: &RecurringBill, period: BillPeriod) -> NaiveDate {
    let day = bill.due_day.clamp(1, period.days_in_month());
    NaiveDate::from_ymd_opt(period.year, period.month, day).unwrap_or_else(|| period.first_day())
}

pub fn is_paid(bill: &RecurringBill) -> bool {
    bill.payment_for_period
        .as_ref()
        .map(|p| p.status == BillStatus::Paid)
        .unwrap_or(false)
}

/// Paid when a `paid` record exists for the period, overdue once `today` is
/// past the due date, pending otherwise. Stored `pending`/`overdue` records
/// are ignored in favour of the date rule.
pub fn status_for_period(bill: &RecurringBill, period: BillPeriod, today: NaiveDate) -> BillStatus {
    if is_paid(bill) {
        BillStatus::Paid
    } else if today > due_date(bill, period) {
        BillStatus::Overdue
    } else {
        BillStatus::Pending
    }
}

pub fn amount_paid(bill: &RecurringBill) -> f64 {
    bill.payment_for_period
        .as_ref()
        .and_then(|p| p.amount_paid)
        .filter(|amount| *amount != 0.0)
        .unwrap_or(bill.value)
}

/// Records a confirmed payment on the local copy of a bill.
pub fn apply_payment(bill: &mut RecurringBill, period: BillPeriod, amount: f64, paid_on: NaiveDate) {
    let id = bill.payment_for_period.as_ref().and_then(|p| p.id);
    bill.payment_for_period = Some(PeriodPayment {
        id,
        year: Some(period.year),
        month: Some(period.month),
        status: BillStatus::Paid,
        amount_paid: Some(amount),
        payment_date: Some(paid_on.format("%Y-%m-%d").to_string()),
    });
}

#[derive(Clone, Debug, PartialEq)]
pub struct BillRow {
    pub bill_id: u32,
    pub name: String,
    pub value: f64,
    pub due_date: NaiveDate,
    pub status: BillStatus,
    pub amount_paid: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeriodBillSummary {
    pub rows: Vec<BillRow>,
    pub total_due: f64,
    pub total_paid: f64,
    pub total_pending: f64,
    pub total_overdue: f64,
    pub paid_count: usize,
    pub pending_count: usize,
    pub overdue_count: usize,
}

impl PeriodBillSummary {
    pub fn compute(bills: &[RecurringBill], period: BillPeriod, today: NaiveDate) -> Self {
        let mut summary = Self::default();

        for bill in bills.iter().filter(|b| b.is_active) {
            let status = status_for_period(bill, period, today);
            let paid = (status == BillStatus::Paid).then(|| amount_paid(bill));

            summary.total_due += bill.value;
            match status {
                BillStatus::Paid => {
                    summary.paid_count += 1;
                    summary.total_paid += paid.unwrap_or(bill.value);
                }
                BillStatus::Pending => {
                    summary.pending_count += 1;
                    summary.total_pending += bill.value;
                }
                BillStatus::Overdue => {
                    summary.overdue_count += 1;
                    summary.total_overdue += bill.value;
                }
            }

            summary.rows.push(BillRow {
                bill_id: bill.id,
                name: bill.name.clone(),
                value: bill.value,
                due_date: due_date(bill, period),
                status,
                amount_paid: paid,
            });
        }

        summary
            .rows
            .sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.name.cmp(&b.name)));
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Total actually paid over several monthly listings. Inactive bills count
/// too: a payment already made is money spent.
pub fn total_paid_across(months: &[Vec<RecurringBill>]) -> f64 {
    months
        .iter()
        .flatten()
        .filter(|bill| is_paid(bill))
        .map(amount_paid)
        .sum()
}

pub fn active_total(bills: &[RecurringBill]) -> f64 {
    bills.iter().filter(|b| b.is_active).map(|b| b.value).sum()
}

pub fn validate_bill(
    name: &str,
    value: &str,
    due_day: &str,
    frequency: BillFrequency,
    category: Option<u32>,
    settings: &AppSettings,
) -> Result<NewRecurringBill, FormError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FormError::Required("Name"));
    }
    let value = parse_amount_input(value, settings).ok_or(FormError::InvalidAmount("Value"))?;
    if value <= 0.0 {
        return Err(FormError::NotPositive("Value"));
    }
    let out_of_range = FormError::OutOfRange {
        field: "Due day",
        min: 1,
        max: 31,
    };
    let due_day = due_day.trim().parse::<u32>().map_err(|_| out_of_range.clone())?;
    if !(1..=31).contains(&due_day) {
        return Err(out_of_range);
    }

    Ok(NewRecurringBill {
        name: name.to_string(),
        description: None,
        value,
        due_day,
        frequency,
        category,
        is_active: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(year: i32, month: u32) -> BillPeriod {
        BillPeriod { year, month }
    }

    fn bill(id: u32, name: &str, value: f64, due_day: u32) -> RecurringBill {
        RecurringBill {
            id,
            name: name.to_string(),
            description: None,
            value,
            due_day,
            frequency: BillFrequency::Monthly,
            category: None,
            is_active: true,
            status: BillStatus::Pending,
            created_at: None,
            payment_for_period: None,
        }
    }

    fn with_record(mut b: RecurringBill, status: BillStatus, amount: Option<f64>) -> RecurringBill {
        b.payment_for_period = Some(PeriodPayment {
            id: Some(1),
            year: Some(2024),
            month: Some(3),
            status,
            amount_paid: amount,
            payment_date: None,
        });
        b
    }

    #[test]
    fn period_navigation_wraps_years() {
        let jan = month(2024, 1);
        assert_eq!(jan.previous(), month(2023, 12));
        assert_eq!(month(2023, 12).next(), jan);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(month(2024, 2).days_in_month(), 29);
        assert_eq!(month(2023, 2).days_in_month(), 28);
        assert_eq!(month(2024, 12).days_in_month(), 31);
        assert_eq!(month(2024, 4).last_day(), date(2024, 4, 30));
    }

    #[test]
    fn months_up_to_starts_in_january() {
        let months = month(2024, 3).months_up_to();
        assert_eq!(
            months,
            vec![
                month(2024, 1),
                month(2024, 2),
                month(2024, 3),
            ]
        );
    }

    #[test]
    fn due_day_is_clamped_to_month_length() {
        let feb = month(2023, 2);
        assert_eq!(due_date(&bill(1, "Rent", 1000.0, 31), feb), date(2023, 2, 28));
        assert_eq!(due_date(&bill(1, "Rent", 1000.0, 0), feb), date(2023, 2, 1));
        assert_eq!(due_date(&bill(1, "Rent", 1000.0, 15), feb), date(2023, 2, 15));
    }

    #[test]
    fn pending_until_due_date_then_overdue() {
        let period = month(2024, 3);
        let rent = bill(1, "Rent", 1200.0, 10);
        assert_eq!(status_for_period(&rent, period, date(2024, 3, 9)), BillStatus::Pending);
        assert_eq!(status_for_period(&rent, period, date(2024, 3, 10)), BillStatus::Pending);
        assert_eq!(status_for_period(&rent, period, date(2024, 3, 11)), BillStatus::Overdue);
    }

    #[test]
    fn paid_record_always_wins() {
        let period = month(2024, 3);
        let rent = with_record(bill(1, "Rent", 1200.0, 10), BillStatus::Paid, None);
        assert_eq!(status_for_period(&rent, period, date(2024, 5, 1)), BillStatus::Paid);
    }

    #[test]
    fn stored_overdue_record_does_not_override_dates() {
        let period = month(2024, 3);
        let rent = with_record(bill(1, "Rent", 1200.0, 10), BillStatus::Overdue, None);
        assert_eq!(status_for_period(&rent, period, date(2024, 3, 2)), BillStatus::Pending);
    }

    #[test]
    fn future_periods_are_pending() {
        let april = month(2024, 4);
        let rent = bill(1, "Rent", 1200.0, 1);
        assert_eq!(status_for_period(&rent, april, date(2024, 3, 20)), BillStatus::Pending);
    }

    #[test]
    fn amount_paid_falls_back_to_bill_value() {
        let paid_less = with_record(bill(1, "Power", 180.0, 5), BillStatus::Paid, Some(150.0));
        assert_eq!(amount_paid(&paid_less), 150.0);
        let paid_zero = with_record(bill(1, "Power", 180.0, 5), BillStatus::Paid, Some(0.0));
        assert_eq!(amount_paid(&paid_zero), 180.0);
        assert_eq!(amount_paid(&bill(1, "Power", 180.0, 5)), 180.0);
    }

    #[test]
    fn summary_covers_active_bills_sorted_by_due_date() {
        let period = month(2024, 3);
        let today = date(2024, 3, 12);
        let mut gym = bill(4, "Gym", 90.0, 5);
        gym.is_active = false;
        let bills = vec![
            bill(1, "Rent", 1200.0, 10),
            with_record(bill(2, "Internet", 100.0, 10), BillStatus::Paid, Some(95.0)),
            bill(3, "Water", 60.0, 20),
            gym,
        ];

        let summary = PeriodBillSummary::compute(&bills, period, today);
        let names: Vec<&str> = summary.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Internet", "Rent", "Water"]);
        assert_eq!(summary.total_due, 1360.0);
        assert_eq!(summary.total_paid, 95.0);
        assert_eq!(summary.total_overdue, 1200.0);
        assert_eq!(summary.total_pending, 60.0);
        assert_eq!(
            (summary.paid_count, summary.pending_count, summary.overdue_count),
            (1, 1, 1)
        );
        assert_eq!(summary.rows[0].amount_paid, Some(95.0));
        assert_eq!(summary.rows[1].amount_paid, None);
    }

    #[test]
    fn paid_totals_across_months() {
        let jan = vec![
            with_record(bill(1, "Rent", 1000.0, 5), BillStatus::Paid, None),
            bill(2, "Power", 200.0, 5),
        ];
        let feb = vec![
            with_record(bill(1, "Rent", 1000.0, 5), BillStatus::Paid, Some(900.0)),
            with_record(bill(2, "Power", 200.0, 5), BillStatus::Pending, Some(200.0)),
        ];
        assert_eq!(total_paid_across(&[jan, feb]), 1900.0);
        assert_eq!(total_paid_across(&[]), 0.0);
    }

    #[test]
    fn apply_payment_marks_the_period_paid() {
        let period = month(2024, 3);
        let mut rent = bill(1, "Rent", 1200.0, 10);
        apply_payment(&mut rent, period, 1200.0, date(2024, 3, 8));
        assert!(is_paid(&rent));
        let record = rent.payment_for_period.unwrap();
        assert_eq!(record.month, Some(3));
        assert_eq!(record.payment_date.as_deref(), Some("2024-03-08"));
    }

    #[test]
    fn bill_form_validation() {
        let brl = AppSettings::default();
        let ok =
            validate_bill("Rent", "1.200,00", "10", BillFrequency::Monthly, None, &brl).unwrap();
        assert_eq!(ok.value, 1200.0);
        assert_eq!(
            validate_bill(" ", "10", "10", BillFrequency::Monthly, None, &brl),
            Err(FormError::Required("Name"))
        );
        assert_eq!(
            validate_bill("Rent", "0", "10", BillFrequency::Monthly, None, &brl),
            Err(FormError::NotPositive("Value"))
        );
        assert!(validate_bill("Rent", "10", "32", BillFrequency::Monthly, None, &brl).is_err());
        assert!(validate_bill("Rent", "10", "x", BillFrequency::Monthly, None, &brl).is_err());

        let grouped = validate_bill("Rent", "1.200", "10", BillFrequency::Monthly, None, &brl);
        assert_eq!(grouped.map(|b| b.value), Ok(1200.0));
    }

    #[test]
    fn active_total_skips_inactive() {
        let mut gym = bill(2, "Gym", 90.0, 5);
        gym.is_active = false;
        assert_eq!(active_total(&[bill(1, "Rent", 1000.0, 5), gym]), 1000.0);
    }
}
