//! Aggregation of payroll period items per employee.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::config::AppSettings;
use crate::error::FormError;
use crate::format::{parse_amount_input, parse_date_input};
use crate::models::payroll::{
    AdvancePayment, Employee, PaymentType, Payroll, PayrollPeriod, PayrollPeriodItem, PeriodStatus,
};

pub const UNKNOWN_EMPLOYEE: &str = "Unknown employee";

/// Records that point at an employee by id and carry a display name.
pub trait EmployeeLinked {
    fn employee_id(&self) -> u32;
    fn employee_name(&self) -> Option<&str>;
    fn set_employee_name(&mut self, name: String);
}

macro_rules! employee_linked {
    ($($ty:ty),*) => {
        $(impl EmployeeLinked for $ty {
            fn employee_id(&self) -> u32 {
                self.employee
            }

            fn employee_name(&self) -> Option<&str> {
                self.employee_name.as_deref()
            }

            fn set_employee_name(&mut self, name: String) {
                self.employee_name = Some(name);
            }
        })*
    };
}

employee_linked!(Payroll, AdvancePayment, PayrollPeriodItem);

pub fn find_employee(employees: &[Employee], id: u32) -> Option<&Employee> {
    employees.iter().find(|e| e.id == Some(id))
}

fn resolve_name<T: EmployeeLinked>(record: &T, employees: &[Employee]) -> String {
    find_employee(employees, record.employee_id())
        .map(|e| e.name.clone())
        .or_else(|| {
            record
                .employee_name()
                .filter(|n| !n.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string())
}

/// Fills `employee_name` from the loaded employee list. A name already sent
/// by the server is kept when the employee is not in the list.
pub fn attach_employee_names<T: EmployeeLinked>(records: Vec<T>, employees: &[Employee]) -> Vec<T> {
    records
        .into_iter()
        .map(|mut record| {
            let name = resolve_name(&record, employees);
            record.set_employee_name(name);
            record
        })
        .collect()
}

pub fn with_employee_name<T: EmployeeLinked>(mut record: T, employees: &[Employee]) -> T {
    let name = resolve_name(&record, employees);
    record.set_employee_name(name);
    record
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    Advance,
    Processed,
    Pending,
}

impl ItemCategory {
    pub fn of(item: &PayrollPeriodItem) -> Self {
        if item.is_advance {
            ItemCategory::Advance
        } else if item.is_processed {
            ItemCategory::Processed
        } else {
            ItemCategory::Pending
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemCategory::Advance => "Advance",
            ItemCategory::Processed => "Processed",
            ItemCategory::Pending => "Pending",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmployeeSummary {
    pub employee_id: u32,
    pub employee_name: String,
    pub processed_total: f64,
    pub pending_total: f64,
    pub advance_total: f64,
    pub item_count: usize,
    pub gross_total: f64,
    pub balance_due: f64,
}

/// One summary per employee that has items in the period, ordered by name.
/// `balance_due` goes negative when advances exceed what is still pending.
pub fn summarize_by_employee(
    items: &[PayrollPeriodItem],
    employees: &[Employee],
) -> Vec<EmployeeSummary> {
    let mut by_employee: BTreeMap<u32, EmployeeSummary> = BTreeMap::new();

    for item in items {
        let entry = by_employee
            .entry(item.employee)
            .or_insert_with(|| EmployeeSummary {
                employee_id: item.employee,
                employee_name: resolve_name(item, employees),
                ..EmployeeSummary::default()
            });

        entry.item_count += 1;
        match ItemCategory::of(item) {
            ItemCategory::Advance => entry.advance_total += item.amount,
            ItemCategory::Processed => entry.processed_total += item.amount,
            ItemCategory::Pending => entry.pending_total += item.amount,
        }
    }

    let mut summaries: Vec<EmployeeSummary> = by_employee
        .into_values()
        .map(|mut s| {
            s.gross_total = s.processed_total + s.pending_total;
            s.balance_due = s.pending_total - s.advance_total;
            s
        })
        .collect();

    summaries.sort_by(|a, b| {
        a.employee_name
            .cmp(&b.employee_name)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    summaries
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeriodTotals {
    pub total: f64,
    pub processed: f64,
    pub pending: f64,
    pub advances: f64,
    pub employees_count: usize,
    pub item_count: usize,
}

impl PeriodTotals {
    pub fn compute(items: &[PayrollPeriodItem]) -> Self {
        let mut totals = Self::default();
        let mut employees = BTreeSet::new();

        for item in items {
            employees.insert(item.employee);
            totals.item_count += 1;
            totals.total += item.amount;
            match ItemCategory::of(item) {
                ItemCategory::Advance => totals.advances += item.amount,
                ItemCategory::Processed => totals.processed += item.amount,
                ItemCategory::Pending => totals.pending += item.amount,
            }
        }

        totals.employees_count = employees.len();
        totals
    }
}

/// Advances handed out during the period that no payroll has absorbed yet.
pub fn advances_in_period<'a>(
    advances: &'a [AdvancePayment],
    period: &PayrollPeriod,
) -> Vec<&'a AdvancePayment> {
    advances
        .iter()
        .filter(|a| a.linked_payroll.is_none() && period.contains(a.date_given))
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PayrollTotals {
    pub gross: f64,
    pub deductions: f64,
    pub net: f64,
    pub count: usize,
}

impl PayrollTotals {
    pub fn compute(payrolls: &[Payroll]) -> Self {
        payrolls.iter().fold(Self::default(), |mut acc, p| {
            acc.gross += p.gross_amount;
            acc.deductions += p.deductions;
            acc.net += p.net_amount;
            acc.count += 1;
            acc
        })
    }
}

pub fn is_employee_active(employee: &Employee, today: NaiveDate) -> bool {
    match employee.termination_date {
        None => true,
        Some(end) => end > today,
    }
}

pub fn active_employees(employees: &[Employee], today: NaiveDate) -> Vec<&Employee> {
    employees
        .iter()
        .filter(|e| is_employee_active(e, today))
        .collect()
}

pub fn validate_employee(
    name: &str,
    role: &str,
    salary: &str,
    hiring_date: &str,
    settings: &AppSettings,
) -> Result<Employee, FormError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FormError::Required("Name"));
    }
    let role = role.trim();
    if role.is_empty() {
        return Err(FormError::Required("Role"));
    }
    let salary = parse_amount_input(salary, settings).ok_or(FormError::InvalidAmount("Salary"))?;
    if salary <= 0.0 {
        return Err(FormError::NotPositive("Salary"));
    }
    let hiring_date = parse_date_input(hiring_date).ok_or(FormError::InvalidDate("Hiring date"))?;

    Ok(Employee {
        id: None,
        name: name.to_string(),
        role: role.to_string(),
        salary,
        hiring_date,
        termination_date: None,
    })
}

pub fn validate_period(name: &str, start: &str, end: &str) -> Result<PayrollPeriod, FormError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FormError::Required("Period name"));
    }
    let start_date = parse_date_input(start).ok_or(FormError::InvalidDate("Start date"))?;
    let end_date = parse_date_input(end).ok_or(FormError::InvalidDate("End date"))?;
    if end_date < start_date {
        return Err(FormError::InvertedRange);
    }

    Ok(PayrollPeriod {
        id: None,
        name: name.to_string(),
        start_date,
        end_date,
        status: PeriodStatus::Active,
        created_at: None,
        closed_at: None,
        items: Vec::new(),
        total_amount: None,
        employees_count: None,
    })
}

pub struct ItemInput<'a> {
    pub period: Option<u32>,
    pub employee: Option<u32>,
    pub payment_type: PaymentType,
    pub amount: &'a str,
    pub description: &'a str,
    pub is_advance: bool,
}

pub fn validate_item(
    input: ItemInput<'_>,
    settings: &AppSettings,
) -> Result<PayrollPeriodItem, FormError> {
    let period = input.period.ok_or(FormError::Required("Active period"))?;
    let employee = input.employee.ok_or(FormError::Required("Employee"))?;
    let amount = parse_amount_input(input.amount, settings)
        .ok_or(FormError::InvalidAmount("Amount"))?;
    if amount <= 0.0 {
        return Err(FormError::NotPositive("Amount"));
    }

    Ok(PayrollPeriodItem {
        id: None,
        period,
        employee,
        employee_name: None,
        payment_type: input.payment_type,
        payment_type_display: None,
        amount,
        description: input.description.trim().to_string(),
        date_added: None,
        is_processed: false,
        is_advance: input.is_advance,
        payment_date: None,
    })
}

pub fn validate_advance(
    employee: Option<u32>,
    amount: &str,
    date_given: &str,
    description: &str,
    settings: &AppSettings,
) -> Result<AdvancePayment, FormError> {
    let employee = employee.ok_or(FormError::Required("Employee"))?;
    let amount = parse_amount_input(amount, settings).ok_or(FormError::InvalidAmount("Amount"))?;
    if amount <= 0.0 {
        return Err(FormError::NotPositive("Amount"));
    }
    let date_given = parse_date_input(date_given).ok_or(FormError::InvalidDate("Date"))?;

    Ok(AdvancePayment {
        id: None,
        employee,
        employee_name: None,
        date_given,
        amount,
        description: description.trim().to_string(),
        linked_payroll: None,
    })
}

pub struct PayrollInput<'a> {
    pub employee: Option<u32>,
    pub period_start: &'a str,
    pub period_end: &'a str,
    pub gross: &'a str,
    pub deductions: &'a str,
    pub payment_date: &'a str,
}

/// Net is derived as gross minus deductions. Blank deductions count as zero.
pub fn validate_payroll(
    input: PayrollInput<'_>,
    settings: &AppSettings,
) -> Result<Payroll, FormError> {
    let employee = input.employee.ok_or(FormError::Required("Employee"))?;
    let period_start =
        parse_date_input(input.period_start).ok_or(FormError::InvalidDate("Period start"))?;
    let period_end =
        parse_date_input(input.period_end).ok_or(FormError::InvalidDate("Period end"))?;
    if period_end < period_start {
        return Err(FormError::InvertedRange);
    }
    let gross_amount = parse_amount_input(input.gross, settings)
        .ok_or(FormError::InvalidAmount("Gross amount"))?;
    if gross_amount <= 0.0 {
        return Err(FormError::NotPositive("Gross amount"));
    }
    let deductions = if input.deductions.trim().is_empty() {
        0.0
    } else {
        parse_amount_input(input.deductions, settings)
            .ok_or(FormError::InvalidAmount("Deductions"))?
    };
    if deductions < 0.0 {
        return Err(FormError::InvalidAmount("Deductions"));
    }
    if deductions > gross_amount {
        return Err(FormError::ExceedsBalance);
    }
    let payment_date =
        parse_date_input(input.payment_date).ok_or(FormError::InvalidDate("Payment date"))?;

    Ok(Payroll {
        id: None,
        employee,
        employee_name: None,
        period_start,
        period_end,
        gross_amount,
        deductions,
        net_amount: gross_amount - deductions,
        payment_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: u32, name: &str) -> Employee {
        Employee {
            id: Some(id),
            name: name.to_string(),
            role: "Cook".to_string(),
            salary: 2000.0,
            hiring_date: date(2023, 1, 10),
            termination_date: None,
        }
    }

    fn item(employee: u32, amount: f64, processed: bool, advance: bool) -> PayrollPeriodItem {
        PayrollPeriodItem {
            id: None,
            period: 1,
            employee,
            employee_name: None,
            payment_type: PaymentType::Daily,
            payment_type_display: None,
            amount,
            description: String::new(),
            date_added: None,
            is_processed: processed,
            is_advance: advance,
            payment_date: None,
        }
    }

    fn advance(employee: u32, day: u32, linked: Option<u32>) -> AdvancePayment {
        AdvancePayment {
            id: None,
            employee,
            employee_name: None,
            date_given: date(2024, 3, day),
            amount: 100.0,
            description: String::new(),
            linked_payroll: linked,
        }
    }

    fn march() -> PayrollPeriod {
        validate_period("March", "2024-03-01", "2024-03-31").unwrap()
    }

    #[test]
    fn advance_flag_beats_processed_flag() {
        assert_eq!(ItemCategory::of(&item(1, 10.0, true, true)), ItemCategory::Advance);
        assert_eq!(ItemCategory::of(&item(1, 10.0, true, false)), ItemCategory::Processed);
        assert_eq!(ItemCategory::of(&item(1, 10.0, false, false)), ItemCategory::Pending);
    }

    #[test]
    fn names_are_attached_with_fallback() {
        let employees = vec![employee(1, "Ana")];
        let mut from_server = item(3, 5.0, false, false);
        from_server.employee_name = Some("Carla".into());
        let items = attach_employee_names(
            vec![item(1, 10.0, false, false), item(2, 5.0, false, false), from_server],
            &employees,
        );
        let names: Vec<_> = items.iter().map(|i| i.employee_name.clone().unwrap()).collect();
        assert_eq!(names, vec!["Ana", UNKNOWN_EMPLOYEE, "Carla"]);
    }

    #[test]
    fn summaries_split_by_category() {
        let employees = vec![employee(1, "Bruno"), employee(2, "Ana")];
        let items = vec![
            item(1, 120.0, false, false),
            item(1, 120.0, true, false),
            item(1, 50.0, false, true),
            item(2, 300.0, false, false),
            item(2, 400.0, false, true),
        ];

        let summaries = summarize_by_employee(&items, &employees);
        assert_eq!(summaries.len(), 2);

        let ana = &summaries[0];
        assert_eq!(ana.employee_name, "Ana");
        assert_eq!(ana.pending_total, 300.0);
        assert_eq!(ana.advance_total, 400.0);
        assert_eq!(ana.gross_total, 300.0);
        assert_eq!(ana.balance_due, -100.0);

        let bruno = &summaries[1];
        assert_eq!(bruno.item_count, 3);
        assert_eq!(bruno.processed_total, 120.0);
        assert_eq!(bruno.pending_total, 120.0);
        assert_eq!(bruno.gross_total, 240.0);
        assert_eq!(bruno.balance_due, 70.0);
    }

    #[test]
    fn summaries_with_same_name_order_by_id() {
        let items = vec![item(9, 1.0, false, false), item(4, 1.0, false, false)];
        let summaries = summarize_by_employee(&items, &[]);
        assert_eq!(summaries[0].employee_id, 4);
        assert_eq!(summaries[1].employee_id, 9);
        assert_eq!(summaries[0].employee_name, UNKNOWN_EMPLOYEE);
    }

    #[test]
    fn period_totals_count_distinct_employees() {
        let items = vec![
            item(1, 100.0, true, false),
            item(1, 50.0, false, false),
            item(2, 30.0, false, true),
        ];
        let totals = PeriodTotals::compute(&items);
        assert_eq!(totals.total, 180.0);
        assert_eq!(totals.processed, 100.0);
        assert_eq!(totals.pending, 50.0);
        assert_eq!(totals.advances, 30.0);
        assert_eq!(totals.employees_count, 2);
        assert_eq!(totals.item_count, 3);
        assert_eq!(PeriodTotals::compute(&[]), PeriodTotals::default());
    }

    #[test]
    fn advances_inside_inclusive_range_and_unlinked() {
        let advances = vec![advance(1, 1, None), advance(1, 31, None), advance(2, 15, Some(7))];
        let in_period = advances_in_period(&advances, &march());
        assert_eq!(in_period.len(), 2);

        let mut april = advance(1, 1, None);
        april.date_given = date(2024, 4, 1);
        assert!(advances_in_period(&[april], &march()).is_empty());
    }

    #[test]
    fn payroll_totals_sum_every_column() {
        let payroll = Payroll {
            id: Some(1),
            employee: 1,
            employee_name: None,
            period_start: date(2024, 3, 1),
            period_end: date(2024, 3, 31),
            gross_amount: 3000.0,
            deductions: 300.0,
            net_amount: 2700.0,
            payment_date: date(2024, 4, 5),
        };
        let totals = PayrollTotals::compute(&[payroll.clone(), payroll]);
        assert_eq!(totals.gross, 6000.0);
        assert_eq!(totals.deductions, 600.0);
        assert_eq!(totals.net, 5400.0);
        assert_eq!(totals.count, 2);
    }

    #[test]
    fn termination_day_itself_is_inactive() {
        let mut e = employee(1, "Ana");
        assert!(is_employee_active(&e, date(2024, 3, 1)));
        e.termination_date = Some(date(2024, 3, 1));
        assert!(!is_employee_active(&e, date(2024, 3, 1)));
        assert!(is_employee_active(&e, date(2024, 2, 29)));
    }

    #[test]
    fn period_form_rejects_inverted_dates() {
        assert_eq!(
            validate_period("X", "2024-03-31", "2024-03-01"),
            Err(FormError::InvertedRange)
        );
        assert_eq!(
            validate_period("", "2024-03-01", "2024-03-31"),
            Err(FormError::Required("Period name"))
        );
    }

    #[test]
    fn item_form_needs_period_and_employee() {
        let brl = AppSettings::default();
        let input = |period, employee, amount| ItemInput {
            period,
            employee,
            payment_type: PaymentType::Bonus,
            amount,
            description: " extra shift ",
            is_advance: false,
        };
        assert_eq!(
            validate_item(input(None, Some(1), "10"), &brl),
            Err(FormError::Required("Active period"))
        );
        assert_eq!(
            validate_item(input(Some(1), None, "10"), &brl),
            Err(FormError::Required("Employee"))
        );
        let ok = validate_item(input(Some(1), Some(2), "150,50"), &brl).unwrap();
        assert_eq!(ok.amount, 150.5);
        assert_eq!(ok.description, "extra shift");
        assert!(!ok.is_processed);
    }

    #[test]
    fn employee_form() {
        let brl = AppSettings::default();
        let ok = validate_employee("Ana", "Cook", "2500", "2024-02-01", &brl).unwrap();
        assert_eq!(ok.hiring_date, date(2024, 2, 1));
        assert_eq!(
            validate_employee("Ana", "Cook", "2500", "02/01/2024", &brl),
            Err(FormError::InvalidDate("Hiring date"))
        );
    }

    #[test]
    fn payroll_net_is_gross_minus_deductions() {
        let brl = AppSettings::default();
        let input = |gross, deductions, end| PayrollInput {
            employee: Some(3),
            period_start: "2024-03-01",
            period_end: end,
            gross,
            deductions,
            payment_date: "2024-04-05",
        };
        let payroll = validate_payroll(input("3000", "450,50", "2024-03-31"), &brl).unwrap();
        assert_eq!(payroll.net_amount, 2549.5);
        assert_eq!(payroll.payment_date, date(2024, 4, 5));

        let no_deductions = validate_payroll(input("3000", "", "2024-03-31"), &brl).unwrap();
        assert_eq!(no_deductions.net_amount, 3000.0);

        assert_eq!(
            validate_payroll(input("3000", "3500", "2024-03-31"), &brl),
            Err(FormError::ExceedsBalance)
        );
        assert_eq!(
            validate_payroll(input("3000", "", "2024-02-01"), &brl),
            Err(FormError::InvertedRange)
        );
    }
}
