use std::rc::Rc;

use yew::Reducible;

use super::replace_first;
use crate::logic::payroll::{attach_employee_names, with_employee_name};
use crate::models::payroll::{
    AdvancePayment, Employee, Payroll, PayrollPeriod, PayrollPeriodItem, PeriodStatus,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PayrollState {
    pub loading: bool,
    pub error: Option<String>,
    pub employees: Vec<Employee>,
    pub payrolls: Vec<Payroll>,
    pub advances: Vec<AdvancePayment>,
    pub periods: Vec<PayrollPeriod>,
    pub active_period: Option<PayrollPeriod>,
    /// Items of the active period.
    pub period_items: Vec<PayrollPeriodItem>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PayrollSnapshot {
    pub employees: Vec<Employee>,
    pub payrolls: Vec<Payroll>,
    pub advances: Vec<AdvancePayment>,
    pub periods: Vec<PayrollPeriod>,
    pub active_period: Option<PayrollPeriod>,
    pub period_items: Vec<PayrollPeriodItem>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PayrollRecord {
    Employee(Employee),
    Payroll(Payroll),
    Advance(AdvancePayment),
    Period(PayrollPeriod),
    Item(PayrollPeriodItem),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayrollKey {
    Employee(u32),
    Payroll(u32),
    Advance(u32),
    Period(u32),
    Item(u32),
}

#[derive(Clone, Debug, PartialEq)]
pub enum PayrollAction {
    Loading,
    Loaded(Box<PayrollSnapshot>),
    Failed(String),
    Added(PayrollRecord),
    Replaced(PayrollRecord),
    Removed(PayrollKey),
    PeriodClosed(u32),
    ClearError,
}

impl PayrollState {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn active_period_id(&self) -> Option<u32> {
        self.active_period.as_ref().and_then(|p| p.id)
    }

    fn is_active(&self, period_id: u32) -> bool {
        self.active_period_id() == Some(period_id)
    }

    fn clear_active(&mut self) {
        self.active_period = None;
        self.period_items.clear();
    }

    fn relink_names(&mut self) {
        let employees = &self.employees;
        self.payrolls = attach_employee_names(std::mem::take(&mut self.payrolls), employees);
        self.advances = attach_employee_names(std::mem::take(&mut self.advances), employees);
        self.period_items =
            attach_employee_names(std::mem::take(&mut self.period_items), employees);
    }
}

impl Reducible for PayrollState {
    type Action = PayrollAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            PayrollAction::Loading => {
                next.loading = true;
                next.error = None;
            }
            PayrollAction::Loaded(snapshot) => {
                let snapshot = *snapshot;
                next.loading = false;
                next.employees = snapshot.employees;
                next.payrolls = snapshot.payrolls;
                next.advances = snapshot.advances;
                next.periods = snapshot.periods;
                next.active_period = snapshot.active_period;
                next.period_items = snapshot.period_items;
                next.relink_names();
            }
            PayrollAction::Failed(message) => {
                next.loading = false;
                next.error = Some(message);
            }
            PayrollAction::Added(record) => match record {
                PayrollRecord::Employee(employee) => {
                    next.employees.push(employee);
                    next.relink_names();
                }
                PayrollRecord::Payroll(payroll) => {
                    let payroll = with_employee_name(payroll, &next.employees);
                    next.payrolls.push(payroll);
                }
                PayrollRecord::Advance(advance) => {
                    let advance = with_employee_name(advance, &next.employees);
                    next.advances.push(advance);
                }
                PayrollRecord::Period(period) => {
                    if period.status == PeriodStatus::Active {
                        next.period_items = period.items.clone();
                        next.active_period = Some(period.clone());
                    }
                    next.periods.push(period);
                }
                PayrollRecord::Item(item) => {
                    let item = with_employee_name(item, &next.employees);
                    next.period_items.push(item);
                }
            },
            PayrollAction::Replaced(record) => match record {
                PayrollRecord::Employee(employee) => {
                    let id = employee.id;
                    replace_first(&mut next.employees, |e| e.id == id, employee);
                    next.relink_names();
                }
                PayrollRecord::Payroll(payroll) => {
                    let payroll = with_employee_name(payroll, &next.employees);
                    let id = payroll.id;
                    replace_first(&mut next.payrolls, |p| p.id == id, payroll);
                }
                PayrollRecord::Advance(advance) => {
                    let advance = with_employee_name(advance, &next.employees);
                    let id = advance.id;
                    replace_first(&mut next.advances, |a| a.id == id, advance);
                }
                PayrollRecord::Period(period) => {
                    let id = period.id;
                    if id.is_some() && next.active_period_id() == id {
                        next.active_period = Some(period.clone());
                    }
                    replace_first(&mut next.periods, |p| p.id == id, period);
                }
                PayrollRecord::Item(item) => {
                    let item = with_employee_name(item, &next.employees);
                    let id = item.id;
                    replace_first(&mut next.period_items, |i| i.id == id, item);
                }
            },
            PayrollAction::Removed(key) => match key {
                PayrollKey::Employee(id) => next.employees.retain(|e| e.id != Some(id)),
                PayrollKey::Payroll(id) => next.payrolls.retain(|p| p.id != Some(id)),
                PayrollKey::Advance(id) => next.advances.retain(|a| a.id != Some(id)),
                PayrollKey::Period(id) => {
                    next.periods.retain(|p| p.id != Some(id));
                    if next.is_active(id) {
                        next.clear_active();
                    }
                }
                PayrollKey::Item(id) => next.period_items.retain(|i| i.id != Some(id)),
            },
            PayrollAction::PeriodClosed(id) => {
                for period in next.periods.iter_mut().filter(|p| p.id == Some(id)) {
                    period.status = PeriodStatus::Closed;
                }
                if next.is_active(id) {
                    next.clear_active();
                }
            }
            PayrollAction::ClearError => next.error = None,
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppSettings;
    use crate::logic::payroll::{validate_employee, validate_period, UNKNOWN_EMPLOYEE};
    use crate::models::payroll::PaymentType;

    fn employee(id: u32, name: &str) -> Employee {
        let mut e = validate_employee(name, "Cook", "2000", "2024-01-01", &AppSettings::default()).unwrap();
        e.id = Some(id);
        e
    }

    fn period(id: u32, status: PeriodStatus) -> PayrollPeriod {
        let mut p = validate_period("March", "2024-03-01", "2024-03-31").unwrap();
        p.id = Some(id);
        p.status = status;
        p
    }

    fn item(id: u32, employee: u32) -> PayrollPeriodItem {
        PayrollPeriodItem {
            id: Some(id),
            period: 1,
            employee,
            employee_name: None,
            payment_type: PaymentType::Salary,
            payment_type_display: None,
            amount: 100.0,
            description: String::new(),
            date_added: None,
            is_processed: false,
            is_advance: false,
            payment_date: None,
        }
    }

    fn loaded_with_active() -> Rc<PayrollState> {
        Rc::new(PayrollState::loading()).reduce(PayrollAction::Loaded(Box::new(PayrollSnapshot {
            employees: vec![employee(1, "Ana")],
            periods: vec![period(1, PeriodStatus::Active), period(2, PeriodStatus::Closed)],
            active_period: Some(period(1, PeriodStatus::Active)),
            period_items: vec![item(10, 1), item(11, 7)],
            ..PayrollSnapshot::default()
        })))
    }

    #[test]
    fn loading_attaches_names() {
        let state = loaded_with_active();
        assert!(!state.loading);
        assert_eq!(state.period_items[0].employee_name.as_deref(), Some("Ana"));
        assert_eq!(
            state.period_items[1].employee_name.as_deref(),
            Some(UNKNOWN_EMPLOYEE)
        );
    }

    #[test]
    fn new_employee_relinks_existing_items() {
        let state = loaded_with_active()
            .reduce(PayrollAction::Added(PayrollRecord::Employee(employee(7, "Bia"))));
        assert_eq!(state.employees.len(), 2);
        assert_eq!(state.period_items[1].employee_name.as_deref(), Some("Bia"));
    }

    #[test]
    fn closing_active_period_clears_it() {
        let state = loaded_with_active().reduce(PayrollAction::PeriodClosed(1));
        assert!(state.active_period.is_none());
        assert!(state.period_items.is_empty());
        assert_eq!(state.periods[0].status, PeriodStatus::Closed);
    }

    #[test]
    fn closing_another_period_keeps_active() {
        let state = loaded_with_active().reduce(PayrollAction::PeriodClosed(2));
        assert_eq!(state.active_period_id(), Some(1));
        assert_eq!(state.period_items.len(), 2);
    }

    #[test]
    fn deleting_active_period_clears_it() {
        let state = loaded_with_active().reduce(PayrollAction::Removed(PayrollKey::Period(1)));
        assert!(state.active_period.is_none());
        assert!(state.period_items.is_empty());
        assert_eq!(state.periods.len(), 1);
    }

    #[test]
    fn creating_active_period_selects_it() {
        let state = Rc::new(PayrollState::default())
            .reduce(PayrollAction::Added(PayrollRecord::Period(period(3, PeriodStatus::Active))));
        assert_eq!(state.active_period_id(), Some(3));

        let state = state.reduce(PayrollAction::Added(PayrollRecord::Period(period(
            4,
            PeriodStatus::Closed,
        ))));
        assert_eq!(state.active_period_id(), Some(3));
        assert_eq!(state.periods.len(), 2);
    }

    #[test]
    fn items_are_appended_with_names() {
        let state = loaded_with_active().reduce(PayrollAction::Added(PayrollRecord::Item(item(12, 1))));
        let last = state.period_items.last().unwrap();
        assert_eq!(last.id, Some(12));
        assert_eq!(last.employee_name.as_deref(), Some("Ana"));
    }
}
