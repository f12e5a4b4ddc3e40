use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{
    bind_input, bind_select, form_message, icons, loading_row, page_shell, use_settings,
    StatCard, StatIcon, Tone, CARD_CLASS, INPUT_CLASS, LABEL_CLASS, PRIMARY_BUTTON,
    SECONDARY_BUTTON,
};
use crate::format::{format_currency, format_date};
use crate::hooks::{today, use_payroll_data, PayrollData};
use crate::logic::payroll::{
    active_employees, advances_in_period, is_employee_active, validate_advance, validate_employee,
    validate_item, validate_payroll, validate_period, ItemCategory, ItemInput, PayrollInput,
};
use crate::models::payroll::{Employee, PaymentType, PayrollPeriodItem, PeriodStatus};

const TABLE_HEAD: &str = "bg-muted text-muted-foreground text-[10px] uppercase tracking-widest";
const TABLE_WRAP: &str = "bg-white rounded-[10px] shadow-sm border border-white/50 overflow-hidden";

fn delete_button(on_click: Callback<MouseEvent>) -> Html {
    html! {
        <button class="text-muted-foreground hover:text-red-600" aria-label="Delete" onclick={on_click}>
            { icons::trash() }
        </button>
    }
}

#[function_component(PayrollPage)]
pub fn payroll_page() -> Html {
    let data = use_payroll_data();
    let totals = data.period_totals();

    let on_dismiss = {
        let data = data.clone();
        Callback::from(move |_: MouseEvent| data.clear_error())
    };

    let employees_hint = Some(AttrValue::from(format!(
        "{} employees, {} items",
        totals.employees_count, totals.item_count
    )));

    html! {
        { page_shell(
            "Payroll",
            html! {},
            html! {
                <>
                    if let Some(msg) = &data.error {
                        <div class="flex items-center justify-between text-sm text-red-500">
                            <span>{ msg.clone() }</span>
                            <button class="text-[11px] font-bold" onclick={on_dismiss}>{"Dismiss"}</button>
                        </div>
                    }

                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
                        <StatCard title="Period total" amount={totals.total} icon={StatIcon::Team} hint={employees_hint} />
                        <StatCard title="Processed" amount={totals.processed} icon={StatIcon::Wallet} tone={Tone::Positive} />
                        <StatCard title="Pending" amount={totals.pending} icon={StatIcon::Bills} />
                        <StatCard title="Advances" amount={totals.advances} icon={StatIcon::Expense} tone={Tone::Negative} />
                    </div>

                    <PeriodPanel data={data.clone()} />
                    <EmployeesPanel data={data.clone()} />
                    <AdvancesPanel data={data.clone()} />
                    <PayrollsPanel data={data.clone()} />
                </>
            }
        ) }
    }
}

#[derive(Properties, PartialEq)]
struct PanelProps {
    data: PayrollData,
}

/// The open period: its items grouped per employee, the item form and the
/// close action. Without an open period, the form to start one.
#[function_component(PeriodPanel)]
fn period_panel(props: &PanelProps) -> Html {
    let data = props.data.clone();
    let settings = use_settings();

    let period_name = use_state(String::new);
    let period_start = use_state(String::new);
    let period_end = use_state(String::new);

    let item_employee = use_state(String::new);
    let item_type = use_state(|| PaymentType::Salary.as_str().to_string());
    let item_amount = use_state(String::new);
    let item_description = use_state(String::new);
    let item_is_advance = use_state(|| false);

    let error = use_state(|| None::<String>);
    let success = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let on_create_period = {
        let data = data.clone();
        let period_name = period_name.clone();
        let period_start = period_start.clone();
        let period_end = period_end.clone();
        let error = error.clone();
        let success = success.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let period = match validate_period(&period_name, &period_start, &period_end) {
                Ok(p) => p,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };
            let data = data.clone();
            let period_name = period_name.clone();
            let error = error.clone();
            let success = success.clone();
            error.set(None);
            spawn_local(async move {
                match data.create_period(period).await {
                    Ok(()) => {
                        period_name.set(String::new());
                        success.set(Some("Period opened.".to_string()));
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_close_period = {
        let data = data.clone();
        let error = error.clone();
        let success = success.clone();
        let busy = busy.clone();
        let period_id = data.active_period_id();
        Callback::from(move |_: MouseEvent| {
            let Some(id) = period_id else {
                return;
            };
            let data = data.clone();
            let error = error.clone();
            let success = success.clone();
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                match data.close_period(id).await {
                    Ok(()) => success.set(Some("Period closed.".to_string())),
                    Err(err) => error.set(Some(format!("Could not close the period: {}", err))),
                }
                busy.set(false);
            });
        })
    };

    let on_add_item = {
        let data = data.clone();
        let item_employee = item_employee.clone();
        let item_type = item_type.clone();
        let item_amount = item_amount.clone();
        let item_description = item_description.clone();
        let item_is_advance = item_is_advance.clone();
        let error = error.clone();
        let success = success.clone();
        let settings = settings.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let item = match validate_item(
                ItemInput {
                    period: data.active_period_id(),
                    employee: item_employee.parse().ok(),
                    payment_type: PaymentType::parse(&item_type).unwrap_or_default(),
                    amount: &item_amount,
                    description: &item_description,
                    is_advance: *item_is_advance,
                },
                &settings,
            ) {
                Ok(item) => item,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    success.set(None);
                    return;
                }
            };
            let data = data.clone();
            let item_amount = item_amount.clone();
            let item_description = item_description.clone();
            let error = error.clone();
            let success = success.clone();
            error.set(None);
            spawn_local(async move {
                match data.add_item(item).await {
                    Ok(()) => {
                        item_amount.set(String::new());
                        item_description.set(String::new());
                        success.set(Some("Item added.".to_string()));
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_delete_item = {
        let data = data.clone();
        let error = error.clone();
        move |id: Option<u32>| {
            let data = data.clone();
            let error = error.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else {
                    return;
                };
                let data = data.clone();
                let error = error.clone();
                spawn_local(async move {
                    if let Err(err) = data.delete_item(id).await {
                        error.set(Some(err.to_string()));
                    }
                });
            })
        }
    };

    let on_toggle_processed = {
        let data = data.clone();
        let error = error.clone();
        move |item: &PayrollPeriodItem| {
            let data = data.clone();
            let error = error.clone();
            let item = item.clone();
            Callback::from(move |_: MouseEvent| {
                let data = data.clone();
                let error = error.clone();
                let item = item.clone();
                spawn_local(async move {
                    if let Err(err) = data.set_item_processed(&item, !item.is_processed).await {
                        error.set(Some(err.to_string()));
                    }
                });
            })
        }
    };

    let on_toggle_advance = {
        let item_is_advance = item_is_advance.clone();
        Callback::from(move |_: MouseEvent| item_is_advance.set(!*item_is_advance))
    };

    let summaries = data.employee_summaries();
    let staff = active_employees(&data.employees, today());

    let Some(active) = data.active_period.clone() else {
        return html! {
            <form class={CARD_CLASS} onsubmit={on_create_period}>
                <h4 class="text-[#1D617A] font-bold text-[15px] mb-1 tracking-wider">{"No open period"}</h4>
                <p class="text-sm text-muted-foreground mb-4">{"Open a period to start adding payments."}</p>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-3 mb-4">
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{"Name"}</label>
                        <input type="text" placeholder="March 2024" class={INPUT_CLASS} value={(*period_name).clone()} oninput={bind_input(&period_name)} />
                    </div>
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{"Start"}</label>
                        <input type="date" class={INPUT_CLASS} value={(*period_start).clone()} oninput={bind_input(&period_start)} />
                    </div>
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{"End"}</label>
                        <input type="date" class={INPUT_CLASS} value={(*period_end).clone()} oninput={bind_input(&period_end)} />
                    </div>
                </div>
                <button type="submit" class={PRIMARY_BUTTON} disabled={data.loading}>
                    { icons::plus() }
                    {"Open period"}
                </button>
                { form_message(&error, &success) }
            </form>
        };
    };

    html! {
        <div class="space-y-4">
            <div class={classes!(CARD_CLASS, "flex", "items-center", "justify-between")}>
                <div>
                    <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider">{ active.name.clone() }</h4>
                    <p class="text-sm text-muted-foreground">
                        { format!("{} to {}", format_date(active.start_date), format_date(active.end_date)) }
                    </p>
                </div>
                <button class={SECONDARY_BUTTON} onclick={on_close_period} disabled={*busy}>
                    { if *busy { "Closing..." } else { "Close period" } }
                </button>
            </div>

            <form class={CARD_CLASS} onsubmit={on_add_item}>
                <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"Add payment"}</h4>
                <div class="grid grid-cols-2 md:grid-cols-5 gap-3 mb-4">
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{"Employee"}</label>
                        <select class={INPUT_CLASS} onchange={bind_select(&item_employee)}>
                            <option value="" selected={item_employee.is_empty()}>{"Select..."}</option>
                            { for staff.iter().filter_map(|e| e.id.map(|id| (id, e.name.clone()))).map(|(id, name)| {
                                let id = id.to_string();
                                let selected = id == *item_employee;
                                html! { <option {selected} value={id}>{ name }</option> }
                            }) }
                        </select>
                    </div>
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{"Type"}</label>
                        <select class={INPUT_CLASS} onchange={bind_select(&item_type)}>
                            { for PaymentType::ALL.iter().map(|t| html! {
                                <option value={t.as_str()} selected={t.as_str() == item_type.as_str()}>{ t.label() }</option>
                            }) }
                        </select>
                    </div>
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{ format!("Amount ({})", settings.currency_symbol) }</label>
                        <input type="text" inputmode="decimal" class={INPUT_CLASS} value={(*item_amount).clone()} oninput={bind_input(&item_amount)} />
                    </div>
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{"Description"}</label>
                        <input type="text" class={INPUT_CLASS} value={(*item_description).clone()} oninput={bind_input(&item_description)} />
                    </div>
                    <label class="flex items-center gap-2 text-[12px] font-bold text-muted-foreground pt-5">
                        <input type="checkbox" checked={*item_is_advance} onclick={on_toggle_advance} />
                        {"Advance"}
                    </label>
                </div>
                <button type="submit" class={PRIMARY_BUTTON}>
                    { icons::plus() }
                    {"Add"}
                </button>
                { form_message(&error, &success) }
            </form>

            <div class={TABLE_WRAP}>
                <div class="p-5 border-b border-border">
                    <h3 class="font-bold text-lg text-foreground">{"By employee"}</h3>
                </div>
                <div class="overflow-x-auto">
                    <table class="w-full text-left border-collapse">
                        <thead>
                            <tr class={TABLE_HEAD}>
                                <th class="px-6 py-4 font-bold">{"Employee"}</th>
                                <th class="px-6 py-4 font-bold text-right">{"Items"}</th>
                                <th class="px-6 py-4 font-bold text-right">{"Processed"}</th>
                                <th class="px-6 py-4 font-bold text-right">{"Pending"}</th>
                                <th class="px-6 py-4 font-bold text-right">{"Advances"}</th>
                                <th class="px-6 py-4 font-bold text-right">{"Balance due"}</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            if summaries.is_empty() {
                                { loading_row(6, "No payments in this period yet.") }
                            } else {
                                { for summaries.iter().map(|s| {
                                    let balance_class = if s.balance_due < 0.0 {
                                        "px-6 py-4 text-right font-semibold text-red-600"
                                    } else {
                                        "px-6 py-4 text-right font-semibold text-foreground"
                                    };
                                    html! {
                                        <tr key={s.employee_id} class="text-sm">
                                            <td class="px-6 py-4 text-foreground">{ s.employee_name.clone() }</td>
                                            <td class="px-6 py-4 text-right">{ s.item_count }</td>
                                            <td class="px-6 py-4 text-right">{ format_currency(s.processed_total, &settings) }</td>
                                            <td class="px-6 py-4 text-right">{ format_currency(s.pending_total, &settings) }</td>
                                            <td class="px-6 py-4 text-right">{ format_currency(s.advance_total, &settings) }</td>
                                            <td class={balance_class}>{ format_currency(s.balance_due, &settings) }</td>
                                        </tr>
                                    }
                                }) }
                            }
                        </tbody>
                    </table>
                </div>
            </div>

            <div class={TABLE_WRAP}>
                <div class="p-5 border-b border-border">
                    <h3 class="font-bold text-lg text-foreground">{"Period items"}</h3>
                </div>
                <div class="overflow-x-auto">
                    <table class="w-full text-left border-collapse">
                        <thead>
                            <tr class={TABLE_HEAD}>
                                <th class="px-6 py-4 font-bold">{"Employee"}</th>
                                <th class="px-6 py-4 font-bold">{"Type"}</th>
                                <th class="px-6 py-4 font-bold">{"Description"}</th>
                                <th class="px-6 py-4 font-bold">{"State"}</th>
                                <th class="px-6 py-4 font-bold text-right">{"Amount"}</th>
                                <th class="px-4 py-4"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            { for data.period_items.iter().map(|item| {
                                let type_label = item
                                    .payment_type_display
                                    .clone()
                                    .unwrap_or_else(|| item.payment_type.label().to_string());
                                html! {
                                    <tr class="text-sm">
                                        <td class="px-6 py-4">{ item.employee_name.clone().unwrap_or_default() }</td>
                                        <td class="px-6 py-4">{ type_label }</td>
                                        <td class="px-6 py-4 text-muted-foreground">{ item.description.clone() }</td>
                                        <td class="px-6 py-4">
                                            <span class="bg-secondary text-secondary-foreground px-2.5 py-1 rounded-md text-[9px] font-bold">{ ItemCategory::of(item).label() }</span>
                                            if !item.is_advance {
                                                <button class="ml-2 text-[11px] text-muted-foreground hover:text-[#173E63]" onclick={on_toggle_processed(item)}>
                                                    { if item.is_processed { "Mark pending" } else { "Mark processed" } }
                                                </button>
                                            }
                                        </td>
                                        <td class="px-6 py-4 text-right font-semibold">{ format_currency(item.amount, &settings) }</td>
                                        <td class="px-4 py-4 text-right">{ delete_button(on_delete_item(item.id)) }</td>
                                    </tr>
                                }
                            }) }
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

#[function_component(EmployeesPanel)]
fn employees_panel(props: &PanelProps) -> Html {
    let data = props.data.clone();
    let settings = use_settings();

    let name = use_state(String::new);
    let role = use_state(String::new);
    let salary = use_state(String::new);
    let hiring_date = use_state(|| today().format("%Y-%m-%d").to_string());
    let error = use_state(|| None::<String>);

    let on_add = {
        let data = data.clone();
        let name = name.clone();
        let role = role.clone();
        let salary = salary.clone();
        let hiring_date = hiring_date.clone();
        let error = error.clone();
        let settings = settings.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let employee = match validate_employee(
                &name,
                &role,
                &salary,
                &hiring_date,
                &settings,
            ) {
                Ok(employee) => employee,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };
            let data = data.clone();
            let name = name.clone();
            let role = role.clone();
            let salary = salary.clone();
            let error = error.clone();
            error.set(None);
            spawn_local(async move {
                match data.add_employee(employee).await {
                    Ok(()) => {
                        name.set(String::new());
                        role.set(String::new());
                        salary.set(String::new());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_delete = {
        let data = data.clone();
        let error = error.clone();
        move |id: Option<u32>| {
            let data = data.clone();
            let error = error.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else {
                    return;
                };
                let data = data.clone();
                let error = error.clone();
                spawn_local(async move {
                    if let Err(err) = data.delete_employee(id).await {
                        error.set(Some(format!("Could not remove employee: {}", err)));
                    }
                });
            })
        }
    };

    let on_terminate = {
        let data = data.clone();
        let error = error.clone();
        move |employee: &Employee| {
            let data = data.clone();
            let error = error.clone();
            let employee = employee.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = employee.id else {
                    return;
                };
                let data = data.clone();
                let error = error.clone();
                let terminated = Employee {
                    termination_date: Some(today()),
                    ..employee.clone()
                };
                spawn_local(async move {
                    if let Err(err) = data.update_employee(id, terminated).await {
                        error.set(Some(format!("Could not terminate employee: {}", err)));
                    }
                });
            })
        }
    };

    let now = today();

    html! {
        <div class={TABLE_WRAP}>
            <div class="p-5 border-b border-border">
                <h3 class="font-bold text-lg text-foreground">{"Employees"}</h3>
            </div>
            <div class="overflow-x-auto">
                <table class="w-full text-left border-collapse">
                    <thead>
                        <tr class={TABLE_HEAD}>
                            <th class="px-6 py-4 font-bold">{"Name"}</th>
                            <th class="px-6 py-4 font-bold">{"Role"}</th>
                            <th class="px-6 py-4 font-bold">{"Hired"}</th>
                            <th class="px-6 py-4 font-bold text-right">{"Salary"}</th>
                            <th class="px-4 py-4"></th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        { if data.loading && data.employees.is_empty() {
                            loading_row(5, "Loading...")
                        } else if data.employees.is_empty() {
                            loading_row(5, "No employees yet.")
                        } else {
                            html! {
                                <>
                                    { for data.employees.iter().map(|e| {
                                        let active = is_employee_active(e, now);
                                        let row_class = if active {
                                            "text-sm"
                                        } else {
                                            "text-sm text-muted-foreground line-through"
                                        };
                                        html! {
                                            <tr class={row_class}>
                                                <td class="px-6 py-4">{ e.name.clone() }</td>
                                                <td class="px-6 py-4">{ e.role.clone() }</td>
                                                <td class="px-6 py-4">{ format_date(e.hiring_date) }</td>
                                                <td class="px-6 py-4 text-right">{ format_currency(e.salary, &settings) }</td>
                                                <td class="px-4 py-4 text-right whitespace-nowrap">
                                                    if active {
                                                        <button class="text-[11px] text-muted-foreground hover:text-[#173E63] mr-3" onclick={on_terminate(e)}>{"Terminate"}</button>
                                                    }
                                                    { delete_button(on_delete(e.id)) }
                                                </td>
                                            </tr>
                                        }
                                    }) }
                                </>
                            }
                        }}
                    </tbody>
                </table>
            </div>
            <form class="p-5 border-t border-border" onsubmit={on_add}>
                <div class="grid grid-cols-2 md:grid-cols-5 gap-3">
                    <input type="text" placeholder="Name" class={INPUT_CLASS} value={(*name).clone()} oninput={bind_input(&name)} />
                    <input type="text" placeholder="Role" class={INPUT_CLASS} value={(*role).clone()} oninput={bind_input(&role)} />
                    <input type="text" inputmode="decimal" placeholder="Salary" class={INPUT_CLASS} value={(*salary).clone()} oninput={bind_input(&salary)} />
                    <input type="date" class={INPUT_CLASS} value={(*hiring_date).clone()} oninput={bind_input(&hiring_date)} />
                    <button type="submit" class={PRIMARY_BUTTON}>
                        { icons::plus() }
                        {"Add employee"}
                    </button>
                </div>
                { form_message(&error, &None) }
            </form>
        </div>
    }
}

/// Advances handed out inside the open period and not yet settled by a payroll.
#[function_component(AdvancesPanel)]
fn advances_panel(props: &PanelProps) -> Html {
    let data = props.data.clone();
    let settings = use_settings();

    let employee = use_state(String::new);
    let amount = use_state(String::new);
    let date_given = use_state(|| today().format("%Y-%m-%d").to_string());
    let description = use_state(String::new);
    let error = use_state(|| None::<String>);

    let on_add = {
        let data = data.clone();
        let employee = employee.clone();
        let amount = amount.clone();
        let date_given = date_given.clone();
        let description = description.clone();
        let error = error.clone();
        let settings = settings.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let advance = match validate_advance(
                employee.parse().ok(),
                &amount,
                &date_given,
                &description,
                &settings,
            ) {
                Ok(advance) => advance,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };
            let data = data.clone();
            let amount = amount.clone();
            let description = description.clone();
            let error = error.clone();
            error.set(None);
            spawn_local(async move {
                match data.add_advance(advance).await {
                    Ok(()) => {
                        amount.set(String::new());
                        description.set(String::new());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_delete = {
        let data = data.clone();
        let error = error.clone();
        move |id: Option<u32>| {
            let data = data.clone();
            let error = error.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else {
                    return;
                };
                let data = data.clone();
                let error = error.clone();
                spawn_local(async move {
                    if let Err(err) = data.delete_advance(id).await {
                        error.set(Some(err.to_string()));
                    }
                });
            })
        }
    };

    let (title, advances) = match data.active_period.as_ref() {
        Some(period) => (
            format!("Advances in {}", period.name),
            advances_in_period(&data.advances, period),
        ),
        None => ("Advances".to_string(), data.advances.iter().collect()),
    };
    let advances_total: f64 = advances.iter().map(|a| a.amount).sum();
    let staff = active_employees(&data.employees, today());

    html! {
        <div class={TABLE_WRAP}>
            <div class="p-5 border-b border-border flex items-center justify-between">
                <h3 class="font-bold text-lg text-foreground">{ title }</h3>
                <span class="text-sm font-bold text-[#1D617A]">{ format_currency(advances_total, &settings) }</span>
            </div>
            <div class="overflow-x-auto">
                <table class="w-full text-left border-collapse">
                    <thead>
                        <tr class={TABLE_HEAD}>
                            <th class="px-6 py-4 font-bold">{"Date"}</th>
                            <th class="px-6 py-4 font-bold">{"Employee"}</th>
                            <th class="px-6 py-4 font-bold">{"Description"}</th>
                            <th class="px-6 py-4 font-bold text-right">{"Amount"}</th>
                            <th class="px-4 py-4"></th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        if advances.is_empty() {
                            { loading_row(5, "No open advances.") }
                        } else {
                            { for advances.iter().map(|a| html! {
                                <tr class="text-sm">
                                    <td class="px-6 py-4 text-muted-foreground">{ format_date(a.date_given) }</td>
                                    <td class="px-6 py-4">{ a.employee_name.clone().unwrap_or_default() }</td>
                                    <td class="px-6 py-4">{ a.description.clone() }</td>
                                    <td class="px-6 py-4 text-right font-semibold">{ format_currency(a.amount, &settings) }</td>
                                    <td class="px-4 py-4 text-right">{ delete_button(on_delete(a.id)) }</td>
                                </tr>
                            }) }
                        }
                    </tbody>
                </table>
            </div>
            <form class="p-5 border-t border-border" onsubmit={on_add}>
                <div class="grid grid-cols-2 md:grid-cols-5 gap-3">
                    <select class={INPUT_CLASS} onchange={bind_select(&employee)}>
                        <option value="" selected={employee.is_empty()}>{"Employee..."}</option>
                        { for staff.iter().filter_map(|e| e.id.map(|id| (id, e.name.clone()))).map(|(id, name)| {
                            let id = id.to_string();
                            let selected = id == *employee;
                            html! { <option {selected} value={id}>{ name }</option> }
                        }) }
                    </select>
                    <input type="text" inputmode="decimal" placeholder="Amount" class={INPUT_CLASS} value={(*amount).clone()} oninput={bind_input(&amount)} />
                    <input type="date" class={INPUT_CLASS} value={(*date_given).clone()} oninput={bind_input(&date_given)} />
                    <input type="text" placeholder="Description" class={INPUT_CLASS} value={(*description).clone()} oninput={bind_input(&description)} />
                    <button type="submit" class={PRIMARY_BUTTON}>
                        { icons::plus() }
                        {"Add advance"}
                    </button>
                </div>
                { form_message(&error, &None) }
            </form>
        </div>
    }
}

/// Closed periods and settled payrolls.
#[function_component(PayrollsPanel)]
fn payrolls_panel(props: &PanelProps) -> Html {
    let data = props.data.clone();
    let settings = use_settings();
    let totals = data.payroll_totals();
    let error = use_state(|| None::<String>);

    let employee = use_state(String::new);
    let period_start = use_state(String::new);
    let period_end = use_state(String::new);
    let gross = use_state(String::new);
    let deductions = use_state(String::new);
    let payment_date = use_state(|| today().format("%Y-%m-%d").to_string());
    let form_error = use_state(|| None::<String>);

    let on_add = {
        let data = data.clone();
        let employee = employee.clone();
        let period_start = period_start.clone();
        let period_end = period_end.clone();
        let gross = gross.clone();
        let deductions = deductions.clone();
        let payment_date = payment_date.clone();
        let form_error = form_error.clone();
        let settings = settings.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let payroll = match validate_payroll(
                PayrollInput {
                    employee: employee.parse().ok(),
                    period_start: &period_start,
                    period_end: &period_end,
                    gross: &gross,
                    deductions: &deductions,
                    payment_date: &payment_date,
                },
                &settings,
            ) {
                Ok(payroll) => payroll,
                Err(err) => {
                    form_error.set(Some(err.to_string()));
                    return;
                }
            };
            let data = data.clone();
            let gross = gross.clone();
            let deductions = deductions.clone();
            let form_error = form_error.clone();
            form_error.set(None);
            spawn_local(async move {
                match data.add_payroll(payroll).await {
                    Ok(()) => {
                        gross.set(String::new());
                        deductions.set(String::new());
                    }
                    Err(err) => form_error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_delete_period = {
        let data = data.clone();
        let error = error.clone();
        move |id: Option<u32>| {
            let data = data.clone();
            let error = error.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else {
                    return;
                };
                let data = data.clone();
                let error = error.clone();
                spawn_local(async move {
                    if let Err(err) = data.delete_period(id).await {
                        error.set(Some(format!("Could not delete period: {}", err)));
                    }
                });
            })
        }
    };

    let on_delete = {
        let data = data.clone();
        let error = error.clone();
        move |id: Option<u32>| {
            let data = data.clone();
            let error = error.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else {
                    return;
                };
                let data = data.clone();
                let error = error.clone();
                spawn_local(async move {
                    if let Err(err) = data.delete_payroll(id).await {
                        error.set(Some(err.to_string()));
                    }
                });
            })
        }
    };

    let staff = active_employees(&data.employees, today());
    let closed: Vec<_> = data
        .periods
        .iter()
        .filter(|p| p.status == PeriodStatus::Closed)
        .collect();

    html! {
        <div class="grid grid-cols-1 lg:grid-cols-3 gap-4">
            <div class={classes!(TABLE_WRAP, "lg:col-span-2")}>
                <div class="p-5 border-b border-border flex items-center justify-between">
                    <h3 class="font-bold text-lg text-foreground">{"Payrolls"}</h3>
                    <span class="text-sm text-muted-foreground">
                        { format!("{} payrolls · net {}", totals.count, format_currency(totals.net, &settings)) }
                    </span>
                </div>
                { form_message(&error, &None) }
                <div class="overflow-x-auto">
                    <table class="w-full text-left border-collapse">
                        <thead>
                            <tr class={TABLE_HEAD}>
                                <th class="px-6 py-4 font-bold">{"Employee"}</th>
                                <th class="px-6 py-4 font-bold">{"Period"}</th>
                                <th class="px-6 py-4 font-bold text-right">{"Gross"}</th>
                                <th class="px-6 py-4 font-bold text-right">{"Deductions"}</th>
                                <th class="px-6 py-4 font-bold text-right">{"Net"}</th>
                                <th class="px-4 py-4"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            if data.payrolls.is_empty() {
                                { loading_row(6, "No payrolls yet.") }
                            } else {
                                { for data.payrolls.iter().map(|p| html! {
                                    <tr class="text-sm">
                                        <td class="px-6 py-4">{ p.employee_name.clone().unwrap_or_default() }</td>
                                        <td class="px-6 py-4 text-muted-foreground">
                                            { format!("{} to {}", format_date(p.period_start), format_date(p.period_end)) }
                                        </td>
                                        <td class="px-6 py-4 text-right">{ format_currency(p.gross_amount, &settings) }</td>
                                        <td class="px-6 py-4 text-right">{ format_currency(p.deductions, &settings) }</td>
                                        <td class="px-6 py-4 text-right font-semibold">{ format_currency(p.net_amount, &settings) }</td>
                                        <td class="px-4 py-4 text-right">{ delete_button(on_delete(p.id)) }</td>
                                    </tr>
                                }) }
                            }
                        </tbody>
                    </table>
                </div>
                <form class="p-5 border-t border-border" onsubmit={on_add}>
                    <div class="grid grid-cols-2 md:grid-cols-7 gap-3">
                        <select class={INPUT_CLASS} onchange={bind_select(&employee)}>
                            <option value="" selected={employee.is_empty()}>{"Employee..."}</option>
                            { for staff.iter().filter_map(|e| e.id.map(|id| (id, e.name.clone()))).map(|(id, name)| {
                                let id = id.to_string();
                                let selected = id == *employee;
                                html! { <option {selected} value={id}>{ name }</option> }
                            }) }
                        </select>
                        <input type="date" title="Period start" class={INPUT_CLASS} value={(*period_start).clone()} oninput={bind_input(&period_start)} />
                        <input type="date" title="Period end" class={INPUT_CLASS} value={(*period_end).clone()} oninput={bind_input(&period_end)} />
                        <input type="text" inputmode="decimal" placeholder="Gross" class={INPUT_CLASS} value={(*gross).clone()} oninput={bind_input(&gross)} />
                        <input type="text" inputmode="decimal" placeholder="Deductions" class={INPUT_CLASS} value={(*deductions).clone()} oninput={bind_input(&deductions)} />
                        <input type="date" title="Payment date" class={INPUT_CLASS} value={(*payment_date).clone()} oninput={bind_input(&payment_date)} />
                        <button type="submit" class={PRIMARY_BUTTON}>
                            { icons::plus() }
                            {"Register"}
                        </button>
                    </div>
                    { form_message(&form_error, &None) }
                </form>
            </div>

            <div class={CARD_CLASS}>
                <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"Closed periods"}</h4>
                if closed.is_empty() {
                    <p class="text-sm text-muted-foreground">{"None yet."}</p>
                } else {
                    <ul class="space-y-2">
                        { for closed.iter().map(|p| html! {
                            <li class="text-sm flex items-center justify-between gap-2">
                                <span class="flex-1">{ p.name.clone() }</span>
                                <span class="text-muted-foreground">
                                    { p.total_amount.map(|t| format_currency(t, &settings)).unwrap_or_default() }
                                </span>
                                { delete_button(on_delete_period(p.id)) }
                            </li>
                        }) }
                    </ul>
                }
            </div>
        </div>
    }
}
