use std::collections::HashMap;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{
    bind_input, bind_select, form_message, icons, loading_row, use_settings, CARD_CLASS,
    INPUT_CLASS, LABEL_CLASS, PRIMARY_BUTTON, SECONDARY_BUTTON,
};
use crate::format::{format_currency, format_date, parse_amount_input};
use crate::hooks::{use_recurring_period, FinanceData};
use crate::logic::recurring::{validate_bill, BillRow};
use crate::models::finance::{BillFrequency, BillStatus, RecurringBill, RecurringBillPatch};

fn status_badge(status: BillStatus) -> Html {
    let class = match status {
        BillStatus::Paid => "bg-emerald-100 text-emerald-700",
        BillStatus::Pending => "bg-amber-100 text-amber-700",
        BillStatus::Overdue => "bg-red-100 text-red-700",
    };
    html! {
        <span class={classes!("px-2.5", "py-1", "rounded-md", "text-[10px]", "font-bold", class)}>{ status.label() }</span>
    }
}

#[derive(Properties, PartialEq)]
pub struct RecurringBillsPanelProps {
    pub finance: FinanceData,
}

/// Recurring bills for one month at a time, with their paid/pending/overdue
/// state and the payment action.
#[function_component(RecurringBillsPanel)]
pub fn recurring_bills_panel(props: &RecurringBillsPanelProps) -> Html {
    let finance = props.finance.clone();
    let period = use_recurring_period();
    let settings = use_settings();

    let pay_amounts = use_state(HashMap::<u32, String>::new);
    let action_error = use_state(|| None::<String>);

    let name = use_state(String::new);
    let value = use_state(String::new);
    let due_day = use_state(|| "10".to_string());
    let frequency = use_state(|| BillFrequency::Monthly.as_str().to_string());
    let category = use_state(String::new);
    let bill_error = use_state(|| None::<String>);
    let bill_success = use_state(|| None::<String>);

    let summary = period.summary();
    let current = period.period;

    let on_previous = {
        let period = period.clone();
        Callback::from(move |_: MouseEvent| period.select(current.previous()))
    };
    let on_next = {
        let period = period.clone();
        Callback::from(move |_: MouseEvent| period.select(current.next()))
    };

    let on_retry = {
        let period = period.clone();
        Callback::from(move |_: MouseEvent| period.reload())
    };
    let on_dismiss = {
        let period = period.clone();
        Callback::from(move |_: MouseEvent| period.clear_error())
    };

    let on_pay_amount = |bill_id: u32| {
        let pay_amounts = pay_amounts.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*pay_amounts).clone();
            next.insert(bill_id, input.value());
            pay_amounts.set(next);
        })
    };

    let on_mark_paid = |row: &BillRow| {
        let period = period.clone();
        let pay_amounts = pay_amounts.clone();
        let action_error = action_error.clone();
        let settings = settings.clone();
        let bill = period.bills.iter().find(|b| b.id == row.bill_id).cloned();
        Callback::from(move |_: MouseEvent| {
            let Some(bill) = bill.clone() else {
                return;
            };
            let typed = pay_amounts.get(&bill.id).cloned().unwrap_or_default();
            let amount = if typed.trim().is_empty() {
                None
            } else {
                match parse_amount_input(&typed, &settings) {
                    Some(amount) if amount > 0.0 => Some(amount),
                    _ => {
                        action_error.set(Some(format!("Invalid amount for {}", bill.name)));
                        return;
                    }
                }
            };

            let period = period.clone();
            let pay_amounts = pay_amounts.clone();
            let action_error = action_error.clone();
            action_error.set(None);
            spawn_local(async move {
                match period.mark_paid(&bill, amount).await {
                    Ok(()) => {
                        let mut next = (*pay_amounts).clone();
                        next.remove(&bill.id);
                        pay_amounts.set(next);
                    }
                    Err(err) => action_error.set(Some(format!("Could not mark {} as paid: {}", bill.name, err))),
                }
            });
        })
    };

    let on_toggle_active = {
        let finance = finance.clone();
        let period = period.clone();
        let action_error = action_error.clone();
        move |bill: &RecurringBill| {
            let finance = finance.clone();
            let period = period.clone();
            let action_error = action_error.clone();
            let id = bill.id;
            let is_active = !bill.is_active;
            Callback::from(move |_: MouseEvent| {
                let finance = finance.clone();
                let period = period.clone();
                let action_error = action_error.clone();
                spawn_local(async move {
                    let patch = RecurringBillPatch {
                        is_active: Some(is_active),
                        ..RecurringBillPatch::default()
                    };
                    match finance.update_bill(id, patch).await {
                        Ok(bill) => period.bill_replaced(bill),
                        Err(err) => action_error.set(Some(err.to_string())),
                    }
                });
            })
        }
    };

    let on_delete = {
        let finance = finance.clone();
        let period = period.clone();
        let action_error = action_error.clone();
        move |id: u32| {
            let finance = finance.clone();
            let period = period.clone();
            let action_error = action_error.clone();
            Callback::from(move |_: MouseEvent| {
                let finance = finance.clone();
                let period = period.clone();
                let action_error = action_error.clone();
                spawn_local(async move {
                    match finance.delete_bill(id).await {
                        Ok(()) => period.bill_removed(id),
                        Err(err) => action_error.set(Some(err.to_string())),
                    }
                });
            })
        }
    };

    let on_add_bill = {
        let finance = finance.clone();
        let period = period.clone();
        let name = name.clone();
        let value = value.clone();
        let due_day = due_day.clone();
        let frequency = frequency.clone();
        let category = category.clone();
        let bill_error = bill_error.clone();
        let bill_success = bill_success.clone();
        let settings = settings.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let data = match validate_bill(
                &name,
                &value,
                &due_day,
                BillFrequency::parse(&frequency).unwrap_or_default(),
                category.parse().ok(),
                &settings,
            ) {
                Ok(data) => data,
                Err(err) => {
                    bill_error.set(Some(err.to_string()));
                    bill_success.set(None);
                    return;
                }
            };

            let finance = finance.clone();
            let period = period.clone();
            let name = name.clone();
            let value = value.clone();
            let bill_error = bill_error.clone();
            let bill_success = bill_success.clone();
            bill_error.set(None);
            spawn_local(async move {
                match finance.add_bill(data).await {
                    Ok(bill) => {
                        bill_success.set(Some(format!("{} added.", bill.name)));
                        period.bill_added(bill);
                        name.set(String::new());
                        value.set(String::new());
                    }
                    Err(err) => bill_error.set(Some(err.to_string())),
                }
            });
        })
    };

    let inactive: Vec<&RecurringBill> = period.bills.iter().filter(|b| !b.is_active).collect();

    html! {
        <div class="space-y-4">
            <div class="bg-white rounded-[10px] shadow-sm border border-white/50 overflow-hidden">
                <div class="p-5 border-b border-border flex items-center justify-between">
                    <div>
                        <h3 class="font-bold text-lg text-foreground">{"Recurring bills"}</h3>
                        <p class="text-[11px] text-muted-foreground">
                            { format!("{} committed every month", format_currency(finance.recurring_total(), &settings)) }
                        </p>
                    </div>
                    <div class="flex items-center gap-2">
                        <button class={SECONDARY_BUTTON} aria-label="Previous month" onclick={on_previous}>{ icons::chevron_left() }</button>
                        <span class="text-sm font-bold text-[#173E63] w-36 text-center">{ current.label() }</span>
                        <button class={SECONDARY_BUTTON} aria-label="Next month" onclick={on_next}>{ icons::chevron_right() }</button>
                    </div>
                </div>

                <div class="grid grid-cols-2 md:grid-cols-4 gap-4 p-5 border-b border-border text-sm">
                    <div>
                        <p class={LABEL_CLASS}>{"Due this month"}</p>
                        <p class="font-bold text-[#1D617A]">{ format_currency(summary.total_due, &settings) }</p>
                    </div>
                    <div>
                        <p class={LABEL_CLASS}>{ format!("Paid ({})", summary.paid_count) }</p>
                        <p class="font-bold text-emerald-600">{ format_currency(summary.total_paid, &settings) }</p>
                    </div>
                    <div>
                        <p class={LABEL_CLASS}>{ format!("Pending ({})", summary.pending_count) }</p>
                        <p class="font-bold text-amber-600">{ format_currency(summary.total_pending, &settings) }</p>
                    </div>
                    <div>
                        <p class={LABEL_CLASS}>{ format!("Overdue ({})", summary.overdue_count) }</p>
                        <p class="font-bold text-red-600">{ format_currency(summary.total_overdue, &settings) }</p>
                    </div>
                </div>

                if let Some(msg) = &period.error {
                    <div class="flex items-center justify-between text-sm text-red-500 px-5 pt-3">
                        <span>{ msg.clone() }</span>
                        <span class="flex gap-3">
                            <button class="text-[11px] font-bold" onclick={on_retry}>{"Retry"}</button>
                            <button class="text-[11px] font-bold" onclick={on_dismiss}>{"Dismiss"}</button>
                        </span>
                    </div>
                }
                if let Some(msg) = &*action_error {
                    <p class="text-sm text-red-500 px-5 pt-3">{ msg.clone() }</p>
                }

                <div class="overflow-x-auto">
                    <table class="w-full text-left border-collapse">
                        <thead>
                            <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                <th class="px-8 py-4 font-bold">{"Due"}</th>
                                <th class="px-8 py-4 font-bold">{"Bill"}</th>
                                <th class="px-8 py-4 font-bold text-right">{"Value"}</th>
                                <th class="px-8 py-4 font-bold">{"Status"}</th>
                                <th class="px-8 py-4 font-bold">{"Payment"}</th>
                                <th class="px-4 py-4"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            { if period.loading && summary.is_empty() {
                                loading_row(6, "Loading...")
                            } else if summary.is_empty() {
                                loading_row(6, "No active recurring bills.")
                            } else {
                                html! {
                                    <>
                                        { for summary.rows.iter().map(|row| {
                                            let bill = period.bills.iter().find(|b| b.id == row.bill_id);
                                            let typed = pay_amounts.get(&row.bill_id).cloned().unwrap_or_default();
                                            html! {
                                                <tr key={row.bill_id} class="text-sm hover:bg-muted/40 transition-colors">
                                                    <td class="px-8 py-4 text-muted-foreground">{ format_date(row.due_date) }</td>
                                                    <td class="px-8 py-4 text-foreground">{ row.name.clone() }</td>
                                                    <td class="px-8 py-4 text-right font-semibold">{ format_currency(row.value, &settings) }</td>
                                                    <td class="px-8 py-4">{ status_badge(row.status) }</td>
                                                    <td class="px-8 py-4">
                                                        if let Some(paid) = row.amount_paid {
                                                            <span class="text-emerald-700 font-semibold">{ format_currency(paid, &settings) }</span>
                                                        } else {
                                                            <div class="flex gap-2 items-center">
                                                                <input type="text" inputmode="decimal" placeholder={format_currency(row.value, &settings)} class={classes!(INPUT_CLASS, "w-28")} value={typed} oninput={on_pay_amount(row.bill_id)} />
                                                                <button class={PRIMARY_BUTTON} onclick={on_mark_paid(row)}>
                                                                    { icons::check() }
                                                                    {"Pay"}
                                                                </button>
                                                            </div>
                                                        }
                                                    </td>
                                                    <td class="px-4 py-4 text-right whitespace-nowrap">
                                                        if let Some(bill) = bill {
                                                            <button class="text-[11px] text-muted-foreground hover:text-[#173E63] mr-3" onclick={on_toggle_active(bill)}>{"Pause"}</button>
                                                        }
                                                        <button class="text-muted-foreground hover:text-red-600" aria-label="Delete" onclick={on_delete(row.bill_id)}>
                                                            { icons::trash() }
                                                        </button>
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

                if !inactive.is_empty() {
                    <div class="p-5 border-t border-border">
                        <p class={LABEL_CLASS}>{"Paused"}</p>
                        <div class="flex flex-wrap gap-2 mt-2">
                            { for inactive.iter().map(|bill| html! {
                                <button class="bg-[#f1f4f9] text-[#173E63] px-2.5 py-1 rounded-md text-[11px]" onclick={on_toggle_active(*bill)}>
                                    { format!("{} · resume", bill.name) }
                                </button>
                            }) }
                        </div>
                    </div>
                }
            </div>

            <form class={CARD_CLASS} onsubmit={on_add_bill}>
                <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"New recurring bill"}</h4>
                <div class="grid grid-cols-2 md:grid-cols-5 gap-3 mb-4">
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{"Name"}</label>
                        <input type="text" class={INPUT_CLASS} value={(*name).clone()} oninput={bind_input(&name)} />
                    </div>
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{ format!("Value ({})", settings.currency_symbol) }</label>
                        <input type="text" inputmode="decimal" class={INPUT_CLASS} value={(*value).clone()} oninput={bind_input(&value)} />
                    </div>
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{"Due day"}</label>
                        <input type="number" min="1" max="31" class={INPUT_CLASS} value={(*due_day).clone()} oninput={bind_input(&due_day)} />
                    </div>
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{"Frequency"}</label>
                        <select class={INPUT_CLASS} onchange={bind_select(&frequency)}>
                            { for BillFrequency::ALL.iter().map(|f| html! {
                                <option value={f.as_str()} selected={f.as_str() == frequency.as_str()}>{ f.label() }</option>
                            }) }
                        </select>
                    </div>
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{"Category"}</label>
                        <select class={INPUT_CLASS} onchange={bind_select(&category)}>
                            <option value="" selected={category.is_empty()}>{"None"}</option>
                            { for finance.categories.iter().map(|c| {
                                let id = c.id.to_string();
                                let selected = id == *category;
                                html! { <option {selected} value={id}>{ c.name.clone() }</option> }
                            }) }
                        </select>
                    </div>
                </div>
                <button type="submit" class={PRIMARY_BUTTON}>
                    { icons::plus() }
                    {"Add bill"}
                </button>
                { form_message(&bill_error, &bill_success) }
            </form>
        </div>
    }
}
