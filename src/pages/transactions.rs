use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::recurring::RecurringBillsPanel;
use crate::components::{
    bind_input, form_message, icons, loading_row, page_shell, use_settings, StatCard, StatIcon,
    Tone, CARD_CLASS, INPUT_CLASS, LABEL_CLASS, PRIMARY_BUTTON, SECONDARY_BUTTON,
};
use crate::format::{format_currency, format_date};
use crate::hooks::{today, use_finance_data};
use crate::logic::finance::{of_kind, TransactionForm};
use crate::models::finance::{NewCategory, Transaction, TransactionKind};

#[derive(Clone, Copy, PartialEq)]
enum KindFilter {
    All,
    Only(TransactionKind),
}

fn parse_kind(raw: &str) -> TransactionKind {
    match raw {
        "income" => TransactionKind::Income,
        _ => TransactionKind::Expense,
    }
}

#[function_component(TransactionsPage)]
pub fn transactions_page() -> Html {
    let finance = use_finance_data();
    let settings = use_settings();

    let kind = use_state(|| TransactionKind::Expense);
    let form = use_state(|| TransactionForm::today(today()));
    let form_error = use_state(|| None::<String>);
    let form_success = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let filter = use_state(|| KindFilter::All);
    // Entry being edited. Its kind is fixed since incomes and expenses live on different endpoints.
    let editing = use_state(|| None::<(TransactionKind, u32)>);

    let category_name = use_state(String::new);
    let category_error = use_state(|| None::<String>);

    let totals = finance.totals();

    let update_form = |apply: fn(&mut TransactionForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let input_to = |cb: Callback<String>| {
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.value());
        })
    };

    let on_title = input_to(update_form(|f, v| f.title = v));
    let on_amount = input_to(update_form(|f, v| f.amount = v));
    let on_description = input_to(update_form(|f, v| f.description = v));
    let on_date = input_to(update_form(|f, v| f.date = v));
    let on_category = {
        let set = update_form(|f, v| f.category = v.parse().ok());
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            set.emit(input.value());
        })
    };
    let on_kind = {
        let kind = kind.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            kind.set(parse_kind(&input.value()));
        })
    };

    let on_add = {
        let finance = finance.clone();
        let kind = kind.clone();
        let editing = editing.clone();
        let form = form.clone();
        let form_error = form_error.clone();
        let form_success = form_success.clone();
        let saving = saving.clone();
        let settings = settings.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let entry = match form.validate(&settings) {
                Ok(entry) => entry,
                Err(err) => {
                    form_error.set(Some(err.to_string()));
                    form_success.set(None);
                    return;
                }
            };

            let finance = finance.clone();
            let target = *editing;
            let kind = target.map(|(k, _)| k).unwrap_or(*kind);
            let editing = editing.clone();
            let form = form.clone();
            let form_error = form_error.clone();
            let form_success = form_success.clone();
            let saving = saving.clone();
            saving.set(true);
            form_error.set(None);
            spawn_local(async move {
                let (result, done) = match target {
                    Some((kind, id)) => (finance.update_transaction(kind, id, entry).await, "updated"),
                    None => (finance.add_transaction(kind, entry).await, "added"),
                };
                match result {
                    Ok(()) => {
                        form.set(TransactionForm::today(today()));
                        editing.set(None);
                        form_success.set(Some(format!("{} {}.", kind.label(), done)));
                    }
                    Err(err) => form_error.set(Some(err.to_string())),
                }
                saving.set(false);
            });
        })
    };

    let on_clear = {
        let form = form.clone();
        let editing = editing.clone();
        let form_error = form_error.clone();
        let form_success = form_success.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(TransactionForm::today(today()));
            editing.set(None);
            form_error.set(None);
            form_success.set(None);
        })
    };

    let on_delete = {
        let finance = finance.clone();
        let form_error = form_error.clone();
        move |kind: TransactionKind, id: u32| {
            let finance = finance.clone();
            let form_error = form_error.clone();
            Callback::from(move |_: MouseEvent| {
                let finance = finance.clone();
                let form_error = form_error.clone();
                spawn_local(async move {
                    if let Err(err) = finance.delete_transaction(kind, id).await {
                        form_error.set(Some(format!("Could not delete: {}", err)));
                    }
                });
            })
        }
    };

    let on_edit = {
        let form = form.clone();
        let kind = kind.clone();
        let editing = editing.clone();
        let form_error = form_error.clone();
        let form_success = form_success.clone();
        move |tx: &Transaction| {
            let form = form.clone();
            let kind = kind.clone();
            let editing = editing.clone();
            let form_error = form_error.clone();
            let form_success = form_success.clone();
            let prefilled = TransactionForm::from_transaction(tx);
            let target = (tx.kind, tx.id);
            Callback::from(move |_: MouseEvent| {
                form.set(prefilled.clone());
                kind.set(target.0);
                editing.set(Some(target));
                form_error.set(None);
                form_success.set(None);
            })
        }
    };

    let on_delete_category = {
        let finance = finance.clone();
        let category_error = category_error.clone();
        move |id: u32| {
            let finance = finance.clone();
            let category_error = category_error.clone();
            Callback::from(move |_: MouseEvent| {
                let finance = finance.clone();
                let category_error = category_error.clone();
                spawn_local(async move {
                    if let Err(err) = finance.delete_category(id).await {
                        category_error.set(Some(format!("Could not remove category: {}", err)));
                    }
                });
            })
        }
    };

    let on_add_category = {
        let finance = finance.clone();
        let category_name = category_name.clone();
        let category_error = category_error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = category_name.trim().to_string();
            if name.is_empty() {
                category_error.set(Some("Category name is required".to_string()));
                return;
            }
            let finance = finance.clone();
            let category_name = category_name.clone();
            let category_error = category_error.clone();
            spawn_local(async move {
                let data = NewCategory {
                    name,
                    description: None,
                };
                match finance.add_category(data).await {
                    Ok(_) => {
                        category_name.set(String::new());
                        category_error.set(None);
                    }
                    Err(err) => category_error.set(Some(err.to_string())),
                }
            });
        })
    };

    let set_filter = |next: KindFilter| {
        let filter = filter.clone();
        Callback::from(move |_: MouseEvent| filter.set(next))
    };
    let filter_class = |f: KindFilter| {
        if *filter == f {
            "px-3 py-1 rounded-full text-[11px] font-bold bg-[#173E63] text-white"
        } else {
            "px-3 py-1 rounded-full text-[11px] font-bold bg-[#f1f4f9] text-[#173E63]"
        }
    };

    let on_dismiss = {
        let finance = finance.clone();
        Callback::from(move |_: MouseEvent| finance.clear_error())
    };

    let visible: Vec<&Transaction> = match *filter {
        KindFilter::All => finance.transactions.iter().collect(),
        KindFilter::Only(kind) => of_kind(&finance.transactions, kind),
    };
    let selected_category = form.category.map(|id| id.to_string()).unwrap_or_default();

    html! {
        { page_shell(
            "Incomes & Expenses",
            html! {},
            html! {
                <>
                    if let Some(msg) = &finance.error {
                        <div class="flex items-center justify-between text-sm text-red-500">
                            <span>{ msg.clone() }</span>
                            <button class="text-[11px] font-bold" onclick={on_dismiss}>{"Dismiss"}</button>
                        </div>
                    }

                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <StatCard title="Total incomes" amount={totals.incomes} icon={StatIcon::Income} tone={Tone::Positive} />
                        <StatCard title="Total expenses" amount={totals.expenses} icon={StatIcon::Expense} tone={Tone::Negative} />
                        <StatCard title="Balance" amount={totals.balance} icon={StatIcon::Wallet} tone={Tone::of(totals.balance)} />
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-12 gap-4 items-stretch">
                        <form class={classes!(CARD_CLASS, "lg:col-span-8")} onsubmit={on_add}>
                            <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">
                                { if editing.is_some() { "Edit transaction" } else { "New transaction" } }
                            </h4>
                            <div class="grid grid-cols-2 md:grid-cols-3 gap-3 mb-4">
                                <div class="space-y-1">
                                    <label class={LABEL_CLASS}>{"Type"}</label>
                                    <select class={INPUT_CLASS} onchange={on_kind} disabled={editing.is_some()}>
                                        <option value="expense" selected={*kind == TransactionKind::Expense}>{"Expense"}</option>
                                        <option value="income" selected={*kind == TransactionKind::Income}>{"Income"}</option>
                                    </select>
                                </div>
                                <div class="space-y-1">
                                    <label class={LABEL_CLASS}>{"Title"}</label>
                                    <input type="text" class={INPUT_CLASS} value={form.title.clone()} oninput={on_title} />
                                </div>
                                <div class="space-y-1">
                                    <label class={LABEL_CLASS}>{ format!("Amount ({})", settings.currency_symbol) }</label>
                                    <input type="text" inputmode="decimal" placeholder="0,00" class={INPUT_CLASS} value={form.amount.clone()} oninput={on_amount} />
                                </div>
                                <div class="space-y-1">
                                    <label class={LABEL_CLASS}>{"Date"}</label>
                                    <input type="date" class={INPUT_CLASS} value={form.date.clone()} oninput={on_date} />
                                </div>
                                <div class="space-y-1">
                                    <label class={LABEL_CLASS}>{"Category"}</label>
                                    <select class={INPUT_CLASS} onchange={on_category}>
                                        <option value="" selected={selected_category.is_empty()}>{"Select..."}</option>
                                        { for finance.categories.iter().map(|c| {
                                            let value = c.id.to_string();
                                            let selected = value == selected_category;
                                            html! { <option {selected} {value}>{ c.name.clone() }</option> }
                                        }) }
                                    </select>
                                </div>
                                <div class="space-y-1">
                                    <label class={LABEL_CLASS}>{"Description"}</label>
                                    <input type="text" class={INPUT_CLASS} value={form.description.clone()} oninput={on_description} />
                                </div>
                            </div>
                            <div class="flex gap-3">
                                <button type="submit" class={classes!(PRIMARY_BUTTON, "flex-1")} disabled={*saving}>
                                    { icons::plus() }
                                    { match (*saving, editing.is_some()) {
                                        (true, _) => "Saving...",
                                        (false, true) => "Save",
                                        (false, false) => "Add",
                                    } }
                                </button>
                                <button type="button" onclick={on_clear} class={classes!(SECONDARY_BUTTON, "flex-1")}>{ if editing.is_some() { "Cancel" } else { "Clear" } }</button>
                            </div>
                            { form_message(&form_error, &form_success) }
                        </form>

                        <form class={classes!(CARD_CLASS, "lg:col-span-4")} onsubmit={on_add_category}>
                            <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"Categories"}</h4>
                            <div class="flex flex-wrap gap-2 mb-3">
                                { for finance.categories.iter().map(|c| html! {
                                    <span class="bg-secondary text-secondary-foreground px-2.5 py-1 rounded-md text-[10px] font-bold inline-flex items-center gap-1">
                                        { c.name.clone() }
                                        <button type="button" class="hover:text-red-600" aria-label="Remove category" onclick={on_delete_category(c.id)}>{"×"}</button>
                                    </span>
                                }) }
                            </div>
                            <div class="flex gap-2">
                                <input type="text" placeholder="New category" class={INPUT_CLASS} value={(*category_name).clone()} oninput={bind_input(&category_name)} />
                                <button type="submit" class={PRIMARY_BUTTON}>{ icons::plus() }</button>
                            </div>
                            { form_message(&category_error, &None) }
                        </form>
                    </div>

                    <div class="bg-white rounded-[10px] shadow-sm border border-white/50 overflow-hidden">
                        <div class="p-5 border-b border-border flex items-center justify-between">
                            <h3 class="font-bold text-lg text-foreground">{"History"}</h3>
                            <div class="flex gap-2">
                                <button class={filter_class(KindFilter::All)} onclick={set_filter(KindFilter::All)}>{"All"}</button>
                                <button class={filter_class(KindFilter::Only(TransactionKind::Income))} onclick={set_filter(KindFilter::Only(TransactionKind::Income))}>{"Incomes"}</button>
                                <button class={filter_class(KindFilter::Only(TransactionKind::Expense))} onclick={set_filter(KindFilter::Only(TransactionKind::Expense))}>{"Expenses"}</button>
                            </div>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Date"}</th>
                                        <th class="px-8 py-4 font-bold">{"Title"}</th>
                                        <th class="px-8 py-4 font-bold">{"Category"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Amount"}</th>
                                        <th class="px-4 py-4"></th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if finance.loading {
                                        loading_row(5, "Loading...")
                                    } else if visible.is_empty() {
                                        loading_row(5, "No transactions yet.")
                                    } else {
                                        html! {
                                            <>
                                                { for visible.iter().map(|tx| {
                                                    let (sign, amount_class) = match tx.kind {
                                                        TransactionKind::Income => ("+ ", "px-6 py-4 text-right font-semibold text-emerald-600"),
                                                        TransactionKind::Expense => ("- ", "px-6 py-4 text-right font-semibold text-red-600"),
                                                    };
                                                    html! {
                                                        <tr key={format!("{:?}-{}", tx.kind, tx.id)} class="text-sm hover:bg-muted/40 transition-colors group">
                                                            <td class="px-8 py-4 text-muted-foreground">{ format_date(tx.date) }</td>
                                                            <td class="px-8 py-4 text-foreground">
                                                                <div>{ tx.title.clone() }</div>
                                                                if !tx.description.is_empty() {
                                                                    <div class="text-xs text-muted-foreground">{ tx.description.clone() }</div>
                                                                }
                                                            </td>
                                                            <td class="px-6 py-4">
                                                                <span class="bg-secondary text-secondary-foreground px-2.5 py-1 rounded-md text-[9px] font-bold">{ tx.category.name.clone() }</span>
                                                            </td>
                                                            <td class={amount_class}>{ format!("{}{}", sign, format_currency(tx.amount, &settings)) }</td>
                                                            <td class="px-4 py-4 text-right whitespace-nowrap">
                                                                <button class="text-[11px] text-muted-foreground hover:text-[#173E63] mr-3" onclick={on_edit(*tx)}>{"Edit"}</button>
                                                                <button class="text-muted-foreground hover:text-red-600" aria-label="Delete" onclick={on_delete(tx.kind, tx.id)}>
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
                    </div>

                    <RecurringBillsPanel finance={finance.clone()} />
                </>
            }
        ) }
    }
}
