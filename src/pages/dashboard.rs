use chrono::Datelike;
use yew::prelude::*;

use crate::components::{loading_row, page_shell, use_settings, StatCard, StatIcon, Tone, CARD_CLASS};
use crate::format::{format_date, format_signed, month_name};
use crate::hooks::{use_dashboard, today};
use crate::models::finance::TransactionKind;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let data = use_dashboard();
    let settings = use_settings();
    let summary = &data.summary;
    let month = month_name(today().month());

    let failed = if data.failed_months.is_empty() {
        None
    } else {
        let names: Vec<&str> = data.failed_months.iter().map(|m| month_name(*m)).collect();
        Some(format!(
            "Bill payments for {} could not be loaded and are left out of the balance.",
            names.join(", ")
        ))
    };

    html! {
        { page_shell(
            "Dashboard",
            html! {},
            html! {
                <>
                    if let Some(msg) = &data.error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }
                    if let Some(msg) = &failed {
                        <div class="text-sm text-amber-700">{ msg.clone() }</div>
                    }

                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
                        <StatCard title="Balance" amount={summary.balance} icon={StatIcon::Wallet} tone={Tone::of(summary.balance)} />
                        <StatCard title={format!("Incomes in {}", month)} amount={summary.month_incomes} icon={StatIcon::Income} tone={Tone::Positive} />
                        <StatCard title={format!("Expenses in {}", month)} amount={summary.month_expenses} icon={StatIcon::Expense} tone={Tone::Negative} />
                        <StatCard
                            title="Invested in objectives"
                            amount={summary.invested}
                            icon={StatIcon::Target}
                            hint={Some(AttrValue::from(format!("{} active, {} completed", summary.active_objectives, summary.completed_objectives)))}
                        />
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
                        <StatCard title="Recurring bills paid this year" amount={summary.recurring_paid} icon={StatIcon::Bills} />
                    </div>

                    <div class="bg-white rounded-[10px] shadow-sm border border-white/50 overflow-hidden">
                        <div class="p-5 border-b border-border">
                            <h3 class="font-bold text-lg text-foreground">{"Recent transactions"}</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Date"}</th>
                                        <th class="px-8 py-4 font-bold">{"Title"}</th>
                                        <th class="px-8 py-4 font-bold">{"Category"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Amount"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if data.loading && summary.recent.is_empty() {
                                        loading_row(4, "Loading...")
                                    } else if summary.recent.is_empty() {
                                        loading_row(4, "No transactions yet.")
                                    } else {
                                        html! {
                                            <>
                                                { for summary.recent.iter().map(|tx| {
                                                    let amount_class = match tx.kind {
                                                        TransactionKind::Income => "px-6 py-4 text-right font-semibold text-emerald-600",
                                                        TransactionKind::Expense => "px-6 py-4 text-right font-semibold text-red-600",
                                                    };
                                                    html! {
                                                        <tr key={format!("{:?}-{}", tx.kind, tx.id)} class="text-sm hover:bg-muted/40 transition-colors">
                                                            <td class="px-8 py-4 text-muted-foreground">{ format_date(tx.date) }</td>
                                                            <td class="px-8 py-4 text-foreground">{ tx.title.clone() }</td>
                                                            <td class="px-6 py-4">
                                                                <span class="bg-secondary text-secondary-foreground px-2.5 py-1 rounded-md text-[9px] font-bold">{ tx.category.clone() }</span>
                                                            </td>
                                                            <td class={amount_class}>{ format_signed(tx.amount, &settings) }</td>
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

                    if data.loading {
                        <p class={format!("{} text-sm text-muted-foreground", CARD_CLASS)}>{"Refreshing figures..."}</p>
                    }
                </>
            }
        ) }
    }
}
