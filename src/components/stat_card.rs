use yew::prelude::*;

use super::{icons, use_settings};
use crate::format::format_currency;

#[derive(Clone, Copy, PartialEq)]
pub enum StatIcon {
    Income,
    Expense,
    Wallet,
    Target,
    Bills,
    Team,
}

#[derive(Clone, Copy, PartialEq)]
pub enum Tone {
    Neutral,
    Positive,
    Negative,
}

impl Tone {
    pub fn of(amount: f64) -> Self {
        if amount < 0.0 {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }

    fn class(self) -> &'static str {
        match self {
            Tone::Neutral => "text-2xl font-bold text-[#1D617A] tracking-tight",
            Tone::Positive => "text-2xl font-bold text-emerald-600 tracking-tight",
            Tone::Negative => "text-2xl font-bold text-red-600 tracking-tight",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub amount: f64,
    pub icon: StatIcon,
    #[prop_or(Tone::Neutral)]
    pub tone: Tone,
    /// Small print under the amount, e.g. a count.
    #[prop_or_default]
    pub hint: Option<AttrValue>,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let settings = use_settings();

    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest uppercase">{ props.title.clone() }</p>
                <h3 class={props.tone.class()}>{ format_currency(props.amount, &settings) }</h3>
                if let Some(hint) = &props.hint {
                    <p class="text-xs text-muted-foreground mt-1">{ hint.clone() }</p>
                }
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                {
                    match props.icon {
                        StatIcon::Income => icons::trending_up(),
                        StatIcon::Expense => icons::trending_down(),
                        StatIcon::Wallet => icons::wallet(),
                        StatIcon::Target => icons::target(),
                        StatIcon::Bills => icons::credit_card(),
                        StatIcon::Team => icons::users(),
                    }
                }
            </div>
        </div>
    }
}
