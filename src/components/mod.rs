pub mod icons;
pub mod layout;
pub mod stat_card;

pub use layout::{Layout, Page};
pub use stat_card::{StatCard, StatIcon, Tone};

use yew::prelude::*;

use crate::config::AppSettings;

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

/// Currency preferences from the context `App` provides.
#[hook]
pub fn use_settings() -> AppSettings {
    use_context::<UseStateHandle<AppSettings>>()
        .map(|settings| (*settings).clone())
        .unwrap_or_default()
}

/// Mirrors a text input into a string state.
pub fn bind_input(target: &UseStateHandle<String>) -> Callback<InputEvent> {
    let target = target.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        target.set(input.value());
    })
}

pub fn bind_textarea(target: &UseStateHandle<String>) -> Callback<InputEvent> {
    let target = target.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
        target.set(input.value());
    })
}

pub fn bind_select(target: &UseStateHandle<String>) -> Callback<Event> {
    let target = target.clone();
    Callback::from(move |e: Event| {
        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
        target.set(input.value());
    })
}

pub fn form_message(error: &Option<String>, success: &Option<String>) -> Html {
    html! {
        <>
            if let Some(msg) = error {
                <p class="text-sm text-red-500 mt-3">{ msg.clone() }</p>
            }
            if let Some(msg) = success {
                <p class="text-sm text-emerald-600 mt-3">{ msg.clone() }</p>
            }
        </>
    }
}

pub fn loading_row(colspan: usize, text: &'static str) -> Html {
    html! {
        <tr><td colspan={colspan.to_string()} class="px-8 py-6 text-center text-muted-foreground">{ text }</td></tr>
    }
}

pub const INPUT_CLASS: &str =
    "w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[12px] text-[#173E63] border-none";
pub const LABEL_CLASS: &str = "text-[12px] font-bold text-muted-foreground";
pub const PRIMARY_BUTTON: &str =
    "bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-[11px] font-bold flex items-center justify-center gap-2 disabled:opacity-60";
pub const SECONDARY_BUTTON: &str =
    "bg-[#B2CBDE] text-[#173E63] px-4 py-2 rounded-[10px] text-[11px] font-bold flex items-center justify-center gap-2";
pub const CARD_CLASS: &str = "bg-white p-5 rounded-[10px] shadow-sm border border-white/50";
