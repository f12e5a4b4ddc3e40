use yew::prelude::*;

use crate::components::{page_shell, CARD_CLASS};
use crate::config::{save_settings, AppSettings, CURRENCIES};
use crate::format::format_currency;

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();

    let current = settings
        .as_ref()
        .map(|s| (**s).clone())
        .unwrap_or_default();

    let on_currency_change = {
        let settings = settings.clone();
        Callback::from(move |e: Event| {
            if let Some(settings) = settings.as_ref() {
                let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                let next = AppSettings::for_currency(&input.value());
                log::info!("currency set to {}", next.currency_code);
                save_settings(&next);
                settings.set(next);
            }
        })
    };

    html! {
        { page_shell(
            "Settings",
            html! {},
            html! {
                <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                    <div class={CARD_CLASS}>
                        <h2 class="text-xl font-bold text-foreground mb-6">{"Preferences"}</h2>
                        <div>
                            <label class="block text-sm font-medium text-foreground mb-2">{"Currency"}</label>
                            <select onchange={on_currency_change} class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary">
                                { for CURRENCIES.iter().map(|(code, label)| html! {
                                    <option value={*code} selected={*code == current.currency_code}>{ *label }</option>
                                }) }
                            </select>
                            <p class="text-xs text-muted-foreground mt-2">
                                { format!("Amounts are shown as {}.", format_currency(1234.5, &current)) }
                            </p>
                        </div>
                    </div>
                </div>
            }
        ) }
    }
}
