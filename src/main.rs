mod api;
mod components;
mod config;
mod error;
mod format;
mod hooks;
mod logic;
mod models;
mod pages;
mod state;
mod storage;

use yew::prelude::*;

use components::{Layout, Page};
use config::{load_settings, AppSettings};
use hooks::{use_auth_provider, AuthHandle};
use pages::{
    AuthScreen, DashboardPage, ObjectivesPage, PayrollPage, ProfilePage, SettingsPage,
    TransactionsPage,
};
use state::auth::AuthStatus;

#[function_component(App)]
fn app() -> Html {
    let auth = use_auth_provider();
    let active_page = use_state(|| Page::Dashboard);
    let settings = use_state(load_settings);
    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    // Whoever signs in next starts from the dashboard.
    {
        let active_page = active_page.clone();
        use_effect_with_deps(
            move |status: &AuthStatus| {
                if *status == AuthStatus::Unauthenticated {
                    active_page.set(Page::Dashboard);
                }
                || ()
            },
            auth.status,
        );
    }

    let body = match auth.status {
        AuthStatus::Checking => html! {
            <div class="min-h-screen flex items-center justify-center bg-background text-muted-foreground">
                {"Checking session..."}
            </div>
        },
        AuthStatus::Unauthenticated => html! { <AuthScreen /> },
        AuthStatus::Authenticated => {
            let content = match *active_page {
                Page::Dashboard => html! { <DashboardPage /> },
                Page::Transactions => html! { <TransactionsPage /> },
                Page::Payroll => html! { <PayrollPage /> },
                Page::Objectives => html! { <ObjectivesPage /> },
                Page::Profile => html! { <ProfilePage /> },
                Page::Settings => html! { <SettingsPage /> },
            };
            html! {
                <Layout active_page={*active_page} on_select={on_select}>
                    { content }
                </Layout>
            }
        }
    };

    html! {
        <ContextProvider<AuthHandle> context={auth}>
            <ContextProvider<UseStateHandle<AppSettings>> context={settings}>
                { body }
            </ContextProvider<UseStateHandle<AppSettings>>>
        </ContextProvider<AuthHandle>>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
