use yew::prelude::*;

use super::icons;
use crate::hooks::use_auth;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Page {
    Dashboard,
    Transactions,
    Payroll,
    Objectives,
    Profile,
    Settings,
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    pub active_page: Page,
    pub on_select: Callback<Page>,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">
                <Sidebar active_page={props.active_page} on_select={props.on_select.clone()} />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header on_select={props.on_select.clone()} />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    on_select: Callback<Page>,
}

#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    let auth = use_auth();
    let name = auth
        .as_ref()
        .and_then(|auth| auth.user.as_ref().map(|u| u.display_name()))
        .unwrap_or_default();

    let open_profile = {
        let on_select = props.on_select.clone();
        Callback::from(move |_| on_select.emit(Page::Profile))
    };

    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <div class="flex-1"></div>
            <button class="flex items-center gap-2 px-3 py-2 hover:bg-secondary rounded-full transition-colors text-sm font-semibold text-[#173E63]" onclick={open_profile}>
                { icons::user() }
                <span>{ name }</span>
            </button>
        </header>
    }
}

struct NavItem {
    label: &'static str,
    page: Page,
    icon: fn() -> Html,
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Dashboard",
        page: Page::Dashboard,
        icon: icons::layout_grid,
    },
    NavItem {
        label: "Incomes & Expenses",
        page: Page::Transactions,
        icon: icons::wallet,
    },
    NavItem {
        label: "Payroll",
        page: Page::Payroll,
        icon: icons::users,
    },
    NavItem {
        label: "Objectives",
        page: Page::Objectives,
        icon: icons::target,
    },
    NavItem {
        label: "My Data",
        page: Page::Profile,
        icon: icons::user,
    },
    NavItem {
        label: "Settings",
        page: Page::Settings,
        icon: icons::settings,
    },
];

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let auth = use_auth();
    let on_logout = Callback::from(move |_| {
        if let Some(auth) = auth.as_ref() {
            auth.logout();
        }
    });

    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-12 h-12 bg-[#173E63] rounded-full flex items-center justify-center text-white font-black">
                    {"C"}
                </div>
                <span class="text-[#173E63] text-2xl font-black tracking-tight">{"Caixa"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for NAV_ITEMS.iter().map(|item| {
                        let class_name = if item.page == props.active_page {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let on_select = props.on_select.clone();
                        let page = item.page;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>

                <div class="mt-auto pt-4">
                    <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white/10 transition-colors text-[13px] font-medium text-slate-300">
                        { icons::log_out() }
                        <span>{"Log Out"}</span>
                    </button>
                </div>
            </div>
        </div>
    }
}
