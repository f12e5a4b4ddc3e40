use yew::prelude::*;

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}

pub fn wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}

pub fn trending_up() -> Html {
    icon_base("M3 17l6-6 4 4 7-7")
}

pub fn trending_down() -> Html {
    icon_base("M3 7l6 6 4-4 7 7")
}

pub fn credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}

pub fn target() -> Html {
    icon_base("M12 12m-9 0a9 9 0 1018 0 9 9 0 10-18 0")
}

pub fn users() -> Html {
    icon_base("M17 21v-2a4 4 0 00-4-4H5a4 4 0 00-4 4v2M9 11a4 4 0 100-8 4 4 0 000 8zM23 21v-2a4 4 0 00-3-3.87")
}

pub fn user() -> Html {
    icon_base("M20 21v-2a4 4 0 00-4-4H8a4 4 0 00-4 4v2M12 11a4 4 0 100-8 4 4 0 000 8z")
}

pub fn settings() -> Html {
    icon_base("M12 1v3M12 20v3M4.2 4.2l2.1 2.1M17.7 17.7l2.1 2.1M1 12h3M20 12h3M4.2 19.8l2.1-2.1M17.7 6.3l2.1-2.1")
}

pub fn log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}

pub fn plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}

pub fn trash() -> Html {
    icon_base("M3 6h18M8 6V4h8v2M19 6l-1 14H6L5 6")
}

pub fn check() -> Html {
    icon_base("M20 6L9 17l-5-5")
}

pub fn chevron_left() -> Html {
    icon_base("M15 18l-6-6 6-6")
}

pub fn chevron_right() -> Html {
    icon_base("M9 18l6-6-6-6")
}
