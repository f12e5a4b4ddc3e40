use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{
    bind_input, bind_select, bind_textarea, form_message, icons, page_shell, use_settings,
    StatCard, StatIcon, Tone, CARD_CLASS, INPUT_CLASS, LABEL_CLASS, PRIMARY_BUTTON,
    SECONDARY_BUTTON,
};
use crate::format::{format_currency, format_date, format_percent};
use crate::hooks::{today, use_objectives, ObjectivesData};
use crate::logic::objectives::{
    days_remaining, progress_percent, remaining_amount, validate_deposit, validate_objective,
    validate_patch, validate_withdrawal, ObjectiveInput,
};
use crate::models::objective::{Objective, OBJECTIVE_CATEGORIES};

#[function_component(ObjectivesPage)]
pub fn objectives_page() -> Html {
    let data = use_objectives();
    let overview = data.overview();

    let show_completed = use_state(|| false);
    let toggle_completed = {
        let show_completed = show_completed.clone();
        Callback::from(move |_: MouseEvent| show_completed.set(!*show_completed))
    };

    let on_dismiss = {
        let data = data.clone();
        Callback::from(move |_: MouseEvent| data.clear_error())
    };

    let visible: Vec<Objective> = data
        .objectives
        .iter()
        .filter(|o| *show_completed || o.is_active())
        .cloned()
        .collect();

    let progress_hint = Some(AttrValue::from(format!(
        "{} of all targets",
        format_percent(overview.overall_progress())
    )));

    html! {
        { page_shell(
            "Objectives",
            html! {
                <button class={SECONDARY_BUTTON} onclick={toggle_completed}>
                    { if *show_completed { "Hide completed" } else { "Show completed" } }
                </button>
            },
            html! {
                <>
                    if let Some(msg) = &data.error {
                        <div class="flex items-center justify-between text-sm text-red-500">
                            <span>{ msg.clone() }</span>
                            <button class="text-[11px] font-bold" onclick={on_dismiss}>{"Dismiss"}</button>
                        </div>
                    }

                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <StatCard title="Invested" amount={overview.total_invested} icon={StatIcon::Target} tone={Tone::Positive} hint={progress_hint} />
                        <StatCard title="Active targets" amount={overview.total_targets} icon={StatIcon::Wallet}
                            hint={Some(AttrValue::from(format!("{} active", overview.active_count)))} />
                        <StatCard title="Left to save" amount={remaining_amount(overview.total_invested, overview.total_targets)} icon={StatIcon::Income}
                            hint={Some(AttrValue::from(format!("{} completed", overview.completed_count)))} />
                    </div>

                    <NewObjectiveForm data={data.clone()} />

                    if data.loading && data.objectives.is_empty() {
                        <p class="text-sm text-muted-foreground">{"Loading..."}</p>
                    } else if visible.is_empty() {
                        <p class="text-sm text-muted-foreground">{"No objectives yet."}</p>
                    } else {
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            { for visible.into_iter().map(|objective| {
                                let key = objective.slug.clone();
                                html! { <ObjectiveCard key={key} objective={objective} data={data.clone()} /> }
                            }) }
                        </div>
                    }
                </>
            }
        ) }
    }
}

#[derive(Properties, PartialEq)]
struct NewObjectiveProps {
    data: ObjectivesData,
}

#[function_component(NewObjectiveForm)]
fn new_objective_form(props: &NewObjectiveProps) -> Html {
    let settings = use_settings();
    let title = use_state(String::new);
    let description = use_state(String::new);
    let target = use_state(String::new);
    let initial = use_state(String::new);
    let deadline = use_state(String::new);
    let category = use_state(|| OBJECTIVE_CATEGORIES[0].0.to_string());
    let error = use_state(|| None::<String>);
    let success = use_state(|| None::<String>);

    let on_submit = {
        let data = props.data.clone();
        let title = title.clone();
        let description = description.clone();
        let target = target.clone();
        let initial = initial.clone();
        let deadline = deadline.clone();
        let category = category.clone();
        let error = error.clone();
        let success = success.clone();
        let settings = settings.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let new_objective = match validate_objective(
                ObjectiveInput {
                    title: &title,
                    description: &description,
                    target: &target,
                    initial: &initial,
                    deadline: &deadline,
                    category: &category,
                },
                &settings,
            ) {
                Ok(objective) => objective,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    success.set(None);
                    return;
                }
            };
            let data = data.clone();
            let title = title.clone();
            let description = description.clone();
            let target = target.clone();
            let initial = initial.clone();
            let deadline = deadline.clone();
            let error = error.clone();
            let success = success.clone();
            error.set(None);
            spawn_local(async move {
                match data.create(new_objective).await {
                    Ok(()) => {
                        title.set(String::new());
                        description.set(String::new());
                        target.set(String::new());
                        initial.set(String::new());
                        deadline.set(String::new());
                        success.set(Some("Objective created.".to_string()));
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    html! {
        <form class={CARD_CLASS} onsubmit={on_submit}>
            <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"New objective"}</h4>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-3 mb-3">
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Title"}</label>
                    <input type="text" class={INPUT_CLASS} value={(*title).clone()} oninput={bind_input(&title)} />
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Target"}</label>
                    <input type="text" inputmode="decimal" class={INPUT_CLASS} value={(*target).clone()} oninput={bind_input(&target)} />
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Already saved"}</label>
                    <input type="text" inputmode="decimal" placeholder="0,00" class={INPUT_CLASS} value={(*initial).clone()} oninput={bind_input(&initial)} />
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Deadline"}</label>
                    <input type="date" class={INPUT_CLASS} value={(*deadline).clone()} oninput={bind_input(&deadline)} />
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Category"}</label>
                    <select class={INPUT_CLASS} onchange={bind_select(&category)}>
                        { for OBJECTIVE_CATEGORIES.iter().map(|(slug, label)| html! {
                            <option value={*slug} selected={*slug == category.as_str()}>{ *label }</option>
                        }) }
                    </select>
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Description"}</label>
                    <textarea rows="1" class={INPUT_CLASS} value={(*description).clone()} oninput={bind_textarea(&description)} />
                </div>
            </div>
            <button type="submit" class={PRIMARY_BUTTON}>
                { icons::plus() }
                {"Create"}
            </button>
            { form_message(&error, &success) }
        </form>
    }
}

#[derive(Clone, Copy, PartialEq)]
enum CardMode {
    Idle,
    Deposit,
    Withdraw,
    Edit,
}

#[derive(Properties, PartialEq)]
struct ObjectiveCardProps {
    objective: Objective,
    data: ObjectivesData,
}

#[function_component(ObjectiveCard)]
fn objective_card(props: &ObjectiveCardProps) -> Html {
    let settings = use_settings();
    let objective = &props.objective;

    let mode = use_state(|| CardMode::Idle);
    let amount = use_state(String::new);
    let note = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let open = {
        let mode = mode.clone();
        let amount = amount.clone();
        let note = note.clone();
        let error = error.clone();
        move |next: CardMode| {
            let mode = mode.clone();
            let amount = amount.clone();
            let note = note.clone();
            let error = error.clone();
            Callback::from(move |_: MouseEvent| {
                amount.set(String::new());
                note.set(String::new());
                error.set(None);
                mode.set(if *mode == next { CardMode::Idle } else { next });
            })
        }
    };

    let on_submit = {
        let data = props.data.clone();
        let slug = objective.slug.clone();
        let available = objective.current_value;
        let mode = mode.clone();
        let amount = amount.clone();
        let note = note.clone();
        let error = error.clone();
        let busy = busy.clone();
        let settings = settings.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let current = *mode;
            let data = data.clone();
            let slug = slug.clone();
            let mode = mode.clone();
            let error = error.clone();
            let busy = busy.clone();
            // `amount` holds the new target and `note` the new deadline in edit mode.
            let request = match current {
                CardMode::Idle => return,
                CardMode::Deposit => {
                    validate_deposit(&amount, &note, &settings).map(|m| (Some(m), None))
                }
                CardMode::Withdraw => validate_withdrawal(&amount, &note, available, &settings)
                    .map(|m| (Some(m), None)),
                CardMode::Edit => {
                    validate_patch(&amount, &note, &settings).map(|p| (None, Some(p)))
                }
            };
            let (movement, patch) = match request {
                Ok(parts) => parts,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };
            busy.set(true);
            spawn_local(async move {
                let result = match (current, movement, patch) {
                    (CardMode::Deposit, Some(m), _) => data.deposit(&slug, m).await,
                    (CardMode::Withdraw, Some(m), _) => data.withdraw(&slug, m).await,
                    (_, _, Some(p)) => data.update(&slug, p).await,
                    _ => Ok(()),
                };
                busy.set(false);
                match result {
                    Ok(()) => mode.set(CardMode::Idle),
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_delete = {
        let data = props.data.clone();
        let slug = objective.slug.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let data = data.clone();
            let slug = slug.clone();
            let error = error.clone();
            spawn_local(async move {
                if let Err(err) = data.delete(&slug).await {
                    error.set(Some(format!("Could not delete: {}", err)));
                }
            });
        })
    };

    let progress = progress_percent(objective.current_value, objective.target_value);
    let remaining = remaining_amount(objective.current_value, objective.target_value);
    let deadline_text = objective.deadline.map(|deadline| {
        let days = days_remaining(deadline, today());
        match days {
            d if d < 0 => format!("{} (overdue by {} days)", format_date(deadline), -d),
            0 => format!("{} (today)", format_date(deadline)),
            d => format!("{} ({} days left)", format_date(deadline), d),
        }
    });

    let (amount_label, note_label, note_type, submit_label) = match *mode {
        CardMode::Withdraw => ("Amount", "Reason", "text", "Withdraw"),
        CardMode::Edit => ("New target", "New deadline", "date", "Save"),
        _ => ("Amount", "Description", "text", "Deposit"),
    };

    html! {
        <div class={CARD_CLASS}>
            <div class="flex items-start justify-between mb-2">
                <div>
                    <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider">{ objective.title.clone() }</h4>
                    <span class="bg-secondary text-secondary-foreground px-2.5 py-1 rounded-md text-[9px] font-bold">{ objective.display_category().to_string() }</span>
                    if !objective.is_active() {
                        <span class="ml-2 bg-emerald-50 text-emerald-700 px-2.5 py-1 rounded-md text-[9px] font-bold">{"Completed"}</span>
                    }
                </div>
                <button class="text-muted-foreground hover:text-red-600" aria-label="Delete" onclick={on_delete}>
                    { icons::trash() }
                </button>
            </div>
            if !objective.description.is_empty() {
                <p class="text-sm text-muted-foreground mb-2">{ objective.description.clone() }</p>
            }
            <div class="flex justify-between text-sm mb-1">
                <span class="font-semibold">{ format_currency(objective.current_value, &settings) }</span>
                <span class="text-muted-foreground">{ format!("of {}", format_currency(objective.target_value, &settings)) }</span>
            </div>
            <div class="w-full h-2 bg-muted rounded-full overflow-hidden">
                <div class="h-full bg-[#1D617A]" style={format!("width: {:.1}%", progress)}></div>
            </div>
            <div class="flex justify-between text-[11px] text-muted-foreground mt-1">
                <span>{ format_percent(progress) }</span>
                <span>{ format!("{} to go", format_currency(remaining, &settings)) }</span>
            </div>
            if let Some(text) = deadline_text {
                <p class="text-[11px] text-muted-foreground mt-1">{ format!("Deadline: {}", text) }</p>
            }

            <div class="flex gap-2 mt-4">
                <button class={SECONDARY_BUTTON} onclick={open(CardMode::Deposit)}>{"Deposit"}</button>
                <button class={SECONDARY_BUTTON} onclick={open(CardMode::Withdraw)} disabled={objective.current_value <= 0.0}>{"Withdraw"}</button>
                <button class={SECONDARY_BUTTON} onclick={open(CardMode::Edit)}>{"Edit"}</button>
            </div>

            if *mode != CardMode::Idle {
                <form class="mt-3 grid grid-cols-1 md:grid-cols-3 gap-2 items-end" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{ amount_label }</label>
                        <input type="text" inputmode="decimal" class={INPUT_CLASS} value={(*amount).clone()} oninput={bind_input(&amount)} />
                    </div>
                    <div class="space-y-1">
                        <label class={LABEL_CLASS}>{ note_label }</label>
                        <input type={note_type} class={INPUT_CLASS} value={(*note).clone()} oninput={bind_input(&note)} />
                    </div>
                    <button type="submit" class={PRIMARY_BUTTON} disabled={*busy}>{ submit_label }</button>
                </form>
            }
            { form_message(&error, &None) }
        </div>
    }
}
