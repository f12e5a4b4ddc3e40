use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::components::{bind_input, form_message, page_shell, CARD_CLASS, INPUT_CLASS, LABEL_CLASS, PRIMARY_BUTTON};
use crate::hooks::use_auth;
use crate::logic::auth::{validate_password_change, validate_profile};
use crate::models::auth::User;

/// "My data": name edit and password change.
#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let auth = use_auth();
    let user = auth.as_ref().and_then(|auth| auth.user.clone());

    let email = use_state(|| user.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let first_name = use_state(|| user.as_ref().map(|u| u.first_name.clone()).unwrap_or_default());
    let last_name = use_state(|| user.as_ref().map(|u| u.last_name.clone()).unwrap_or_default());
    let joined = use_state(|| None::<String>);
    let profile_error = use_state(|| None::<String>);
    let profile_success = use_state(|| None::<String>);
    let saving_profile = use_state(|| false);

    let current_password = use_state(String::new);
    let new_password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let password_error = use_state(|| None::<String>);
    let password_success = use_state(|| None::<String>);
    let saving_password = use_state(|| false);

    {
        let email = email.clone();
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let joined = joined.clone();
        let profile_error = profile_error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match ApiClient::default().profile().await {
                        Ok(profile) => {
                            email.set(profile.email);
                            first_name.set(profile.first_name);
                            last_name.set(profile.last_name);
                            joined.set(profile.date_joined);
                        }
                        Err(err) => {
                            log::warn!("could not load profile: {}", err);
                            profile_error.set(Some(format!("Could not load your data: {}", err)));
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    let on_save_profile = {
        let auth = auth.clone();
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let profile_error = profile_error.clone();
        let profile_success = profile_success.clone();
        let saving_profile = saving_profile.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let data = match validate_profile(&first_name, &last_name) {
                Ok(d) => d,
                Err(err) => {
                    profile_error.set(Some(err.to_string()));
                    return;
                }
            };

            let auth = auth.clone();
            let profile_error = profile_error.clone();
            let profile_success = profile_success.clone();
            let saving_profile = saving_profile.clone();
            saving_profile.set(true);
            profile_error.set(None);
            profile_success.set(None);
            spawn_local(async move {
                match ApiClient::default().update_profile(&data).await {
                    Ok(profile) => {
                        if let Some(auth) = auth.as_ref() {
                            auth.user_updated(User {
                                id: profile.id,
                                email: profile.email,
                                first_name: profile.first_name,
                                last_name: profile.last_name,
                            });
                        }
                        profile_success.set(Some("Your data was updated.".to_string()));
                    }
                    Err(err) => profile_error.set(Some(err.to_string())),
                }
                saving_profile.set(false);
            });
        })
    };

    let on_change_password = {
        let current_password = current_password.clone();
        let new_password = new_password.clone();
        let confirm_password = confirm_password.clone();
        let password_error = password_error.clone();
        let password_success = password_success.clone();
        let saving_password = saving_password.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let data = match validate_password_change(
                &current_password,
                &new_password,
                &confirm_password,
            ) {
                Ok(d) => d,
                Err(err) => {
                    password_error.set(Some(err.to_string()));
                    return;
                }
            };

            let current_password = current_password.clone();
            let new_password = new_password.clone();
            let confirm_password = confirm_password.clone();
            let password_error = password_error.clone();
            let password_success = password_success.clone();
            let saving_password = saving_password.clone();
            saving_password.set(true);
            password_error.set(None);
            password_success.set(None);
            spawn_local(async move {
                match ApiClient::default().change_password(&data).await {
                    Ok(()) => {
                        current_password.set(String::new());
                        new_password.set(String::new());
                        confirm_password.set(String::new());
                        password_success.set(Some("Password changed.".to_string()));
                    }
                    Err(err) => password_error.set(Some(err.to_string())),
                }
                saving_password.set(false);
            });
        })
    };

    html! {
        { page_shell(
            "My Data",
            html! {},
            html! {
                <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                    <form class={CARD_CLASS} onsubmit={on_save_profile}>
                        <h2 class="text-[#1D617A] font-bold text-[15px] mb-4 tracking-wider">{"Personal information"}</h2>
                        <div class="space-y-3">
                            <div class="space-y-1">
                                <label class={LABEL_CLASS}>{"E-mail"}</label>
                                <input type="email" class={INPUT_CLASS} value={(*email).clone()} disabled=true />
                            </div>
                            <div class="space-y-1">
                                <label class={LABEL_CLASS}>{"First name"}</label>
                                <input type="text" class={INPUT_CLASS} value={(*first_name).clone()} oninput={bind_input(&first_name)} />
                            </div>
                            <div class="space-y-1">
                                <label class={LABEL_CLASS}>{"Last name"}</label>
                                <input type="text" class={INPUT_CLASS} value={(*last_name).clone()} oninput={bind_input(&last_name)} />
                            </div>
                            if let Some(date) = &*joined {
                                <p class="text-xs text-muted-foreground">{ format!("Member since {}", date.get(..10).unwrap_or(date.as_str())) }</p>
                            }
                        </div>
                        <div class="mt-4">
                            <button type="submit" class={PRIMARY_BUTTON} disabled={*saving_profile}>
                                { if *saving_profile { "Saving..." } else { "Save" } }
                            </button>
                        </div>
                        { form_message(&profile_error, &profile_success) }
                    </form>

                    <form class={CARD_CLASS} onsubmit={on_change_password}>
                        <h2 class="text-[#1D617A] font-bold text-[15px] mb-4 tracking-wider">{"Change password"}</h2>
                        <div class="space-y-3">
                            <div class="space-y-1">
                                <label class={LABEL_CLASS}>{"Current password"}</label>
                                <input type="password" class={INPUT_CLASS} value={(*current_password).clone()} oninput={bind_input(&current_password)} />
                            </div>
                            <div class="space-y-1">
                                <label class={LABEL_CLASS}>{"New password"}</label>
                                <input type="password" class={INPUT_CLASS} value={(*new_password).clone()} oninput={bind_input(&new_password)} />
                            </div>
                            <div class="space-y-1">
                                <label class={LABEL_CLASS}>{"Confirm new password"}</label>
                                <input type="password" class={INPUT_CLASS} value={(*confirm_password).clone()} oninput={bind_input(&confirm_password)} />
                            </div>
                        </div>
                        <div class="mt-4">
                            <button type="submit" class={PRIMARY_BUTTON} disabled={*saving_password}>
                                { if *saving_password { "Saving..." } else { "Change password" } }
                            </button>
                        </div>
                        { form_message(&password_error, &password_success) }
                    </form>
                </div>
            }
        ) }
    }
}
