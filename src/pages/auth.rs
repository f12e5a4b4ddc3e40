use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::components::bind_input;
use crate::hooks::use_auth;
use crate::logic::auth::{validate_login, validate_registration, validate_reset_email};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AuthMode {
    Login,
    Register,
    ResetPassword,
}

impl AuthMode {
    fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Welcome back",
            AuthMode::Register => "Create account",
            AuthMode::ResetPassword => "Reset password",
        }
    }

    fn subtitle(self) -> &'static str {
        match self {
            AuthMode::Login => "Sign in to continue.",
            AuthMode::Register => "Start managing your finances.",
            AuthMode::ResetPassword => "We will e-mail you a link to choose a new password.",
        }
    }

    fn submit_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Register => "Sign up",
            AuthMode::ResetPassword => "Send link",
        }
    }
}

const FIELD_CLASS: &str = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";

/// Public screen shown while nobody is signed in.
#[function_component(AuthScreen)]
pub fn auth_screen() -> Html {
    let auth = use_auth();
    let mode = use_state(|| AuthMode::Login);
    let full_name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let session_message = auth.as_ref().and_then(|auth| auth.error.clone());

    let switch_to = {
        let mode = mode.clone();
        let error = error.clone();
        let notice = notice.clone();
        let auth = auth.clone();
        move |next: AuthMode| {
            let mode = mode.clone();
            let error = error.clone();
            let notice = notice.clone();
            let auth = auth.clone();
            Callback::from(move |_: MouseEvent| {
                error.set(None);
                notice.set(None);
                if let Some(auth) = auth.as_ref() {
                    auth.clear_error();
                }
                mode.set(next);
            })
        }
    };

    let on_submit = {
        let mode = mode.clone();
        let full_name = full_name.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let error = error.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        let auth = auth.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(auth) = auth.clone() else {
                return;
            };

            let current = *mode;
            let error = error.clone();
            let notice = notice.clone();
            let loading = loading.clone();
            let mode = mode.clone();
            let password = password.clone();
            let confirm_password = confirm_password.clone();

            match current {
                AuthMode::Login => {
                    let credentials = match validate_login(&email, &password) {
                        Ok(c) => c,
                        Err(err) => {
                            error.set(Some(err.to_string()));
                            return;
                        }
                    };
                    loading.set(true);
                    error.set(None);
                    spawn_local(async move {
                        if let Err(err) = auth.login(credentials).await {
                            error.set(Some(err.to_string()));
                        }
                        loading.set(false);
                    });
                }
                AuthMode::Register => {
                    let data = match validate_registration(
                        &full_name,
                        &email,
                        &password,
                        &confirm_password,
                    ) {
                        Ok(d) => d,
                        Err(err) => {
                            error.set(Some(err.to_string()));
                            return;
                        }
                    };
                    loading.set(true);
                    error.set(None);
                    spawn_local(async move {
                        match auth.register(data).await {
                            Ok(true) => {}
                            Ok(false) => {
                                password.set(String::new());
                                confirm_password.set(String::new());
                                notice.set(Some(
                                    "Account created. Check your e-mail, then sign in.".to_string(),
                                ));
                                mode.set(AuthMode::Login);
                            }
                            Err(err) => error.set(Some(err.to_string())),
                        }
                        loading.set(false);
                    });
                }
                AuthMode::ResetPassword => {
                    let address = match validate_reset_email(&email) {
                        Ok(a) => a,
                        Err(err) => {
                            error.set(Some(err.to_string()));
                            return;
                        }
                    };
                    loading.set(true);
                    error.set(None);
                    spawn_local(async move {
                        match ApiClient::default().request_password_reset(&address).await {
                            Ok(()) => notice.set(Some(format!(
                                "If an account exists for {}, a reset link is on its way.",
                                address
                            ))),
                            Err(err) => {
                                log::warn!("password reset request failed: {}", err);
                                error.set(Some(err.to_string()));
                            }
                        }
                        loading.set(false);
                    });
                }
            }
        })
    };

    let current = *mode;

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{ current.title() }</h1>
                    <p class="text-sm text-muted-foreground mt-2">{ current.subtitle() }</p>
                </div>

                if let Some(msg) = &session_message {
                    <div class="mb-4 text-sm text-amber-700 bg-amber-50 rounded-lg px-3 py-2">{ msg.clone() }</div>
                }

                <form class="space-y-4" onsubmit={on_submit}>
                    if current == AuthMode::Register {
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Full name"}</label>
                            <input type="text" class={FIELD_CLASS} value={(*full_name).clone()} oninput={bind_input(&full_name)} />
                        </div>
                    }
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Email"}</label>
                        <input type="email" class={FIELD_CLASS} value={(*email).clone()} oninput={bind_input(&email)} />
                    </div>
                    if current != AuthMode::ResetPassword {
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Password"}</label>
                            <input type="password" class={FIELD_CLASS} value={(*password).clone()} oninput={bind_input(&password)} />
                        </div>
                    }
                    if current == AuthMode::Register {
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Confirm Password"}</label>
                            <input type="password" class={FIELD_CLASS} value={(*confirm_password).clone()} oninput={bind_input(&confirm_password)} />
                        </div>
                    }

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }
                    if let Some(msg) = &*notice {
                        <div class="text-sm text-emerald-600">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else { current.submit_label() } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground space-y-2">
                    if current == AuthMode::Login {
                        <>
                            <div>
                                {"No account?"}
                                <button class="ml-2 text-primary font-semibold" onclick={switch_to(AuthMode::Register)}>{"Sign up"}</button>
                            </div>
                            <div>
                                <button class="text-primary font-semibold" onclick={switch_to(AuthMode::ResetPassword)}>{"Forgot your password?"}</button>
                            </div>
                        </>
                    } else {
                        <div>
                            {"Already have an account?"}
                            <button class="ml-2 text-primary font-semibold" onclick={switch_to(AuthMode::Login)}>{"Login"}</button>
                        </div>
                    }
                </div>
            </div>
        </div>
    }
}
