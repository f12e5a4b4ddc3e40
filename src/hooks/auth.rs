use std::ops::Deref;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::now_epoch_secs;
use crate::api::{ApiClient, ApiResult};
use crate::logic::auth::jwt_expired;
use crate::models::auth::{LoginCredentials, RegisterCredentials, User};
use crate::state::auth::{AuthAction, AuthState};
use crate::storage;

#[derive(Clone, PartialEq)]
pub struct AuthHandle {
    state: UseReducerHandle<AuthState>,
    client: ApiClient,
}

impl Deref for AuthHandle {
    type Target = AuthState;

    fn deref(&self) -> &AuthState {
        &self.state
    }
}

/// Resolves the stored token into a user. An expired JWT is refreshed once
/// when a refresh token is around.
async fn restore_session(client: &ApiClient) -> Option<User> {
    let token = storage::access_token()?;

    if jwt_expired(&token, now_epoch_secs()) {
        let Some(refresh) = storage::refresh_token() else {
            log::info!("access token expired, no refresh token stored");
            storage::clear_tokens();
            return None;
        };
        match client.refresh_token(&refresh).await {
            Ok(fresh) => storage::store_tokens(Some(&fresh.access), None),
            Err(err) => {
                log::info!("token refresh rejected: {}", err);
                storage::clear_tokens();
                return None;
            }
        }
    }

    match client.current_user().await {
        Ok(user) => Some(user),
        Err(err) => {
            log::warn!("could not restore session: {}", err);
            if err.is_unauthorized() {
                storage::clear_tokens();
            }
            None
        }
    }
}

impl AuthHandle {
    async fn sign_in(&self, credentials: &LoginCredentials) -> ApiResult<User> {
        let tokens = self.client.login(credentials).await?;
        storage::store_tokens(tokens.access.as_deref(), tokens.refresh.as_deref());
        // token-auth backends do not embed the user in the login answer
        match tokens.user {
            Some(user) => Ok(user),
            None => self.client.current_user().await,
        }
    }

    pub async fn login(&self, credentials: LoginCredentials) -> ApiResult<()> {
        self.state.dispatch(AuthAction::Started);
        match self.sign_in(&credentials).await {
            Ok(user) => {
                log::info!("signed in as {}", user.email);
                self.state.dispatch(AuthAction::SignedIn(user));
                Ok(())
            }
            Err(err) => {
                storage::clear_tokens();
                self.state.dispatch(AuthAction::SignedOut);
                Err(err)
            }
        }
    }

    /// Returns true when the backend signed the new account in right away.
    pub async fn register(&self, data: RegisterCredentials) -> ApiResult<bool> {
        let created = self.client.register(&data).await?;
        let access = created.access.or(created.key);
        let Some(access) = access else {
            return Ok(false);
        };

        storage::store_tokens(Some(&access), created.refresh.as_deref());
        match self.client.current_user().await {
            Ok(user) => {
                self.state.dispatch(AuthAction::SignedIn(user));
                Ok(true)
            }
            Err(err) => {
                log::warn!("registered but could not load the new user: {}", err);
                storage::clear_tokens();
                Ok(false)
            }
        }
    }

    pub fn logout(&self) {
        let this = self.clone();
        self.state.dispatch(AuthAction::Started);
        spawn_local(async move {
            this.client.logout().await;
            storage::clear_tokens();
            this.state.dispatch(AuthAction::SignedOut);
        });
    }

    pub fn session_expired(&self) {
        if !self.is_authenticated() {
            return;
        }
        storage::clear_tokens();
        self.state.dispatch(AuthAction::Failed(
            "Your session has expired. Please sign in again.".to_string(),
        ));
    }

    pub fn user_updated(&self, user: User) {
        self.state.dispatch(AuthAction::SignedIn(user));
    }

    pub fn clear_error(&self) {
        self.state.dispatch(AuthAction::ClearError);
    }
}

/// Owns the session. Mounted once by `App`, which hands it down as context.
#[hook]
pub fn use_auth_provider() -> AuthHandle {
    let state = use_reducer(AuthState::default);
    let handle = AuthHandle {
        state,
        client: ApiClient::default(),
    };

    {
        let handle = handle.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match restore_session(&handle.client).await {
                        Some(user) => handle.state.dispatch(AuthAction::SignedIn(user)),
                        None => handle.state.dispatch(AuthAction::SignedOut),
                    }
                });
                || ()
            },
            (),
        );
    }

    handle
}

#[hook]
pub fn use_auth() -> Option<AuthHandle> {
    use_context::<AuthHandle>()
}
