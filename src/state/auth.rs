use std::rc::Rc;

use yew::Reducible;

use crate::models::auth::User;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    Checking,
    Authenticated,
    Unauthenticated,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub status: AuthStatus,
    pub user: Option<User>,
    pub error: Option<String>,
    /// A login/logout request is in flight.
    pub busy: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            status: AuthStatus::Checking,
            user: None,
            error: None,
            busy: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AuthAction {
    Started,
    SignedIn(User),
    SignedOut,
    Failed(String),
    ClearError,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }
}

impl Reducible for AuthState {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AuthAction::Started => {
                next.busy = true;
                next.error = None;
            }
            AuthAction::SignedIn(user) => {
                next.busy = false;
                next.status = AuthStatus::Authenticated;
                next.user = Some(user);
            }
            AuthAction::SignedOut => {
                next.busy = false;
                next.status = AuthStatus::Unauthenticated;
                next.user = None;
            }
            AuthAction::Failed(message) => {
                next.busy = false;
                next.status = AuthStatus::Unauthenticated;
                next.user = None;
                next.error = Some(message);
            }
            AuthAction::ClearError => next.error = None,
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            email: "ana@example.com".into(),
            first_name: "Ana".into(),
            last_name: String::new(),
        }
    }

    #[test]
    fn starts_checking() {
        assert_eq!(AuthState::default().status, AuthStatus::Checking);
    }

    #[test]
    fn sign_in_then_out() {
        let state = Rc::new(AuthState::default())
            .reduce(AuthAction::Started)
            .reduce(AuthAction::SignedIn(user()));
        assert!(state.is_authenticated());
        assert!(!state.busy);

        let state = state.reduce(AuthAction::SignedOut);
        assert_eq!(state.status, AuthStatus::Unauthenticated);
        assert!(state.user.is_none());
    }

    #[test]
    fn failure_keeps_message() {
        let state = Rc::new(AuthState::default())
            .reduce(AuthAction::Started)
            .reduce(AuthAction::Failed("Unable to log in".into()));
        assert_eq!(state.status, AuthStatus::Unauthenticated);
        assert_eq!(state.error.as_deref(), Some("Unable to log in"));
        let state = state.reduce(AuthAction::Started);
        assert_eq!(state.error, None);
    }
}
