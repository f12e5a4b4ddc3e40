mod auth;
mod dashboard;
mod finance;
mod objectives;
mod payroll;
mod recurring;

pub use auth::{use_auth, use_auth_provider, AuthHandle};
pub use dashboard::use_dashboard;
pub use finance::{use_finance_data, FinanceData};
pub use objectives::{use_objectives, ObjectivesData};
pub use payroll::{use_payroll_data, PayrollData};
pub use recurring::use_recurring_period;

use chrono::NaiveDate;

use crate::error::ApiError;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn now_epoch_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Logs a failed request, ends the session on 401 and returns the text shown
/// to the user.
fn report(auth: Option<&AuthHandle>, what: &str, err: &ApiError) -> String {
    log::error!("{}: {}", what, err);
    end_session_on_401(err, || expire(auth));
    format!("{}: {}", what, err)
}

/// Mutations hand their error back to the page; a rejected token still signs
/// the user out.
fn expire_on_unauthorized(auth: Option<&AuthHandle>, err: ApiError) -> ApiError {
    if end_session_on_401(&err, || expire(auth)) {
        log::warn!("session rejected during a change: {}", err);
    }
    err
}

fn expire(auth: Option<&AuthHandle>) {
    if let Some(auth) = auth {
        auth.session_expired();
    }
}

fn end_session_on_401(err: &ApiError, end_session: impl FnOnce()) -> bool {
    let unauthorized = err.is_unauthorized();
    if unauthorized {
        end_session();
    }
    unauthorized
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn only_401_ends_the_session() {
        let ended = Cell::new(0);
        let expired =
            ApiError::from_response(401, "Unauthorized", r#"{"detail": "Token expired"}"#);
        assert!(end_session_on_401(&expired, || ended.set(ended.get() + 1)));
        assert_eq!(ended.get(), 1);

        let forbidden = ApiError::from_response(403, "Forbidden", "");
        assert!(!end_session_on_401(&forbidden, || ended.set(ended.get() + 1)));
        let offline = ApiError::Network("offline".into());
        assert!(!end_session_on_401(&offline, || ended.set(ended.get() + 1)));
        assert_eq!(ended.get(), 1);
    }

    #[test]
    fn rejected_change_keeps_its_error() {
        let err = ApiError::from_response(401, "", r#"{"detail": "Invalid token."}"#);
        let returned = expire_on_unauthorized(None, err.clone());
        assert_eq!(returned, err);
        assert_eq!(returned.to_string(), "Invalid token.");
    }
}
