use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

use crate::error::FormError;
use crate::models::auth::{ChangePassword, LoginCredentials, RegisterCredentials, UpdateProfile};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Three non-empty dot separated segments.
pub fn is_jwt(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    parts.len() == 3 && parts.iter().all(|p| !p.is_empty())
}

fn jwt_exp(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?;
    exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))
}

/// Opaque tokens, tokens without `exp` and undecodable ones are left for the
/// backend to reject.
pub fn jwt_expired(token: &str, now_epoch_secs: i64) -> bool {
    if !is_jwt(token) {
        return false;
    }
    match jwt_exp(token) {
        Some(exp) => exp < now_epoch_secs,
        None => false,
    }
}

fn require(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn check_email(email: &str) -> Result<String, FormError> {
    let email = require(email, "E-mail")?;
    match email.split_once('@') {
        Some((user, domain)) if !user.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(FormError::InvalidEmail),
    }
}

fn check_new_password(password: &str, confirm: &str) -> Result<(), FormError> {
    if password.is_empty() {
        return Err(FormError::Required("Password"));
    }
    if password != confirm {
        return Err(FormError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FormError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<LoginCredentials, FormError> {
    let email = require(email, "E-mail")?;
    if password.is_empty() {
        return Err(FormError::Required("Password"));
    }
    Ok(LoginCredentials {
        email,
        password: password.to_string(),
    })
}

/// "Maria da Silva" → ("Maria", "da Silva").
pub fn split_full_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

pub fn validate_registration(
    full_name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<RegisterCredentials, FormError> {
    let full_name = require(full_name, "Name")?;
    let email = check_email(email)?;
    check_new_password(password, confirm)?;

    let (first, last) = split_full_name(&full_name);
    Ok(RegisterCredentials {
        email,
        password1: password.to_string(),
        password2: confirm.to_string(),
        first_name: Some(first),
        last_name: (!last.is_empty()).then_some(last),
    })
}

pub fn validate_password_change(
    current: &str,
    new_password: &str,
    confirm: &str,
) -> Result<ChangePassword, FormError> {
    if current.is_empty() {
        return Err(FormError::Required("Current password"));
    }
    check_new_password(new_password, confirm)?;
    Ok(ChangePassword {
        current_password: current.to_string(),
        new_password: new_password.to_string(),
        confirm_password: confirm.to_string(),
    })
}

pub fn validate_profile(first_name: &str, last_name: &str) -> Result<UpdateProfile, FormError> {
    Ok(UpdateProfile {
        first_name: require(first_name, "First name")?,
        last_name: require(last_name, "Last name")?,
    })
}

pub fn validate_reset_email(email: &str) -> Result<String, FormError> {
    check_email(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn jwt_shape() {
        assert!(is_jwt("a.b.c"));
        assert!(!is_jwt("a.b"));
        assert!(!is_jwt("a..c"));
        assert!(!is_jwt("9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b"));
    }

    #[test]
    fn expiry_is_read_from_payload() {
        let token = token_with(r#"{"exp": 1700000000, "user_id": 3}"#);
        assert!(jwt_expired(&token, 1700000001));
        assert!(!jwt_expired(&token, 1699999999));
    }

    #[test]
    fn malformed_tokens_are_not_expired() {
        assert!(!jwt_expired("opaque-token", i64::MAX));
        assert!(!jwt_expired("a.!!!.c", i64::MAX));
        assert!(!jwt_expired(&token_with(r#"{"user_id": 3}"#), i64::MAX));
    }

    #[test]
    fn padded_payloads_decode() {
        let token = format!(
            "h.{}==.s",
            URL_SAFE_NO_PAD.encode(r#"{"exp": 10}"#).trim_end_matches('=')
        );
        assert!(jwt_expired(&token, 11));
    }

    #[test]
    fn registration_rules() {
        assert_eq!(
            validate_registration("Ana", "ana@example.com", "secret12", "secret13"),
            Err(FormError::PasswordMismatch)
        );
        assert_eq!(
            validate_registration("Ana", "ana@example.com", "short", "short"),
            Err(FormError::PasswordTooShort(8))
        );
        assert_eq!(
            validate_registration("Ana", "ana.example.com", "secret12", "secret12"),
            Err(FormError::InvalidEmail)
        );
        let ok = validate_registration("Ana Maria Souza", " ana@example.com ", "secret12", "secret12")
            .unwrap();
        assert_eq!(ok.email, "ana@example.com");
        assert_eq!(ok.first_name.as_deref(), Some("Ana"));
        assert_eq!(ok.last_name.as_deref(), Some("Maria Souza"));
    }

    #[test]
    fn single_word_name_has_no_last_name() {
        let ok = validate_registration("Ana", "a@b.co", "secret12", "secret12").unwrap();
        assert_eq!(ok.last_name, None);
    }

    #[test]
    fn password_change_needs_current_password() {
        assert_eq!(
            validate_password_change("", "newsecret", "newsecret"),
            Err(FormError::Required("Current password"))
        );
        assert!(validate_password_change("old", "newsecret", "newsecret").is_ok());
    }

    #[test]
    fn profile_requires_both_names() {
        assert_eq!(
            validate_profile("Ana", " "),
            Err(FormError::Required("Last name"))
        );
    }
}
