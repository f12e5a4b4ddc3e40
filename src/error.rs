use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response from server: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        let message = message_from_body(body).unwrap_or_else(|| {
            if status_text.trim().is_empty() {
                format!("Request failed with status {}", status)
            } else {
                format!("Request failed: {} {}", status, status_text.trim())
            }
        });
        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Token missing, expired or revoked. 403 is a permission problem and
    /// does not end the session.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Client-side form validation failures, shown inline above the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} must be a valid amount")]
    InvalidAmount(&'static str),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{0} must be a valid date")]
    InvalidDate(&'static str),
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("end date must not be before start date")]
    InvertedRange,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("enter a valid e-mail address")]
    InvalidEmail,
    #[error("amount exceeds the available balance")]
    ExceedsBalance,
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Pulls a human readable message out of an error body. DRF answers with
/// `{"detail": ...}`, validation failures with `{"field": ["msg", ...]}`.
pub fn message_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(v) => v,
        Err(_) => {
            // plain text bodies are shown as-is, HTML error pages are not
            if trimmed.starts_with('<') || trimmed.len() > 200 {
                return None;
            }
            return Some(trimmed.to_string());
        }
    };

    for key in ["detail", "message", "error"] {
        if let Some(text) = value.get(key).and_then(first_text) {
            return Some(text);
        }
    }
    if let Some(text) = value.get("non_field_errors").and_then(first_text) {
        return Some(text);
    }

    let fields = value.as_object()?;
    fields.iter().find_map(|(field, v)| {
        first_text(v).map(|text| format!("{}: {}", field, text))
    })
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_wins() {
        let body = r#"{"detail": "Invalid token.", "message": "other"}"#;
        assert_eq!(message_from_body(body).as_deref(), Some("Invalid token."));
    }

    #[test]
    fn non_field_errors_then_fields() {
        let body = r#"{"non_field_errors": ["Unable to log in with provided credentials."]}"#;
        assert_eq!(
            message_from_body(body).as_deref(),
            Some("Unable to log in with provided credentials.")
        );

        let body = r#"{"email": ["A user is already registered with this e-mail address."]}"#;
        assert_eq!(
            message_from_body(body).as_deref(),
            Some("email: A user is already registered with this e-mail address.")
        );
    }

    #[test]
    fn html_pages_are_not_echoed() {
        assert_eq!(message_from_body("<html><body>500</body></html>"), None);
        assert_eq!(message_from_body("Bad gateway").as_deref(), Some("Bad gateway"));
        assert_eq!(message_from_body("   "), None);
    }

    #[test]
    fn form_errors_read_as_sentences() {
        assert_eq!(FormError::Required("Title").to_string(), "Title is required");
        let err = FormError::OutOfRange {
            field: "Due day",
            min: 1,
            max: 31,
        };
        assert_eq!(err.to_string(), "Due day must be between 1 and 31");
        assert_eq!(
            ApiError::from(FormError::PasswordTooShort(8)),
            ApiError::Validation("password must be at least 8 characters".into())
        );
    }

    #[test]
    fn status_error_falls_back_to_status_line() {
        let err = ApiError::from_response(502, "Bad Gateway", "");
        assert_eq!(err.to_string(), "Request failed: 502 Bad Gateway");
        assert_eq!(err.status(), Some(502));

        let err = ApiError::from_response(401, "", r#"{"detail": "Not authenticated"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Not authenticated");
    }
}
