use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Token-auth backends answer `{ "key": ... }`, JWT backends
/// `{ "access": ..., "refresh": ... }`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl LoginResponse {
    /// Folds a token-auth `key` into `access` so callers only look at one field.
    pub fn normalize(mut self) -> Self {
        if self.access.is_none() {
            self.access = self.key.take();
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterCredentials {
    pub email: String,
    pub password1: String,
    pub password2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u32,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_joined: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpdateProfile {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_key_becomes_access() {
        let resp: LoginResponse = serde_json::from_str(r#"{"key": "abc123"}"#).unwrap();
        let resp = resp.normalize();
        assert_eq!(resp.access.as_deref(), Some("abc123"));
        assert!(resp.key.is_none());
    }

    #[test]
    fn jwt_pair_is_left_alone() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"access": "a.b.c", "refresh": "r", "key": "ignored"}"#)
                .unwrap();
        let resp = resp.normalize();
        assert_eq!(resp.access.as_deref(), Some("a.b.c"));
        assert_eq!(resp.refresh.as_deref(), Some("r"));
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user = User {
            id: 1,
            email: "x@y.z".into(),
            first_name: " ".into(),
            last_name: String::new(),
        };
        assert_eq!(user.display_name(), "x@y.z");
    }
}
