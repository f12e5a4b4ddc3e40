use super::{ApiClient, ApiResult};
use crate::models::auth::{
    ChangePassword, LoginCredentials, LoginResponse, PasswordResetRequest, RefreshRequest,
    RefreshResponse, RegisterCredentials, RegisterResponse, UpdateProfile, User, UserProfile,
};

impl ApiClient {
    pub async fn login(&self, credentials: &LoginCredentials) -> ApiResult<LoginResponse> {
        let response: LoginResponse = self.post("/api/auth/login/", credentials).await?;
        Ok(response.normalize())
    }

    /// Server-side token invalidation. Failures are logged and swallowed, the
    /// caller clears local tokens either way.
    pub async fn logout(&self) {
        if let Err(err) = self.post_unit("/api/auth/logout/", &serde_json::json!({})).await {
            log::warn!("logout request failed: {}", err);
        }
    }

    pub async fn refresh_token(&self, refresh: &str) -> ApiResult<RefreshResponse> {
        let body = RefreshRequest {
            refresh: refresh.to_string(),
        };
        self.post("/api/auth/token/refresh/", &body).await
    }

    pub async fn current_user(&self) -> ApiResult<User> {
        self.get("/api/auth/user/").await
    }

    pub async fn register(&self, data: &RegisterCredentials) -> ApiResult<RegisterResponse> {
        self.post("/api/auth/registration/", data).await
    }

    pub async fn profile(&self) -> ApiResult<UserProfile> {
        self.get("/api/auth/profile/").await
    }

    pub async fn update_profile(&self, data: &UpdateProfile) -> ApiResult<UserProfile> {
        self.patch("/api/auth/profile/", data).await
    }

    pub async fn change_password(&self, data: &ChangePassword) -> ApiResult<()> {
        self.post_unit("/api/auth/change-password/", data).await
    }

    pub async fn request_password_reset(&self, email: &str) -> ApiResult<()> {
        let body = PasswordResetRequest {
            email: email.trim().to_string(),
        };
        self.post_unit("/api/auth/password/reset/", &body).await
    }
}
