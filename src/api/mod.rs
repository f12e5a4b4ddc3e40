mod auth;
mod finance;
mod objectives;
mod payroll;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use web_sys::RequestCredentials;

use crate::config::API_BASE_URL;
use crate::error::ApiError;
use crate::logic::auth::is_jwt;
use crate::models::ListPayload;
use crate::storage;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// `Bearer` for JWT access tokens, DRF `Token` for opaque keys.
pub fn authorization_header(token: &str) -> String {
    let scheme = if is_jwt(token) { "Bearer" } else { "Token" };
    format!("{} {}", scheme, token)
}

pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn has_body(status: u16, content_length: Option<&str>) -> bool {
    status != 204 && content_length.map(str::trim) != Some("0")
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn builder(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Patch => Request::patch(url),
            Method::Delete => Request::delete(url),
        }
        .credentials(RequestCredentials::Include)
        .header("Content-Type", "application/json");

        match storage::access_token() {
            Some(token) => builder.header("Authorization", &authorization_header(&token)),
            None => builder,
        }
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<Response> {
        let url = self.url(path);
        log::debug!("{} {}", method.as_str(), url);

        let builder = self.builder(method, &url);
        let request = match body {
            Some(body) => builder
                .json(body)
                .map_err(|e| ApiError::Encode(e.to_string()))?,
            None => builder.build()?,
        };

        let response = request.send().await?;
        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status, &response.status_text(), &text);
        log::warn!("{} {} failed: {}", method.as_str(), url, err);
        Err(err)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<Option<T>> {
        let content_length = response.headers().get("content-length");
        if !has_body(response.status(), content_length.as_deref()) {
            return Ok(None);
        }
        Ok(Some(response.json::<T>().await?))
    }

    async fn expect_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        Self::read_json(response)
            .await?
            .ok_or_else(|| ApiError::Decode("empty response body".to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send::<()>(Method::Get, path, None).await?;
        Self::expect_json(response).await
    }

    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        let payload: ListPayload<T> = self.get(path).await?;
        Ok(payload.into_vec())
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::Post, path, Some(body)).await?;
        Self::expect_json(response).await
    }

    /// POST whose answer is informational only (`{"detail": "..."}` or nothing).
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        self.send(Method::Post, path, Some(body)).await?;
        Ok(())
    }

    /// Body-less POST used by detail actions such as `close_period`.
    pub async fn post_action<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Option<T>> {
        let response = self.send::<()>(Method::Post, path, None).await?;
        Self::read_json(response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::Put, path, Some(body)).await?;
        Self::expect_json(response).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::Patch, path, Some(body)).await?;
        Self::expect_json(response).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send::<()>(Method::Delete, path, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        assert_eq!(
            join_url("http://localhost:8000/", "/api/finance/incomes/"),
            "http://localhost:8000/api/finance/incomes/"
        );
        let client = ApiClient::new("https://finance.example.com");
        assert_eq!(
            client.url("api/auth/user/"),
            "https://finance.example.com/api/auth/user/"
        );
    }

    #[test]
    fn scheme_depends_on_token_shape() {
        assert_eq!(authorization_header("9944b09199c62bcf"), "Token 9944b09199c62bcf");
        assert_eq!(
            authorization_header("eyJhbGciOiJIUzI1NiJ9.eyJleHAiOjF9.c2ln"),
            "Bearer eyJhbGciOiJIUzI1NiJ9.eyJleHAiOjF9.c2ln"
        );
    }

    #[test]
    fn no_content_responses_have_no_body() {
        assert!(!has_body(204, None));
        assert!(!has_body(200, Some("0")));
        assert!(has_body(200, Some("42")));
        assert!(has_body(201, None));
    }
}
