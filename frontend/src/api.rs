//! HTTP client for the Sweet Shop REST API.
//!
//! One thin wrapper owns the cross-cutting request concerns: bearer-token
//! injection, JSON negotiation, error-message normalization and the
//! clear-session side effect on 401/403. Endpoint methods stay one-liners
//! on top of it. No retries, timeouts or cancellation: every call is a
//! single best-effort attempt and the caller decides whether to re-invoke.

use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sweetshop_shared::{
    AuthResponse, LoginRequest, RegisterRequest, Sweet, SweetRequest, SweetSearchQuery,
};

use crate::auth::AuthState;
use crate::error::{ApiError, ApiResult};
use crate::session::SessionStore;

/// Client for all server interaction. Cheap to clone; injected through the
/// Leptos context at the app root rather than held in a global.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    store: SessionStore,
    set_auth: WriteSignal<AuthState>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        store: SessionStore,
        set_auth: WriteSignal<AuthState>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            store,
            set_auth,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Common headers for every request: the JSON content type always
    /// (even on bodyless GETs, which the server tolerates and the original
    /// client always sent), plus the bearer token whenever one is stored
    /// at call time.
    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Content-Type", "application/json");
        match auth_header(&self.store) {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    fn get(&self, path: &str) -> ApiResult<Request> {
        self.prepare(Request::get(&self.url(path)))
            .build()
            .map_err(build_error)
    }

    fn post(&self, path: &str) -> ApiResult<Request> {
        self.prepare(Request::post(&self.url(path)))
            .build()
            .map_err(build_error)
    }

    fn post_json<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<Request> {
        self.prepare(Request::post(&self.url(path)))
            .json(body)
            .map_err(build_error)
    }

    fn put_json<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<Request> {
        self.prepare(Request::put(&self.url(path)))
            .json(body)
            .map_err(build_error)
    }

    fn delete(&self, path: &str) -> ApiResult<Request> {
        self.prepare(Request::delete(&self.url(path)))
            .build()
            .map_err(build_error)
    }

    /// Sends a built request and applies the shared failure contract.
    async fn dispatch(&self, request: Request) -> ApiResult<Response> {
        let response = request.send().await.map_err(|e| {
            log::error!("transport failure: {e}");
            ApiError::Network
        })?;
        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let status_text = response.status_text();
        let body = response.text().await.unwrap_or_default();
        let set_auth = self.set_auth;
        Err(failure_to_error(status, &status_text, &body, &self.store, move || {
            set_auth.update(|state| state.session = None);
        }))
    }

    /// Dispatches, then decodes a JSON body into `T`. Endpoints that
    /// promise JSON treat any other declared content type as a decode
    /// failure; bodyless endpoints go through [`Self::fetch_unit`].
    async fn fetch_json<T: DeserializeOwned>(&self, request: Request) -> ApiResult<T> {
        let response = self.dispatch(request).await?;
        let content_type = response.headers().get("content-type").unwrap_or_default();
        if !is_json_content_type(&content_type) {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Decode(format!(
                "expected JSON, got {content_type:?}: {text}"
            )));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Dispatches and discards whatever body came back.
    async fn fetch_unit(&self, request: Request) -> ApiResult<()> {
        self.dispatch(request).await.map(|_| ())
    }

    // ---- authentication ----

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<AuthResponse> {
        self.fetch_json(self.post_json("/api/auth/login", req)?).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.fetch_json(self.post_json("/api/auth/register", req)?)
            .await
    }

    // ---- inventory ----

    /// Plain list when no filter is set; the search endpoint with exactly
    /// the non-empty filters otherwise.
    pub async fn list_sweets(&self, query: &SweetSearchQuery) -> ApiResult<Vec<Sweet>> {
        let path = if query.is_empty() {
            "/api/sweets".to_string()
        } else {
            format!("/api/sweets/search?{}", query.query_string())
        };
        self.fetch_json(self.get(&path)?).await
    }

    pub async fn create_sweet(&self, req: &SweetRequest) -> ApiResult<Sweet> {
        self.fetch_json(self.post_json("/api/sweets", req)?).await
    }

    pub async fn update_sweet(&self, id: u64, req: &SweetRequest) -> ApiResult<Sweet> {
        self.fetch_json(self.put_json(&format!("/api/sweets/{id}"), req)?)
            .await
    }

    pub async fn delete_sweet(&self, id: u64) -> ApiResult<()> {
        self.fetch_unit(self.delete(&format!("/api/sweets/{id}"))?)
            .await
    }

    /// Server-enforced single-unit decrement.
    pub async fn purchase_sweet(&self, id: u64) -> ApiResult<Sweet> {
        self.fetch_json(self.post(&format!("/api/sweets/{id}/purchase"))?)
            .await
    }

    pub async fn restock_sweet(&self, id: u64, qty: u32) -> ApiResult<Sweet> {
        self.fetch_json(self.post(&format!("/api/sweets/{id}/restock?qty={qty}"))?)
            .await
    }
}

/// The client shared through the Leptos context at the app root.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient should be provided")
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// The `Authorization` header value, present iff a token is stored at call
/// time.
fn auth_header(store: &SessionStore) -> Option<String> {
    store.token().map(|token| bearer(&token))
}

/// Maps a non-2xx response to its error. On 401/403 the stored session is
/// cleared and `on_expired` runs before the caller sees the error, so the
/// route guard observes the anonymous state and navigates back to login.
fn failure_to_error(
    status: u16,
    status_text: &str,
    body: &str,
    store: &SessionStore,
    on_expired: impl FnOnce(),
) -> ApiError {
    let message = extract_error_message(status, status_text, body);

    if status == 401 || status == 403 {
        log::warn!("auth rejected with {status}; clearing session");
        store.clear();
        on_expired();
        return ApiError::AuthExpired;
    }

    log::warn!("request failed: HTTP {status}: {message}");
    ApiError::Server { status, message }
}

fn build_error(e: gloo_net::Error) -> ApiError {
    ApiError::Decode(format!("failed to build request: {e}"))
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Whether a `Content-Type` header value declares a JSON body.
fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .to_ascii_lowercase()
        .contains("application/json")
}

/// Deterministic fallback chain for a human-readable failure message:
/// the body's `message` field, then its `error` field, then the whole JSON
/// body, then a synthesized status line when the body is not JSON at all.
fn extract_error_message(status: u16, status_text: &str, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            if let Some(message) = value.get("message").and_then(Value::as_str) {
                return message.to_string();
            }
            if let Some(error) = value.get("error").and_then(Value::as_str) {
                return error.to_string();
            }
            value.to_string()
        }
        Err(_) => format!("HTTP {status}: {status_text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::MemoryStorage;
    use crate::session::Session;
    use std::cell::Cell;
    use std::sync::Arc;
    use sweetshop_shared::Role;

    fn store_with_session() -> SessionStore {
        let store = SessionStore::new(Arc::new(MemoryStorage::default()));
        store.set(&Session {
            token: "abc123".into(),
            username: "alice".into(),
            role: Role::Admin,
        });
        store
    }

    #[test]
    fn auth_rejection_clears_the_session() {
        for status in [401u16, 403] {
            let store = store_with_session();
            let expired = Cell::new(false);

            let err = failure_to_error(status, "Unauthorized", "", &store, || expired.set(true));

            assert_eq!(err, ApiError::AuthExpired);
            assert!(expired.get());
            assert_eq!(store.token(), None);
            assert_eq!(store.load(), None);
        }
    }

    #[test]
    fn other_failures_leave_the_session_alone() {
        let store = store_with_session();
        let expired = Cell::new(false);

        let err = failure_to_error(
            404,
            "Not Found",
            r#"{"message":"Sweet not found"}"#,
            &store,
            || expired.set(true),
        );

        assert_eq!(
            err,
            ApiError::Server {
                status: 404,
                message: "Sweet not found".into()
            }
        );
        assert!(!expired.get());
        assert_eq!(store.token().as_deref(), Some("abc123"));
        assert!(store.load().is_some());
    }

    #[test]
    fn authorization_header_tracks_the_stored_token() {
        let store = store_with_session();
        assert_eq!(auth_header(&store).as_deref(), Some("Bearer abc123"));

        store.clear();
        assert_eq!(auth_header(&store), None);
    }

    #[test]
    fn message_field_wins() {
        let msg = extract_error_message(
            400,
            "Bad Request",
            r#"{"message":"Quantity exhausted","error":"conflict"}"#,
        );
        assert_eq!(msg, "Quantity exhausted");
    }

    #[test]
    fn error_field_is_the_second_choice() {
        let msg = extract_error_message(409, "Conflict", r#"{"error":"Sweet already exists"}"#);
        assert_eq!(msg, "Sweet already exists");
    }

    #[test]
    fn other_json_bodies_are_shown_whole() {
        let msg = extract_error_message(422, "Unprocessable", r#"{"field":"price"}"#);
        assert_eq!(msg, r#"{"field":"price"}"#);
        let msg = extract_error_message(422, "Unprocessable", r#"["a","b"]"#);
        assert_eq!(msg, r#"["a","b"]"#);
    }

    #[test]
    fn non_json_bodies_synthesize_a_status_line() {
        assert_eq!(
            extract_error_message(500, "Internal Server Error", "<html>oops</html>"),
            "HTTP 500: Internal Server Error"
        );
        assert_eq!(
            extract_error_message(502, "Bad Gateway", ""),
            "HTTP 502: Bad Gateway"
        );
    }

    #[test]
    fn non_string_message_field_falls_through_to_whole_body() {
        let msg = extract_error_message(400, "Bad Request", r#"{"message":42}"#);
        assert_eq!(msg, r#"{"message":42}"#);
    }

    #[test]
    fn json_content_type_detection() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(!is_json_content_type("text/html"));
        assert!(!is_json_content_type(""));
    }

    #[test]
    fn bearer_header_format() {
        assert_eq!(bearer("abc123"), "Bearer abc123");
    }

    #[test]
    fn url_joining_handles_slashes() {
        assert_eq!(
            join_url("http://localhost:8081", "/api/sweets"),
            "http://localhost:8081/api/sweets"
        );
        assert_eq!(join_url("", "/api/sweets"), "/api/sweets");
        assert_eq!(join_url("http://x", "api"), "http://x/api");
    }
}
