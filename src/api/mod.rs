//! REST API Client
//!
//! Frontend bindings to the depot backend, organized by resource.
//! Every call resolves to `Result<T, ApiError>`; failures carry the best
//! message the response offers.

mod export;
mod resources;

pub use export::{download, filename_from_disposition, ExportFormat};
pub use resources::{assign_profile, create, delete, get, list, qc_by_code, update, Endpoint};

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Backend base URL, overridable at build time
pub fn base_url() -> &'static str {
    option_env!("DEPOT_API_URL").unwrap_or("http://localhost:8080/api")
}

// ========================
// Errors
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status, 0 when the request never reached the server
    pub status: u16,
    pub message: String,
}

impl ApiError {
    fn network(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

fn js_error(value: JsValue) -> ApiError {
    let message = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| "Network error".to_string());
    ApiError::network(message)
}

/// Best-effort message for a failed response: the body's `error` field,
/// then `details`, then the HTTP status text
pub fn extract_message(body: &str, status_text: &str) -> String {
    let from_body = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["error", "details"].iter().find_map(|key| {
                json.get(key)
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.trim().is_empty())
                    .map(str::to_string)
            })
        });
    match from_body {
        Some(message) => message,
        None if !status_text.trim().is_empty() => status_text.to_string(),
        None => "Request failed".to_string(),
    }
}

// ========================
// Transport
// ========================

pub(crate) fn url(path: &str) -> String {
    format!("{}{}", base_url().trim_end_matches('/'), path)
}

/// Issue a request and return the response once its status is 2xx
pub(crate) async fn send(method: &str, path: &str, body: Option<String>) -> Result<Response, ApiError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(&url(path), &opts).map_err(js_error)?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::network("no window"))?;
    web_sys::console::log_1(&format!("[API] {} {}", method, path).into());
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let response: Response = value.dyn_into().map_err(js_error)?;

    if response.ok() {
        return Ok(response);
    }

    let text = match response.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };
    let error = ApiError {
        status: response.status(),
        message: extract_message(&text, &response.status_text()),
    };
    web_sys::console::log_1(&format!("[API] {} {} failed: {} {}", method, path, error.status, error.message).into());
    Err(error)
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let promise = response.json().map_err(js_error)?;
    let value = JsFuture::from(promise).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(value).map_err(|e| ApiError {
        status: response.status(),
        message: e.to_string(),
    })
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::network(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_prefers_error_field() {
        let body = r#"{"error":"inventory 3 not found","details":"x"}"#;
        assert_eq!(extract_message(body, "Not Found"), "inventory 3 not found");
    }

    #[test]
    fn test_extract_message_falls_back_to_details() {
        let body = r#"{"error":"","details":"missing field `name`"}"#;
        assert_eq!(extract_message(body, "Bad Request"), "missing field `name`");
    }

    #[test]
    fn test_extract_message_falls_back_to_status_text() {
        assert_eq!(extract_message("<html>oops</html>", "Bad Gateway"), "Bad Gateway");
        assert_eq!(extract_message("", ""), "Request failed");
    }

    #[test]
    fn test_url_joins_base() {
        assert!(url("/inventory").ends_with("/api/inventory"));
        assert!(!url("/inventory").contains("//inventory"));
    }
}
