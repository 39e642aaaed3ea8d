//! Google Sheets integration through a Google Apps Script endpoint.
//!
//! One POST per finished workout. Every failure, from a missing
//! endpoint URL to a bad response body, comes back as a `SubmitError`
//! with a user-displayable message; nothing escapes the boundary.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::config;
use crate::types::SheetPayload;

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitError {
    /// Endpoint unset, still the placeholder, or not an Apps Script URL.
    Config(String),
    /// The request never produced a response.
    Network(String),
    /// Non-2xx HTTP status.
    Server(u16),
    /// Response arrived but its body was not valid JSON.
    Parse(String),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Config(msg) => write!(f, "{}", msg),
            SubmitError::Network(msg) => write!(f, "Error de red: {}", msg),
            SubmitError::Server(status) => write!(f, "Error servidor: {}", status),
            SubmitError::Parse(msg) => write!(f, "Respuesta invalida: {}", msg),
        }
    }
}

/// Check the configured endpoint without touching the network. Runs
/// synchronously before every submission attempt.
pub fn validate_api_url(url: &str) -> Result<(), SubmitError> {
    if url.trim().is_empty() || url == config::API_URL_PLACEHOLDER {
        return Err(SubmitError::Config(
            "URL de Google Apps Script no configurada. Actualiza API_URL en config.rs".to_string(),
        ));
    }
    if !url.contains("script.googleapis.com") && !url.contains("script.google.com") {
        return Err(SubmitError::Config(
            "URL de Google Apps Script invalida. Debe contener script.googleapis.com o script.google.com"
                .to_string(),
        ));
    }
    Ok(())
}

/// Send the finished workout. Exactly one attempt, no retry and no
/// timeout; the caller re-enables the finish button on failure.
pub async fn send_workout(payload: &SheetPayload) -> Result<serde_json::Value, SubmitError> {
    validate_api_url(config::API_URL)?;

    let window =
        web_sys::window().ok_or_else(|| SubmitError::Network("no window".to_string()))?;

    let body = serde_json::to_string(payload).map_err(|e| SubmitError::Parse(e.to_string()))?;

    let headers =
        Headers::new().map_err(|_| SubmitError::Network("no se pudieron crear headers".to_string()))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|_| SubmitError::Network("no se pudo fijar content-type".to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));
    opts.set_headers(&JsValue::from(&headers));

    let request = Request::new_with_str_and_init(config::API_URL, &opts)
        .map_err(|_| SubmitError::Network("peticion invalida".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| SubmitError::Network("fallo la conexion".to_string()))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| SubmitError::Network("respuesta invalida".to_string()))?;

    if !resp.ok() {
        return Err(SubmitError::Server(resp.status()));
    }

    let json = JsFuture::from(
        resp.json()
            .map_err(|_| SubmitError::Parse("sin cuerpo JSON".to_string()))?,
    )
    .await
    .map_err(|_| SubmitError::Parse("no se pudo leer el JSON".to_string()))?;

    serde_wasm_bindgen::from_value(json).map_err(|e| SubmitError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_url_fails_before_network() {
        // The shipped configuration is the placeholder, so submission
        // must fail fast without a request.
        let result = validate_api_url(config::API_URL);
        assert!(matches!(result, Err(SubmitError::Config(_))));
    }

    #[test]
    fn test_blank_url_rejected() {
        assert!(matches!(validate_api_url(""), Err(SubmitError::Config(_))));
        assert!(matches!(validate_api_url("   "), Err(SubmitError::Config(_))));
    }

    #[test]
    fn test_foreign_host_rejected() {
        let result = validate_api_url("https://example.com/endpoint");
        assert!(matches!(result, Err(SubmitError::Config(_))));
    }

    #[test]
    fn test_apps_script_hosts_accepted() {
        assert!(validate_api_url("https://script.google.com/macros/s/XYZ/exec").is_ok());
        assert!(validate_api_url("https://script.googleapis.com/v1/scripts/XYZ:run").is_ok());
    }

    #[test]
    fn test_server_error_message_carries_status() {
        assert_eq!(SubmitError::Server(500).to_string(), "Error servidor: 500");
    }
}
