//! Live HTTP adapter for the order endpoint.

use std::time::Duration;

use pos_menu::{OrderReceipt, OrderRequest};

use crate::{OrderApi, SubmitError};

/// Blocking HTTP client posting orders to `{base_url}/api/orders`.
pub struct HttpOrderClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpOrderClient {
    /// `base_url` is the server root, with or without a trailing slash.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::blocking::Client::new(),
        }
    }

    fn orders_url(&self) -> String {
        format!("{}/api/orders", self.base_url)
    }

    /// Pull a human-readable message out of an error response. The server
    /// answers 4xx with either a JSON `description` field or an HTML error
    /// page; fall back to the raw (trimmed) body, then the status itself.
    fn error_message(body: &str, status: u16) -> String {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            for key in ["description", "message", "error"] {
                if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                    return msg.to_string();
                }
            }
        }
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed.starts_with('<') {
            format!("HTTP {status}")
        } else {
            trimmed.to_string()
        }
    }
}

impl OrderApi for HttpOrderClient {
    fn submit(&mut self, request: &OrderRequest) -> Result<OrderReceipt, SubmitError> {
        let url = self.orders_url();
        tracing::info!(
            %url,
            table = %request.table_code,
            lines = request.items.len(),
            "submitting order"
        );

        let response = self
            .http
            .post(&url)
            .timeout(Duration::from_secs(15))
            .json(request)
            .send()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message: Self::error_message(&body, status.as_u16()),
            });
        }

        response
            .json::<OrderReceipt>()
            .map_err(|e| SubmitError::Transport(format!("invalid order response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slashes_are_trimmed() {
        let client = HttpOrderClient::new("http://localhost:5000///");
        assert_eq!(client.orders_url(), "http://localhost:5000/api/orders");
    }

    #[test]
    fn error_message_prefers_json_description() {
        let msg = HttpOrderClient::error_message(r#"{"description": "table not found"}"#, 404);
        assert_eq!(msg, "table not found");
    }

    #[test]
    fn error_message_falls_back_past_html() {
        let msg = HttpOrderClient::error_message("<html><body>Forbidden</body></html>", 403);
        assert_eq!(msg, "HTTP 403");
        let msg = HttpOrderClient::error_message("store closed\n", 403);
        assert_eq!(msg, "store closed");
    }
}
