//! # Payments Client SDK
//!
//! A typed Rust client for the Payments API.

use chrono::{DateTime, Utc};
use payments_types::{CreatePaymentRequest, PaymentView};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Payments API client.
pub struct PaymentsClient {
    base_url: String,
    http: Client,
}

impl Default for PaymentsClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PaymentsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists all live payments.
    pub async fn list_payments(&self) -> Result<Vec<PaymentView>, ClientError> {
        self.get("/api/v1/payments").await
    }

    /// Gets a payment by uid.
    pub async fn get_payment(&self, uid: &str) -> Result<PaymentView, ClientError> {
        let url = self.payment_url(uid, &[])?;
        self.send(self.http.get(url)).await
    }

    /// Creates a new payment.
    pub async fn create_payment(
        &self,
        account_origin: &str,
        account_target: &str,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Result<PaymentView, ClientError> {
        let req = CreatePaymentRequest {
            account_origin: account_origin.to_string(),
            account_target: account_target.to_string(),
            amount,
            date,
        };
        self.send(self.http.post(self.url("/api/v1/payments")).json(&req))
            .await
    }

    /// Marks a payment as processed.
    pub async fn mark_processed(&self, uid: &str) -> Result<PaymentView, ClientError> {
        let url = self.payment_url(uid, &["processed"])?;
        self.send(self.http.patch(url)).await
    }

    /// Deletes an unprocessed payment.
    pub async fn delete_payment(&self, uid: &str) -> Result<(), ClientError> {
        let url = self.payment_url(uid, &[])?;
        let resp = self.http.delete(url).send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(api_error(resp).await)
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds `/api/v1/payments/uid/{uid}[/suffix...]` with the uid
    /// percent-encoded as a single path segment.
    fn payment_url(&self, uid: &str, suffix: &[&str]) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "v1", "payments", "uid", uid])
            .extend(suffix);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.http.get(self.url(path))).await
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        if resp.status().is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(resp).await)
        }
    }
}

async fn api_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    ClientError::Api {
        status: status.as_u16(),
        message: error_message(body),
    }
}

/// Extracts the `error` field of an error body, falling back to the raw text.
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PaymentsClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = PaymentsClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_default_base_url() {
        let client = PaymentsClient::default();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_payment_urls() {
        let client = PaymentsClient::new("http://localhost:8080");

        assert_eq!(
            client.payment_url("abc", &[]).unwrap().as_str(),
            "http://localhost:8080/api/v1/payments/uid/abc"
        );
        assert_eq!(
            client.payment_url("abc", &["processed"]).unwrap().as_str(),
            "http://localhost:8080/api/v1/payments/uid/abc/processed"
        );
    }

    #[test]
    fn test_payment_url_encodes_uid() {
        let client = PaymentsClient::new("http://localhost:8080/");

        let url = client.payment_url("a/b?c#d", &["processed"]).unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v1/payments/uid/a%2Fb%3Fc%23d/processed"
        );
        assert_eq!(url.path_segments().unwrap().count(), 6);
    }

    #[test]
    fn test_payment_url_keeps_base_path() {
        let client = PaymentsClient::new("http://gateway/payments-svc");

        assert_eq!(
            client.payment_url("abc", &[]).unwrap().as_str(),
            "http://gateway/payments-svc/api/v1/payments/uid/abc"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let client = PaymentsClient::new("not a url");

        assert!(matches!(
            client.payment_url("abc", &[]),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"code":409,"error":"Payment already processed"}"#.to_string();
        assert_eq!(error_message(body), "Payment already processed");
        assert_eq!(error_message("bad gateway".to_string()), "bad gateway");
    }

    #[test]
    fn test_error_status() {
        let err = ClientError::Api {
            status: 404,
            message: "Payment not found".into(),
        };
        assert_eq!(err.status(), Some(404));
    }
}
