//! Qualtrics HTTP transport
//!
//! [`QualtricsClient`] owns the connection pool, attaches the API token to
//! every request, applies the per-request timeout and retries connection
//! failures. Non-2xx responses become [`ApiError::Status`] carrying the
//! server's `errorMessage`. Dropping the client releases its connections.

use super::models::{ApiEnvelope, ErrorEnvelope};
use crate::config::{QualtricsConfig, RetryConfig, SecretString};
use crate::domain::{ApiError, DataCenter, QualtricsError, Result};
use crate::log_retry_attempt;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Header carrying the API token
pub const API_TOKEN_HEADER: &str = "X-API-TOKEN";

/// Qualtrics REST API client
///
/// # Example
///
/// ```no_run
/// use qualtrics_client::adapters::qualtrics::QualtricsClient;
/// use qualtrics_client::config::{secret_string, QualtricsConfig};
///
/// # async fn example() -> qualtrics_client::domain::Result<()> {
/// let config = QualtricsConfig::new("fra1", Some(secret_string("token".to_string())));
/// let client = QualtricsClient::new(config)?;
/// let surveys = client.list_surveys(500).await?;
/// # Ok(())
/// # }
/// ```
pub struct QualtricsClient {
    http: Client,
    base_url: String,
    data_center: DataCenter,
    api_token: SecretString,
    retry: RetryConfig,
}

impl QualtricsClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// - [`QualtricsError::InvalidDataCenter`] for an unknown data center
    /// - [`QualtricsError::MissingApiToken`] when no token is configured
    ///
    /// Both checks run before any HTTP resources are created.
    pub fn new(config: QualtricsConfig) -> Result<Self> {
        let data_center: DataCenter = config.data_center.parse()?;

        let api_token = config
            .api_token
            .filter(|token| !token.expose_secret().is_blank())
            .ok_or(QualtricsError::MissingApiToken)?;

        let mut base_url = config.base_url.unwrap_or_else(|| data_center.base_url());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("qualtrics-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                QualtricsError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        tracing::debug!(
            data_center = %data_center,
            base_url = %base_url,
            timeout_seconds = config.timeout_seconds,
            max_retries = config.retry.max_retries,
            "Created Qualtrics client"
        );

        Ok(Self {
            http,
            base_url,
            data_center,
            api_token,
            retry: config.retry,
        })
    }

    /// Base URL every endpoint path is appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn data_center(&self) -> DataCenter {
        self.data_center
    }

    /// Absolute URL for an endpoint path
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send an authenticated request, retrying connection failures
    ///
    /// `configure` is applied to a fresh builder on every attempt.
    pub(crate) async fn request<F>(&self, method: Method, path: &str, configure: F) -> Result<Response>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let url = self.endpoint_url(path);
        let url = &url;
        let method = &method;
        let configure = &configure;

        tracing::debug!(method = %method, url = %url, "Sending request");

        let idempotent = *method != Method::POST;

        self.retry_request(idempotent, || async move {
            let token: &str = self.api_token.expose_secret().as_ref();
            let builder = self
                .http
                .request(method.clone(), url)
                .header(API_TOKEN_HEADER, token);

            let response = configure(builder)
                .send()
                .await
                .map_err(|e| transport_error(url, e))?;

            error_for_status(response).await
        })
        .await
    }

    /// GET a path and decode the `result` object of the envelope
    pub(crate) async fn get_result<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .request(Method::GET, path, |builder| {
                if query.is_empty() {
                    builder
                } else {
                    builder.query(query)
                }
            })
            .await?;
        decode_result(response).await
    }

    /// Retry a request with exponential backoff
    ///
    /// Only transport failures are retried. A non-idempotent request is
    /// retried only when the connection could not be established.
    async fn retry_request<F, T, Fut>(&self, idempotent: bool, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_retries = self.retry.max_retries;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(QualtricsError::Api(e))
                    if e.is_retryable()
                        && (idempotent || !e.may_have_been_delivered())
                        && attempt < max_retries =>
                {
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    log_retry_attempt!(attempt, max_retries, e.to_string());
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl fmt::Display for QualtricsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Qualtrics client {}", self.base_url)
    }
}

impl fmt::Debug for QualtricsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QualtricsClient")
            .field("base_url", &self.base_url)
            .field("data_center", &self.data_center)
            .finish_non_exhaustive()
    }
}

/// Decode the `result` object of a success envelope
pub(crate) async fn decode_result<T: DeserializeOwned>(response: Response) -> Result<T> {
    let envelope: ApiEnvelope<T> = response
        .json()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
    Ok(envelope.result)
}

/// Map a reqwest failure onto the transport taxonomy
pub(crate) fn transport_error(url: &str, err: reqwest::Error) -> QualtricsError {
    let detail = format!("{url}: {err}");
    if err.is_connect() {
        ApiError::Connection(detail).into()
    } else if err.is_timeout() {
        ApiError::Timeout(detail).into()
    } else if err.is_decode() || err.is_body() {
        ApiError::InvalidResponse(detail).into()
    } else {
        ApiError::Interrupted(detail).into()
    }
}

async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|envelope| envelope.error_message().map(str::to_string))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            }
        });

    tracing::debug!(status = status.as_u16(), message = %message, "Request failed");

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config(data_center: &str) -> QualtricsConfig {
        QualtricsConfig::new(data_center, Some(secret_string("ABCEDEFGH".to_string())))
    }

    #[test]
    fn test_client_url_for_every_data_center() {
        for dc in DataCenter::ALL {
            let client = QualtricsClient::new(config(dc.as_str())).unwrap();
            assert_eq!(client.base_url(), dc.base_url());
            assert_eq!(client.data_center(), dc);
        }
    }

    #[test]
    fn test_invalid_data_center_rejected() {
        let result = QualtricsClient::new(config("xx1"));
        assert!(matches!(result, Err(QualtricsError::InvalidDataCenter(_))));
    }

    #[test]
    fn test_missing_token_rejected() {
        let result = QualtricsClient::new(QualtricsConfig::new("fra1", None));
        assert!(matches!(result, Err(QualtricsError::MissingApiToken)));

        let blank = QualtricsConfig::new("fra1", Some(secret_string(String::new())));
        assert!(matches!(
            QualtricsClient::new(blank),
            Err(QualtricsError::MissingApiToken)
        ));
    }

    #[test]
    fn test_base_url_override_gets_trailing_slash() {
        let mut config = config("ca1");
        config.base_url = Some("http://127.0.0.1:1234".to_string());
        let client = QualtricsClient::new(config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:1234/");
        assert_eq!(
            client.endpoint_url("/surveys"),
            "http://127.0.0.1:1234/surveys"
        );
    }

    #[test]
    fn test_display_and_debug_hide_token() {
        let client = QualtricsClient::new(config("fra1")).unwrap();
        assert_eq!(
            client.to_string(),
            "Qualtrics client https://fra1.qualtrics.com/API/v3/"
        );
        assert!(!format!("{client:?}").contains("ABCEDEFGH"));
    }
}
