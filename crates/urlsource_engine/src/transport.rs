use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use source_logging::{source_debug, source_info};

use crate::error::{TransportError, TransportFailureKind};
use crate::RequestConfig;

/// Client identifier sent as the User-Agent of every request.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Knobs for the HTTP exchange. The defaults impose no deadline and return
/// redirect responses as they are.
#[derive(Debug, Clone, Default)]
pub struct TransportSettings {
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    /// Number of redirects followed before the redirect response itself is returned.
    pub redirect_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOutput {
    /// Status line of the exchange. Informational only; see [`crate::run_with`].
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, config: &RequestConfig) -> Result<TransportOutput, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    settings: TransportSettings,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, TransportError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            // `previous` includes the originally requested URL.
            if attempt.previous().len() > redirect_limit {
                attempt.stop()
            } else {
                attempt.follow()
            }
        });

        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(policy);
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| TransportError::new(TransportFailureKind::Init, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, config: &RequestConfig) -> Result<TransportOutput, TransportError> {
        let url = reqwest::Url::parse(&config.url)
            .map_err(|err| TransportError::new(TransportFailureKind::InvalidUrl, err.to_string()))?;
        let method = parse_method(&config.method)?;
        let client = self.build_client()?;

        let mut request = client.request(method, url);
        for (name, value) in &config.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !config.body.is_empty() {
            request = request.body(config.body.clone());
        }

        source_debug!("Sending {} request to {}", config.method, config.url);
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            source_info!("Request to {} answered with {}", config.url, status);
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(TransportOutput {
            status: status.as_u16(),
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

fn parse_method(method: &str) -> Result<Method, TransportError> {
    if method.is_empty() {
        return Ok(Method::GET);
    }
    Method::from_bytes(method.as_bytes()).map_err(|err| {
        TransportError::new(
            TransportFailureKind::InvalidRequest,
            format!("{err}: {method:?}"),
        )
    })
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportFailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return TransportError::new(TransportFailureKind::InvalidRequest, err.to_string());
    }
    TransportError::new(TransportFailureKind::Network, err.to_string())
}
