use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("starknet-tracker/", env!("CARGO_PKG_VERSION"));

/// Non-2xx response from an upstream API.
#[derive(Debug, thiserror::Error)]
#[error("{url} returned {status}: {body}")]
pub struct HttpStatusError {
    pub url: String,
    pub status: reqwest::StatusCode,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Timeout,
    Connect,
    Status,
    Decode,
    Other,
}

impl ApiErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Status => "status",
            Self::Decode => "decode",
            Self::Other => "other",
        }
    }
}

/// Bucket an API failure for the `*_api_errors_total` counter.
pub fn classify_api_error(err: &anyhow::Error) -> ApiErrorKind {
    for cause in err.chain() {
        if cause.downcast_ref::<HttpStatusError>().is_some() {
            return ApiErrorKind::Status;
        }
        if cause.downcast_ref::<serde_json::Error>().is_some() {
            return ApiErrorKind::Decode;
        }
        if let Some(e) = cause.downcast_ref::<reqwest::Error>() {
            if e.is_timeout() {
                return ApiErrorKind::Timeout;
            }
            if e.is_connect() {
                return ApiErrorKind::Connect;
            }
            if e.is_status() {
                return ApiErrorKind::Status;
            }
            if e.is_decode() {
                return ApiErrorKind::Decode;
            }
        }
    }
    ApiErrorKind::Other
}

/// One pooled client shared by every endpoint of a run.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("failed to build HTTP client")
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: reqwest::Url,
) -> Result<T> {
    debug!(url = %url, "GET");
    let resp = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("request to {url} failed"))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(HttpStatusError {
            url: url.to_string(),
            status,
            body,
        }
        .into());
    }

    let body = resp
        .text()
        .await
        .with_context(|| format!("failed to read body from {url}"))?;
    serde_json::from_str(&body).with_context(|| format!("failed to decode response from {url}"))
}
