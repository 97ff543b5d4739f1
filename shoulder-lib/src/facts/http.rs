//! Plain HTTP request helpers.
//!
//! Every request is attempted exactly once. Callers decide whether a failure is
//! fatal or whether they fall back to an empty result.

use crate::Result;
use ohno::{IntoAppError, bail};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

const LOG_TARGET: &str = "      http";

const USER_AGENT: &str = concat!("shoulder/", env!("CARGO_PKG_VERSION"));

/// Build an HTTP client carrying the tool's user agent and the given default headers.
pub fn build_client(headers: HeaderMap) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .into_app_err("unable to create HTTP client")
}

/// Send a GET request and hand back the response, whatever its status.
pub async fn get(request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
    let (client, request) = request.build_split();
    let request = request.into_app_err("building HTTP request")?;
    log::debug!(target: LOG_TARGET, "GET {}", request.url());

    let url = request.url().clone();
    let response = client
        .execute(request)
        .await
        .into_app_err_with(|| format!("sending HTTP request to {url}"))?;

    log::debug!(target: LOG_TARGET, "{} from {url}", response.status());
    Ok(response)
}

/// Send a GET request and decode a successful JSON response body.
pub async fn get_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T> {
    let response = get(request).await?;
    decode_json(response).await
}

/// Decode a JSON response body, failing on any non-success status.
pub async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let url = response.url().clone();

    if !status.is_success() {
        bail!("unexpected HTTP status {status} from {url}");
    }

    response.json::<T>().await.into_app_err_with(|| format!("parsing JSON response from {url}"))
}
