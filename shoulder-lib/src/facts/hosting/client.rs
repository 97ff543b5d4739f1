//! GitHub client
//!
//! Covers the two things we read from a repository: its metadata through the REST
//! API and its root `package.json` through the raw content service.

use crate::Result;
use crate::facts::http;
use ohno::IntoAppError;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Repository metadata, limited to the fields we read.
#[derive(Debug, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub stargazers_count: Option<u64>,
}

/// Root manifest of a repository, limited to the fields we read.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    api_url: String,
    raw_url: String,
}

impl Client {
    /// Create a client, authenticating API calls when a token is given.
    pub fn new(token: Option<&str>, api_url: &str, raw_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}")).into_app_err("invalid GitHub token")?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        Ok(Self {
            client: http::build_client(headers)?,
            api_url: api_url.trim_end_matches('/').to_string(),
            raw_url: raw_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository> {
        let url = format!("{}/repos/{owner}/{repo}", self.api_url);
        http::get_json(self.client.get(url)).await
    }

    pub async fn get_manifest(&self, owner: &str, repo: &str) -> Result<Manifest> {
        let url = format!("{}/{owner}/{repo}/master/package.json", self.raw_url);
        http::get_json(self.client.get(url)).await
    }
}
