use crate::Result;
use crate::facts::{Endpoints, http};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::HeaderMap;
use serde::Deserialize;

const LOG_TARGET: &str = "   libs.io";

/// Host type libraries.io reports for repositories on GitHub.
const GITHUB_HOST_TYPE: &str = "GitHub";

/// Everything JavaScript's `encodeURIComponent` escapes.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A repository libraries.io reports as depending on a package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DependentRepository {
    pub full_name: String,

    #[serde(default)]
    pub host_type: Option<String>,
}

impl DependentRepository {
    /// The browsable URL of the repository, for repositories hosted on GitHub.
    #[must_use]
    pub fn github_url(&self) -> Option<String> {
        (self.host_type.as_deref() == Some(GITHUB_HOST_TYPE)).then(|| format!("https://github.com/{}", self.full_name))
    }
}

/// Lists dependent repositories through the libraries.io API.
#[derive(Debug, Clone)]
pub struct Provider {
    client: reqwest::Client,
    base_url: String,
}

impl Provider {
    pub fn new(endpoints: &Endpoints) -> Result<Self> {
        Ok(Self {
            client: http::build_client(HeaderMap::new())?,
            base_url: endpoints.libraries_io.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the repositories that depend on an npm package.
    pub async fn get_dependent_repositories(&self, name: &str, api_key: &str) -> Result<Vec<DependentRepository>> {
        let encoded = utf8_percent_encode(name, URI_COMPONENT);
        let url = format!("{}/NPM/{encoded}/dependent_repositories", self.base_url);

        let request = self.client.get(url).query(&[("api_key", api_key)]);
        let repositories: Vec<DependentRepository> = http::get_json(request).await?;

        log::debug!(target: LOG_TARGET, "libraries.io reports {} dependent repositories of '{name}'", repositories.len());
        Ok(repositories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_like_uri_component() {
        assert_eq!(utf8_percent_encode("@namespace/foo", URI_COMPONENT).to_string(), "%40namespace%2Ffoo");
        assert_eq!(utf8_percent_encode("lodash.merge", URI_COMPONENT).to_string(), "lodash.merge");
        assert_eq!(utf8_percent_encode("really(old)!", URI_COMPONENT).to_string(), "really(old)!");
    }

    #[test]
    fn test_github_url_only_for_github() {
        let on_github = DependentRepository {
            full_name: "org/repo".to_string(),
            host_type: Some("GitHub".to_string()),
        };
        let elsewhere = DependentRepository {
            full_name: "org/repo".to_string(),
            host_type: Some("GitLab".to_string()),
        };
        let unknown = DependentRepository {
            full_name: "org/repo".to_string(),
            host_type: None,
        };

        assert_eq!(on_github.github_url().as_deref(), Some("https://github.com/org/repo"));
        assert!(elsewhere.github_url().is_none());
        assert!(unknown.github_url().is_none());
    }

    #[test]
    fn test_dependent_repository_deserialize() {
        let repos: Vec<DependentRepository> =
            serde_json::from_str(r#"[{"full_name":"foo/bar","host_type":"GitHub","stargazers_count":3}]"#).unwrap();
        assert_eq!(repos[0].full_name, "foo/bar");
        assert_eq!(repos[0].host_type.as_deref(), Some("GitHub"));
    }
}
