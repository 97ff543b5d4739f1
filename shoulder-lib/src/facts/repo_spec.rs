use super::identity::normalize_repo_url;
use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::{IntoAppError, bail};
use std::sync::Arc;
use url::Url;

/// A repository reduced to its host, owner, and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    host: Arc<str>,
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    /// Parse a repository URL after normalizing it to `https://`.
    pub fn parse(repo_url: &str) -> Result<Self> {
        let normalized = normalize_repo_url(repo_url);
        let url = Url::parse(&normalized).into_app_err_with(|| format!("invalid repository URL: {repo_url}"))?;

        let path_segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        if path_segments.len() < 2 {
            bail!("invalid repository URL format: {repo_url}");
        }

        if path_segments[0].is_empty() || path_segments[1].is_empty() {
            bail!("invalid repository URL: empty owner or repo name: {repo_url}");
        }

        let Some(host) = url.host_str().filter(|host| !host.is_empty()) else {
            bail!("invalid repository URL: missing host: {repo_url}");
        };

        Ok(Self {
            host: Arc::from(host),
            owner: Arc::from(path_segments[0]),
            repo: Arc::from(path_segments[1].trim_end_matches(".git")),
        })
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.repo)
    }
}
