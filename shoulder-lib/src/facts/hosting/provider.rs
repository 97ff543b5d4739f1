use super::client::Client;
use crate::Result;
use crate::facts::{Endpoints, RepoSpec};
use ohno::{IntoAppError, bail};

const LOG_TARGET: &str = "   hosting";

/// The only host whose repositories we know how to read.
const SUPPORTED_HOST: &str = "github.com";

/// Reads repository metadata and root manifests from GitHub.
#[derive(Debug, Clone)]
pub struct Provider {
    client: Client,
}

impl Provider {
    pub fn new(endpoints: &Endpoints, token: Option<&str>) -> Result<Self> {
        if token.is_none() {
            log::debug!(target: LOG_TARGET, "No GitHub token configured, API calls are subject to anonymous rate limits");
        }

        Ok(Self {
            client: Client::new(token, &endpoints.github_api, &endpoints.github_raw)?,
        })
    }

    /// Read the package name declared in the root `package.json` of a repository.
    pub async fn get_manifest_name(&self, repo_url: &str) -> Result<String> {
        let repo_spec = supported_repo(repo_url)?;

        let manifest = match self.client.get_manifest(repo_spec.owner(), repo_spec.repo()).await {
            Ok(manifest) => manifest,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Could not fetch package.json for '{repo_spec}': {e:#}");
                bail!("error fetching package.json for {repo_url}");
            }
        };

        manifest
            .name
            .filter(|name| !name.is_empty())
            .into_app_err_with(|| format!("missing name in package.json for {repo_url}"))
    }

    /// Read the star count of a repository, treating an absent count as zero.
    pub async fn get_star_count(&self, repo_url: &str) -> Result<u64> {
        let repo_spec = supported_repo(repo_url)?;

        match self.client.get_repository(repo_spec.owner(), repo_spec.repo()).await {
            Ok(repository) => Ok(repository.stargazers_count.unwrap_or(0)),
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Could not fetch repository metadata for '{repo_spec}': {e:#}");
                bail!("error fetching repository metadata for {repo_url}");
            }
        }
    }
}

fn supported_repo(repo_url: &str) -> Result<RepoSpec> {
    let repo_spec = RepoSpec::parse(repo_url)?;
    if repo_spec.host() != SUPPORTED_HOST {
        bail!("unsupported repository host '{}' for {repo_url}", repo_spec.host());
    }

    Ok(repo_spec)
}
