//! The single entry point through which the pipeline reads upstream facts.
//!
//! Dependents listings and package metadata are memoized for the lifetime of
//! the source, keyed by the request that produced them. Only successful
//! responses are remembered, so a failed request is attempted again the next
//! time it is asked for.

use super::registry::{DailyDownloads, DownloadRange, PackageInfo};
use super::{Endpoints, hosting, libraries_io, registry};
use crate::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

const LOG_TARGET: &str = "    source";

/// How a dependents listing was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DependentsVia {
    /// libraries.io dependent repositories, resolved to package names
    LibrariesIo,

    /// The registry's own dependents listing
    Registry,
}

/// Identifies a memoized request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum RequestKey {
    Dependents { module: String, via: DependentsVia },
    PackageInfo { module: String },
}

#[derive(Debug, Clone)]
enum CachedValue {
    Dependents(Arc<[String]>),
    PackageInfo(Arc<PackageInfo>),
}

/// Fetches dependents, package metadata, download counts, and repository facts.
#[derive(Debug)]
pub struct StatsSource {
    registry: registry::Provider,
    hosting: hosting::Provider,
    libraries_io: libraries_io::Provider,
    libraries_io_api_key: Option<String>,
    memo: Mutex<HashMap<RequestKey, CachedValue>>,
}

impl StatsSource {
    pub fn new(endpoints: &Endpoints, libraries_io_api_key: Option<String>, github_token: Option<&str>) -> Result<Self> {
        Ok(Self {
            registry: registry::Provider::new(endpoints)?,
            hosting: hosting::Provider::new(endpoints, github_token)?,
            libraries_io: libraries_io::Provider::new(endpoints)?,
            libraries_io_api_key: libraries_io_api_key.filter(|key| !key.is_empty()),
            memo: Mutex::new(HashMap::new()),
        })
    }

    /// List the package names that depend on `module`.
    ///
    /// With a libraries.io API key, dependent repositories hosted on GitHub are
    /// resolved to the package names their manifests declare. Repositories that
    /// cannot be resolved are skipped. Without a key, the registry's dependents
    /// listing is returned as is.
    pub async fn fetch_dependents(&self, module: &str) -> Result<Arc<[String]>> {
        let via = if self.libraries_io_api_key.is_some() {
            DependentsVia::LibrariesIo
        } else {
            DependentsVia::Registry
        };

        let key = RequestKey::Dependents {
            module: module.to_string(),
            via,
        };

        if let Some(CachedValue::Dependents(dependents)) = self.cached(&key) {
            log::debug!(target: LOG_TARGET, "Using memoized dependents of '{module}'");
            return Ok(dependents);
        }

        let dependents: Arc<[String]> = match &self.libraries_io_api_key {
            Some(api_key) => self.resolve_dependent_repositories(module, api_key).await?,
            None => self.registry.get_dependents(module).await?,
        }
        .into();

        self.remember(key, CachedValue::Dependents(Arc::clone(&dependents)));
        Ok(dependents)
    }

    async fn resolve_dependent_repositories(&self, module: &str, api_key: &str) -> Result<Vec<String>> {
        let repositories = self.libraries_io.get_dependent_repositories(module, api_key).await?;
        let mut names = Vec::with_capacity(repositories.len());

        for repository in repositories {
            let Some(repo_url) = repository.github_url() else {
                log::debug!(
                    target: LOG_TARGET,
                    "Skipping dependent '{}' hosted on {}",
                    repository.full_name,
                    repository.host_type.as_deref().unwrap_or("an unknown host")
                );
                continue;
            };

            match self.hosting.get_manifest_name(&repo_url).await {
                Ok(name) => names.push(name),
                Err(e) => log::debug!(target: LOG_TARGET, "Skipping dependent '{repo_url}': {e}"),
            }
        }

        Ok(names)
    }

    /// Fetch the latest published metadata of a package.
    ///
    /// Returns `Ok(None)` when the registry does not know the package.
    pub async fn fetch_package_info(&self, module: &str) -> Result<Option<Arc<PackageInfo>>> {
        let key = RequestKey::PackageInfo {
            module: module.to_string(),
        };

        if let Some(CachedValue::PackageInfo(info)) = self.cached(&key) {
            log::debug!(target: LOG_TARGET, "Using memoized package info for '{module}'");
            return Ok(Some(info));
        }

        let Some(info) = self.registry.get_package_info(module).await? else {
            return Ok(None);
        };

        let info = Arc::new(info);
        self.remember(key, CachedValue::PackageInfo(Arc::clone(&info)));
        Ok(Some(info))
    }

    /// Read the package name from the root manifest of a repository.
    pub async fn fetch_repository_manifest_name(&self, repo_url: &str) -> Result<String> {
        self.hosting.get_manifest_name(repo_url).await
    }

    /// Read the star count of a repository.
    pub async fn fetch_repository_metadata(&self, repo_url: &str) -> Result<u64> {
        self.hosting.get_star_count(repo_url).await
    }

    /// Fetch daily download counts of a package over a range of days.
    pub async fn fetch_download_counts(&self, module: &str, range: &DownloadRange) -> Result<Vec<DailyDownloads>> {
        self.registry.get_download_counts(module, range).await
    }

    fn cached(&self, key: &RequestKey) -> Option<CachedValue> {
        self.memo.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn remember(&self, key: RequestKey, value: CachedValue) {
        let _ = self.memo.lock().unwrap_or_else(PoisonError::into_inner).insert(key, value);
    }
}
