use super::package_info::{DailyDownloads, DependentsPage, DownloadRange, DownloadsResponse, PackageDocument, PackageInfo};
use crate::Result;
use crate::facts::Endpoints;
use crate::facts::http;
use ohno::{EnrichableExt, IntoAppError, bail};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};

const LOG_TARGET: &str = "  registry";

/// Header that makes the npm website answer with JSON instead of HTML.
const SPIFERACK_HEADER: &str = "x-spiferack";

/// Guards against a listing that keeps claiming there is another page.
const MAX_DEPENDENT_PAGES: usize = 1000;

/// Reads package metadata, download counts, and dependents from npm.
#[derive(Debug, Clone)]
pub struct Provider {
    client: reqwest::Client,
    registry_url: String,
    downloads_url: String,
    npm_web_url: String,
}

impl Provider {
    pub fn new(endpoints: &Endpoints) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(SPIFERACK_HEADER, HeaderValue::from_static("1"));

        Ok(Self {
            client: http::build_client(headers)?,
            registry_url: endpoints.registry.trim_end_matches('/').to_string(),
            downloads_url: endpoints.downloads.trim_end_matches('/').to_string(),
            npm_web_url: endpoints.npm_web.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the manifest of the latest published version of a package.
    ///
    /// Returns `Ok(None)` when the registry does not know the package.
    pub async fn get_package_info(&self, name: &str) -> Result<Option<PackageInfo>> {
        self.fetch_package_info(name)
            .await
            .map_err(|e| e.enrich_with(|| format!("error fetching package.json for \"{name}\"")))
    }

    async fn fetch_package_info(&self, name: &str) -> Result<Option<PackageInfo>> {
        // the `/latest` shortcut is not served for scoped packages
        let scoped = name.starts_with('@');
        let url = if scoped {
            format!("{}/{name}", self.registry_url)
        } else {
            format!("{}/{name}/latest", self.registry_url)
        };

        let response = http::get(self.client.get(&url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            log::debug!(target: LOG_TARGET, "Package '{name}' is not in the registry");
            return Ok(None);
        }

        if !scoped {
            return http::decode_json::<PackageInfo>(response).await.map(Some);
        }

        let document: PackageDocument = http::decode_json(response).await?;
        document
            .into_latest()
            .map(Some)
            .into_app_err_with(|| format!("no latest version published for \"{name}\""))
    }

    /// Fetch daily download counts for a package over the given range.
    pub async fn get_download_counts(&self, name: &str, range: &DownloadRange) -> Result<Vec<DailyDownloads>> {
        let url = format!("{}/range/{range}/{name}", self.downloads_url);

        let response = http::get(self.client.get(&url))
            .await
            .map_err(|e| e.enrich_with(|| format!("error fetching downloads for \"{name}\"")))?;
        let status = response.status();

        // failures are reported in the body, usually alongside a 404
        let body: DownloadsResponse = response
            .json()
            .await
            .into_app_err_with(|| format!("error fetching downloads for \"{name}\": unreadable response ({status})"))?;

        if let Some(error) = body.error {
            bail!("error fetching downloads for \"{name}\": {error}");
        }

        if !status.is_success() {
            bail!("error fetching downloads for \"{name}\": unexpected HTTP status {status}");
        }

        Ok(body.downloads)
    }

    /// List the names of every package the npm website reports as depending on `name`.
    pub async fn get_dependents(&self, name: &str) -> Result<Vec<String>> {
        let url = format!("{}/browse/depended/{name}", self.npm_web_url);
        let mut dependents = Vec::new();
        let mut offset = 0_usize;

        for _ in 0..MAX_DEPENDENT_PAGES {
            let request = self.client.get(&url).query(&[("offset", offset)]);
            let page: DependentsPage = http::get_json(request)
                .await
                .map_err(|e| e.enrich_with(|| format!("listing dependents of \"{name}\" at offset {offset}")))?;

            let received = page.packages.len();
            dependents.extend(page.packages.into_iter().map(|entry| entry.name));

            let step = page.pagination_size.unwrap_or(received);
            if !page.has_next || step == 0 {
                log::debug!(target: LOG_TARGET, "Found {} dependents of '{name}'", dependents.len());
                return Ok(dependents);
            }

            offset += step;
        }

        log::warn!(target: LOG_TARGET, "Stopped listing dependents of '{name}' after {MAX_DEPENDENT_PAGES} pages");
        Ok(dependents)
    }
}
