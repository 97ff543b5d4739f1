use super::{DownloadWindow, Metric, MetricResult};
use crate::facts::StatsSource;
use crate::project::{IdentityField, Project};
use futures_util::future::join_all;

const LOG_TARGET: &str = "     stats";

/// Fetches the magnitude of a metric for a set of verified projects.
///
/// A project whose magnitude cannot be fetched scores zero. A project lacking
/// the identity the metric needs is left out.
#[derive(Debug)]
pub struct ProjectStats<'a> {
    source: &'a StatsSource,
    projects: &'a [Project],
}

impl<'a> ProjectStats<'a> {
    #[must_use]
    pub const fn new(source: &'a StatsSource, projects: &'a [Project]) -> Self {
        Self { source, projects }
    }

    pub async fn fetch_metric_for_projects(&self, metric: &Metric) -> MetricResult {
        match metric {
            Metric::Downloads(window) => self.fetch_downloads_for_projects(window).await,
            Metric::Stars => self.fetch_stars_for_projects().await,
        }
    }

    /// Sum each project's daily downloads over `window`, all projects at once.
    pub async fn fetch_downloads_for_projects(&self, window: &DownloadWindow) -> MetricResult {
        let names = self.identities(IdentityField::NpmName);

        let futures = names.iter().map(|name| async move {
            match self.source.fetch_download_counts(name, window.range()).await {
                Ok(days) => days.iter().map(|day| day.downloads).sum::<u64>(),
                Err(e) => {
                    log::debug!(target: LOG_TARGET, "Counting no downloads for '{name}': {e}");
                    0
                }
            }
        });

        let totals = join_all(futures).await;
        names.into_iter().zip(totals).collect()
    }

    /// Read each project's star count, one repository at a time.
    pub async fn fetch_stars_for_projects(&self) -> MetricResult {
        let mut result = MetricResult::new();

        for repo_url in self.identities(IdentityField::RepoUrl) {
            let stars = match self.source.fetch_repository_metadata(repo_url).await {
                Ok(stars) => stars,
                Err(e) => {
                    log::debug!(target: LOG_TARGET, "Counting no stars for '{repo_url}': {e}");
                    0
                }
            };

            result.insert(repo_url, stars);
        }

        result
    }

    fn identities(&self, field: IdentityField) -> Vec<&'a str> {
        self.projects
            .iter()
            .filter_map(|project| {
                let identity = project.get(field);
                if identity.is_none() {
                    log::debug!(target: LOG_TARGET, "Leaving out unverified project '{}'", project.name());
                }
                identity
            })
            .collect()
    }
}
