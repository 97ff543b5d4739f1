//! End-to-end discovery, verification, and ranking of a package's dependents.

use crate::Result;
use crate::facts::StatsSource;
use crate::project::Project;
use crate::stats::{Metric, ProjectStats, rank};
use futures_util::future::try_join_all;
use ohno::bail;

const LOG_TARGET: &str = "  pipeline";

/// Receives warnings about dependents dropped from a run.
pub trait WarningSink {
    fn warn(&mut self, message: &str);
}

impl WarningSink for Vec<String> {
    fn warn(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Ranks the dependents of one package.
#[derive(Debug)]
pub struct Shoulder<'a> {
    package: String,
    source: &'a StatsSource,
}

impl<'a> Shoulder<'a> {
    pub fn new(package: &str, source: &'a StatsSource) -> Result<Self> {
        let package = package.trim();
        if package.is_empty() {
            bail!("missing package");
        }

        Ok(Self {
            package: package.to_string(),
            source,
        })
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Discover, verify, and rank the dependents of the package by `metric`.
    ///
    /// Dependents that cannot be verified for a recoverable reason are reported
    /// to `warnings` and left out. Any other failure ends the run.
    pub async fn run(&self, metric: &Metric, warnings: &mut impl WarningSink) -> Result<Vec<String>> {
        log::info!(target: LOG_TARGET, "Discovering dependents of '{}'", self.package);
        let dependents = self.source.fetch_dependents(&self.package).await?;

        let projects = dependents
            .iter()
            .map(|identifier| Project::new(identifier))
            .collect::<Result<Vec<_>>>()?;

        log::info!(target: LOG_TARGET, "Verifying {} dependents", projects.len());
        let projects = self.verify_all(projects, metric, warnings).await?;

        log::info!(target: LOG_TARGET, "Fetching {} for {} dependents", metric.name(), projects.len());
        let result = ProjectStats::new(self.source, &projects).fetch_metric_for_projects(metric).await;

        Ok(rank(result))
    }

    async fn verify_all(&self, projects: Vec<Project>, metric: &Metric, warnings: &mut impl WarningSink) -> Result<Vec<Project>> {
        let field = metric.required_field();

        // the first fatal failure ends the wait, pending siblings are dropped
        let outcomes = try_join_all(projects.into_iter().map(|project| async move {
            match project.verify(field, self.source).await {
                Ok(project) => Ok(Ok(project)),
                Err(e) if e.is_fatal() => Err(e.into_inner()),
                Err(e) => Ok(Err(e.into_inner())),
            }
        }))
        .await?;

        let mut verified = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok(project) => verified.push(project),
                Err(e) => {
                    let message = e.message();
                    log::warn!(target: LOG_TARGET, "Dropping dependent: {message}");
                    warnings.warn(&message);
                }
            }
        }

        Ok(verified)
    }
}
