use crate::Result;
use crate::facts::registry::DownloadRange;
use crate::project::IdentityField;
use chrono::{DateTime, TimeDelta, Utc};
use core::str::FromStr;
use ohno::bail;
use strum::{Display, EnumString};

/// Length of the trailing window download counts are summed over.
const DOWNLOAD_WINDOW_DAYS: i64 = 7;

/// The names metrics are selected by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MetricName {
    Downloads,
    Stars,
}

/// The trailing window of days download counts are summed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DownloadWindow {
    range: DownloadRange,
}

impl DownloadWindow {
    /// The week ending at `now`, in UTC calendar days.
    #[must_use]
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        let since = (now - TimeDelta::days(DOWNLOAD_WINDOW_DAYS)).date_naive();
        Self {
            range: DownloadRange::new(since, now.date_naive()),
        }
    }

    #[must_use]
    pub const fn range(&self) -> &DownloadRange {
        &self.range
    }
}

/// A popularity measure dependents can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Registry downloads summed over a window of days
    Downloads(DownloadWindow),

    /// Stars of the GitHub repository
    Stars,
}

impl Metric {
    /// Parse a metric name, anchoring time-based metrics at `now`.
    pub fn parse(name: &str, now: DateTime<Utc>) -> Result<Self> {
        let Ok(metric_name) = MetricName::from_str(name) else {
            bail!("{name} is not a supported metric.");
        };

        Ok(match metric_name {
            MetricName::Downloads => Self::Downloads(DownloadWindow::ending_at(now)),
            MetricName::Stars => Self::Stars,
        })
    }

    #[must_use]
    pub const fn name(&self) -> MetricName {
        match self {
            Self::Downloads(_) => MetricName::Downloads,
            Self::Stars => MetricName::Stars,
        }
    }

    /// The identity a project must carry before this metric can be fetched for it.
    #[must_use]
    pub const fn required_field(&self) -> IdentityField {
        match self {
            Self::Downloads(_) => IdentityField::NpmName,
            Self::Stars => IdentityField::RepoUrl,
        }
    }
}
