use chrono::NaiveDate;
use core::fmt::{Display, Formatter};
use serde::Deserialize;
use std::collections::HashMap;

/// The manifest of one published version of a package, limited to the fields we use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageInfo {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub repository: Option<RepositoryField>,
}

/// The `repository` field of a manifest, which comes in a shorthand and a long form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RepositoryField {
    /// `"repository": "https://github.com/org/repo"`
    Url(String),

    /// `"repository": { "type": "git", "url": "..." }`
    Detailed {
        #[serde(default)]
        url: Option<String>,
    },

    /// Anything else a publisher managed to put there
    Other(serde_json::Value),
}

impl RepositoryField {
    /// The declared URL, if the field carries one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) | Self::Detailed { url: Some(url) } => Some(url),
            Self::Detailed { url: None } | Self::Other(_) => None,
        }
    }
}

/// The full registry document of a package, as served for scoped names.
#[derive(Debug, Deserialize)]
pub(super) struct PackageDocument {
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: HashMap<String, String>,

    #[serde(default)]
    pub versions: HashMap<String, PackageInfo>,
}

impl PackageDocument {
    /// The manifest of the version the `latest` tag points at.
    pub fn into_latest(mut self) -> Option<PackageInfo> {
        let latest = self.dist_tags.get("latest")?;
        self.versions.remove(latest)
    }
}

/// Download count for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyDownloads {
    #[serde(default)]
    pub day: Option<String>,

    pub downloads: u64,
}

/// Body of a download counts response, which reports failures in-band.
#[derive(Debug, Deserialize)]
pub(super) struct DownloadsResponse {
    #[serde(default)]
    pub downloads: Vec<DailyDownloads>,

    #[serde(default)]
    pub error: Option<String>,
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DownloadRange {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl DownloadRange {
    #[must_use]
    pub const fn new(since: NaiveDate, until: NaiveDate) -> Self {
        Self { since, until }
    }
}

/// Formats as the `YYYY-MM-DD:YYYY-MM-DD` period segment of a downloads request.
impl Display for DownloadRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.since.format("%Y-%m-%d"), self.until.format("%Y-%m-%d"))
    }
}

/// One page of the dependents listing.
#[derive(Debug, Deserialize)]
pub(super) struct DependentsPage {
    #[serde(default)]
    pub packages: Vec<DependentEntry>,

    #[serde(rename = "hasNext", default)]
    pub has_next: bool,

    #[serde(rename = "paginationSize", default)]
    pub pagination_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DependentEntry {
    pub name: String,
}
