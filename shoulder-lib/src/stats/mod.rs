//! Metrics, their aggregation across projects, and ranking.

mod metric;
mod metric_result;
mod project_stats;
mod ranking;

pub use metric::{DownloadWindow, Metric, MetricName};
pub use metric_result::MetricResult;
pub use project_stats::ProjectStats;
pub use ranking::rank;
