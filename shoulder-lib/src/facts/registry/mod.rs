mod package_info;
mod provider;

pub use package_info::{DailyDownloads, DownloadRange, PackageInfo, RepositoryField};
pub use provider::Provider;
