mod endpoints;
pub mod hosting;
mod http;
mod identity;
pub mod libraries_io;
pub mod registry;
mod repo_spec;
mod stats_source;

pub use endpoints::Endpoints;
pub use identity::{IdentifierKind, classify, is_package_name, is_repo_url, normalize_declared_repository, normalize_repo_url};
pub use repo_spec::RepoSpec;
pub use stats_source::StatsSource;
