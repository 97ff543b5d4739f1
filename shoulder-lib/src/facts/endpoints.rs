use serde::{Deserialize, Serialize};

pub const REGISTRY_BASE_URL: &str = "https://registry.npmjs.org";
pub const DOWNLOADS_BASE_URL: &str = "https://api.npmjs.org/downloads";
pub const NPM_WEB_BASE_URL: &str = "https://www.npmjs.com";
pub const LIBRARIES_IO_BASE_URL: &str = "https://libraries.io/api";
pub const GITHUB_API_BASE_URL: &str = "https://api.github.com";
pub const GITHUB_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";

/// Base URLs of the upstream services.
///
/// Every field can be overridden from the configuration file, which is how the
/// integration tests point the providers at a mock server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Endpoints {
    /// npm registry, serving package metadata
    #[serde(default = "default_registry")]
    pub registry: String,

    /// npm download counts API
    #[serde(default = "default_downloads")]
    pub downloads: String,

    /// npm website, serving the dependents listing
    #[serde(default = "default_npm_web")]
    pub npm_web: String,

    /// libraries.io API
    #[serde(default = "default_libraries_io")]
    pub libraries_io: String,

    /// GitHub REST API
    #[serde(default = "default_github_api")]
    pub github_api: String,

    /// GitHub raw file content
    #[serde(default = "default_github_raw")]
    pub github_raw: String,
}

impl Endpoints {
    /// Point every endpoint at the same base URL.
    #[must_use]
    pub fn all_at(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            registry: format!("{base_url}/registry"),
            downloads: format!("{base_url}/downloads"),
            npm_web: format!("{base_url}/npm"),
            libraries_io: format!("{base_url}/libraries.io"),
            github_api: format!("{base_url}/github-api"),
            github_raw: format!("{base_url}/github-raw"),
        }
    }

    /// Every endpoint with its name, for validation and diagnostics.
    #[must_use]
    pub fn named(&self) -> [(&'static str, &str); 6] {
        [
            ("registry", self.registry.as_str()),
            ("downloads", self.downloads.as_str()),
            ("npm_web", self.npm_web.as_str()),
            ("libraries_io", self.libraries_io.as_str()),
            ("github_api", self.github_api.as_str()),
            ("github_raw", self.github_raw.as_str()),
        ]
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            registry: default_registry(),
            downloads: default_downloads(),
            npm_web: default_npm_web(),
            libraries_io: default_libraries_io(),
            github_api: default_github_api(),
            github_raw: default_github_raw(),
        }
    }
}

fn default_registry() -> String {
    REGISTRY_BASE_URL.to_string()
}

fn default_downloads() -> String {
    DOWNLOADS_BASE_URL.to_string()
}

fn default_npm_web() -> String {
    NPM_WEB_BASE_URL.to_string()
}

fn default_libraries_io() -> String {
    LIBRARIES_IO_BASE_URL.to_string()
}

fn default_github_api() -> String {
    GITHUB_API_BASE_URL.to_string()
}

fn default_github_raw() -> String {
    GITHUB_RAW_BASE_URL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_public_services() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.registry, "https://registry.npmjs.org");
        assert_eq!(endpoints.github_raw, "https://raw.githubusercontent.com");
    }

    #[test]
    fn test_all_at_trims_trailing_slash() {
        let endpoints = Endpoints::all_at("http://127.0.0.1:1234/");
        assert_eq!(endpoints.registry, "http://127.0.0.1:1234/registry");
        assert_eq!(endpoints.github_api, "http://127.0.0.1:1234/github-api");
    }

    #[test]
    fn test_partial_table_fills_defaults() {
        let endpoints: Endpoints = toml::from_str(r#"registry = "http://localhost/registry""#).unwrap();
        assert_eq!(endpoints.registry, "http://localhost/registry");
        assert_eq!(endpoints.downloads, DOWNLOADS_BASE_URL);
    }
}
