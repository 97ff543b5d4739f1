use crate::Result;
use crate::facts::Endpoints;
use crate::reports::OutputMode;
use crate::stats::MetricName;
use camino::{Utf8Path, Utf8PathBuf};
use core::str::FromStr;
use ohno::{IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory
const CONFIG_FILE_NAME: &str = "shoulder.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Metric used when none is given on the command line
    #[serde(default = "default_metric")]
    pub metric: String,

    /// Output mode used when none is given on the command line
    #[serde(default = "default_output")]
    pub output: OutputMode,

    /// Base URLs of the upstream services
    #[serde(default)]
    pub endpoints: Endpoints,
}

fn default_metric() -> String {
    MetricName::Downloads.to_string()
}

const fn default_output() -> OutputMode {
    OutputMode::Json
}

impl Config {
    /// Load configuration from a file or use defaults
    pub fn load(working_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading shoulder configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = working_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading shoulder configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if MetricName::from_str(&self.metric).is_err() {
            bail!("{} is not a supported metric.", self.metric);
        }

        for (name, base_url) in self.endpoints.named() {
            let url = Url::parse(base_url).into_app_err_with(|| format!("endpoint '{name}' is not a valid URL: '{base_url}'"))?;
            if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
                bail!("endpoint '{name}' must be an absolute http(s) URL, got '{base_url}'");
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
