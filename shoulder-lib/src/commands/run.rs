//! Command-line entry point for shoulder

use super::common::{LogLevel, init_logging};
use super::config::Config;
use crate::facts::StatsSource;
use crate::pipeline::{Shoulder, WarningSink};
use crate::reports::{self, OutputContext, OutputMode, package_name_in, read_package_manifest};
use crate::stats::Metric;
use crate::{Host, Result};
use camino::Utf8PathBuf;
use chrono::Utc;
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use ohno::IntoAppError;
use std::io::Write;

const LOG_TARGET: &str = "       run";

/// Stands for the package in the working directory
const CURRENT_PACKAGE: &str = ".";

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "shoulder", version, author, long_about = None)]
#[command(about = "Find the projects that depend on an npm package, ranked by popularity")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    /// Package whose dependents are ranked, `.` for the package in the current directory
    #[arg(long, short = 'p', value_name = "NAME", default_value = CURRENT_PACKAGE)]
    package: String,

    /// Metric to rank by: `downloads` or `stars` (default from configuration)
    #[arg(long, short = 'm', value_name = "METRIC")]
    metric: Option<String>,

    /// How to print the ranking (default from configuration)
    #[arg(long, short = 'o', value_name = "MODE")]
    output: Option<OutputMode>,

    /// libraries.io API key, switches dependents discovery to libraries.io
    #[arg(long = "librariesio", value_name = "KEY", env = "LIBRARIES_IO_API_KEY", hide_env_values = true)]
    libraries_io_api_key: Option<String>,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Path to configuration file (default is `shoulder.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    log_level: LogLevel,
}

/// Writes each warning to the host's error stream as it arrives.
struct HostWarnings<'a, H: Host> {
    host: &'a mut H,
}

impl<H: Host> WarningSink for HostWarnings<'_, H> {
    fn warn(&mut self, message: &str) {
        let _ = writeln!(self.host.error(), "warning: {message}");
    }
}

/// Parse command-line arguments, rank the dependents of the selected package,
/// and print the ranking.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    init_logging(cli.log_level);

    let working_dir = host.working_dir()?;
    let config = Config::load(&working_dir, cli.config.as_ref())?;

    // an unusable metric ends the run before anything is fetched
    let metric = Metric::parse(cli.metric.as_deref().unwrap_or(&config.metric), Utc::now())?;
    let output_mode = cli.output.unwrap_or(config.output);

    let package = if cli.package.trim() == CURRENT_PACKAGE {
        read_package_manifest(&working_dir)?
    } else {
        cli.package.trim().to_string()
    };

    log::info!(target: LOG_TARGET, "Ranking dependents of '{package}' by {}", metric.name());

    let source = StatsSource::new(&config.endpoints, cli.libraries_io_api_key, cli.github_token.as_deref())?;
    let shoulder = Shoulder::new(&package, &source)?;
    let projects = shoulder.run(&metric, &mut HostWarnings { host: &mut *host }).await?;

    let context = OutputContext {
        package_name: shoulder.package().to_string(),
        local_package_name: package_name_in(&working_dir),
    };

    let mut rendered = String::new();
    reports::generate(output_mode, &projects, &context, &mut rendered)?;

    host.output()
        .write_all(rendered.as_bytes())
        .into_app_err("writing output")?;

    Ok(())
}
