//! Find the projects that depend on an npm package, ranked by popularity.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use camino::Utf8PathBuf;
use ohno::IntoAppError;
use shoulder_lib::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host bound to the real process environment.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn working_dir(&self) -> Result<Utf8PathBuf, ohno::AppError> {
        let dir = std::env::current_dir().into_app_err("determining the current directory")?;
        Utf8PathBuf::try_from(dir).into_app_err("the current directory is not valid UTF-8")
    }
}

#[tokio::main(flavor = "current_thread")]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
