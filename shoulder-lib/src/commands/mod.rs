//! Command-line interface for shoulder
//!
//! This module parses the command line, loads the configuration, sets up
//! logging, and drives the pipeline that ranks a package's dependents.
//!
//! # Execution Flow
//!
//! 1. Parse arguments with clap and initialise logging
//! 2. Load `shoulder.toml` (or the file given with `--config`) over the
//!    embedded defaults
//! 3. Parse the metric, failing before any request is made if it is unknown
//! 4. Resolve `.` to the package in the working directory
//! 5. Discover, verify, and rank dependents, reporting dropped ones as warnings
//! 6. Render the ranking in the selected output mode
//!
//! All interaction with the process environment goes through [`Host`], so the
//! whole flow can run against in-memory buffers in tests.

mod common;
mod config;
mod host;
mod run;

#[cfg(debug_assertions)]
pub use config::Config;

pub use host::Host;
pub use run::run;
