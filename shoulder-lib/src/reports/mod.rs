//! Rendering of ranked dependents
//!
//! Three renderers are provided, each accessed through a `generate` function
//! writing to a [`core::fmt::Write`]:
//! - **list**: one identifier per line
//! - **nbsp**: every identifier on one line, separated by spaces
//! - **json**: an object with the ranked identifiers and, unless the tool runs
//!   inside the queried package's own folder, the package name
//!
//! The `package_check` module answers whether a folder holds a package and
//! what it is called, which decides both what `.` means on the command line and
//! whether the JSON output names the package.

mod json;
mod list;
mod nbsp;
mod package_check;

use crate::Result;
use clap::ValueEnum;
use core::fmt::Write;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub use package_check::{package_name_in, read_package_manifest};

/// How ranked dependents are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Display, EnumString, Deserialize, Serialize)]
#[value(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// A JSON object
    Json,

    /// One identifier per line
    List,

    /// Identifiers separated by spaces
    Nbsp,
}

/// What a renderer knows about the invocation besides the ranking itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputContext {
    /// The package whose dependents were ranked
    pub package_name: String,

    /// The package in the working directory, if there is one
    pub local_package_name: Option<String>,
}

/// Render `projects` in the given mode.
pub fn generate<W: Write>(mode: OutputMode, projects: &[String], context: &OutputContext, writer: &mut W) -> Result<()> {
    match mode {
        OutputMode::Json => json::generate(projects, context, writer),
        OutputMode::List => list::generate(projects, writer),
        OutputMode::Nbsp => nbsp::generate(projects, writer),
    }
}
