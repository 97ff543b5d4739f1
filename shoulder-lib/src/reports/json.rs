use super::OutputContext;
use crate::Result;
use core::fmt::Write;
use serde_json::json;

/// A JSON object holding the ranked identifiers.
///
/// The queried package is named in the output unless it is the package in the
/// working directory.
pub fn generate<W: Write>(projects: &[String], context: &OutputContext, writer: &mut W) -> Result<()> {
    let mut output = serde_json::Map::new();

    if context.local_package_name.as_deref() != Some(context.package_name.as_str()) {
        let _ = output.insert("package".to_string(), json!(context.package_name));
    }

    let _ = output.insert("projects".to_string(), json!(projects));

    writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
