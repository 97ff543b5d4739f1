use crate::Result;
use core::fmt::Write;

/// All identifiers on a single line, separated by spaces.
pub fn generate<W: Write>(projects: &[String], writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", projects.join(" "))?;
    Ok(())
}
