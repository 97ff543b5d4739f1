use crate::Result;
use core::fmt::Write;

/// One identifier per line.
pub fn generate<W: Write>(projects: &[String], writer: &mut W) -> Result<()> {
    for project in projects {
        writeln!(writer, "{project}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_per_line() {
        let mut output = String::new();
        generate(&["a".to_string(), "b".to_string()], &mut output).unwrap();
        assert_eq!(output, "a\nb\n");
    }

    #[test]
    fn test_empty() {
        let mut output = String::new();
        generate(&[], &mut output).unwrap();
        assert!(output.is_empty());
    }
}
