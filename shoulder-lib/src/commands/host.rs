use crate::Result;
use camino::Utf8PathBuf;
use std::io::Write;

/// Abstract the host environment to enable testing
pub trait Host: Send + Sync {
    // where to send normal output (e.g., stdout)
    fn output(&mut self) -> impl Write;

    // where to send warnings and diagnostics (e.g., stderr)
    fn error(&mut self) -> impl Write;

    /// The directory the tool was invoked from.
    fn working_dir(&self) -> Result<Utf8PathBuf>;
}

/// Test host that captures output to in-memory buffers
#[cfg(test)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub working_dir: Utf8PathBuf,
}

#[cfg(test)]
impl TestHost {
    pub fn new(working_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
            working_dir: working_dir.into(),
        }
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn working_dir(&self) -> Result<Utf8PathBuf> {
        Ok(self.working_dir.clone())
    }
}
