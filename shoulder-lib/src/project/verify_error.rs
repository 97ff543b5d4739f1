use core::fmt::{Display, Formatter};

/// Why a project could not be verified.
#[derive(Debug)]
pub enum VerifyError {
    /// The run cannot continue without this project.
    Fatal(ohno::AppError),

    /// The project can be dropped and the run continued.
    Recoverable(ohno::AppError),
}

impl VerifyError {
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// Unwrap the underlying error, forgetting whether it was recoverable.
    #[must_use]
    pub fn into_inner(self) -> ohno::AppError {
        match self {
            Self::Fatal(e) | Self::Recoverable(e) => e,
        }
    }
}

impl Display for VerifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fatal(e) | Self::Recoverable(e) => Display::fmt(e, f),
        }
    }
}

impl core::error::Error for VerifyError {}
