//! Dependent projects and their verification.

mod dependent;
mod verify_error;

pub use dependent::Project;
pub use verify_error::VerifyError;

/// An identity a project can be known by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityField {
    /// The package name in the npm registry
    NpmName,

    /// The `https://` URL of the source repository
    RepoUrl,
}
