use super::{IdentityField, VerifyError};
use crate::Result;
use crate::facts::{IdentifierKind, StatsSource, classify, is_repo_url, normalize_declared_repository, normalize_repo_url};
use ohno::{app_err, bail};

const LOG_TARGET: &str = "   project";

/// A dependent of the package being inspected.
///
/// A project starts out knowing a single identity, either its package name or
/// its repository URL, depending on how it was discovered. Verification fills
/// in the other identity when a metric needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    kind: IdentifierKind,
    npm_name: Option<String>,
    repo_url: Option<String>,
}

impl Project {
    /// Create a project from a package name or repository URL.
    pub fn new(identifier: &str) -> Result<Self> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            bail!("project supplied without name");
        }

        let project = match classify(identifier)? {
            IdentifierKind::Npm => Self {
                kind: IdentifierKind::Npm,
                npm_name: Some(identifier.to_string()),
                repo_url: None,
            },
            IdentifierKind::Git => Self {
                kind: IdentifierKind::Git,
                npm_name: None,
                repo_url: Some(normalize_repo_url(identifier)),
            },
        };

        Ok(project)
    }

    #[must_use]
    pub const fn kind(&self) -> IdentifierKind {
        self.kind
    }

    #[must_use]
    pub fn npm_name(&self) -> Option<&str> {
        self.npm_name.as_deref()
    }

    #[must_use]
    pub fn repo_url(&self) -> Option<&str> {
        self.repo_url.as_deref()
    }

    /// The identity the project was created with.
    #[must_use]
    pub fn name(&self) -> &str {
        let name = match self.kind {
            IdentifierKind::Npm => self.npm_name(),
            IdentifierKind::Git => self.repo_url(),
        };

        name.unwrap_or_default()
    }

    #[must_use]
    pub fn get(&self, field: IdentityField) -> Option<&str> {
        match field {
            IdentityField::NpmName => self.npm_name(),
            IdentityField::RepoUrl => self.repo_url(),
        }
    }

    /// Make sure the project knows the identity `field`, looking it up if needed.
    ///
    /// Does nothing when the field is already known. A repository whose manifest
    /// cannot be read is fatal. A package without a usable repository is
    /// recoverable.
    pub async fn verify(mut self, field: IdentityField, source: &StatsSource) -> Result<Self, VerifyError> {
        if self.get(field).is_some() {
            return Ok(self);
        }

        match self.kind {
            IdentifierKind::Git => {
                let repo_url = self.name().to_string();
                let npm_name = source.fetch_repository_manifest_name(&repo_url).await.map_err(|e| {
                    log::debug!(target: LOG_TARGET, "Could not resolve repository '{repo_url}': {e}");
                    VerifyError::Fatal(app_err!("unable to access repository {repo_url}"))
                })?;

                self.npm_name = Some(npm_name);
            }

            IdentifierKind::Npm => {
                let npm_name = self.name().to_string();
                self.repo_url = Some(resolve_repository(&npm_name, source).await?);
            }
        }

        Ok(self)
    }
}

async fn resolve_repository(npm_name: &str, source: &StatsSource) -> Result<String, VerifyError> {
    let info = match source.fetch_package_info(npm_name).await {
        Ok(Some(info)) => info,
        Ok(None) => return Err(VerifyError::Recoverable(app_err!("unable to access package \"{npm_name}\""))),
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Could not fetch package '{npm_name}': {e}");
            return Err(VerifyError::Fatal(app_err!("unable to access package {npm_name}")));
        }
    };

    let Some(repository) = &info.repository else {
        return Err(VerifyError::Recoverable(app_err!("repository is missing for project {npm_name}")));
    };

    let declared = repository.url().map(normalize_declared_repository);
    match declared {
        Some(url) if is_repo_url(&url) => Ok(normalize_repo_url(&url)),
        _ => Err(VerifyError::Recoverable(app_err!("repository is invalid for project {npm_name}"))),
    }
}
