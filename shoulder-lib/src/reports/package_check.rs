use crate::Result;
use camino::Utf8Path;
use ohno::{IntoAppError, bail};
use serde::Deserialize;
use std::fs;

const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Deserialize)]
struct LocalManifest {
    #[serde(default)]
    name: Option<String>,
}

/// Read the name of the package that lives in `dir`.
pub fn read_package_manifest(dir: &Utf8Path) -> Result<String> {
    let path = dir.join(MANIFEST_FILE);

    let Ok(text) = fs::read_to_string(&path) else {
        bail!("The folder {dir} contain no valid package.");
    };

    let Ok(manifest) = serde_json::from_str::<LocalManifest>(&text) else {
        bail!("The folder {dir} contain no valid package.");
    };

    manifest
        .name
        .filter(|name| !name.is_empty())
        .into_app_err_with(|| format!("The package in {dir} has no name."))
}

/// The name of the package in `dir`, if there is a valid one.
#[must_use]
pub fn package_name_in(dir: &Utf8Path) -> Option<String> {
    read_package_manifest(dir).ok()
}
