//! Classification and normalization of dependent identifiers.
//!
//! A dependent is named either by its npm package name or by the URL of the
//! repository that hosts it. Package names follow the registry's legacy rules
//! (anything that was ever publishable), repository URLs must be absolute and
//! use a scheme git understands.

use crate::Result;
use ohno::bail;
use url::Url;

const GIT_SUFFIX: &str = ".git";

/// Names the registry refuses outright, regardless of scope.
const RESERVED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

/// Schemes accepted for repository URLs once any `git+` prefix is gone.
const VCS_SCHEMES: &[&str] = &["git", "ssh", "http", "https"];

/// The kind of identity a raw dependent identifier carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// An npm package name
    Npm,

    /// A source repository URL
    Git,
}

/// Returns `true` if `name` is a valid npm package name for new or legacy packages.
#[must_use]
pub fn is_package_name(name: &str) -> bool {
    if name.is_empty() || name.trim() != name {
        return false;
    }

    if name.starts_with('.') || name.starts_with('_') {
        return false;
    }

    if RESERVED_NAMES.contains(&name) {
        return false;
    }

    if is_url_component(name) {
        return true;
    }

    // `@scope/name` is the one shape allowed to contain characters outside a URL component
    match name.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        Some((scope, package)) => is_url_component(scope) && is_url_component(package),
        None => false,
    }
}

/// Returns `true` if `value` is an absolute URL naming a repository reachable with git.
#[must_use]
pub fn is_repo_url(value: &str) -> bool {
    let Ok(url) = Url::parse(value) else {
        return false;
    };

    if url.host_str().is_none_or(str::is_empty) {
        return false;
    }

    if url.path_segments().is_none_or(|mut segments| segments.all(str::is_empty)) {
        return false;
    }

    // with a `.git` suffix in place, any of these schemes yields a cloneable URL
    VCS_SCHEMES.contains(&url.scheme())
}

/// Strip any trailing `.git` and rewrite `git://` and `ssh://` URLs to `https://`.
#[must_use]
pub fn normalize_repo_url(raw: &str) -> String {
    let trimmed = raw.trim_end_matches(GIT_SUFFIX);

    for scheme in ["git://", "ssh://"] {
        if let Some(rest) = trimmed.strip_prefix(scheme) {
            return format!("https://{rest}");
        }
    }

    trimmed.to_string()
}

/// Decide whether `identifier` names an npm package or a repository.
pub fn classify(identifier: &str) -> Result<IdentifierKind> {
    if is_package_name(identifier) {
        return Ok(IdentifierKind::Npm);
    }

    if is_repo_url(identifier) {
        return Ok(IdentifierKind::Git);
    }

    bail!("project {identifier} is not a package name or a repository")
}

/// Turn a `repository` value declared in a package manifest into a URL that
/// [`is_repo_url`] can judge.
///
/// Drops the `git+` transport prefix and any `#ref` fragment, and rewrites
/// scp-style `git@host:org/repo` into `ssh://git@host/org/repo`.
#[must_use]
pub fn normalize_declared_repository(raw: &str) -> String {
    let raw = raw.trim();
    let without_fragment = raw.split_once('#').map_or(raw, |(url, _)| url);
    let without_prefix = without_fragment.strip_prefix("git+").unwrap_or(without_fragment);

    if !without_prefix.contains("://")
        && let Some((user_host, path)) = without_prefix.split_once(':')
        && user_host.contains('@')
    {
        return format!("ssh://{user_host}/{}", path.trim_start_matches('/'));
    }

    without_prefix.to_string()
}

/// Characters left alone by JavaScript's `encodeURIComponent`.
fn is_url_component(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_name_simple() {
        assert!(is_package_name("somepackage"));
        assert!(is_package_name("some-package"));
        assert!(is_package_name("some.package"));
        assert!(is_package_name("lodash.merge"));
    }

    #[test]
    fn test_package_name_scoped() {
        assert!(is_package_name("@namespace/foo"));
        assert!(is_package_name("@service.tld/foo"));
    }

    #[test]
    fn test_package_name_legacy_forms() {
        // no longer publishable, but old packages still carry these
        assert!(is_package_name("JSONStream"));
        assert!(is_package_name("http"));
        assert!(is_package_name("really(old)"));
        assert!(is_package_name(&"a".repeat(300)));
    }

    #[test]
    fn test_package_name_rejects_invalid() {
        assert!(!is_package_name(""));
        assert!(!is_package_name(" foo"));
        assert!(!is_package_name("foo "));
        assert!(!is_package_name(".hidden"));
        assert!(!is_package_name("_private"));
        assert!(!is_package_name("node_modules"));
        assert!(!is_package_name("favicon.ico"));
        assert!(!is_package_name("@FOO"));
        assert!(!is_package_name("foo/bar"));
        assert!(!is_package_name("@scope/"));
        assert!(!is_package_name("@/foo"));
        assert!(!is_package_name("with space"));
        assert!(!is_package_name("https://github.com/org/repo"));
    }

    #[test]
    fn test_repo_url_accepts() {
        assert!(is_repo_url("https://foo/bar.git"));
        assert!(is_repo_url("https://foo/bar"));
        assert!(is_repo_url("https://github.com/org/repo"));
        assert!(is_repo_url("git://github.com/org/repo.git"));
        assert!(is_repo_url("ssh://git@github.com/org/repo.git"));
        assert!(is_repo_url("http://service.tld/foo"));
    }

    #[test]
    fn test_repo_url_rejects() {
        assert!(!is_repo_url("foo"));
        assert!(!is_repo_url("foo/bar"));
        assert!(!is_repo_url("foo/bar.git"));
        assert!(!is_repo_url("https://github.com"));
        assert!(!is_repo_url("https://github.com/"));
        assert!(!is_repo_url("ftp://example.com/repo.git"));
        assert!(!is_repo_url("git+https://github.com/org/repo"));
        assert!(!is_repo_url("mailto:someone@example.com"));
    }

    #[test]
    fn test_normalize_strips_git_suffix() {
        assert_eq!(normalize_repo_url("https://github.com/org/repo.git"), "https://github.com/org/repo");
    }

    #[test]
    fn test_normalize_rewrites_schemes() {
        assert_eq!(normalize_repo_url("git://github.com/org/repo.git"), "https://github.com/org/repo");
        assert_eq!(normalize_repo_url("ssh://github.com/org/repo.git"), "https://github.com/org/repo");
        assert_eq!(normalize_repo_url("https://github.com/org/repo"), "https://github.com/org/repo");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "https://github.com/org/repo",
            "git://github.com/org/repo.git",
            "ssh://git@github.com/org/repo.git",
            "https://github.com/org/repo.git.git",
            "http://service.tld/foo",
            "not a url",
        ];

        for input in inputs {
            let once = normalize_repo_url(input);
            assert_eq!(normalize_repo_url(&once), once, "not idempotent for {input}");
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("somepackage").unwrap(), IdentifierKind::Npm);
        assert_eq!(classify("@namespace/foo").unwrap(), IdentifierKind::Npm);
        assert_eq!(classify("https://service.tld/foo").unwrap(), IdentifierKind::Git);
        assert_eq!(classify("git://github.com/org/repo.git").unwrap(), IdentifierKind::Git);
    }

    #[test]
    fn test_classify_rejects_with_identifier_in_message() {
        let err = classify("@FOO").unwrap_err();
        assert!(err.to_string().contains("@FOO"));
    }

    #[test]
    fn test_declared_repository_git_plus() {
        assert_eq!(normalize_declared_repository("git+https://service.tld/foo"), "https://service.tld/foo");
        assert_eq!(
            normalize_declared_repository("git+ssh://git@github.com/org/repo.git"),
            "ssh://git@github.com/org/repo.git"
        );
    }

    #[test]
    fn test_declared_repository_fragment() {
        assert_eq!(
            normalize_declared_repository("https://github.com/org/repo.git#v1.2.3"),
            "https://github.com/org/repo.git"
        );
    }

    #[test]
    fn test_declared_repository_scp_style() {
        assert_eq!(
            normalize_declared_repository("git@github.com:org/repo.git"),
            "ssh://git@github.com/org/repo.git"
        );
    }

    #[test]
    fn test_declared_repository_passthrough() {
        assert_eq!(normalize_declared_repository("https://service.tld/foo"), "https://service.tld/foo");
        assert_eq!(normalize_declared_repository("baz"), "baz");
    }
}
