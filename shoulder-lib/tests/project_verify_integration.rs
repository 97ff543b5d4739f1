//! Integration tests for project verification against wiremock stand-ins for
//! the registry and GitHub

use serde_json::json;
use shoulder_lib::facts::{Endpoints, StatsSource};
use shoulder_lib::project::{IdentityField, Project, VerifyError};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source(server: &MockServer) -> StatsSource {
    StatsSource::new(&Endpoints::all_at(&server.uri()), None, None).expect("stats source")
}

async fn mount_package(server: &MockServer, name: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/registry/{name}/latest")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn recoverable_message(result: Result<Project, VerifyError>) -> String {
    match result {
        Err(VerifyError::Recoverable(e)) => e.to_string(),
        other => panic!("expected a recoverable failure, got {other:?}"),
    }
}

fn fatal_message(result: Result<Project, VerifyError>) -> String {
    match result {
        Err(VerifyError::Fatal(e)) => e.to_string(),
        other => panic!("expected a fatal failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_known_field_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(500)).expect(0).mount(&server).await;
    let source = source(&server);

    let npm = Project::new("somepackage").expect("project");
    let verified = npm.clone().verify(IdentityField::NpmName, &source).await.expect("no-op");
    assert_eq!(verified, npm);

    let git = Project::new("https://github.com/org/foo").expect("project");
    let verified = git.clone().verify(IdentityField::RepoUrl, &source).await.expect("no-op");
    assert_eq!(verified, git);
}

#[tokio::test]
async fn test_git_project_learns_package_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/github-raw/org/somepackage/master/package.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "fugl", "foo": "baz" })))
        .expect(1)
        .mount(&server)
        .await;
    let source = source(&server);

    let project = Project::new("git://github.com/org/somepackage.git").expect("project");
    let verified = project.verify(IdentityField::NpmName, &source).await.expect("verified");

    assert_eq!(verified.npm_name(), Some("fugl"));
    assert_eq!(verified.repo_url(), Some("https://github.com/org/somepackage"));
    assert_eq!(verified.name(), "https://github.com/org/somepackage");
}

#[tokio::test]
async fn test_git_project_without_manifest_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(404)).mount(&server).await;
    let source = source(&server);

    let project = Project::new("https://github.com/org/foo").expect("project");
    let message = fatal_message(project.verify(IdentityField::NpmName, &source).await);
    assert!(message.contains("unable to access repository https://github.com/org/foo"));
}

#[tokio::test]
async fn test_git_project_with_nameless_manifest_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/github-raw/org/foo/master/package.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "foo": "baz" })))
        .mount(&server)
        .await;
    let source = source(&server);

    let project = Project::new("https://github.com/org/foo").expect("project");
    let result = project.verify(IdentityField::NpmName, &source).await;
    assert!(result.expect_err("nameless manifest").is_fatal());
}

#[tokio::test]
async fn test_npm_project_learns_repository() {
    let server = MockServer::start().await;
    mount_package(&server, "somepackage", json!({ "name": "somepackage", "repository": "git+https://service.tld/foo" })).await;
    let source = source(&server);

    let project = Project::new("somepackage").expect("project");
    let verified = project.verify(IdentityField::RepoUrl, &source).await.expect("verified");

    assert_eq!(verified.repo_url(), Some("https://service.tld/foo"));
    assert_eq!(verified.npm_name(), Some("somepackage"));
}

#[tokio::test]
async fn test_npm_project_normalizes_declared_repository() {
    let server = MockServer::start().await;
    mount_package(
        &server,
        "somepackage",
        json!({ "name": "somepackage", "repository": { "type": "git", "url": "git@github.com:org/somepackage.git" } }),
    )
    .await;
    let source = source(&server);

    let project = Project::new("somepackage").expect("project");
    let verified = project.verify(IdentityField::RepoUrl, &source).await.expect("verified");
    assert_eq!(verified.repo_url(), Some("https://git@github.com/org/somepackage"));
}

#[tokio::test]
async fn test_npm_project_without_repository_is_recoverable() {
    let server = MockServer::start().await;
    mount_package(&server, "somepackage", json!({ "name": "somepackage" })).await;
    let source = source(&server);

    let project = Project::new("somepackage").expect("project");
    let message = recoverable_message(project.verify(IdentityField::RepoUrl, &source).await);
    assert!(message.contains("repository is missing for project somepackage"));
}

#[tokio::test]
async fn test_npm_project_with_invalid_repository_is_recoverable() {
    let server = MockServer::start().await;
    mount_package(&server, "somepackage", json!({ "name": "somepackage", "repository": "baz" })).await;
    let source = source(&server);

    let project = Project::new("somepackage").expect("project");
    let message = recoverable_message(project.verify(IdentityField::RepoUrl, &source).await);
    assert!(message.contains("repository is invalid for project somepackage"));
}

#[tokio::test]
async fn test_npm_project_unknown_to_registry_is_recoverable() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(404)).mount(&server).await;
    let source = source(&server);

    let project = Project::new("not_a_package").expect("project");
    let message = recoverable_message(project.verify(IdentityField::RepoUrl, &source).await);
    assert!(message.contains("unable to access package \"not_a_package\""));
}

#[tokio::test]
async fn test_npm_project_with_unreachable_registry_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(500)).mount(&server).await;
    let source = source(&server);

    let project = Project::new("somepackage").expect("project");
    let message = fatal_message(project.verify(IdentityField::RepoUrl, &source).await);
    assert!(message.contains("unable to access package somepackage"));
}
