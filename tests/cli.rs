use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_dir_for(server: &MockServer) -> TempDir {
    config_dir_with(&server.uri())
}

fn config_dir_with(base_url: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let app_dir = dir.path().join("orgrepos");
    fs::create_dir_all(&app_dir).unwrap();
    fs::write(
        app_dir.join("config.toml"),
        format!("[api]\nbase_url = \"{base_url}\"\ntimeout_secs = 5\n"),
    )
    .unwrap();
    dir
}

fn orgrepos(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("orgrepos").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_dir.path())
        .env("GITHUB_ACCESS_TOKEN", "ghp_test")
        .env_remove("RUST_LOG");
    cmd
}

async fn mount_repos(server: &MockServer, org: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/orgs/{org}/repos")))
        .and(header("authorization", "Bearer ghp_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[test]
fn help_shows_flags() {
    let mut cmd = Command::cargo_bin("orgrepos").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--organization"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn version_flag() {
    let mut cmd = Command::cargo_bin("orgrepos").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("orgrepos"));
}

#[test]
fn unreachable_api_reports_not_found_without_noise() {
    let config_dir = config_dir_with("http://127.0.0.1:1");

    let output = orgrepos(&config_dir)
        .args(["--organization", "acme"])
        .env_remove("RUST_BACKTRACE")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "No repositories found for organization 'acme'.\n"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "stderr was: {stderr}");
    assert!(stderr.contains("Failed to retrieve repositories for acme"));
}

#[tokio::test(flavor = "multi_thread")]
async fn single_organization_report() {
    let server = MockServer::start().await;
    mount_repos(
        &server,
        "acme",
        serde_json::json!([{"name": "infra"}, {"name": "web"}]),
    )
    .await;
    let config_dir = config_dir_for(&server);

    orgrepos(&config_dir)
        .args(["--organization", "acme"])
        .assert()
        .success()
        .stdout("Repositories for organization 'acme':\ninfra\nweb\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn all_organizations_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"login": "acme"}, {"login": "beta"}])),
        )
        .mount(&server)
        .await;
    mount_repos(&server, "acme", serde_json::json!([])).await;
    mount_repos(&server, "beta", serde_json::json!([{"name": "svc1"}])).await;
    let config_dir = config_dir_for(&server);

    orgrepos(&config_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Repositories for organization 'acme':\nNo repositories found for organization 'acme'.",
        ))
        .stdout(predicate::str::contains(
            "Repositories for organization 'beta':\nsvc1",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_organization_listing_exits_non_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"message": "Bad credentials"})),
        )
        .mount(&server)
        .await;
    let config_dir = config_dir_for(&server);

    orgrepos(&config_dir)
        .assert()
        .failure()
        .stdout("No organizations found.\n")
        .stderr(predicate::str::contains(
            "Failed to retrieve organizations. Status code: 401",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_token_warns_and_continues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"message": "Requires authentication"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let config_dir = config_dir_for(&server);

    orgrepos(&config_dir)
        .env_remove("GITHUB_ACCESS_TOKEN")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GitHub access token not found"))
        .stdout("No organizations found.\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn json_output() {
    let server = MockServer::start().await;
    mount_repos(&server, "acme", serde_json::json!([{"name": "infra"}])).await;
    let config_dir = config_dir_for(&server);

    let output = orgrepos(&config_dir)
        .args(["--organization", "acme", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "organizations": [
                {"organization": "acme", "repositories": ["infra"], "error": null}
            ]
        })
    );
}
