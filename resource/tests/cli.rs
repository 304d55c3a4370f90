use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BIN: &str = env!("CARGO_BIN_EXE_vault-resource");

fn resource_cmd() -> Command {
    let mut cmd = Command::new(BIN);
    cmd.env_remove("RUST_LOG")
        .env_remove("VAULT_USER_ID")
        .env("VAULT_LOG_LEVEL", "warn");
    cmd
}

#[test]
fn check_prints_one_version() {
    let output = resource_cmd()
        .arg("check")
        .write_stdin(r#"{"source":{"vault_uri":"http://127.0.0.1:8200","app_id":"a"}}"#)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(1));
    assert!(value[0]["expires_at"].is_string());
}

#[cfg(unix)]
#[test]
fn check_via_symlink_name() {
    let dir = TempDir::new().unwrap();
    let link = dir.path().join("check");
    std::os::unix::fs::symlink(BIN, &link).unwrap();

    Command::new(&link)
        .env_remove("RUST_LOG")
        .write_stdin(r#"{"source":{"vault_uri":"http://127.0.0.1:8200"}}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("expires_at"));
}

#[test]
fn in_requires_destination() {
    resource_cmd()
        .arg("in")
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<DESTINATION>"));
}

#[test]
fn in_without_user_id_fails_at_authenticate() {
    let dest = TempDir::new().unwrap();
    resource_cmd()
        .arg("in")
        .arg(dest.path())
        .write_stdin(
            r#"{"source":{"vault_uri":"http://127.0.0.1:1","app_id":"a"},"params":{"db":"secret/db"}}"#,
        )
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("VAULT_USER_ID"));
}

#[test]
fn user_id_in_source_is_refused() {
    let dest = TempDir::new().unwrap();
    resource_cmd()
        .arg("in")
        .arg(dest.path())
        .env("VAULT_USER_ID", "ci-user")
        .write_stdin(r#"{"source":{"vault_uri":"http://127.0.0.1:1","app_id":"a","user_id":"x"}}"#)
        .assert()
        .code(2);
}

#[test]
fn out_is_unsupported() {
    resource_cmd()
        .args(["out", "/tmp/put"])
        .write_stdin("{}")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn in_fetches_from_vault() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/app-id/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"auth": {"client_token": "s.abc"}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/db"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"user": "u1"},
            "warnings": ["this is a warning"]
        })))
        .mount(&server)
        .await;

    let dest = TempDir::new().unwrap();
    let stdin = json!({
        "source": {"vault_uri": server.uri(), "app_id": "pipeline"},
        "params": {"db": "secret/db"}
    })
    .to_string();

    resource_cmd()
        .arg("in")
        .arg(dest.path())
        .env("VAULT_USER_ID", "ci-user")
        .write_stdin(stdin)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""))
        .stderr(predicate::str::contains("this is a warning"));

    let written = std::fs::read_to_string(dest.path().join("secrets.yaml")).unwrap();
    assert_eq!(written.trim(), r#"{"db-user":"u1"}"#);
}
