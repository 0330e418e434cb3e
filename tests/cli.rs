//
//  goinstant-api
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Tests of the `gi` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const CREDENTIAL_VARS: &[&str] = &[
    "GOINSTANT_ENDPOINT",
    "GOINSTANT_API_VERSION",
    "GOINSTANT_CLIENT_ID",
    "GOINSTANT_CLIENT_SECRET",
    "GOINSTANT_ACCESS_TOKEN",
    "GOINSTANT_PROXY",
    "GOINSTANT_CONFIG",
];

/// `gi` with a private config file and no credentials from the environment.
fn gi(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gi").unwrap();
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    gi(&dir.path().join("config.toml"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("apps"))
        .stdout(predicate::str::contains("channels"));
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    gi(&dir.path().join("config.toml"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("gi version"));
}

#[test]
fn test_missing_credentials_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    gi(&dir.path().join("config.toml"))
        .args(["apps", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "access_token, or client_id and client_secret required",
        ));
}

#[test]
fn test_half_configured_credentials() {
    let dir = tempfile::tempdir().unwrap();
    gi(&dir.path().join("config.toml"))
        .args(["--client-id", "abc", "devs", "get"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("client_secret must also be defined"));
}

#[test]
fn test_config_set_and_show_masks_secrets() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    gi(&config)
        .args(["config", "set", "client_secret", "s3cret"])
        .assert()
        .success();
    gi(&config)
        .args(["config", "set", "endpoint", "https://api.example.test"])
        .assert()
        .success();

    gi(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("https://api.example.test/v1"))
        .stdout(predicate::str::contains("s3cret").not());

    gi(&config)
        .args(["config", "get", "client_secret"])
        .assert()
        .success()
        .stdout("s3cret\n");
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    gi(&dir.path().join("config.toml"))
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_bad_method_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    gi(&dir.path().join("config.toml"))
        .args(["--access-token", "abc", "api", "-X", "TRACE", "/devs/self"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported HTTP method"));
}

#[test]
fn test_api_command_against_server() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1/devs/self")
        .match_header("authorization", "Bearer abc")
        .with_status(200)
        .with_body(r#"{"id": 9, "email": "dev@example.test"}"#)
        .create();

    let url = server.url();
    let dir = tempfile::tempdir().unwrap();
    gi(&dir.path().join("config.toml"))
        .args(["--access-token", "abc", "--endpoint", url.as_str()])
        .args(["--json", "--filter", ".email", "api", "/devs/self"])
        .assert()
        .success()
        .stdout("\"dev@example.test\"\n");

    mock.assert();
}

#[test]
fn test_not_found_exit_code() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/v1/teams/5")
        .with_status(404)
        .with_body(r#"{"error": "Not Found"}"#)
        .create();

    let url = server.url();
    let dir = tempfile::tempdir().unwrap();
    gi(&dir.path().join("config.toml"))
        .args(["--access-token", "abc", "--endpoint", url.as_str()])
        .args(["teams", "get", "5"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("Not Found"));
}
