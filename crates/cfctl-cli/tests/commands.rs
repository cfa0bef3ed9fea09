//! End-to-end tests running the `cfctl` binary against a mock API.

use std::fs;

use assert_cmd::Command;
use httpmock::Mock;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

const APP: &str = r#"{"resources": [{"metadata": {"guid": "a1"}, "entity": {
    "name": "web", "state": "STARTED", "instances": 2,
    "memory": 256, "disk_quota": 1024, "space_guid": "s1"
}}]}"#;

/// A home directory whose config targets `server`, logged in as admin with
/// org acme and space dev selected.
fn home_for(server: &MockServer) -> TempDir {
    home_with(json!({
        "api_endpoint": server.base_url(),
        "access_token": "bearer test-token",
        "username": "admin",
        "organization_fields": {"guid": "o1", "name": "acme"},
        "space_fields": {"guid": "s1", "name": "dev"}
    }))
}

fn home_with(config: serde_json::Value) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("config.json"), config.to_string()).expect("write config");
    dir
}

fn cfctl(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cfctl").expect("binary");
    cmd.env("CFCTL_HOME", home.path()).env_remove("CFCTL_API").env_remove("RUST_LOG");
    cmd
}

fn app_lookup(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/v2/spaces/s1/apps")
            .query_param("q", "name:web")
            .header("authorization", "bearer test-token");
        then.status(200).body(APP);
    })
}

fn state_change<'a>(server: &'a MockServer, state: &str) -> Mock<'a> {
    let body = json!({"metadata": {"guid": "a1"}, "entity": {"name": "web", "state": state}});
    server.mock(|when, then| {
        when.method(PUT).path("/v2/apps/a1").json_body(json!({ "state": state }));
        then.status(201).json_body(body);
    })
}

#[test]
fn scale_memory_sends_one_field_and_restarts_once() {
    let server = MockServer::start();
    let home = home_for(&server);
    app_lookup(&server);
    let update = server.mock(|when, then| {
        when.method(PUT).path("/v2/apps/a1").json_body(json!({"memory": 512}));
        then.status(201).json_body(json!({
            "metadata": {"guid": "a1"},
            "entity": {"name": "web", "state": "STARTED", "memory": 512}
        }));
    });
    let stop = state_change(&server, "STOPPED");
    let start = state_change(&server, "STARTED");

    cfctl(&home)
        .args(["scale", "web", "-m", "512M"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Scaling app web in org acme / space dev as admin...\nOK",
        ))
        .stdout(predicate::str::contains("Starting app web"));

    update.assert();
    stop.assert();
    start.assert();
}

#[test]
fn scale_zero_instances_is_sent_without_restart() {
    let server = MockServer::start();
    let home = home_for(&server);
    app_lookup(&server);
    let update = server.mock(|when, then| {
        when.method(PUT).path("/v2/apps/a1").json_body(json!({"instances": 0}));
        then.status(201).json_body(json!({
            "metadata": {"guid": "a1"},
            "entity": {"name": "web", "state": "STARTED", "instances": 0}
        }));
    });
    let stop = state_change(&server, "STOPPED");
    let start = state_change(&server, "STARTED");

    cfctl(&home).args(["scale", "web", "-i", "0"]).assert().success();

    update.assert();
    stop.assert_hits(0);
    start.assert_hits(0);
}

#[test]
fn scale_without_options_shows_limits() {
    let server = MockServer::start();
    let home = home_for(&server);
    app_lookup(&server);
    let update = server.mock(|when, then| {
        when.method(PUT).path("/v2/apps/a1");
        then.status(201);
    });

    cfctl(&home)
        .args(["scale", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("memory:     256M"))
        .stdout(predicate::str::contains("disk:       1G"))
        .stdout(predicate::str::contains("instances:  2"));

    update.assert_hits(0);
}

#[test]
fn malformed_size_is_a_usage_error_and_sends_nothing() {
    let server = MockServer::start();
    let home = home_for(&server);
    app_lookup(&server);
    let update = server.mock(|when, then| {
        when.method(PUT).path("/v2/apps/a1");
        then.status(201);
    });

    cfctl(&home)
        .args(["scale", "web", "-i", "3", "-m", "12X"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("FAILED"))
        .stderr(predicate::str::contains("invalid value for memory"));

    update.assert_hits(0);
}

#[test]
fn scale_of_unknown_app_fails() {
    let server = MockServer::start();
    let home = home_for(&server);
    server.mock(|when, then| {
        when.method(GET).path("/v2/spaces/s1/apps");
        then.status(200).body(r#"{"resources": []}"#);
    });

    cfctl(&home)
        .args(["scale", "nope", "-i", "2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("App 'nope' not found"));
}

#[test]
fn restart_stops_then_starts() {
    let server = MockServer::start();
    let home = home_for(&server);
    app_lookup(&server);
    let stop = state_change(&server, "STOPPED");
    let start = state_change(&server, "STARTED");

    cfctl(&home)
        .args(["restart", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stopping app web in org acme / space dev as admin..."));

    stop.assert();
    start.assert();
}

#[test]
fn not_logged_in_fails_before_any_request() {
    let server = MockServer::start();
    let home = home_with(json!({ "api_endpoint": server.base_url() }));
    let any = server.mock(|when, then| {
        when.path_contains("/v2/");
        then.status(200).body(r#"{"resources": []}"#);
    });

    cfctl(&home)
        .arg("quotas")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not logged in"));

    any.assert_hits(0);
}

#[test]
fn missing_config_file_means_not_logged_in() {
    let home = tempfile::tempdir().expect("tempdir");

    cfctl(&home)
        .arg("service-auth-tokens")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn quotas_follow_every_page() {
    let server = MockServer::start();
    let next = MockServer::start();
    let home = home_for(&server);
    let first = server.mock(|when, then| {
        when.method(GET).path("/v2/quota_definitions");
        then.status(200).json_body(json!({
            "total_pages": 2,
            "next_url": next.url("/v2/quota_definitions?page=2"),
            "resources": [{
                "metadata": {"guid": "q1"},
                "entity": {"name": "free", "memory_limit": 0}
            }]
        }));
    });
    let second = next.mock(|when, then| {
        when.method(GET).path("/v2/quota_definitions").query_param("page", "2");
        then.status(200).json_body(json!({
            "total_pages": 2,
            "resources": [{
                "metadata": {"guid": "q2"},
                "entity": {"name": "gold", "memory_limit": 10240}
            }]
        }));
    });

    cfctl(&home)
        .args(["quotas", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "free""#))
        .stdout(predicate::str::contains(r#""name": "gold""#));

    first.assert();
    second.assert();
}

#[test]
fn set_quota_binds_org() {
    let server = MockServer::start();
    let home = home_for(&server);
    server.mock(|when, then| {
        when.method(GET).path("/v2/organizations").query_param("q", "name:acme");
        then.status(200)
            .body(r#"{"resources": [{"metadata": {"guid": "o1"}, "entity": {"name": "acme"}}]}"#);
    });
    server.mock(|when, then| {
        when.method(GET).path("/v2/quota_definitions").query_param("q", "name:gold");
        then.status(200)
            .body(r#"{"resources": [{"metadata": {"guid": "q2"}, "entity": {"name": "gold"}}]}"#);
    });
    let bind = server.mock(|when, then| {
        when.method(PUT)
            .path("/v2/organizations/o1")
            .json_body(json!({"quota_definition_guid": "q2"}));
        then.status(201);
    });

    cfctl(&home)
        .args(["set-quota", "acme", "gold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Setting quota gold to org acme as admin...\nOK"));

    bind.assert();
}

#[test]
fn deleting_missing_token_warns_but_succeeds() {
    let server = MockServer::start();
    let home = home_for(&server);
    server.mock(|when, then| {
        when.method(GET).path("/v2/service_auth_tokens");
        then.status(200).body(r#"{"resources": []}"#);
    });

    cfctl(&home)
        .args(["delete-service-auth-token", "mysql", "core", "-f"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Service Auth Token mysql core does not exist."));
}

#[test]
fn delete_prompt_reads_stdin() {
    let server = MockServer::start();
    let home = home_for(&server);
    let lookup = server.mock(|when, then| {
        when.method(GET).path("/v2/service_auth_tokens");
        then.status(200).body(r#"{"resources": []}"#);
    });

    cfctl(&home)
        .args(["delete-service-auth-token", "mysql", "core"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Really delete service auth token mysql core?>"))
        .stdout(predicate::str::is_empty());

    lookup.assert_hits(0);
}

#[test]
fn confirmed_delete_in_json_mode_prints_only_json() {
    let server = MockServer::start();
    let home = home_for(&server);
    server.mock(|when, then| {
        when.method(GET)
            .path("/v2/service_auth_tokens")
            .query_param("q", "label:mysql;provider:core");
        then.status(200).json_body(json!({"resources": [{
            "metadata": {"guid": "t1"},
            "entity": {"label": "mysql", "provider": "core"}
        }]}));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/v2/service_auth_tokens/t1");
        then.status(204);
    });

    let output = cfctl(&home)
        .args(["delete-service-auth-token", "mysql", "core", "--format", "json"])
        .write_stdin("yes\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Really delete service auth token mysql core?>"))
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("stdout is JSON");
    assert_eq!(json["success"], true);
    delete.assert();
}

#[test]
fn api_flag_overrides_config_endpoint() {
    let server = MockServer::start();
    let home = home_with(json!({
        "api_endpoint": "http://127.0.0.1:1",
        "access_token": "bearer test-token",
        "username": "admin"
    }));
    let list = server.mock(|when, then| {
        when.method(GET).path("/v2/service_auth_tokens");
        then.status(200).body(r#"{"resources": []}"#);
    });

    cfctl(&home)
        .args(["service-auth-tokens", "--api", &server.base_url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No service auth tokens found"));

    list.assert();
}

#[test]
fn server_error_is_reported() {
    let server = MockServer::start();
    let home = home_for(&server);
    server.mock(|when, then| {
        when.method(POST).path("/v2/quota_definitions");
        then.status(400).json_body(json!({
            "code": 240002,
            "description": "Quota Definition is invalid: name is taken",
            "error_code": "CF-QuotaDefinitionNameTaken"
        }));
    });

    cfctl(&home)
        .args(["create-quota", "gold", "-m", "10G"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("name is taken"));
}
