use assert_cmd::prelude::*;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

/// Compact token whose payload carries the given expiry
fn token_expiring_at(exp: i64) -> String {
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#)),
        URL_SAFE_NO_PAD.encode("signature")
    )
}

fn write_session(dir: &Path, exp: i64) -> (PathBuf, PathBuf) {
    let config_path = dir.join("config.yaml");
    std::fs::write(&config_path, "preferences:\n  recent_limit: 10\n")
        .expect("failed to write config");

    let token_path = dir.join("token");
    std::fs::write(&token_path, token_expiring_at(exp)).expect("failed to write token");

    (config_path, token_path)
}

fn finop() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("finop"));
    cmd.env_remove("FINOP_CONFIG")
        .env_remove("FINOP_API_HOST")
        .env_remove("FINOP_FORMAT")
        .env_remove("FINOP_DEBUG");
    cmd
}

#[test]
fn version_prints_package_version() -> Result<(), Box<dyn std::error::Error>> {
    let assert = finop().arg("version").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));

    Ok(())
}

#[test]
fn status_reports_missing_session() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("config.yaml");

    let assert = finop()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Not signed in"));
    assert!(stdout.contains("finop signin"));

    Ok(())
}

#[test]
fn status_reports_live_session() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let (config_path, _) = write_session(temp.path(), Utc::now().timestamp() + 3600);

    let assert = finop()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Session valid"));

    Ok(())
}

#[test]
fn status_reports_expired_session() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let (config_path, _) = write_session(temp.path(), Utc::now().timestamp() - 60);

    let assert = finop()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Session expired"));

    Ok(())
}

#[test]
fn signout_twice_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let (config_path, token_path) = write_session(temp.path(), Utc::now().timestamp() + 3600);

    finop()
        .arg("signout")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicates::str::contains("Signed out."));

    assert!(!token_path.exists());

    // Second signout with no token behaves the same
    finop()
        .arg("signout")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicates::str::contains("Signed out."));

    Ok(())
}

#[test]
fn authenticated_command_without_token_points_at_signin()
-> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("config.yaml");

    let assert = finop()
        .arg("head")
        .arg("list")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("finop signin"));

    Ok(())
}

#[test]
fn expired_token_is_evicted_before_any_request() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let (config_path, token_path) = write_session(temp.path(), Utc::now().timestamp() - 60);

    let assert = finop()
        .arg("tx")
        .arg("list")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure();

    // The guard deletes the stale credential and redirects to sign-in.
    assert!(!token_path.exists());
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("finop signin"));

    Ok(())
}

#[test]
fn malformed_token_is_treated_as_expired() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("config.yaml");
    let token_path = temp.path().join("token");
    std::fs::write(&token_path, "definitely-not-a-token")?;

    finop()
        .arg("dashboard")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure();

    assert!(!token_path.exists());

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn head_list_renders_table_from_backend() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _heads = server
        .mock("GET", "/api/heads")
        .with_status(200)
        .with_body(r#"[{"uuid":"h-1","name":"Household"},{"uuid":"h-2","name":"Travel"}]"#)
        .create();

    let temp = tempdir()?;
    let (config_path, _) = write_session(temp.path(), Utc::now().timestamp() + 3600);

    let assert = finop()
        .arg("head")
        .arg("list")
        .arg("--config")
        .arg(&config_path)
        .env("FINOP_API_HOST", server.url())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Household"));
    assert!(stdout.contains("Travel"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn dashboard_summarizes_transactions() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _txs = server
        .mock("GET", "/api/transactions")
        .with_status(200)
        .with_body(
            r#"[
                {"uuid":"t-1","type":"income","amount":3000.0,"source":"salary","date":"2026-08-01"},
                {"uuid":"t-2","type":"expense","amount":1000.0,"head":"Household",
                 "category":"Food","subcategory":"Groceries","title":"Weekly shop","date":"2026-08-02"}
            ]"#,
        )
        .create();

    let temp = tempdir()?;
    let (config_path, _) = write_session(temp.path(), Utc::now().timestamp() + 3600);

    let assert = finop()
        .arg("dashboard")
        .arg("--config")
        .arg(&config_path)
        .env("FINOP_API_HOST", server.url())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("3,000.00"));
    assert!(stdout.contains("1,000.00"));
    assert!(stdout.contains("75%"));
    assert!(stdout.contains("Household"));
    assert!(stdout.contains("Weekly shop"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn tx_list_json_wraps_data_with_metadata() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _txs = server
        .mock("GET", "/api/transactions")
        .with_status(200)
        .with_body(r#"[{"uuid":"t-1","type":"income","amount":100.0,"source":"salary"}]"#)
        .create();

    let temp = tempdir()?;
    let (config_path, _) = write_session(temp.path(), Utc::now().timestamp() + 3600);

    let assert = finop()
        .arg("tx")
        .arg("list")
        .arg("--format")
        .arg("json")
        .arg("--config")
        .arg(&config_path)
        .env("FINOP_API_HOST", server.url())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(parsed["data"][0]["uuid"], "t-1");
    assert!(parsed["meta"]["version"].is_string());

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn add_expense_resolves_taxonomy_names() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _heads = server
        .mock("GET", "/api/heads")
        .with_status(200)
        .with_body(r#"[{"uuid":"h-1","name":"Household"}]"#)
        .create();
    let _categories = server
        .mock("GET", "/api/heads/h-1/categories")
        .with_status(200)
        .with_body(r#"[{"uuid":"c-1","name":"Food"}]"#)
        .create();
    let _subcategories = server
        .mock("GET", "/api/categories/c-1/subcategories")
        .with_status(200)
        .with_body(r#"[{"uuid":"s-1","name":"Groceries"}]"#)
        .create();
    let created = server
        .mock("POST", "/api/transactions")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"type":"expense","head_id":"h-1","category_id":"c-1","subcategory_id":"s-1"}"#
                .to_string(),
        ))
        .with_status(201)
        .with_body(r#"{"uuid":"t-9"}"#)
        .create();

    let temp = tempdir()?;
    let (config_path, _) = write_session(temp.path(), Utc::now().timestamp() + 3600);

    finop()
        .arg("tx")
        .arg("add-expense")
        .arg("--amount")
        .arg("54.20")
        .arg("--head")
        .arg("household")
        .arg("--category")
        .arg("food")
        .arg("--subcategory")
        .arg("groceries")
        .arg("--title")
        .arg("Weekly shop")
        .arg("--config")
        .arg(&config_path)
        .env("FINOP_API_HOST", server.url())
        .assert()
        .success();

    created.assert();

    Ok(())
}
