#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn strata_cmd() -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("strata").unwrap();
	// Keep the host environment from selecting an override directory
	cmd.env_remove("APP_ENV");
	cmd
}

/// Lay down a config directory with a base file, a production override, and
/// an env file. Returns the tempdir that owns it all.
fn fixture() -> tempfile::TempDir {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_dir = temp_dir.path().join("config");
	fs::create_dir(&config_dir).unwrap();

	fs::write(
		config_dir.join("app.yml"),
		"name: demo\ngreeting: \"hello %NAME%\"\n\"feature.enabled\": true\n",
	)
	.unwrap();
	fs::write(
		config_dir.join("db.yml"),
		"db:\n  host: localhost\n  port: 5432\n  url: \"postgres://%db.host%:%db.port%\"\n",
	)
	.unwrap();

	let prod_dir = config_dir.join("production");
	fs::create_dir(&prod_dir).unwrap();
	fs::write(prod_dir.join("db.yml"), "db:\n  host: prod.example.com\n").unwrap();

	fs::write(temp_dir.path().join(".env"), "NAME=world\n").unwrap();

	temp_dir
}

fn config_args(root: &Path) -> Vec<String> {
	vec![
		"--config-dir".to_string(),
		root.join("config").display().to_string(),
		"--env-file".to_string(),
		root.join(".env").display().to_string(),
	]
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	strata_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("Layered YAML configuration loader"));
}

#[test]
fn test_version_flag() {
	strata_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("strata"));
}

#[test]
fn test_no_args_shows_help() {
	// With arg_required_else_help, no args should show help
	strata_cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// get tests
// ============================================================================

#[test]
fn test_get_top_level_key() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.args(["get", "name"])
		.assert()
		.success()
		.stdout(predicate::str::contains("demo"));
}

#[test]
fn test_get_nested_key() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.args(["get", "db.port"])
		.assert()
		.success()
		.stdout(predicate::str::contains("5432"));
}

#[test]
fn test_get_literal_dotted_key() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.args(["get", "feature.enabled"])
		.assert()
		.success()
		.stdout(predicate::str::contains("true"));
}

#[test]
fn test_get_interpolates_env_file_variable() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.args(["get", "greeting"])
		.assert()
		.success()
		.stdout(predicate::str::contains("hello world"));
}

#[test]
fn test_get_process_env_wins_over_env_file() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.env("NAME", "process")
		.args(["get", "greeting"])
		.assert()
		.success()
		.stdout(predicate::str::contains("hello process"));
}

#[test]
fn test_get_config_to_config_reference() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.args(["get", "db.url"])
		.assert()
		.success()
		.stdout(predicate::str::contains("postgres://localhost:5432"));
}

#[test]
fn test_get_missing_key_fails() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.args(["get", "does.not.exist"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Key not found"));
}

#[test]
fn test_get_undefined_variable_fails() {
	let temp_dir = fixture();
	let config_dir = temp_dir.path().join("config");
	fs::write(config_dir.join("broken.yml"), "bad: \"%UNSET_VAR%\"\n").unwrap();

	strata_cmd()
		.args(config_args(temp_dir.path()))
		.args(["get", "bad"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("UNSET_VAR"));
}

// ============================================================================
// Override environment tests
// ============================================================================

#[test]
fn test_environment_flag_selects_overrides() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.args(["--environment", "production", "get", "db.host"])
		.assert()
		.success()
		.stdout(predicate::str::contains("prod.example.com"));
}

#[test]
fn test_app_env_variable_selects_overrides() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.env("APP_ENV", "production")
		.args(["get", "db.host"])
		.assert()
		.success()
		.stdout(predicate::str::contains("prod.example.com"));
}

#[test]
fn test_app_env_from_env_file_selects_overrides() {
	let temp_dir = fixture();
	fs::write(temp_dir.path().join(".env"), "APP_ENV=production\n").unwrap();

	strata_cmd()
		.args(config_args(temp_dir.path()))
		.args(["get", "db.host"])
		.assert()
		.success()
		.stdout(predicate::str::contains("prod.example.com"));
}

#[test]
fn test_override_merge_keeps_base_siblings() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.args(["--environment", "production", "get", "db.port"])
		.assert()
		.success()
		.stdout(predicate::str::contains("5432"));
}

#[test]
fn test_no_environment_uses_base_values() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.args(["get", "db.host"])
		.assert()
		.success()
		.stdout(predicate::str::contains("localhost"));
}

// ============================================================================
// show tests
// ============================================================================

#[test]
fn test_show_lists_files_and_tree() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.arg("show")
		.assert()
		.success()
		.stdout(predicate::str::contains("app.yml"))
		.stdout(predicate::str::contains("db.yml"))
		.stdout(predicate::str::contains("host: localhost"));
}

#[test]
fn test_show_reports_override_environment() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.args(["--environment", "production", "show"])
		.assert()
		.success()
		.stdout(predicate::str::contains("Override environment: production"))
		.stdout(predicate::str::contains("host: prod.example.com"));
}

#[test]
fn test_show_empty_directory() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_dir = temp_dir.path().join("config");
	fs::create_dir(&config_dir).unwrap();
	fs::write(temp_dir.path().join(".env"), "").unwrap();

	strata_cmd()
		.args(config_args(temp_dir.path()))
		.arg("show")
		.assert()
		.success()
		.stdout(predicate::str::contains("No configuration files found"));
}

// ============================================================================
// validate tests
// ============================================================================

#[test]
fn test_validate_valid_config() {
	let temp_dir = fixture();
	strata_cmd()
		.args(config_args(temp_dir.path()))
		.arg("validate")
		.assert()
		.success()
		.stdout(predicate::str::contains("valid"));
}

#[test]
fn test_validate_invalid_config() {
	let temp_dir = fixture();
	let config_dir = temp_dir.path().join("config");
	fs::write(config_dir.join("broken.yml"), "key: [unclosed\n").unwrap();

	strata_cmd()
		.args(config_args(temp_dir.path()))
		.arg("validate")
		.assert()
		.failure()
		.stderr(predicate::str::contains("broken.yml"));
}

#[test]
fn test_validate_missing_directory() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".env"), "").unwrap();

	strata_cmd()
		.args(config_args(temp_dir.path()))
		.arg("validate")
		.assert()
		.failure()
		.stderr(predicate::str::contains("Configuration error"));
}
