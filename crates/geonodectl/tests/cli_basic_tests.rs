use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a test command with a clean environment
fn geonodectl() -> Command {
    let mut cmd = Command::cargo_bin("geonodectl").unwrap();
    cmd.env_remove("GEONODE_API_URL")
        .env_remove("GEONODE_API_BASIC_AUTH")
        .env_remove("GEONODE_API_VERIFY");
    cmd
}

#[test]
fn test_help_flag() {
    geonodectl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GeoNode v2 REST API"))
        .stdout(predicate::str::contains("GEONODE_API_URL"))
        .stdout(predicate::str::contains("EXAMPLES:"));
}

#[test]
fn test_version_flag() {
    geonodectl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("geonodectl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_args_shows_help() {
    geonodectl()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    geonodectl()
        .arg("no-such-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_dataset_help() {
    geonodectl()
        .args(["dataset", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_dataset_alias() {
    geonodectl()
        .args(["ds", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dataset commands"));
}

#[test]
fn test_missing_env_vars_exit_nonzero() {
    geonodectl()
        .args(["dataset", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("GEONODE_API_URL"));
}

#[test]
fn test_url_without_v2_suffix_is_rejected() {
    geonodectl()
        .args(["dataset", "list"])
        .env("GEONODE_API_URL", "https://geonode.example.com/")
        .env("GEONODE_API_BASIC_AUTH", "dG9rZW4=")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("api/v2/"));
}

#[test]
fn test_patch_set_and_json_path_are_mutually_exclusive() {
    geonodectl()
        .args([
            "dataset",
            "patch",
            "7",
            "--set",
            "{}",
            "--json-path",
            "fields.json",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_users_describe_groups_resources_conflict() {
    geonodectl()
        .args(["users", "describe", "3", "--groups", "--resources"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_upload_requires_file_argument() {
    geonodectl()
        .args(["dataset", "upload"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--file"));
}
