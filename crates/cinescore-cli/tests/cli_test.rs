#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_help_lists_commands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescore");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("movies"))
        .stdout(predicate::str::contains("people"))
        .stdout(predicate::str::contains("tui"));
}

#[test]
fn test_movies_show_missing_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescore");
    cmd.args(["movies", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_movies_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescore");
    cmd.args(["movies", "search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"));
}

#[test]
fn test_movies_search_blank_query() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescore");
    cmd.args(["--dir", dir.path().to_str().unwrap()])
        .args(["movies", "search", "--query", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query must not be empty"));
}

#[test]
fn test_people_show_rejects_non_numeric_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescore");
    cmd.args(["people", "show", "--id", "leo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_tui_rejects_unknown_page() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescore");
    cmd.args(["tui", "--page", "settings"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tier-list"));
}

#[test]
fn test_config_show_defaults() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescore");
    cmd.env_remove("CINESCORE_API_URL")
        .args(["--dir", dir.path().to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://127.0.0.1:8000/"))
        .stdout(predicate::str::contains("debounce_ms = 300"));
}

#[test]
fn test_config_show_env_override() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescore");
    cmd.env("CINESCORE_API_URL", "http://movies.internal:9000/")
        .args(["--dir", dir.path().to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://movies.internal:9000/"));
}

#[test]
fn test_config_init_writes_file_once() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    // Act & Assert
    let mut first = cargo_bin_cmd!("cinescore");
    first
        .args(["--dir", dir_arg, "config", "init"])
        .assert()
        .success();
    assert!(dir.path().join("config.toml").exists());

    let mut second = cargo_bin_cmd!("cinescore");
    second
        .args(["--dir", dir_arg, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let mut forced = cargo_bin_cmd!("cinescore");
    forced
        .args(["--dir", dir_arg, "config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_show_reads_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[tier_list]\ntitle = \"Horror Night\"\n",
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescore");
    cmd.env_remove("CINESCORE_API_URL")
        .args(["--dir", dir.path().to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Horror Night"));
}

#[test]
fn test_invalid_config_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[api\n").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescore");
    cmd.args(["--dir", dir.path().to_str().unwrap(), "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn test_completions_bash() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescore");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cinescore"));
}

#[test]
fn test_movies_trending_unreachable_backend() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescore");
    cmd.env("CINESCORE_API_URL", "http://127.0.0.1:9/")
        .args(["--dir", dir.path().to_str().unwrap(), "movies", "trending"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to fetch trending movies"));
}
