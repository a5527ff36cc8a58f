use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn nivoxar(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nivoxar").unwrap();
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("NIVOXAR_DEFAULT_ROUTE")
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"));
    cmd
}

fn script(dir: &TempDir, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join("nav.txt");
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

#[test]
fn test_script_drives_navigation() {
    let dir = TempDir::new().unwrap();
    let path = script(
        &dir,
        &[
            "# calendar then back",
            "go /calendar",
            "go /no-such-page",
            "back",
            "where",
            "quit",
            "go /profile",
        ],
    );

    nivoxar(&dir)
        .args(["--no-animations", "--signed-in", "--script"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard"))
        .stdout(predicate::str::contains("→ /calendar"))
        .stdout(predicate::str::contains("day-popup"))
        .stdout(predicate::str::contains("no route for /no-such-page"))
        .stdout(predicate::str::contains("Profile").not());
}

#[test]
fn test_anonymous_script_stays_on_login() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, &["go /analytics", "where"]);

    nivoxar(&dir)
        .args(["--no-animations", "--script"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sign in to Nivoxar"))
        .stdout(predicate::str::contains("navigation to /analytics cancelled"))
        .stdout(predicate::str::contains("/login"));
}

#[test]
fn test_journal_is_written() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, &["go /categories"]);
    let journal = dir.path().join("journal.json");

    nivoxar(&dir)
        .args(["--no-animations", "--signed-in", "--script"])
        .arg(&path)
        .arg("--journal")
        .arg(&journal)
        .assert()
        .success();

    let saved = fs::read_to_string(&journal).unwrap();
    assert!(saved.contains("navigation_completed"));
    assert!(saved.contains("/categories"));
}

#[test]
fn test_routes_subcommand() {
    let dir = TempDir::new().unwrap();

    nivoxar(&dir)
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("/dashboard (default)"))
        .stdout(predicate::str::contains("/login (login)"))
        .stdout(predicate::str::contains("/shared-tasks"));
}

#[test]
fn test_config_file_changes_default_route() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("nivoxar.json"),
        r#"{ "default_route": "/calendar" }"#,
    )
    .unwrap();
    let path = script(&dir, &["where"]);

    nivoxar(&dir)
        .args(["--no-animations", "--signed-in", "--script"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("/calendar"))
        .stdout(predicate::str::contains("Month grid"));
}

#[test]
fn test_invalid_default_route_fails() {
    let dir = TempDir::new().unwrap();

    nivoxar(&dir)
        .args(["--default-route", "calendar", "routes"])
        .assert()
        .failure();
}
