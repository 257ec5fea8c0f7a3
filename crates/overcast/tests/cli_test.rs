#![allow(deprecated)] // TODO: switch Command::cargo_bin to cargo_bin_cmd!

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `overcast` pointed at a throwaway config directory
fn overcast(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("overcast").unwrap();
    cmd.env("OVERCAST_DIR", config_dir.path())
        .env("NO_COLOR", "1")
        .env_remove("DIGITALOCEAN_SSH_KEY_FINGERPRINT");
    cmd
}

fn registry(config_dir: &TempDir) -> serde_json::Value {
    let text = std::fs::read_to_string(config_dir.path().join("clusters.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn create_cluster(config_dir: &TempDir, name: &str) {
    overcast(config_dir)
        .args(["cluster", "create", name])
        .assert()
        .success();
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("overcast").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("instance"))
        .stdout(predicate::str::contains("cluster"));
}

#[test]
fn test_instance_import_help() {
    let mut cmd = Command::cargo_bin("overcast").unwrap();
    cmd.args(["instance", "import", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--cluster"))
        .stdout(predicate::str::contains("--ip"))
        .stdout(predicate::str::contains("--ssh-port"))
        .stdout(predicate::str::contains("--ssh-key"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("overcast").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("overcast"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("overcast").unwrap();
    cmd.arg("invalid-command").assert().failure();
}

#[test]
fn test_cluster_create() {
    let dir = tempfile::tempdir().unwrap();

    overcast(&dir)
        .args(["cluster", "create", "db"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cluster \"db\" has been created."));

    assert_eq!(registry(&dir), serde_json::json!({ "db": { "instances": {} } }));

    overcast(&dir)
        .args(["cluster", "create", "db"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_import_then_remove() {
    let dir = tempfile::tempdir().unwrap();
    create_cluster(&dir, "db");

    overcast(&dir)
        .args(["instance", "import", "db01", "--cluster", "db", "--ip", "127.0.0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Instance \"db01\" (127.0.0.1) has been imported to the \"db\" cluster.",
        ));

    let instance = &registry(&dir)["db"]["instances"]["db01"];
    assert_eq!(instance["ip"], "127.0.0.1");
    assert_eq!(instance["name"], "db01");
    assert_eq!(instance["ssh_port"], "22");
    assert_eq!(instance["user"], "root");
    assert!(
        instance["ssh_key"]
            .as_str()
            .unwrap()
            .ends_with("overcast.key")
    );

    overcast(&dir)
        .args(["instance", "remove", "db01"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Instance \"db01\" has been deleted from the \"db\" cluster.",
        ));
    assert_eq!(registry(&dir), serde_json::json!({ "db": { "instances": {} } }));

    overcast(&dir)
        .args(["instance", "remove", "db01"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains(
            "No instance found with the name \"db01\".",
        ));
}

#[test]
fn test_import_with_options() {
    let dir = tempfile::tempdir().unwrap();
    create_cluster(&dir, "app");

    overcast(&dir)
        .args([
            "instance",
            "import",
            "app01",
            "--cluster",
            "app",
            "--ip",
            "10.0.0.5",
            "--user",
            "deploy",
            "--ssh-port",
            "2222",
            "--ssh-key",
            "/home/me/.ssh/id_rsa",
        ])
        .assert()
        .success();

    let instance = &registry(&dir)["app"]["instances"]["app01"];
    assert_eq!(instance["user"], "deploy");
    assert_eq!(instance["ssh_port"], "2222");
    assert_eq!(instance["ssh_key"], "/home/me/.ssh/id_rsa");
}

#[test]
fn test_import_into_unknown_cluster() {
    let dir = tempfile::tempdir().unwrap();
    create_cluster(&dir, "db");
    let before = std::fs::read(dir.path().join("clusters.json")).unwrap();

    overcast(&dir)
        .args(["instance", "import", "web01", "--cluster", "web", "--ip", "10.0.0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No \"web\" cluster found."))
        .stderr(predicate::str::contains("overcast cluster create web"));

    assert_eq!(std::fs::read(dir.path().join("clusters.json")).unwrap(), before);
}

#[test]
fn test_import_missing_arguments() {
    let dir = tempfile::tempdir().unwrap();
    create_cluster(&dir, "db");

    overcast(&dir)
        .args(["instance", "import", "--cluster", "db", "--ip", "10.0.0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing [name] parameter."));

    overcast(&dir)
        .args(["instance", "import", "db01", "--ip", "10.0.0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing --cluster parameter."));

    overcast(&dir)
        .args(["instance", "import", "db01", "--cluster", "db"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing --ip parameter."));
}

#[test]
fn test_create_unknown_cluster() {
    let dir = tempfile::tempdir().unwrap();
    create_cluster(&dir, "db");

    overcast(&dir)
        .args(["instance", "create", "x", "--cluster", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Known clusters are: db."));
}

#[test]
fn test_create_unknown_provider() {
    let dir = tempfile::tempdir().unwrap();
    create_cluster(&dir, "db");

    overcast(&dir)
        .args(["instance", "create", "x", "--cluster", "db", "--provider", "aws"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Missing --provider parameter. Supported providers are: digitalocean.",
        ));

    assert_eq!(registry(&dir), serde_json::json!({ "db": { "instances": {} } }));
}
