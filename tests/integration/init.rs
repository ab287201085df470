use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_init_then_check() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized reqcompile.toml"));

    assert!(project.exists("reqcompile.toml"));
    project.command().arg("check").assert().success();
}

#[test]
fn test_init_existing_manifest() {
    let project = TestProject::with_manifest("# existing\n").unwrap();

    project
        .command()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Manifest already exists"));

    assert_eq!(project.read("reqcompile.toml"), "# existing\n");

    project.command().args(["init", "--force"]).assert().success();
    assert_ne!(project.read("reqcompile.toml"), "# existing\n");
}

#[test]
fn test_init_with_path() {
    let project = TestProject::new().unwrap();

    project.command().args(["init", "--path", "sub/dir"]).assert().success();

    assert!(project.path().join("sub").join("dir").join("reqcompile.toml").exists());
}
