use predicates::prelude::*;

use crate::common::{ManifestBuilder, TestProject};

#[test]
fn test_check_valid_project() {
    let manifest = ManifestBuilder::new()
        .project_name("demo")
        .runtime_dependency("pybuilder", Some("==0.11.5"))
        .runtime_url("git+https://github.com/pybuilder/pybuilder.git#egg=pybuilder-0")
        .build_dependency("pytest", None)
        .build();
    let project = TestProject::with_manifest(&manifest).unwrap();

    project
        .command()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking demo"))
        .stdout(predicate::str::contains("runtime (1 dependencies)"))
        .stdout(predicate::str::contains("build (2 dependencies)"))
        .stdout(predicate::str::contains("pip-tools>=1.7.0"));

    assert!(!project.exists("requirements.txt"));
    assert!(project.tool_calls().is_empty());
}

#[test]
fn test_check_json() {
    let manifest = ManifestBuilder::new()
        .runtime_dependency("pkg[x]", Some("==1"))
        .runtime_url("file:///src/pkg#egg=pkg-1")
        .build();
    let project = TestProject::with_manifest(&manifest).unwrap();

    let output = project.command().args(["check", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["valid"], true);
    let runtime = &json["categories"][0];
    assert_eq!(runtime["category"], "runtime");
    assert_eq!(runtime["release"][0], "pkg[x]==1");
    assert_eq!(runtime["development"][0], "-e file:///src/pkg#egg=pkg-1[x]==1");
    assert_eq!(runtime["dependencies"][0]["options"], "[x]");
    assert_eq!(json["categories"][1]["category"], "build");
}

#[test]
fn test_check_reports_invalid_category() {
    let manifest = ManifestBuilder::new()
        .runtime_dependency("fpkg", None)
        .build_url("file:///src/ghost#egg=ghost-1")
        .build();
    let project = TestProject::with_manifest(&manifest).unwrap();

    project
        .command()
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("runtime (1 dependencies)"))
        .stdout(predicate::str::contains("'ghost' is not registered"))
        .stderr(predicate::str::contains("Validation failed for 1 dependency category"));
}

#[test]
fn test_check_json_invalid() {
    let manifest = ManifestBuilder::new().runtime_dependency("bad[", None).build();
    let project = TestProject::with_manifest(&manifest).unwrap();

    let output = project.command().args(["check", "--format", "json"]).output().unwrap();
    assert!(!output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["valid"], false);
    assert!(json["categories"][0]["error"].as_str().unwrap().contains("Invalid dependency name 'bad['"));
}
