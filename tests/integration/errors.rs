use predicates::prelude::*;

use crate::common::{ManifestBuilder, TestProject};

#[test]
fn test_invalid_dependency_name() {
    let manifest = ManifestBuilder::new().runtime_dependency("a[b]c", None).build();
    let project = TestProject::with_manifest(&manifest).unwrap();

    project.command().arg("compile").assert().failure().code(1).stderr(predicate::str::contains(
        "Invalid dependency name 'a[b]c'. Examples of valid names: pkg, pkg[extra1,extra2].",
    ));

    assert!(project.tool_calls().is_empty());
}

#[test]
fn test_url_on_declaration_rejected() {
    let manifest = ManifestBuilder::new()
        .runtime_dependency_with_url("linked", "git+https://example.com/linked.git")
        .build();
    let project = TestProject::with_manifest(&manifest).unwrap();

    project
        .command()
        .arg("compile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dependency url set on 'linked'"))
        .stderr(predicate::str::contains("runtime.dependencies entry should be considered deprecated"));
}

#[test]
fn test_override_without_scheme() {
    let manifest = ManifestBuilder::new()
        .runtime_dependency("pkg", None)
        .runtime_url("-e pkg#egg=pkg-1")
        .build();
    let project = TestProject::with_manifest(&manifest).unwrap();

    project
        .command()
        .arg("compile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dependency url must start with '{scheme}://', got: 'pkg#egg=pkg-1'."));
}

#[test]
fn test_override_without_egg() {
    let manifest = ManifestBuilder::new()
        .runtime_dependency("pkg", None)
        .runtime_url("git+https://example.com/pkg.git")
        .build();
    let project = TestProject::with_manifest(&manifest).unwrap();

    project.command().arg("compile").assert().failure().stderr(predicate::str::contains(
        "Missing '#egg=pkg-name-version' fragment in url 'git+https://example.com/pkg.git'.",
    ));
}

#[test]
fn test_override_without_version() {
    let manifest = ManifestBuilder::new()
        .runtime_dependency("pkg", None)
        .runtime_url("file:///tmp/pkg#egg=pkg")
        .build();
    let project = TestProject::with_manifest(&manifest).unwrap();

    project.command().arg("compile").assert().failure().stderr(predicate::str::contains(
        "Missing version in 'egg' parameter of url 'file:///tmp/pkg#egg=pkg'. \
         Please add version such that: 'egg={pkg-name}-{version}'.",
    ));
}

/// A build url naming a runtime-only package is an error, and runtime files were already written
#[test]
fn test_build_override_of_runtime_package() {
    let manifest = ManifestBuilder::new()
        .runtime_dependency("pkg", None)
        .build_url("file:///src/pkg#egg=pkg-1")
        .build();
    let project = TestProject::with_manifest(&manifest).unwrap();

    project.command().arg("compile").assert().failure().stderr(predicate::str::contains(
        "Dependency url references dependency 'pkg', but 'pkg' is not registered as a dependency \
         via build.dependencies or build.plugin-dependencies.",
    ));

    assert!(project.exists("requirements.txt"));
    assert!(project.exists("requirements_development.txt"));
    assert!(!project.exists("build_requirements.txt"));
    assert!(project.tool_calls().iter().all(|call| !call.starts_with("pip-sync")));
}

#[test]
fn test_unknown_manifest_key() {
    let project = TestProject::with_manifest("[build]\nplugin_dependencies = [\"x\"]\n").unwrap();

    project
        .command()
        .arg("compile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid manifest file syntax"))
        .stderr(predicate::str::contains("plugin_dependencies"));
}

#[test]
fn test_missing_manifest() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["compile", "--manifest-path"])
        .arg(project.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("reqcompile.toml not found"))
        .stderr(predicate::str::contains("reqcompile init"));
}

/// pip-compile failures are reported with their stderr and abort the run
#[test]
fn test_pip_compile_failure() {
    let project = TestProject::with_manifest(&ManifestBuilder::new().runtime_dependency("pkg", None).build())
        .unwrap();
    project.break_pip_compile().unwrap();

    project
        .command()
        .arg("compile")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Command failed with exit status: 2"))
        .stderr(predicate::str::contains("Could not find a version that matches pkg"));

    assert!(!project.exists("requirements.txt"));
}

#[test]
fn test_pip_sync_failure() {
    let project = TestProject::with_manifest(&ManifestBuilder::new().build()).unwrap();
    project.break_pip_sync().unwrap();

    project
        .command()
        .arg("compile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pip-sync"));

    assert!(project.exists("requirements_development.txt"));
}

#[test]
fn test_pip_compile_not_installed() {
    let project = TestProject::with_manifest(&ManifestBuilder::new().build()).unwrap();

    project
        .command()
        .env("REQCOMPILE_PIP_COMPILE", "reqcompile-missing-pip-compile")
        .arg("compile")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Command 'reqcompile-missing-pip-compile' is not installed or not found in PATH",
        ));
}
