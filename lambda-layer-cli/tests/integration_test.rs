//! Integration tests driving the `lambda-layer` binary against fixture
//! projects assembled in temporary directories. A fake installer shell script
//! stands in for pip, so the tests are unix-only.
#![cfg(unix)]
// Enable Clippy lints that are disabled by default.
// https://rust-lang.github.io/rust-clippy/stable/index.html
#![warn(clippy::pedantic)]

// Suppress warnings due to the `unused_crate_dependencies` lint not handling integration tests well.
use clap as _;
use lambda_layer_package as _;
use log as _;
use stderrlog as _;
use thiserror as _;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

#[test]
fn build_writes_layer_directory() {
    let project = TestProject::new("X = 1\n");

    let output = run_layer_build(&project.dir);

    assert!(output.status.success(), "{}", stderr_lossy(&output));
    assert!(stderr_lossy(&output).contains("Successfully wrote layer directory"));

    let layer_dir = project.dir.join("dist-serverless");
    assert!(layer_dir.join("python/fakepkg/__init__.py").is_file());

    let shim_dir = layer_dir.join("python/fakepkg/integrations/init_shim");
    assert_eq!(fs::read_dir(&shim_dir).unwrap().count(), 1);
    assert_eq!(
        fs::read(shim_dir.join("__init__.py")).unwrap(),
        fs::read(project.dir.join("scripts/init_shim.py")).unwrap()
    );
}

#[test]
fn second_build_fails_when_output_directory_exists() {
    let project = TestProject::new("X = 1\n");

    let output = run_layer_build(&project.dir);
    assert!(output.status.success(), "{}", stderr_lossy(&output));

    let output = run_layer_build(&project.dir);
    assert_ne!(output.status.code(), Some(0));
    assert!(stderr_lossy(&output).contains("already exists"));

    // The first run's output is left untouched.
    assert_eq!(
        fs::read_to_string(
            project
                .dir
                .join("dist-serverless/python/fakepkg/integrations/init_shim/__init__.py")
        )
        .unwrap(),
        "X = 1\n"
    );
}

#[test]
fn build_fails_for_missing_wheel_without_leaking_staging_directories() {
    let project = TestProject::new("X = 1\n");
    fs::remove_file(project.dir.join("dist/fakepkg-1.2.3-py2.py3-none-any.whl")).unwrap();

    let staging_probe = project.dir.join("staging-probe");
    fs::create_dir(&staging_probe).unwrap();

    let output = Command::new(LAMBDA_LAYER_BINARY_UNDER_TEST)
        .current_dir(&project.dir)
        .env("TMPDIR", &staging_probe)
        .output()
        .unwrap();

    assert_ne!(output.status.code(), Some(0));
    assert!(stderr_lossy(&output).contains("does not exist"));
    assert!(!project.dir.join("dist-serverless").exists());

    // The scoped staging directory was removed on the failure path.
    assert_eq!(fs::read_dir(&staging_probe).unwrap().count(), 0);
}

#[test]
fn build_surfaces_installer_failure() {
    let project = TestProject::new("X = 1\n");
    write_executable(
        &project.dir.join("fake-pip"),
        "#!/bin/sh\necho 'No matching distribution found' >&2\nexit 1\n",
    );

    let output = run_layer_build(&project.dir);

    assert_ne!(output.status.code(), Some(0));
    assert!(stderr_lossy(&output).contains("unexpectedly exited"));
    assert!(stderr_lossy(&output).contains("No matching distribution found"));
    assert!(!project.dir.join("dist-serverless").exists());
}

#[test]
fn build_fails_without_layer_descriptor() {
    let temp_dir = tempfile::tempdir().unwrap();

    let output = run_layer_build(temp_dir.path());

    assert_ne!(output.status.code(), Some(0));
    assert!(stderr_lossy(&output).contains("Failed to read layer descriptor"));
}

/// A fixture project directory: a `layer.toml` descriptor, a pre-built (dummy)
/// wheel in `dist/`, the shim source in `scripts/` and a fake installer that
/// emulates `pip install --target` by materializing `fakepkg/__init__.py`.
struct TestProject {
    _temp_dir: TempDir,
    dir: PathBuf,
}

impl TestProject {
    fn new(shim_contents: &str) -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().to_path_buf();

        fs::create_dir(dir.join("dist")).unwrap();
        fs::write(
            dir.join("dist/fakepkg-1.2.3-py2.py3-none-any.whl"),
            "not a real wheel",
        )
        .unwrap();

        fs::create_dir(dir.join("scripts")).unwrap();
        fs::write(dir.join("scripts/init_shim.py"), shim_contents).unwrap();

        let fake_pip = dir.join("fake-pip");
        write_executable(&fake_pip, FAKE_INSTALLER);

        fs::write(
            dir.join("layer.toml"),
            format!(
                "[package]\n\
                 name = \"fakepkg\"\n\
                 version = \"1.2.3\"\n\
                 \n\
                 [shim]\n\
                 source = \"scripts/init_shim.py\"\n\
                 module = \"init_shim\"\n\
                 \n\
                 [installer]\n\
                 program = \"{}\"\n",
                fake_pip.to_string_lossy()
            ),
        )
        .unwrap();

        TestProject {
            _temp_dir: temp_dir,
            dir,
        }
    }
}

fn run_layer_build(project_dir: &Path) -> Output {
    Command::new(LAMBDA_LAYER_BINARY_UNDER_TEST)
        .current_dir(project_dir)
        .output()
        .unwrap()
}

fn stderr_lossy(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_executable(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

const FAKE_INSTALLER: &str = "#!/bin/sh\n\
set -e\n\
target=\"\"\n\
while [ \"$#\" -gt 0 ]; do\n\
\tif [ \"$1\" = \"--target\" ]; then target=\"$2\"; shift; fi\n\
\tshift\n\
done\n\
mkdir -p \"${target}/fakepkg\"\n\
printf 'VERSION = \"1.2.3\"\\n' > \"${target}/fakepkg/__init__.py\"\n";

const LAMBDA_LAYER_BINARY_UNDER_TEST: &str = env!("CARGO_BIN_EXE_lambda-layer");
