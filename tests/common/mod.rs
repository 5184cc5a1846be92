//! Integration tests for renamepkg
//!
//! These tests build small Go modules in temporary directories and run the
//! binary against them. Formatting is disabled unless a test opts in, so the
//! suite does not depend on a Go toolchain.

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const MODULE: &str = "x.test/m";

/// Helper to create a Go module with one library package and two importers
#[allow(unused)]
pub fn create_test_module() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::write(root.join("go.mod"), format!("module {MODULE}\n\ngo 1.22\n")).unwrap();

    write_file(
        root,
        "internal/server/di/di.go",
        "package di\n\nfunc New() string { return \"di\" }\n",
    );
    write_file(
        root,
        "internal/server/di/di_test.go",
        "package di\n\nimport \"testing\"\n\nfunc TestNew(t *testing.T) { New() }\n",
    );
    write_file(
        root,
        "cmd/app/main.go",
        r#"package main

import (
	"fmt"

	"x.test/m/internal/server/di"
	"x.test/m/internal/server/dix"
)

func main() {
	fmt.Println(di.New(), dix.Name)
}
"#,
    );
    write_file(
        root,
        "internal/server/dix/dix.go",
        "package dix\n\nconst Name = \"dix\"\n",
    );
    write_file(
        root,
        "pkg/worker/worker.go",
        "package worker\n\nimport server \"x.test/m/internal/server/di\"\n\nvar _ = server.New\n",
    );

    temp
}

/// Writes `content` to `relative` under `root`, creating parent directories
#[allow(unused)]
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[allow(unused)]
pub fn read_file(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

/// Helper to run renamepkg against `root` with formatting disabled
pub fn run_renamepkg(root: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("renamepkg");
    cmd.arg("--no-fmt").arg("-C").arg(root).args(args);

    cmd.assert()
}
