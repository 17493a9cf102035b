//! Shared helpers for goldrun integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Creates `<root>/<category>/<name>.in` and its `.out` expectation pair.
pub fn write_case(root: &Path, category: &str, name: &str, input: &str, expected: &str) {
    let dir = root.join(category);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{name}.in")), input).unwrap();
    fs::write(dir.join(format!("{name}.out")), expected).unwrap();
}

/// Writes an executable stub tool at `path` with the given shell body.
///
/// The stub receives the fixed argument vector `test <category> <fixture>`,
/// so `$2` is the category name and `$3` the fixture path.
#[cfg(unix)]
pub fn write_tool(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}
