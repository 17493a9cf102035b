//! Fixture discovery.
//!
//! The on-disk convention is two levels deep: immediate subdirectories of the
//! root are categories, and every entry inside a category whose name ends in
//! `.in` is an input fixture. The expectation lives next to it as
//! `<case>.out`. Anything else is skipped silently.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::diagnostics::RunnerError;

/// Suffix that marks an entry as an input fixture.
pub const INPUT_SUFFIX: &str = ".in";
/// Suffix of the expectation sibling derived from an input fixture.
pub const EXPECTED_SUFFIX: &str = ".out";

/// One discovered test case: an input fixture paired with the path where its
/// expectation is supposed to live.
///
/// Discovery never checks that `expected` exists; a missing expectation
/// surfaces as a fatal read error when the case is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureCase {
    pub category: String,
    pub name: String,
    /// Path handed to the tool under test. May be a file or a directory.
    pub input: PathBuf,
    pub expected: PathBuf,
}

impl FixtureCase {
    /// The `category/name` identifier used in report lines.
    pub fn id(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}

/// Enumerates all fixture cases under `root`.
///
/// Categories and cases are returned sorted lexicographically by name so
/// reports are reproducible across platforms and filesystems.
pub fn discover_cases(root: &Path) -> Result<Vec<FixtureCase>, RunnerError> {
    let mut cases = Vec::new();
    for category_dir in subdirectories(root)? {
        let category = match category_dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        for entry in immediate_entries(&category_dir)? {
            let Some(name) = case_name(&entry) else {
                continue;
            };
            let expected = category_dir.join(format!("{name}{EXPECTED_SUFFIX}"));
            cases.push(FixtureCase {
                category: category.clone(),
                name,
                input: entry,
                expected,
            });
        }
    }
    Ok(cases)
}

/// Extracts the case name from an input fixture path, or `None` when the
/// entry does not follow the naming convention.
fn case_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_string_lossy().into_owned();
    let stem = file_name.strip_suffix(INPUT_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.to_string())
}

/// Immediate subdirectories of `root`, sorted by name.
fn subdirectories(root: &Path) -> Result<Vec<PathBuf>, RunnerError> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| RunnerError::Discovery {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() {
            dirs.push(entry.path().to_path_buf());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Immediate entries of a category directory, sorted by name.
///
/// Both files and directories are kept: an input fixture is allowed to be a
/// directory when the tool under test expects one.
fn immediate_entries(dir: &Path) -> Result<Vec<PathBuf>, RunnerError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| RunnerError::Discovery {
            path: dir.to_path_buf(),
            source,
        })?;
        entries.push(entry.path().to_path_buf());
    }
    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_name_strips_the_input_suffix() {
        assert_eq!(case_name(Path::new("t/parse/basic.in")), Some("basic".to_string()));
        assert_eq!(case_name(Path::new("t/parse/basic.out")), None);
        assert_eq!(case_name(Path::new("t/parse/README.md")), None);
    }

    #[test]
    fn bare_suffix_is_not_a_case() {
        assert_eq!(case_name(Path::new("t/parse/.in")), None);
    }
}
