//! License header replacement for generated and framework sources.
//!
//! Walks the configured source folders, strips any block comment carrying
//! the copyright marker and prepends the current license text.

use crate::defaults::LicenseConfig;
use crate::error::{Error, Result};
use crate::paths::display_relative;
use crate::utils::io;
use glob_match::glob_match;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A source file that receives the license header.
#[derive(Debug, Clone, Serialize)]
pub struct LicenseEdit {
    /// File path relative to root.
    pub file: String,
    /// Old header comments removed.
    pub headers_removed: usize,
    #[serde(skip)]
    pub new_content: String,
}

/// The full result of a license pass.
#[derive(Debug, Clone, Serialize)]
pub struct LicenseResult {
    pub license_file: String,
    pub edits: Vec<LicenseEdit>,
    /// Matching files skipped by the exclude list.
    pub excluded: Vec<String>,
    /// Configured folders that do not exist under root.
    pub missing_directories: Vec<String>,
    pub applied: bool,
}

/// Regex matching a block comment containing `marker` plus trailing whitespace.
fn header_regex(marker: &str) -> Result<Regex> {
    let pattern = format!(r"(?s)/\*.*?{}.*?\*/\s*", regex::escape(marker));
    Regex::new(&pattern).map_err(|e| Error::validation_invalid_pattern(pattern, e.to_string()))
}

fn is_excluded(path: &str, exclude: &[String]) -> bool {
    exclude.iter().any(|suffix| path.ends_with(suffix.as_str()))
}

fn matches_patterns(path: &Path, patterns: &[String]) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    patterns.iter().any(|pattern| glob_match(pattern, &name))
}

/// Collect regular files under `dir`. Symlinks are not followed.
fn walk_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("list {}", dir.display())))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("list {}", dir.display())))
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("inspect {}", path.display())))
        })?;
        if file_type.is_dir() {
            walk_recursive(&path, files)?;
        } else if file_type.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

/// Compute the license edits for every matching file under `root`.
pub fn plan_license(config: &LicenseConfig, root: &Path) -> Result<LicenseResult> {
    let license_path = root.join(&config.license_file);
    if !license_path.is_file() {
        return Err(Error::scaffold_path_not_found(
            license_path.display().to_string(),
            Some("license file".to_string()),
        ));
    }
    let license = io::read_file(&license_path, &format!("read {}", license_path.display()))?;
    let header = header_regex(&config.copyright_marker)?;

    let mut result = LicenseResult {
        license_file: license_path.display().to_string(),
        edits: Vec::new(),
        excluded: Vec::new(),
        missing_directories: Vec::new(),
        applied: false,
    };

    for dir in &config.directories {
        let base = root.join(dir);
        if !base.is_dir() {
            result.missing_directories.push(dir.display().to_string());
            continue;
        }

        let mut files = Vec::new();
        walk_recursive(&base, &mut files)?;
        files.sort();

        for file in files.iter().filter(|f| matches_patterns(f, &config.patterns)) {
            let relative = display_relative(file, root);
            if is_excluded(&relative, &config.exclude) {
                log_status!("license", "{} excluded", relative);
                result.excluded.push(relative);
                continue;
            }

            let content = io::read_file(file, &format!("read {}", file.display()))?;
            let headers_removed = header.find_iter(&content).count();
            let stripped = header.replace_all(&content, "");

            result.edits.push(LicenseEdit {
                file: relative,
                headers_removed,
                new_content: format!("{}{}", license, stripped),
            });
        }
    }

    Ok(result)
}

/// Write planned edits to disk.
pub fn apply_license(result: &mut LicenseResult, root: &Path) -> Result<()> {
    for edit in &result.edits {
        let path = root.join(&edit.file);
        log_status!("license", "{}", edit.file);
        io::write_file(&path, &edit.new_content, &format!("write {}", path.display()))?;
    }
    result.applied = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const MARKER: &str = "Copyright (C) Gallium Studio LLC";

    fn setup(root: &Path) {
        fs::write(root.join("LICENSE.txt"), "/* NEW LICENSE */\n").unwrap();
        fs::create_dir_all(root.join("src").join("app")).unwrap();
        fs::create_dir_all(root.join("include")).unwrap();
    }

    #[test]
    fn header_regex_strips_marked_comment_and_whitespace() {
        let re = header_regex(MARKER).unwrap();
        let src = format!("/*****\n * {}\n *****/\n\n#include \"bsp.h\"\n", MARKER);
        assert_eq!(re.replace_all(&src, ""), "#include \"bsp.h\"\n");
    }

    #[test]
    fn header_regex_leaves_unmarked_comments() {
        let re = header_regex(MARKER).unwrap();
        let src = "/* plain comment */\nint x;\n";
        assert_eq!(re.replace_all(src, ""), src);
    }

    #[test]
    fn exclude_matches_path_suffix() {
        let exclude = vec!["_write.c".to_string()];
        assert!(is_excluded("src/_write.c", &exclude));
        assert!(!is_excluded("src/write.c", &exclude));
    }

    #[test]
    fn plan_replaces_headers_and_reports_exclusions() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        setup(root);
        fs::write(
            root.join("src").join("app").join("Demo.cpp"),
            format!("/* {} */\nint demo;\n", MARKER),
        )
        .unwrap();
        fs::write(root.join("include").join("bsp.h"), "#pragma once\n").unwrap();
        fs::write(root.join("src").join("_write.c"), "int w;\n").unwrap();
        fs::write(root.join("src").join("notes.md"), "notes\n").unwrap();

        let result = plan_license(&LicenseConfig::default(), root).unwrap();

        assert_eq!(result.edits.len(), 2);
        let demo = result.edits.iter().find(|e| e.file.ends_with("Demo.cpp")).unwrap();
        assert_eq!(demo.headers_removed, 1);
        assert_eq!(demo.new_content, "/* NEW LICENSE */\nint demo;\n");
        let bsp = result.edits.iter().find(|e| e.file.ends_with("bsp.h")).unwrap();
        assert_eq!(bsp.new_content, "/* NEW LICENSE */\n#pragma once\n");
        assert_eq!(result.excluded.len(), 1);
        assert_eq!(result.missing_directories, vec!["framework"]);
        assert!(!result.applied);
    }

    #[test]
    fn apply_writes_planned_edits() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        setup(root);
        let file = root.join("src").join("main.c");
        fs::write(&file, "int main(void);\n").unwrap();

        let mut result = plan_license(&LicenseConfig::default(), root).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "int main(void);\n");

        apply_license(&mut result, root).unwrap();
        assert!(result.applied);
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "/* NEW LICENSE */\nint main(void);\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn walk_does_not_follow_symlink_loops() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        setup(root);
        fs::write(root.join("src").join("app").join("main.c"), "int x;\n").unwrap();
        std::os::unix::fs::symlink(root.join("src"), root.join("src").join("app").join("Up"))
            .unwrap();

        let result = plan_license(&LicenseConfig::default(), root).unwrap();
        assert_eq!(result.edits.len(), 1);
    }

    #[test]
    fn missing_license_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = plan_license(&LicenseConfig::default(), dir.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "scaffold.path_not_found");
    }
}
