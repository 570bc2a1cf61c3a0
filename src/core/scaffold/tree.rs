//! Directory primitives for scaffolding: tree copy, file listing and
//! identifier-based file renames.

use crate::error::{Error, Result};
use crate::naming::{replace_first, MatchMode};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A file rename performed during scaffolding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRename {
    pub from: String,
    pub to: String,
}

/// Recursively copy `src` into `dst`, creating `dst` and any missing parents.
///
/// Nothing is created unless `src` is a folder. Symlinked folders are not
/// followed; symlinked files are copied by content.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(Error::scaffold_path_not_found(
            src.display().to_string(),
            Some("source folder".to_string()),
        ));
    }

    let entries = fs::read_dir(src).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("list {}", src.display())))
    })?;

    fs::create_dir_all(dst).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("create {}", dst.display())))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("list {}", src.display())))
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("inspect {}", path.display())))
        })?;
        let target = dst.join(entry.file_name());

        if file_type.is_dir() {
            copy_tree(&path, &target)?;
        } else if file_type.is_file() || path.is_file() {
            fs::copy(&path, &target).map_err(|e| {
                Error::internal_io(
                    e.to_string(),
                    Some(format!("copy {} → {}", path.display(), target.display())),
                )
            })?;
        } else {
            log_status!("scaffold", "Skipping {}", path.display());
        }
    }

    Ok(())
}

/// Regular files directly inside `dir`, sorted by path.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("list {}", dir.display())))
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Rename `file` by replacing the first match of `from` in its name with
/// `to`. Returns the (possibly unchanged) path and the rename performed, if
/// any.
pub fn rename_file(
    file: &Path,
    from: &str,
    to: &str,
    mode: MatchMode,
) -> Result<(PathBuf, Option<FileRename>)> {
    let Some(name) = file.file_name().map(|n| n.to_string_lossy().to_string()) else {
        return Ok((file.to_path_buf(), None));
    };

    let Some(new_name) = replace_first(&name, from, to, mode)? else {
        return Ok((file.to_path_buf(), None));
    };

    if new_name == name {
        return Ok((file.to_path_buf(), None));
    }

    let target = file.with_file_name(&new_name);
    if target.exists() {
        return Err(Error::scaffold_path_exists(
            target.display().to_string(),
            Some("rename target".to_string()),
        ));
    }

    fs::rename(file, &target).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("rename {} → {}", file.display(), target.display())),
        )
    })?;

    Ok((
        target,
        Some(FileRename {
            from: name,
            to: new_name,
        }),
    ))
}

/// Rename every regular file directly inside `dir` that mentions `from`.
///
/// Returns the files now in `dir` and the renames performed.
pub fn rename_files_in(
    dir: &Path,
    from: &str,
    to: &str,
    mode: MatchMode,
) -> Result<(Vec<PathBuf>, Vec<FileRename>)> {
    let mut renames = Vec::new();
    for file in list_files(dir)? {
        if let (_, Some(rename)) = rename_file(&file, from, to, mode)? {
            renames.push(rename);
        }
    }
    Ok((list_files(dir)?, renames))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copy_tree_copies_nested_folders() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("Inner")).unwrap();
        fs::write(src.join("a.h"), "a").unwrap();
        fs::write(src.join("Inner").join("b.h"), "b").unwrap();

        let dst = dir.path().join("out").join("Copy");
        copy_tree(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("a.h")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dst.join("Inner").join("b.h")).unwrap(), "b");
    }

    #[test]
    fn copy_tree_rejects_file_source_without_creating_target() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("GpioIn");
        fs::write(&src, "not a folder").unwrap();

        let dst = dir.path().join("GpioOut");
        let err = copy_tree(&src, &dst).unwrap_err();
        assert_eq!(err.code.as_str(), "scaffold.path_not_found");
        assert!(!dst.exists());
    }

    #[cfg(unix)]
    #[test]
    fn copy_tree_does_not_follow_folder_symlinks() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("Tpl");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.h"), "a").unwrap();
        std::os::unix::fs::symlink(&src, src.join("Loop")).unwrap();

        let dst = dir.path().join("Copy");
        copy_tree(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("a.h")).unwrap(), "a");
        assert!(!dst.join("Loop").exists());
    }

    #[test]
    fn rename_file_in_pattern_mode_matches_regex() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("GpioInHsm.cpp");
        fs::write(&file, "").unwrap();

        let (renamed, rename) =
            rename_file(&file, "Gpio.nHsm", "LedHsm", MatchMode::Pattern).unwrap();
        assert_eq!(renamed, dir.path().join("LedHsm.cpp"));
        assert_eq!(rename.unwrap().from, "GpioInHsm.cpp");
    }

    #[test]
    fn list_files_skips_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("Sub")).unwrap();
        fs::write(dir.path().join("b.cpp"), "").unwrap();
        fs::write(dir.path().join("a.h"), "").unwrap();

        let files = list_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.h", "b.cpp"]);
    }

    #[test]
    fn rename_files_in_renames_matching_files_only() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("SimpleAct.cpp"), "").unwrap();
        fs::write(dir.path().join("SimpleActInterface.h"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("SimpleActDir")).unwrap();

        let (files, renames) =
            rename_files_in(dir.path(), "SimpleAct", "MotorAct", MatchMode::Literal).unwrap();

        assert_eq!(renames.len(), 2);
        assert!(dir.path().join("MotorAct.cpp").exists());
        assert!(dir.path().join("MotorActInterface.h").exists());
        assert!(dir.path().join("SimpleActDir").is_dir());
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn rename_file_refuses_to_clobber() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("OldHsm.cpp");
        fs::write(&file, "old").unwrap();
        fs::write(dir.path().join("NewHsm.cpp"), "existing").unwrap();

        let err = rename_file(&file, "OldHsm", "NewHsm", MatchMode::Literal).unwrap_err();
        assert_eq!(err.code.as_str(), "scaffold.path_exists");
        assert_eq!(fs::read_to_string(dir.path().join("NewHsm.cpp")).unwrap(), "existing");
    }
}
