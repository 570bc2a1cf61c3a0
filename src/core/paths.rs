use std::path::{Path, PathBuf};

/// Project-local config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "hsm-scaffold.json";

/// Config file path: explicit override, else `./hsm-scaffold.json`.
pub fn config_file(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(CONFIG_FILE_NAME),
    }
}

/// Path relative to `root` for display, falling back to the full path.
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_defaults_to_working_directory() {
        assert_eq!(config_file(None), PathBuf::from("hsm-scaffold.json"));
    }

    #[test]
    fn config_file_honors_override() {
        let p = Path::new("/tmp/custom.json");
        assert_eq!(config_file(Some(p)), PathBuf::from("/tmp/custom.json"));
    }

    #[test]
    fn display_relative_strips_root() {
        let root = Path::new("/work/src");
        assert_eq!(display_relative(Path::new("/work/src/MotorAct/MotorAct.h"), root), "MotorAct/MotorAct.h");
        assert_eq!(display_relative(Path::new("/other/file.h"), root), "/other/file.h");
    }
}
