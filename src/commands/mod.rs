use std::path::PathBuf;

use hsm_scaffold::defaults::{self, ScaffoldConfig};
use hsm_scaffold::MatchMode;

pub type CmdResult<T> = hsm_scaffold::Result<(T, i32)>;

/// Flags shared by every command.
pub(crate) struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub template_root: Option<PathBuf>,
    pub target_root: Option<PathBuf>,
}

impl GlobalArgs {
    /// Load the config file and apply command-line overrides.
    pub fn load_config(&self) -> hsm_scaffold::Result<ScaffoldConfig> {
        let mut config = defaults::load_config(self.config.as_deref())?;
        if let Some(root) = &self.template_root {
            config.template_root = root.clone();
        }
        if let Some(root) = &self.target_root {
            config.target_root = root.clone();
        }
        Ok(config)
    }

    /// Like [`GlobalArgs::load_config`], forcing regex matching when `regex` is set.
    pub fn load_config_with_mode(&self, regex: bool) -> hsm_scaffold::Result<ScaffoldConfig> {
        let mut config = self.load_config()?;
        if regex {
            config.match_mode = MatchMode::Pattern;
        }
        Ok(config)
    }
}

pub mod act;
pub mod config;
pub mod hsm;
pub mod license;
pub mod names;
pub mod region;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (hsm_scaffold::Result<serde_json::Value>, i32) {
    crate::tty::status("hsm-scaffold is working...");

    match command {
        crate::Commands::Act(args) => dispatch!(args, global, act),
        crate::Commands::Region(args) => dispatch!(args, global, region),
        crate::Commands::Hsm(args) => dispatch!(args, global, hsm),
        crate::Commands::Names(args) => dispatch!(args, global, names),
        crate::Commands::License(args) => dispatch!(args, global, license),
        crate::Commands::Config(args) => dispatch!(args, global, config),

        // Special case: List prints help directly
        crate::Commands::List => {
            let err = hsm_scaffold::Error::validation_invalid_argument(
                "output_mode",
                "List command uses raw output mode",
                None,
                None,
            );
            crate::output::map_cmd_result_to_json::<serde_json::Value>(Err(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn global_with(config: PathBuf) -> GlobalArgs {
        GlobalArgs {
            config: Some(config),
            template_root: None,
            target_root: None,
        }
    }

    #[test]
    fn root_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("hsm-scaffold.json");
        fs::write(
            &file,
            r#"{"template_root": "tpl", "target_root": "out", "match_mode": "pattern"}"#,
        )
        .unwrap();

        let mut global = global_with(file);
        let config = global.load_config().unwrap();
        assert_eq!(config.template_root, PathBuf::from("tpl"));
        assert_eq!(config.target_root, PathBuf::from("out"));
        assert_eq!(config.match_mode, MatchMode::Pattern);

        global.template_root = Some(PathBuf::from("my/templates"));
        global.target_root = Some(PathBuf::from("my/src"));
        let config = global.load_config().unwrap();
        assert_eq!(config.template_root, PathBuf::from("my/templates"));
        assert_eq!(config.target_root, PathBuf::from("my/src"));
    }

    #[test]
    fn regex_flag_forces_pattern_mode() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("hsm-scaffold.json");
        fs::write(&file, "{}").unwrap();
        let global = global_with(file);

        assert_eq!(global.load_config_with_mode(false).unwrap().match_mode, MatchMode::Literal);
        assert_eq!(global.load_config_with_mode(true).unwrap().match_mode, MatchMode::Pattern);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempdir().unwrap();
        let global = global_with(dir.path().join("absent.json"));

        let err = global.load_config().unwrap_err();
        assert_eq!(err.code.as_str(), "scaffold.path_not_found");
    }
}
