use clap::{Args, Subcommand};
use serde::Serialize;

use hsm_scaffold::defaults::{self, ScaffoldConfig};
use hsm_scaffold::paths;

use super::CmdResult;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (file merged with defaults and flags)
    Show {
        /// Show only built-in defaults (ignore hsm-scaffold.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Show the path to hsm-scaffold.json
    Path,
    /// Write hsm-scaffold.json with built-in defaults
    Init,
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<ScaffoldConfig>,
    path: String,
    exists: bool,
}

pub fn run(args: ConfigArgs, global: &crate::commands::GlobalArgs) -> CmdResult<ConfigOutput> {
    let path = paths::config_file(global.config.as_deref());

    match args.command {
        ConfigCommand::Show { builtin } => {
            let config = if builtin {
                ScaffoldConfig::default()
            } else {
                global.load_config()?
            };
            Ok((
                ConfigOutput {
                    command: "config.show".to_string(),
                    config: Some(config),
                    exists: path.exists(),
                    path: path.display().to_string(),
                },
                0,
            ))
        }
        ConfigCommand::Path => Ok((
            ConfigOutput {
                command: "config.path".to_string(),
                config: None,
                exists: path.exists(),
                path: path.display().to_string(),
            },
            0,
        )),
        ConfigCommand::Init => {
            let config = ScaffoldConfig::default();
            defaults::save_config(&config, &path)?;
            Ok((
                ConfigOutput {
                    command: "config.init".to_string(),
                    config: Some(config),
                    exists: true,
                    path: path.display().to_string(),
                },
                0,
            ))
        }
    }
}
