use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use hsm_scaffold::scaffold::{self, ScaffoldReport};

use super::CmdResult;

#[derive(Args)]
pub struct HsmArgs {
    #[command(subcommand)]
    command: HsmCommand,
}

#[derive(Subcommand)]
enum HsmCommand {
    /// Copy an HSM folder to a new name (the old folder is kept)
    Rename {
        /// Existing HSM folder; its name is the old HSM name
        old: PathBuf,
        /// New HSM name (PascalCase)
        new: String,
        /// Match the old name as a regular expression
        #[arg(long)]
        regex: bool,
    },
    /// Rename one HSM source file and the names inside it
    RenameFile {
        /// File to change
        file: PathBuf,
        /// Old HSM name
        old: String,
        /// New HSM name
        new: String,
        /// Match the old name as a regular expression
        #[arg(long)]
        regex: bool,
    },
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum HsmOutput {
    #[serde(rename = "hsm.rename")]
    Rename {
        #[serde(flatten)]
        report: ScaffoldReport,
    },
    #[serde(rename = "hsm.rename_file")]
    RenameFile {
        #[serde(flatten)]
        report: ScaffoldReport,
    },
}

pub fn run(args: HsmArgs, global: &crate::commands::GlobalArgs) -> CmdResult<HsmOutput> {
    match args.command {
        HsmCommand::Rename { old, new, regex } => {
            let config = global.load_config_with_mode(regex)?;
            let report = scaffold::rename_hsm_dir(&config, &old, &new)?;
            for hint in &report.hints {
                crate::tty::status(hint);
            }
            Ok((HsmOutput::Rename { report }, 0))
        }
        HsmCommand::RenameFile {
            file,
            old,
            new,
            regex,
        } => {
            let config = global.load_config_with_mode(regex)?;
            let report = scaffold::rename_hsm_file(&config, &file, &old, &new)?;
            Ok((HsmOutput::RenameFile { report }, 0))
        }
    }
}
