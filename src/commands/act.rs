use clap::{Args, Subcommand};
use serde::Serialize;

use hsm_scaffold::scaffold::{self, ScaffoldReport};

use super::CmdResult;

#[derive(Args)]
pub struct ActArgs {
    #[command(subcommand)]
    command: ActCommand,
}

#[derive(Subcommand)]
enum ActCommand {
    /// Create an active object from the simple template
    Simple {
        /// Active object name (PascalCase, e.g. MotorAct)
        name: String,
    },
    /// Create an active object with one region from the composite template
    Composite {
        /// Active object name (PascalCase, e.g. WasherAct)
        name: String,
        /// Region name (PascalCase, e.g. DrumReg)
        region: String,
    },
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ActOutput {
    #[serde(rename = "act.simple")]
    Simple {
        #[serde(flatten)]
        report: ScaffoldReport,
    },
    #[serde(rename = "act.composite")]
    Composite {
        #[serde(flatten)]
        report: ScaffoldReport,
    },
}

pub fn run(args: ActArgs, global: &crate::commands::GlobalArgs) -> CmdResult<ActOutput> {
    match args.command {
        ActCommand::Simple { name } => {
            let config = global.load_config()?;
            let report = scaffold::add_simple_act(&config, &name)?;
            Ok((ActOutput::Simple { report }, 0))
        }
        ActCommand::Composite { name, region } => {
            let config = global.load_config()?;
            let report = scaffold::add_composite_act(&config, &name, &region)?;
            Ok((ActOutput::Composite { report }, 0))
        }
    }
}
