use clap::{Args, Subcommand};
use serde::Serialize;

use hsm_scaffold::scaffold::{self, ScaffoldReport};

use super::CmdResult;

#[derive(Args)]
pub struct RegionArgs {
    #[command(subcommand)]
    command: RegionCommand,
}

#[derive(Subcommand)]
enum RegionCommand {
    /// Add a region from the simple region template
    Add {
        /// Existing active object folder under the target root
        act: String,
        /// Region name (PascalCase, e.g. SpinReg)
        region: String,
    },
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RegionOutput {
    #[serde(rename = "region.add")]
    Add {
        act: String,
        #[serde(flatten)]
        report: ScaffoldReport,
    },
}

pub fn run(args: RegionArgs, global: &crate::commands::GlobalArgs) -> CmdResult<RegionOutput> {
    match args.command {
        RegionCommand::Add { act, region } => {
            let config = global.load_config()?;
            let report = scaffold::add_simple_region(&config, &act, &region)?;
            Ok((RegionOutput::Add { act, report }, 0))
        }
    }
}
