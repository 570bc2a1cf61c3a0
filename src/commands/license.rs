use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use hsm_scaffold::license::{self, LicenseEdit};

use super::CmdResult;

#[derive(Args)]
pub struct LicenseArgs {
    /// Project root the configured folders are relative to
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Override the license text file
    #[arg(long, value_name = "FILE")]
    license_file: Option<PathBuf>,
    /// Apply changes to disk (default is dry-run)
    #[arg(long)]
    write: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum LicenseOutput {
    #[serde(rename = "license")]
    Apply {
        license_file: String,
        dry_run: bool,
        total_files: usize,
        edits: Vec<LicenseEdit>,
        excluded: Vec<String>,
        missing_directories: Vec<String>,
        applied: bool,
    },
}

pub fn run(args: LicenseArgs, global: &crate::commands::GlobalArgs) -> CmdResult<LicenseOutput> {
    let mut config = global.load_config()?.license;
    if let Some(file) = args.license_file {
        config.license_file = file;
    }

    let mut result = license::plan_license(&config, &args.root)?;

    if args.write {
        license::apply_license(&mut result, &args.root)?;
    }

    Ok((
        LicenseOutput::Apply {
            license_file: result.license_file,
            dry_run: !args.write,
            total_files: result.edits.len(),
            edits: result.edits,
            excluded: result.excluded,
            missing_directories: result.missing_directories,
            applied: result.applied,
        },
        0,
    ))
}
