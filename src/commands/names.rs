use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use hsm_scaffold::naming::{self, NamePair, SubstitutionPlan};
use hsm_scaffold::utils::{io, validation};
use hsm_scaffold::NameSet;

use super::CmdResult;

#[derive(Args)]
pub struct NamesArgs {
    #[command(subcommand)]
    command: NamesCommand,
}

#[derive(Subcommand)]
enum NamesCommand {
    /// Show the class, variable and event names derived from identifiers
    Show {
        /// PascalCase identifiers (e.g. CompositeAct)
        identifiers: Vec<String>,
    },
    /// Replace the names of one identifier with another inside a file
    Substitute {
        /// Identifier to replace
        #[arg(long)]
        from: String,
        /// Replacement identifier
        #[arg(long)]
        to: String,
        /// File to rewrite
        file: PathBuf,
        /// Write changes to disk (default is dry-run)
        #[arg(long)]
        write: bool,
        /// Match the source names as regular expressions
        #[arg(long)]
        regex: bool,
    },
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum NamesOutput {
    #[serde(rename = "names.show")]
    Show { names: Vec<NameSet> },
    #[serde(rename = "names.substitute")]
    Substitute {
        file: String,
        names: NamePair,
        changed: bool,
        dry_run: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        applied: bool,
    },
}

pub fn run(args: NamesArgs, global: &crate::commands::GlobalArgs) -> CmdResult<NamesOutput> {
    match args.command {
        NamesCommand::Show { identifiers } => show(&identifiers),
        NamesCommand::Substitute {
            from,
            to,
            file,
            write,
            regex,
        } => {
            let config = global.load_config_with_mode(regex)?;
            substitute(&from, &to, &file, write, config.match_mode)
        }
    }
}

fn show(identifiers: &[String]) -> CmdResult<NamesOutput> {
    validation::require_non_empty_vec(identifiers, "identifiers")?;

    let names = identifiers
        .iter()
        .map(|id| naming::derive_names(id))
        .collect::<hsm_scaffold::Result<Vec<_>>>()?;

    Ok((NamesOutput::Show { names }, 0))
}

fn substitute(
    from: &str,
    to: &str,
    file: &Path,
    write: bool,
    mode: naming::MatchMode,
) -> CmdResult<NamesOutput> {
    let pair = NamePair::with_mode(from, to, mode)?;
    let original = io::read_file(file, &format!("read {}", file.display()))?;

    let plan = SubstitutionPlan::new(mode).with_pair(pair.clone());
    let rewritten = plan.apply(&original)?;
    let changed = rewritten != original;

    if write && changed {
        io::write_file(file, &rewritten, &format!("write {}", file.display()))?;
    }

    // Exit 1 when nothing matched, like a search with no hits.
    let exit_code = if changed { 0 } else { 1 };

    Ok((
        NamesOutput::Substitute {
            file: file.display().to_string(),
            names: pair,
            changed,
            dry_run: !write,
            content: if write { None } else { Some(rewritten) },
            applied: write && changed,
        },
        exit_code,
    ))
}
