use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{act, config, hsm, license, names, region};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "hsm-scaffold")]
#[command(version = VERSION)]
#[command(about = "Scaffold active objects and state machine regions from templates")]
struct Cli {
    /// Config file (default: ./hsm-scaffold.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the template root folder
    #[arg(long, global = true, value_name = "DIR")]
    template_root: Option<PathBuf>,

    /// Override the folder new active objects are created in
    #[arg(long, global = true, value_name = "DIR")]
    target_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an active object from a template
    Act(act::ActArgs),
    /// Add a region to an existing active object
    Region(region::RegionArgs),
    /// Rename a hierarchical state machine folder or file
    Hsm(hsm::HsmArgs),
    /// Show or apply derived class, variable and event names
    Names(names::NamesArgs),
    /// Replace license headers in source files
    License(license::LicenseArgs),
    /// Inspect or create the scaffold configuration
    Config(config::ConfigArgs),
    /// List available commands (alias for --help)
    List,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if matches!(cli.command, Commands::List) {
        let mut cmd = Cli::command();
        if cmd.print_help().is_err() {
            return std::process::ExitCode::from(1);
        }
        println!();
        return std::process::ExitCode::SUCCESS;
    }

    let global = GlobalArgs {
        config: cli.config,
        template_root: cli.template_root,
        target_root: cli.target_root,
    };

    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    if output::print_json_result(json_result).is_err() {
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
