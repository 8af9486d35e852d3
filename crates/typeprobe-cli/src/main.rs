#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::uninlined_format_args)]

mod commands;
mod logging;

use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;
use typeprobe_core::Config;

#[derive(Parser, Debug)]
#[command(name = "typeprobe")]
#[command(author, version, about = "Locate and summarize the type declarations of installed dependencies", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the project directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Resolve and summarize the declaration entry of every dependency (default)
    Analyze {
        /// Include devDependencies
        #[arg(long)]
        dev: bool,
    },

    /// Resolve the declaration entry of a single package directory
    Resolve {
        /// Directory containing the package's package.json
        package_dir: PathBuf,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine project directory
    let cwd = match cli.cwd {
        Some(path) => dunce::canonicalize(&path)
            .into_diagnostic()
            .wrap_err_with(|| format!("invalid --cwd: {}", path.display()))?,
        None => std::env::current_dir()
            .into_diagnostic()
            .wrap_err("cannot determine the current directory")?,
    };

    let include_dev = matches!(cli.command, Some(Commands::Analyze { dev: true }));
    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json(cli.json)
        .with_include_dev(include_dev);

    logging::init(config.verbosity, config.json);

    match cli.command {
        Some(Commands::Version) => commands::version::run(&config),
        Some(Commands::Resolve { package_dir }) => {
            let span = tracing::info_span!("resolve", cmd = "resolve", cwd = %config.cwd.display());
            let _guard = span.enter();
            commands::resolve::run(&config, &package_dir)
        }
        Some(Commands::Analyze { .. }) | None => {
            let span = tracing::info_span!("analyze", cmd = "analyze", cwd = %config.cwd.display());
            let _guard = span.enter();
            commands::analyze::run(&config)
        }
    }
}
