use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod list;
mod output;
mod show;
mod split;
mod utils;

use error::Result;

#[derive(Parser)]
#[command(name = "dechain")]
#[command(
    about = "Split a concatenated DER certificate chain into certificates",
    long_about = None
)]
struct Cli {
    /// Log more detail to stderr (-v debug, -vv trace). RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write each certificate of a chain to its own file
    Split {
        #[command(flatten)]
        config: split::Config,
    },
    /// Show the certificate boundaries found in a chain
    List {
        #[command(flatten)]
        config: list::Config,
    },
    /// Print one certificate of a chain
    Show {
        #[command(flatten)]
        config: show::Config,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Split { config } => split::execute(config)?,
        Commands::List { config } => list::execute(config)?,
        Commands::Show { config } => show::execute(config)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
