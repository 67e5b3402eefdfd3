use clap::Parser;
use miette::Result;
use qrplate::cli::{Cli, Commands};
use qrplate::output::Printer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let printer = Printer::new();

    match cli.command {
        Commands::Generate(args) => qrplate::cli::generate::run(args, &printer)?,
        Commands::Init(args) => qrplate::cli::init::run(args, &printer)?,
    }

    Ok(())
}
