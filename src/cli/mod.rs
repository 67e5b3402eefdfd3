pub mod generate;
pub mod init;

use clap::{Parser, Subcommand};

/// qrplate - Styled QR code renderer
#[derive(Parser, Debug)]
#[command(name = "qrplate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a QR code with a logo to a PNG file
    Generate(generate::GenerateArgs),

    /// Write a default qrplate.yaml
    Init(init::InitArgs),
}
