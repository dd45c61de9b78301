pub mod generate;

use clap::{Parser, Subcommand};

/// mockup-cli - Generate mockup descriptors from asset folders and publish them
#[derive(Parser, Debug)]
#[command(name = "mockup-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate mockup.json for every mockup folder, then publish them
    Generate(generate::GenerateArgs),
}
