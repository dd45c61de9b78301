use clap::Parser;
use miette::Result;
use mockup_cli::cli::{Cli, Commands};
use mockup_cli::output::Printer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mockup_cli=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let printer = Printer::new();

    match cli.command {
        Commands::Generate(args) => mockup_cli::cli::generate::run(args, &printer)?,
    }

    Ok(())
}
