use clap::Parser;
use miette::Result;
use pixelate::cli::{Cli, Commands};
use pixelate::output::Printer;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `PIXELATE_LOG=debug`.
const LOG_ENV: &str = "PIXELATE_LOG";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => pixelate::cli::convert::run(args, &printer)?,
        Commands::Batch(args) => pixelate::cli::batch::run(args, &printer)?,
        Commands::Palette(args) => pixelate::cli::palette::run(args, &printer)?,
        Commands::Presets(args) => pixelate::cli::presets::run(args)?,
        Commands::Completions(args) => pixelate::cli::completions::run(args)?,
    }

    Ok(())
}
