mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging; stderr so report JSON owns stdout
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Profile {
            file,
            output,
            pretty,
        } => cli::profile_command(file, output, pretty),
        Commands::Schema { file } => cli::schema_command(file),
        Commands::Clean { file, output } => cli::clean_command(file, output),
    }
}
