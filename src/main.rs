use clap::Parser;
use tracing_subscriber::EnvFilter;

use cytobands::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("cytobands=debug,info")
    } else {
        EnvFilter::new("cytobands=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Reconcile(args) => {
            cli::reconcile::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Apply(args) => {
            cli::apply::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Strategies(args) => {
            cli::strategies::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
