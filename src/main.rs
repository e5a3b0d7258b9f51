use clap::Parser;
use infra_timeline::commands::base_commands::{CliArgs, Commands};
use infra_timeline::commands::completions_cmd::completions_command;
use infra_timeline::commands::predict_cmd::predict_command;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Predict { .. } => {
            if let Err(e) = predict_command(cmd) {
                eprintln!("Failed to predict timeline: {e}");
                std::process::exit(1);
            }
        }
        Commands::Completions { shell } => {
            completions_command(shell, &mut std::io::stdout());
        }
    }
}
