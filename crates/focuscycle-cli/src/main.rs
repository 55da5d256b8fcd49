use clap::{Parser, Subcommand};

mod commands;
mod notifier;

#[derive(Parser)]
#[command(name = "focuscycle", version, about = "Focuscycle Pomodoro timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the countdown loop in the foreground
    Run(commands::run::RunArgs),
    /// Preview the upcoming session sequence
    Cycle(commands::cycle::CycleArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Cycle(args) => commands::cycle::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
