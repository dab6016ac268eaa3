/// Resonance - terminal music player shell
use clap::{Parser, Subcommand};
use resonance_cli::{
    config::AppConfig,
    shell::{format_track, Shell},
};
use std::{
    fs::File,
    io::{self, BufReader, IsTerminal},
    path::PathBuf,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "resonance")]
#[command(about = "Resonance music player shell", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "RESONANCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive shell (the default); reads commands from stdin
    Shell,
    /// Run a file of shell commands
    Run {
        /// Script path
        script: PathBuf,
    },
    /// List the tracks in the catalog
    Catalog,
    /// Print the effective configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    // Initialize tracing; RUST_LOG wins over the configured filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            let mut shell = Shell::from_config(&config)?;
            if prompt {
                println!("Resonance. Type `help` for commands.");
            }
            shell.run(stdin.lock(), &mut io::stdout(), prompt)?;
        }
        Commands::Run { script } => {
            let file = File::open(&script)?;
            tracing::info!("Running script {}", script.display());
            let mut shell = Shell::from_config(&config)?;
            shell.run(BufReader::new(file), &mut io::stdout(), false)?;
        }
        Commands::Catalog => {
            let shell = Shell::from_config(&config)?;
            for track in shell.session().catalog().tracks() {
                println!("{}", format_track(track));
            }
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
