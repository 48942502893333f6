/// Cadence - headless music player
use anyhow::Context;
use cadence_cli::{
    commands::{self, Command},
    config::CliConfig,
    render,
    session::{Flow, Session},
};
use cadence_playback::{Catalog, Intent};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Headless Cadence player driven by commands on stdin", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog JSON file (overrides the configured path)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the player, reading commands from stdin (default)
    Run {
        /// Print events and status as JSON lines
        #[arg(long)]
        json: bool,
        /// Start playing this track right away
        #[arg(short, long)]
        track: Option<String>,
    },
    /// Print the catalog and exit
    List,
    /// Validate configuration and catalog, then exit
    Check,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.catalog {
        config.catalog_path = path;
    }
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let catalog = load_catalog(&config)?;

    let command = cli.command.unwrap_or(Commands::Run {
        json: false,
        track: None,
    });
    match command {
        Commands::Run { json, track } => {
            run(catalog, &config, json, track).await?;
        }
        Commands::List => {
            for line in render::catalog_lines(&catalog) {
                println!("{line}");
            }
        }
        Commands::Check => {
            println!(
                "ok: {} tracks in {}",
                catalog.len(),
                config.catalog_path.display()
            );
        }
    }

    Ok(())
}

fn load_catalog(config: &CliConfig) -> anyhow::Result<Catalog> {
    let path = &config.catalog_path;
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog = Catalog::from_json(&json)
        .with_context(|| format!("invalid catalog {}", path.display()))?;

    tracing::info!(tracks = catalog.len(), path = %path.display(), "catalog loaded");
    Ok(catalog)
}

async fn run(
    catalog: Catalog,
    config: &CliConfig,
    json: bool,
    track: Option<String>,
) -> anyhow::Result<()> {
    let mut session = Session::new(catalog, config, json);
    if let Some(id) = track {
        session.execute(Command::Intent(Intent::SelectTrack { id }))?;
    }
    flush(&mut session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(session.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut was_running = false;

    tracing::info!("ready, type 'help' for commands");

    loop {
        let running = session.is_running();
        if running && !was_running {
            // First tick lands one full interval after starting
            ticker.reset();
        }
        was_running = running;

        tokio::select! {
            _ = ticker.tick(), if running => {
                if let Err(e) = session.tick() {
                    tracing::warn!(error = %e, "tick failed");
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                match apply_line(&mut session, &line) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => {
                        flush(&mut session);
                        break;
                    }
                    Err(e) => eprintln!("error: {e}"),
                }
            }
        }

        flush(&mut session);
    }

    tracing::info!("session ended");
    Ok(())
}

fn apply_line(session: &mut Session, line: &str) -> cadence_cli::Result<Flow> {
    match commands::parse(line)? {
        Some(command) => session.execute(command),
        None => Ok(Flow::Continue),
    }
}

fn flush(session: &mut Session) {
    for line in session.take_output() {
        println!("{line}");
    }
}
