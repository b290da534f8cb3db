/// Tone Replay - replay player scripts through the action surface
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tone_actions::events;
use tone_replay::{script, Replay, ReplayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tone-replay")]
#[command(about = "Replay UI commands and engine signals through the Tone Player action surface", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a script and print every dispatched event as a JSON line
    Run {
        /// Script file (JSON array of steps)
        script: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print each event
        #[arg(long)]
        pretty: bool,
    },
    /// Print the event taxonomy
    Events,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays a clean event stream
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tone_replay=info,tone_actions=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            script: script_path,
            config,
            pretty,
        } => run(&script_path, config.as_deref(), pretty)?,
        Commands::Events => {
            for name in events::ALL {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn run(script_path: &Path, config_path: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    let mut config = ReplayConfig::load(config_path).context("Failed to load config")?;
    config.validate()?;
    if pretty {
        config.output.pretty = true;
    }

    let steps = script::load(script_path)
        .with_context(|| format!("Failed to read script {:?}", script_path))?;
    tracing::info!(steps = steps.len(), script = ?script_path, "Replaying script");

    let stdout = std::io::stdout();
    let mut replay = Replay::new(config.actions, config.output, stdout.lock());
    let summary = replay.run(&steps)?;

    tracing::info!(
        steps = summary.steps,
        events = summary.events,
        side_effects = summary.side_effects,
        "Replay finished"
    );
    Ok(())
}
