/// Jukebox Simulator - drives the player widget without a browser
use anyhow::Context;
use clap::{Parser, Subcommand};
use jukebox_core::MusicCatalog;
use jukebox_sim::{load_catalog, load_metadata, run_session, SessionOptions, SimConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jukebox-sim")]
#[command(about = "Headless driver for the Jukebox player widget", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./jukebox.toml if present)
    #[arg(short, long, global = true, env = "JUKEBOX_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted session against a simulated sink
    Run {
        /// Tracks to play through
        #[arg(short, long, default_value_t = 3)]
        plays: usize,
        /// Seed for random traversal
        #[arg(short, long)]
        seed: Option<u64>,
        /// Print the full session report as JSON
        #[arg(long)]
        json: bool,
        /// Write the metadata cache to this file after the session
        #[arg(long)]
        export_metadata: Option<PathBuf>,
    },
    /// Print the catalog as JSON
    Catalog {
        /// Start from this JSON catalog instead of the configured one
        #[arg(short, long)]
        import: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "jukebox_sim=info,jukebox_playback=info,jukebox_widget=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = SimConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Run {
            plays,
            seed,
            json,
            export_metadata,
        } => {
            let options = SessionOptions {
                plays,
                seed,
                metadata: load_metadata(&config)?,
            };
            run(&config, options, json, export_metadata).await?;
        }
        Commands::Catalog { import } => {
            print_catalog(&config, import)?;
        }
        Commands::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

async fn run(
    config: &SimConfig,
    options: SessionOptions,
    json: bool,
    export_metadata: Option<PathBuf>,
) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    tracing::info!("Starting session with {} tracks", catalog.len());

    let report = run_session(config, &catalog, &options).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for record in &report.steps {
            let view = &record.view;
            let title = view
                .now_playing
                .as_ref()
                .map(|details| format!("{} - {}", details.artist, details.title))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:<15} {:<8} {:<32} {}/{}  vol {:>3}%",
                record.step,
                format!("{:?}", view.player.status),
                title,
                view.elapsed,
                view.total,
                view.player.volume.percent()
            );
        }
    }

    if let Some(path) = export_metadata {
        std::fs::write(&path, report.metadata.export_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Exported {} metadata entries", report.metadata.len());
    }

    if !report.listeners_released {
        anyhow::bail!("Page listeners were still installed after unmount");
    }
    Ok(())
}

fn print_catalog(config: &SimConfig, import: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = match import {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let mut catalog = MusicCatalog::new();
            catalog.import_json(&json)?;
            catalog
        }
        None => load_catalog(config)?,
    };

    println!("{}", catalog.export_json()?);
    Ok(())
}
