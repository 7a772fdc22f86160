use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trackgate_cli::commands;
use trackgate_cli::config::CliConfig;
use trackgate_core::status::TrackField;
use trackgate_db::DbConfig;

/// Command-line arguments for trackgate
#[derive(Parser, Debug)]
#[command(name = "trackgate")]
#[command(about = "Staged review of generated music tracks")]
#[command(version)]
struct Args {
    /// Sleep before each store operation like the remote backend would
    #[arg(long, global = true)]
    simulated_latency: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the prompt catalog as JSON
    Prompts {
        /// Only list prompts for one field (theme, style or lyrics)
        #[arg(long)]
        category: Option<TrackField>,
    },
    /// Generate a batch, review every stage and export the result
    Demo {
        /// Number of tracks to generate
        #[arg(long)]
        tracks: Option<usize>,
        /// Directory the CSV exports are written to
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Write the batch and playlist CSV exports
    Export {
        /// Directory the CSV exports are written to
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trackgate_cli=info,trackgate_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Configuration ---
    let args = Args::parse();
    let config = CliConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    // --- Store ---
    let pool = trackgate_db::create_pool(&DbConfig {
        simulated_latency: args.simulated_latency || config.simulated_latency,
        seed_sample_playlists: true,
    });
    let (batches, playlists) = pool.counts().await;
    tracing::debug!(batches, playlists, "Store ready");

    match args.command {
        Command::Prompts { category } => {
            println!("{}", commands::prompts_json(category)?);
        }
        Command::Demo { tracks, out_dir } => {
            let tracks = tracks.unwrap_or(config.demo_track_count);
            let out_dir = out_dir.unwrap_or(config.export_dir);
            let summary = commands::run_demo(&pool, tracks, &out_dir).await?;
            tracing::info!(
                batch_id = %summary.batch_id,
                playlist_id = %summary.playlist_id,
                final_tracks = summary.final_tracks,
                total_tracks = summary.total_tracks,
                "Demo complete"
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Export { out_dir } => {
            let out_dir = out_dir.unwrap_or(config.export_dir);
            let paths = commands::write_exports(&pool, &out_dir).await?;
            println!("{}", serde_json::to_string_pretty(&paths)?);
        }
    }

    Ok(())
}
