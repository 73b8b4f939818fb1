//! ClipForge CLI — Command-line interface for highlight curation.
//!
//! Usage:
//!   clipforge analyze <TRANSCRIPT> [OPTIONS]   Curate clips from speech signals
//!   clipforge game <FRAMES_DIR> [OPTIONS]      Curate narratives from game footage
//!   clipforge info <REPORT>                    Show a saved clip report

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "clipforge",
    about = "Automatic highlight clip curation for long-form video",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find interesting moments from a transcript and optional audio track
    Analyze {
        /// Path to the transcript JSON file
        transcript: PathBuf,

        /// Raw mono f32le audio samples to scan for loudness cues
        #[arg(long)]
        audio: Option<PathBuf>,

        /// Sample rate of the raw audio
        #[arg(long, default_value = "22050")]
        sample_rate: u32,

        /// Sliding window size (seconds)
        #[arg(long, default_value = "15")]
        window_secs: u32,

        /// Maximum number of clips to select
        #[arg(long, default_value = "10")]
        top_n: usize,

        /// Output path for the clip report
        #[arg(short, long, default_value = "clips.json")]
        output: PathBuf,
    },

    /// Detect verified kills in extracted frames and curate narrative clips
    Game {
        /// Directory of extracted frames named frame_<ms>.png
        frames_dir: PathBuf,

        /// In-game player name to verify against the killfeed
        #[arg(short, long)]
        player: String,

        /// Directory holding agents/ and icons/ template images
        #[arg(long, default_value = "assets")]
        assets: PathBuf,

        /// Frame width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Frame height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Optional transcript JSON to mix speech signals into the timeline
        #[arg(long)]
        transcript: Option<PathBuf>,

        /// Raw mono f32le audio samples to scan for loudness cues
        #[arg(long)]
        audio: Option<PathBuf>,

        /// Sample rate of the raw audio
        #[arg(long, default_value = "22050")]
        sample_rate: u32,

        /// Maximum number of clips to select
        #[arg(long, default_value = "5")]
        top_n: usize,

        /// Output path for the clip report
        #[arg(short, long, default_value = "clips.json")]
        output: PathBuf,

        /// Output path for the game event artifact
        #[arg(long, default_value = "analysis.json")]
        events: PathBuf,
    },

    /// Show a saved clip report
    Info {
        /// Path to a clip report JSON file
        report: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    clipforge_common::logging::init_logging(&clipforge_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Analyze {
            transcript,
            audio,
            sample_rate,
            window_secs,
            top_n,
            output,
        } => commands::analyze::run(transcript, audio, sample_rate, window_secs, top_n, output),
        Commands::Game {
            frames_dir,
            player,
            assets,
            width,
            height,
            transcript,
            audio,
            sample_rate,
            top_n,
            output,
            events,
        } => commands::game::run(
            frames_dir,
            player,
            assets,
            (width, height),
            transcript,
            audio,
            sample_rate,
            top_n,
            output,
            events,
        ),
        Commands::Info { report } => commands::info::run(report),
    }
}
