//! Detect verified kills in extracted frames and curate narrative clips.

use std::path::PathBuf;

use clipforge_curator::{NarrativeConfig, NarrativeCurator};
use clipforge_highlight_model::{merge_timeline, AnalysisArtifact, ClipReport};
use clipforge_observer::{GameObserver, ObserverConfig};
use clipforge_recognizer::SignalRecognizer;

use super::{load_transcript, load_waveform};

#[allow(clippy::too_many_arguments)]
pub fn run(
    frames_dir: PathBuf,
    player: String,
    assets: PathBuf,
    resolution: (u32, u32),
    transcript: Option<PathBuf>,
    audio: Option<PathBuf>,
    sample_rate: u32,
    top_n: usize,
    output: PathBuf,
    events_out: PathBuf,
) -> anyhow::Result<()> {
    println!("Analyzing frames in: {}", frames_dir.display());

    let observer = GameObserver::new(
        &frames_dir,
        resolution,
        player,
        &assets,
        ObserverConfig::default(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to build observer: {e}"))?;

    if !observer.ready() {
        anyhow::bail!(
            "Template assets incomplete under {}: need agents/ and icons/ images",
            assets.display()
        );
    }

    let events = observer
        .analyze_all_frames()
        .map_err(|e| anyhow::anyhow!("Frame analysis failed: {e}"))?;
    println!("  Detected {} verified kills", events.len());

    let frame_count = std::fs::read_dir(&frames_dir)?.count();
    let artifact = AnalysisArtifact::new(frame_count, events.clone());
    artifact
        .save(&events_out)
        .map_err(|e| anyhow::anyhow!("Failed to save game events: {e}"))?;

    // Mix in speech and loudness signals when a transcript is provided.
    let signals = match &transcript {
        Some(path) => {
            let transcript = load_transcript(path)?;
            let waveform = match &audio {
                Some(path) => Some(load_waveform(path, sample_rate)?),
                None => None,
            };
            let recognizer = SignalRecognizer::with_defaults();
            let signals = recognizer.find_signals(&transcript, waveform.as_ref());
            println!("  Found {} speech/audio signals", signals.len());
            signals
        }
        None => Vec::new(),
    };

    let timeline = merge_timeline(events, signals);

    let curator = NarrativeCurator::new(NarrativeConfig {
        top_n,
        ..NarrativeConfig::default()
    })
    .map_err(|e| anyhow::anyhow!("Invalid narrative configuration: {e}"))?;
    let clips = curator.select_best_clips(&timeline);

    if clips.is_empty() {
        println!("  No narratives found.");
        return Ok(());
    }
    for clip in &clips {
        let label = match &clip.narrative {
            Some(kind) => format!("{kind:?}"),
            None => "-".to_string(),
        };
        println!(
            "  {:>8.2}s - {:>8.2}s  score {:.1}  {}",
            clip.start, clip.end, clip.score, label
        );
    }

    let report = ClipReport::new(clips);
    report
        .save(&output)
        .map_err(|e| anyhow::anyhow!("Failed to save clip report: {e}"))?;
    println!("\nSaved {} clips to: {}", report.clips.len(), output.display());

    Ok(())
}
