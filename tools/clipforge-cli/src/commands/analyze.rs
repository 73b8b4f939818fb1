//! Curate clips from a transcript and optional audio track.

use std::path::PathBuf;

use clipforge_curator::{ClipCurator, CuratorConfig};
use clipforge_highlight_model::ClipReport;
use clipforge_recognizer::SignalRecognizer;

use super::{load_transcript, load_waveform};

pub fn run(
    transcript: PathBuf,
    audio: Option<PathBuf>,
    sample_rate: u32,
    window_secs: u32,
    top_n: usize,
    output: PathBuf,
) -> anyhow::Result<()> {
    println!("Analyzing transcript: {}", transcript.display());

    let transcript = load_transcript(&transcript)?;
    println!("  Loaded {} segments", transcript.segments.len());

    let waveform = match &audio {
        Some(path) => Some(load_waveform(path, sample_rate)?),
        None => None,
    };
    if let Some(waveform) = &waveform {
        println!("  Loaded {:.1}s of audio", waveform.duration_secs());
    }

    let recognizer = SignalRecognizer::with_defaults();
    let signals = recognizer.find_signals(&transcript, waveform.as_ref());
    println!("  Found {} signals", signals.len());

    let curator = ClipCurator::new(CuratorConfig {
        window_secs,
        top_n,
        ..CuratorConfig::default()
    })
    .map_err(|e| anyhow::anyhow!("Invalid curator configuration: {e}"))?;
    let clips = curator.select_best_clips(&signals, &transcript);

    if clips.is_empty() {
        println!("  No interesting moments found.");
        return Ok(());
    }
    for clip in &clips {
        println!(
            "  {:>8.2}s - {:>8.2}s  score {:.1}",
            clip.start, clip.end, clip.score
        );
    }

    let report = ClipReport::new(clips);
    report
        .save(&output)
        .map_err(|e| anyhow::anyhow!("Failed to save clip report: {e}"))?;
    println!("\nSaved {} clips to: {}", report.clips.len(), output.display());

    Ok(())
}
