pub mod analyze;
pub mod game;
pub mod info;

use std::path::Path;

use clipforge_highlight_model::{parse_transcript, Transcript, Waveform};

/// Load a transcript JSON file.
pub fn load_transcript(path: &Path) -> anyhow::Result<Transcript> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| anyhow::anyhow!("Transcript file not found: {}", path.display()))?;
    parse_transcript(&content).map_err(|e| anyhow::anyhow!("Failed to parse transcript: {e}"))
}

/// Load a raw mono f32le sample file.
pub fn load_waveform(path: &Path, sample_rate: u32) -> anyhow::Result<Waveform> {
    let bytes = std::fs::read(path)
        .map_err(|_| anyhow::anyhow!("Audio file not found: {}", path.display()))?;
    Waveform::from_f32le_bytes(&bytes, sample_rate)
        .ok_or_else(|| anyhow::anyhow!("Audio file is not valid f32le: {}", path.display()))
}
