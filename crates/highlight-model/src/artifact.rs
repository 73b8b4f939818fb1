//! Persisted pipeline artifacts for inspection and hand-off to the renderer.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clipforge_common::error::ClipforgeResult;

use crate::clip::Clip;
use crate::game::GameEvent;

/// Observer side artifact: every verified game event from one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisArtifact {
    /// When the analysis ran.
    pub generated_at: DateTime<Utc>,

    /// How many frames were scanned.
    pub frame_count: usize,

    /// Debounced, chronologically ordered events.
    pub events: Vec<GameEvent>,
}

impl AnalysisArtifact {
    pub fn new(frame_count: usize, events: Vec<GameEvent>) -> Self {
        Self {
            generated_at: Utc::now(),
            frame_count,
            events,
        }
    }

    pub fn save(&self, path: &Path) -> ClipforgeResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), events = self.events.len(), "Saved analysis artifact");
        Ok(())
    }

    pub fn load(path: &Path) -> ClipforgeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Curator output artifact: the ordered clip list for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipReport {
    /// When curation ran.
    pub generated_at: DateTime<Utc>,

    /// Selected clips, sorted the way the curator returned them.
    pub clips: Vec<Clip>,
}

impl ClipReport {
    pub fn new(clips: Vec<Clip>) -> Self {
        Self {
            generated_at: Utc::now(),
            clips,
        }
    }

    pub fn save(&self, path: &Path) -> ClipforgeResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), clips = self.clips.len(), "Saved clip report");
        Ok(())
    }

    pub fn load(path: &Path) -> ClipforgeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
