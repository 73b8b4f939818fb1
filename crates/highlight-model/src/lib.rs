//! ClipForge Highlight Model
//!
//! Defines the core data contracts for the curation pipeline:
//! - **Transcript:** Timestamped speech segments from the transcription collaborator
//! - **Waveform:** Decoded mono audio samples from the audio collaborator
//! - **Signals:** Atomic textual/acoustic cues found by the recognizer
//! - **Game events:** Verified in-game actions found by the observer
//! - **Clips:** Scored, time-bounded selections consumed by the renderer
//!
//! All timestamps are fractional seconds from the start of the source video.
//! Every entity here is a value object owned by a single pipeline run.

pub mod artifact;
pub mod clip;
pub mod game;
pub mod signal;
pub mod timeline;
pub mod transcript;
pub mod waveform;

pub use artifact::*;
pub use clip::*;
pub use game::*;
pub use signal::*;
pub use timeline::*;
pub use transcript::*;
pub use waveform::*;
