//! ClipForge Curators
//!
//! Turns signal and event streams into ranked, non-overlapping clips:
//! - **Clip Curator:** sliding-window scoring of generic signals with
//!   combination bonuses and transcript boundary snapping
//! - **Narrative Curator:** temporal pattern matching over game events
//!   (multi-kills, reaction kills) with multiplicative scoring
//! - **Selection:** greedy highest-score-first de-overlap shared by both
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod moments;
pub mod narrative;
pub mod select;

pub use moments::{ClipCurator, CuratorConfig};
pub use narrative::{NarrativeCurator, NarrativeConfig};
pub use select::{select_non_overlapping, ClipCandidate};
