//! Game observer: detects verified player kills in extracted video frames.
//!
//! Each frame's killfeed region runs through a four-factor verification
//! chain: green color filter, agent portrait template match, kill-icon
//! template match, and OCR of the killer name against the configured player.
//! Consecutive frames showing the same verified entry are debounced into a
//! single event.

mod debounce;
mod ocr;
mod region;
mod templates;
mod verify;

use std::fs;
use std::path::{Path, PathBuf};

use clipforge_common::{ClipforgeError, ClipforgeResult};
use clipforge_highlight_model::{GameEvent, KillVerification};
use image::RgbImage;
use tracing::{debug, error, info, warn};

use debounce::{DebounceState, VerificationKey};
pub use ocr::{name_similarity, TesseractCli, TextRecognizer};
pub use region::{PixelRect, RelativeRect, KILLFEED, NAME_STRIP};
pub use templates::{Template, TemplateStore};
pub use verify::{best_template_match, green_fraction, TemplateMatch};

/// Tuning knobs for killfeed verification.
#[derive(Debug, Clone)]
pub struct ObserverConfig {
    /// Minimum normalized template-match confidence.
    pub match_threshold: f32,
    /// Minimum fraction of green pixels in the killfeed region.
    pub color_min_fraction: f64,
    /// Minimum OCR name similarity against the configured player.
    pub name_similarity: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.8,
            color_min_fraction: 0.10,
            name_similarity: 0.85,
        }
    }
}

impl ObserverConfig {
    pub fn validate(&self) -> ClipforgeResult<()> {
        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(ClipforgeError::config(format!(
                "match_threshold must be in 0..=1, got {}",
                self.match_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.color_min_fraction) {
            return Err(ClipforgeError::config(format!(
                "color_min_fraction must be in 0..=1, got {}",
                self.color_min_fraction
            )));
        }
        if !(0.0..=1.0).contains(&self.name_similarity) {
            return Err(ClipforgeError::config(format!(
                "name_similarity must be in 0..=1, got {}",
                self.name_similarity
            )));
        }
        Ok(())
    }
}

/// Per-frame verification outcome for a fully checked frame.
#[derive(Debug, Clone)]
struct FrameCheck {
    verification: KillVerification,
    headshot: bool,
}

/// Scans extracted frames and emits verified kill events.
pub struct GameObserver {
    frames_dir: PathBuf,
    resolution: (u32, u32),
    player_name: String,
    config: ObserverConfig,
    templates: TemplateStore,
    recognizer: Box<dyn TextRecognizer>,
    killfeed_roi: PixelRect,
}

impl GameObserver {
    /// Build an observer over `frames_dir`, loading verification templates
    /// from `assets_dir`. Uses the tesseract CLI for name recognition.
    pub fn new(
        frames_dir: impl Into<PathBuf>,
        resolution: (u32, u32),
        player_name: impl Into<String>,
        assets_dir: &Path,
        config: ObserverConfig,
    ) -> ClipforgeResult<Self> {
        config.validate()?;
        let frames_dir = frames_dir.into();
        if !frames_dir.is_dir() {
            return Err(ClipforgeError::FileNotFound { path: frames_dir });
        }
        let templates = TemplateStore::load(assets_dir)?;
        let killfeed_roi = KILLFEED.to_pixels(resolution.0, resolution.1);

        Ok(Self {
            frames_dir,
            resolution,
            player_name: player_name.into(),
            config,
            templates,
            recognizer: Box::new(TesseractCli),
            killfeed_roi,
        })
    }

    /// Swap the OCR backend.
    pub fn with_recognizer(mut self, recognizer: Box<dyn TextRecognizer>) -> Self {
        self.recognizer = recognizer;
        self
    }

    /// Both template collections are populated, so detections can be
    /// verified. Without this the observer refuses to report kills.
    pub fn ready(&self) -> bool {
        self.templates.is_complete()
    }

    /// Scan every frame in order and return the debounced kill events.
    pub fn analyze_all_frames(&self) -> ClipforgeResult<Vec<GameEvent>> {
        if !self.ready() {
            error!(
                agents = self.templates.agents.len(),
                icons = self.templates.icons.len(),
                "template store incomplete, skipping frame analysis"
            );
            return Ok(Vec::new());
        }

        let frames = self.list_frames()?;
        info!(frames = frames.len(), "analyzing extracted frames");

        let mut events = Vec::new();
        let mut state = DebounceState::default();
        for (timestamp, path) in frames {
            let frame = match image::open(&path) {
                Ok(img) => img.to_rgb8(),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable frame");
                    state.clear();
                    continue;
                }
            };

            match self.inspect_frame(&frame) {
                Some(check) if check.verification.name_pass => {
                    let key = VerificationKey {
                        agent: check.verification.agent.clone(),
                        icon: check.verification.icon.clone(),
                        name_pass: true,
                    };
                    if state.observe(key) {
                        debug!(timestamp, headshot = check.headshot, "verified kill");
                        events.push(GameEvent::kill(
                            timestamp,
                            check.headshot,
                            check.verification,
                        ));
                    }
                }
                _ => state.clear(),
            }
        }

        info!(kills = events.len(), "frame analysis complete");
        Ok(events)
    }

    /// Frame files named `frame_<ms>.<ext>`, ordered by capture time.
    fn list_frames(&self) -> ClipforgeResult<Vec<(f64, PathBuf)>> {
        let mut frames = Vec::new();
        for entry in fs::read_dir(&self.frames_dir)? {
            let path = entry?.path();
            if !matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("png" | "jpg" | "jpeg")
            ) {
                continue;
            }
            match frame_timestamp(&path) {
                Some(ms) => frames.push((ms as f64 / 1000.0, path)),
                None => warn!(path = %path.display(), "skipping frame with unparseable name"),
            }
        }
        frames.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(frames)
    }

    /// Run the verification chain over one frame. Returns `None` when the
    /// color filter rejects the region outright; later factors short-circuit
    /// but still record which checks ran.
    fn inspect_frame(&self, frame: &RgbImage) -> Option<FrameCheck> {
        let roi = if (frame.width(), frame.height()) == self.resolution {
            self.killfeed_roi
        } else {
            warn!(
                width = frame.width(),
                height = frame.height(),
                "frame resolution differs from configured resolution"
            );
            KILLFEED.to_pixels(frame.width(), frame.height())
        };

        let killfeed = roi.crop(frame);
        if green_fraction(&killfeed) < self.config.color_min_fraction {
            return None;
        }

        let gray = image::DynamicImage::ImageRgb8(killfeed).to_luma8();

        let mut verification = KillVerification {
            color_pass: true,
            agent_pass: false,
            icon_pass: false,
            name_pass: false,
            agent: None,
            icon: None,
            agent_confidence: 0.0,
            icon_confidence: 0.0,
        };

        let Some(agent) = best_template_match(&gray, &self.templates.agents) else {
            return Some(FrameCheck {
                verification,
                headshot: false,
            });
        };
        verification.agent_confidence = agent.confidence;
        if agent.confidence < self.config.match_threshold {
            return Some(FrameCheck {
                verification,
                headshot: false,
            });
        }
        verification.agent_pass = true;
        verification.agent = Some(agent.name);

        let Some(icon) = best_template_match(&gray, &self.templates.icons) else {
            return Some(FrameCheck {
                verification,
                headshot: false,
            });
        };
        verification.icon_confidence = icon.confidence;
        if icon.confidence < self.config.match_threshold {
            return Some(FrameCheck {
                verification,
                headshot: false,
            });
        }
        verification.icon_pass = true;
        let headshot = icon.name.contains("headshot");
        verification.icon = Some(icon.name);

        let strip = roi.sub(&NAME_STRIP).crop(frame);
        let strip_gray = image::DynamicImage::ImageRgb8(strip).to_luma8();
        let recognized = match self.recognizer.recognize(&strip_gray) {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "name recognition failed");
                return Some(FrameCheck {
                    verification,
                    headshot,
                });
            }
        };
        verification.name_pass =
            name_similarity(&recognized, &self.player_name) >= self.config.name_similarity;

        Some(FrameCheck {
            verification,
            headshot,
        })
    }
}

fn frame_timestamp(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    let (_, ms) = stem.rsplit_once('_')?;
    ms.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb};

    const WIDTH: u32 = 200;
    const HEIGHT: u32 = 100;

    struct FixedName(String);

    impl TextRecognizer for FixedName {
        fn recognize(&self, _image: &GrayImage) -> ClipforgeResult<String> {
            Ok(self.0.clone())
        }
    }

    fn checker(size: u32, invert: bool) -> GrayImage {
        let mut img = GrayImage::new(size, size);
        for y in 0..size {
            for x in 0..size {
                let on = (x + y) % 2 == 0;
                let value = if on != invert { 250 } else { 30 };
                img.put_pixel(x, y, Luma([value]));
            }
        }
        img
    }

    /// A frame whose killfeed region is green with the agent checker drawn
    /// near the top and the icon checker below it.
    fn kill_frame() -> RgbImage {
        let mut frame = RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([20, 20, 20]));
        let roi = KILLFEED.to_pixels(WIDTH, HEIGHT);
        for y in roi.y..roi.y + roi.height {
            for x in roi.x..roi.x + roi.width {
                frame.put_pixel(x, y, Rgb([40, 220, 90]));
            }
        }
        draw_gray(&mut frame, &checker(8, false), roi.x + 2, roi.y + 2);
        draw_gray(&mut frame, &checker(8, true), roi.x + 2, roi.y + 20);
        frame
    }

    fn draw_gray(frame: &mut RgbImage, pattern: &GrayImage, ox: u32, oy: u32) {
        for (x, y, pixel) in pattern.enumerate_pixels() {
            let v = pixel[0];
            frame.put_pixel(ox + x, oy + y, Rgb([v, v, v]));
        }
    }

    fn write_frames(dir: &Path, frames: &[(&str, &RgbImage)]) {
        for (name, frame) in frames {
            frame.save(dir.join(name)).unwrap();
        }
    }

    fn observer(frames_dir: &Path, recognized: &str) -> GameObserver {
        GameObserver {
            frames_dir: frames_dir.to_path_buf(),
            resolution: (WIDTH, HEIGHT),
            player_name: "ShadowStrike".to_string(),
            config: ObserverConfig::default(),
            templates: TemplateStore {
                agents: vec![Template {
                    name: "jett".to_string(),
                    image: checker(8, false),
                }],
                icons: vec![Template {
                    name: "headshot".to_string(),
                    image: checker(8, true),
                }],
            },
            recognizer: Box::new(FixedName(recognized.to_string())),
            killfeed_roi: KILLFEED.to_pixels(WIDTH, HEIGHT),
        }
    }

    #[test]
    fn frame_timestamps_parse_from_file_names() {
        assert_eq!(frame_timestamp(Path::new("frame_1500.png")), Some(1500));
        assert_eq!(frame_timestamp(Path::new("out/frame_0.jpg")), Some(0));
        assert_eq!(frame_timestamp(Path::new("cover.png")), None);
    }

    #[test]
    fn verified_kill_is_emitted_once_across_repeated_frames() {
        let dir = tempfile::tempdir().unwrap();
        let frame = kill_frame();
        write_frames(
            dir.path(),
            &[
                ("frame_1000.png", &frame),
                ("frame_1500.png", &frame),
                ("frame_2000.png", &frame),
            ],
        );

        let observer = observer(dir.path(), "ShadowStrike");
        let events = observer.analyze_all_frames().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].timestamp, 1.0);
        assert!(events[0].is_headshot());
        assert!(events[0].is_verified_ego_kill());
    }

    #[test]
    fn failed_frame_resets_debounce_so_the_kill_reemits() {
        let dir = tempfile::tempdir().unwrap();
        let frame = kill_frame();
        let blank = RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([20, 20, 20]));
        write_frames(
            dir.path(),
            &[
                ("frame_1000.png", &frame),
                ("frame_2000.png", &blank),
                ("frame_3000.png", &frame),
            ],
        );

        let observer = observer(dir.path(), "ShadowStrike");
        let events = observer.analyze_all_frames().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp, 1.0);
        assert_eq!(events[1].timestamp, 3.0);
    }

    #[test]
    fn wrong_name_blocks_the_event() {
        let dir = tempfile::tempdir().unwrap();
        let frame = kill_frame();
        write_frames(dir.path(), &[("frame_1000.png", &frame)]);

        let observer = observer(dir.path(), "SomeoneElse");
        let events = observer.analyze_all_frames().unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn incomplete_templates_disable_analysis() {
        let dir = tempfile::tempdir().unwrap();
        write_frames(dir.path(), &[("frame_1000.png", &kill_frame())]);

        let mut observer = observer(dir.path(), "ShadowStrike");
        observer.templates.icons.clear();
        assert!(!observer.ready());
        assert!(observer.analyze_all_frames().unwrap().is_empty());
    }

    #[test]
    fn color_filter_rejects_frames_without_green() {
        let frame = RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([200, 30, 30]));
        let dir = tempfile::tempdir().unwrap();
        let observer = observer(dir.path(), "ShadowStrike");
        assert!(observer.inspect_frame(&frame).is_none());
    }

    #[test]
    fn config_validation_rejects_out_of_range_thresholds() {
        let config = ObserverConfig {
            match_threshold: 1.5,
            ..ObserverConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
