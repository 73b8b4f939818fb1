//! Template asset loading for killfeed verification.
//!
//! Assets live under `<assets_dir>/agents/` (agent portraits) and
//! `<assets_dir>/icons/` (kill-type icons). Each image file becomes one
//! template named after its file stem.

use std::fs;
use std::path::{Path, PathBuf};

use clipforge_common::{ClipforgeError, ClipforgeResult};
use image::GrayImage;
use tracing::{debug, warn};

/// Files smaller than this are treated as placeholders and skipped.
const MIN_TEMPLATE_BYTES: u64 = 100;

/// A named grayscale template image.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub image: GrayImage,
}

/// The two template collections the observer matches against.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    pub agents: Vec<Template>,
    pub icons: Vec<Template>,
}

impl TemplateStore {
    /// Load every usable template under `assets_dir`. Unreadable or
    /// undersized files are skipped with a warning rather than failing the
    /// whole load.
    pub fn load(assets_dir: &Path) -> ClipforgeResult<Self> {
        if !assets_dir.is_dir() {
            return Err(ClipforgeError::FileNotFound {
                path: assets_dir.to_path_buf(),
            });
        }

        let agents = load_dir(&assets_dir.join("agents"))?;
        let icons = load_dir(&assets_dir.join("icons"))?;
        debug!(
            agents = agents.len(),
            icons = icons.len(),
            "loaded template store"
        );

        Ok(Self { agents, icons })
    }

    /// Both collections hold at least one template.
    pub fn is_complete(&self) -> bool {
        !self.agents.is_empty() && !self.icons.is_empty()
    }
}

fn load_dir(dir: &Path) -> ClipforgeResult<Vec<Template>> {
    let mut templates = Vec::new();
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "template directory missing");
        return Ok(templates);
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_image_file(path))
        .collect();
    paths.sort();

    for path in paths {
        let size = fs::metadata(&path)?.len();
        if size < MIN_TEMPLATE_BYTES {
            warn!(path = %path.display(), size, "skipping placeholder template");
            continue;
        }
        let image = match image::open(&path) {
            Ok(img) => img.to_luma8(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable template");
                continue;
            }
        };
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        templates.push(Template { name, image });
    }

    Ok(templates)
}

fn is_image_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("png" | "jpg" | "jpeg")
    )
}
