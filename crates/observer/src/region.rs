//! Screen region math: relative rectangles resolved against the video
//! resolution.

use image::RgbImage;

/// A rectangle expressed as fractions of the frame dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Where the killfeed renders: roughly the top-right fifth of the screen.
pub const KILLFEED: RelativeRect = RelativeRect {
    x1: 0.807,
    y1: 0.074,
    x2: 0.99,
    y2: 0.44,
};

/// Killer-name strip within a killfeed entry: the left portion of the region
/// (the right side holds the weapon icon and the victim).
pub const NAME_STRIP: RelativeRect = RelativeRect {
    x1: 0.0,
    y1: 0.0,
    x2: 0.55,
    y2: 1.0,
};

/// A rectangle in absolute pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RelativeRect {
    /// Resolve to pixels against the given dimensions.
    pub fn to_pixels(&self, width: u32, height: u32) -> PixelRect {
        let x1 = (self.x1 * width as f64) as u32;
        let y1 = (self.y1 * height as f64) as u32;
        let x2 = (self.x2 * width as f64) as u32;
        let y2 = (self.y2 * height as f64) as u32;
        PixelRect {
            x: x1,
            y: y1,
            width: x2.saturating_sub(x1).max(1),
            height: y2.saturating_sub(y1).max(1),
        }
    }
}

impl PixelRect {
    /// Crop this rectangle out of a frame, clamped to the frame bounds.
    pub fn crop(&self, frame: &RgbImage) -> RgbImage {
        let x = self.x.min(frame.width().saturating_sub(1));
        let y = self.y.min(frame.height().saturating_sub(1));
        let w = self.width.min(frame.width() - x).max(1);
        let h = self.height.min(frame.height() - y).max(1);
        image::imageops::crop_imm(frame, x, y, w, h).to_image()
    }

    /// Resolve a sub-rectangle relative to this rectangle's own extent.
    pub fn sub(&self, rel: &RelativeRect) -> PixelRect {
        let inner = rel.to_pixels(self.width, self.height);
        PixelRect {
            x: self.x + inner.x,
            y: self.y + inner.y,
            width: inner.width,
            height: inner.height,
        }
    }
}
