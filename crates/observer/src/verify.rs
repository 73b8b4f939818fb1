//! Killfeed verification primitives: the green color filter and normalized
//! template matching.

use image::{GrayImage, RgbImage};
use imageproc::template_matching::{find_extremes, match_template, MatchTemplateMethod};

use crate::templates::Template;

/// Outcome of running a region against a template collection.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateMatch {
    pub name: String,
    pub confidence: f32,
}

/// Convert an RGB pixel to HSV: hue in degrees, saturation and value in 0..1.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    (hue, saturation, max)
}

/// Whether a pixel falls in the killfeed's ally-green band.
fn is_green(r: u8, g: u8, b: u8) -> bool {
    let (hue, saturation, value) = rgb_to_hsv(r, g, b);
    (70.0..=160.0).contains(&hue) && saturation >= 0.3 && value >= 0.3
}

/// Fraction of pixels in the region that pass the green band test.
pub fn green_fraction(region: &RgbImage) -> f64 {
    let total = (region.width() * region.height()) as f64;
    if total == 0.0 {
        return 0.0;
    }
    let green = region
        .pixels()
        .filter(|pixel| is_green(pixel[0], pixel[1], pixel[2]))
        .count() as f64;
    green / total
}

/// Run every template over the region and return the best normalized
/// cross-correlation hit. Templates larger than the region are skipped.
pub fn best_template_match(region: &GrayImage, templates: &[Template]) -> Option<TemplateMatch> {
    let mut best: Option<TemplateMatch> = None;
    for template in templates {
        if template.image.width() > region.width() || template.image.height() > region.height() {
            continue;
        }
        let scores = match_template(
            region,
            &template.image,
            MatchTemplateMethod::CrossCorrelationNormalized,
        );
        let confidence = find_extremes(&scores).max_value;
        let better = best
            .as_ref()
            .map(|current| confidence > current.confidence)
            .unwrap_or(true);
        if better {
            best = Some(TemplateMatch {
                name: template.name.clone(),
                confidence,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn hsv_conversion_hits_known_colors() {
        let (h, s, v) = rgb_to_hsv(0, 255, 0);
        assert!((h - 120.0).abs() < 0.01);
        assert!((s - 1.0).abs() < 0.01);
        assert!((v - 1.0).abs() < 0.01);

        let (_, s, v) = rgb_to_hsv(0, 0, 0);
        assert_eq!(s, 0.0);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn green_fraction_counts_only_band_pixels() {
        let mut region = RgbImage::from_pixel(10, 10, image::Rgb([200, 30, 30]));
        for y in 0..5 {
            for x in 0..10 {
                region.put_pixel(x, y, image::Rgb([40, 220, 90]));
            }
        }
        let fraction = green_fraction(&region);
        assert!((fraction - 0.5).abs() < 1e-9);
    }

    #[test]
    fn exact_template_matches_with_full_confidence() {
        let mut region = GrayImage::from_pixel(20, 20, Luma([10u8]));
        // Draw a distinctive 4x4 checker at (8, 8).
        for y in 0..4 {
            for x in 0..4 {
                let value = if (x + y) % 2 == 0 { 250 } else { 30 };
                region.put_pixel(8 + x, 8 + y, Luma([value]));
            }
        }
        let mut pattern = GrayImage::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                let value = if (x + y) % 2 == 0 { 250 } else { 30 };
                pattern.put_pixel(x, y, Luma([value]));
            }
        }
        let templates = vec![Template {
            name: "checker".to_string(),
            image: pattern,
        }];

        let hit = best_template_match(&region, &templates).unwrap();
        assert_eq!(hit.name, "checker");
        assert!(hit.confidence > 0.99);
    }

    #[test]
    fn oversized_templates_are_skipped() {
        let region = GrayImage::new(8, 8);
        let templates = vec![Template {
            name: "huge".to_string(),
            image: GrayImage::new(32, 32),
        }];
        assert!(best_template_match(&region, &templates).is_none());
    }
}
