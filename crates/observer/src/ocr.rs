//! Text recognition over the killer-name strip.
//!
//! The default backend shells out to the `tesseract` binary (override with
//! the `TESSERACT_CMD` environment variable). Input is binarized with Otsu's
//! method first, which is what the engine expects for HUD text.

use std::env;
use std::process::Command;

use clipforge_common::{ClipforgeError, ClipforgeResult};
use image::GrayImage;
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use tracing::trace;

/// Recognizes text in a grayscale image region.
pub trait TextRecognizer {
    fn recognize(&self, image: &GrayImage) -> ClipforgeResult<String>;
}

/// Backend that invokes the tesseract CLI per region.
#[derive(Debug, Default)]
pub struct TesseractCli;

impl TesseractCli {
    fn command() -> String {
        env::var("TESSERACT_CMD").unwrap_or_else(|_| "tesseract".to_string())
    }
}

impl TextRecognizer for TesseractCli {
    fn recognize(&self, image: &GrayImage) -> ClipforgeResult<String> {
        let level = otsu_level(image);
        let binary = threshold(image, level, ThresholdType::Binary);

        let dir = tempfile::tempdir()?;
        let input = dir.path().join("region.png");
        binary
            .save(&input)
            .map_err(|err| ClipforgeError::ocr(format!("failed to write OCR input: {err}")))?;

        // `stdout` makes tesseract print the recognized text instead of
        // writing an output file. PSM 7 treats the strip as one text line.
        let output = Command::new(Self::command())
            .arg(&input)
            .arg("stdout")
            .args(["--psm", "7"])
            .output()
            .map_err(|err| ClipforgeError::ocr(format!("failed to run tesseract: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClipforgeError::ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        trace!(text = %text, "ocr result");
        Ok(text)
    }
}

/// Normalized similarity between two names in 0..=1, case-insensitive.
/// 1.0 means identical after lowercasing.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    let distance = levenshtein(&a, &b);
    1.0 - distance as f64 / longest as f64
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j] + cost)
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_names_score_one() {
        assert_eq!(name_similarity("ShadowStrike", "shadowstrike"), 1.0);
    }

    #[test]
    fn single_character_ocr_error_stays_above_threshold() {
        // 'l' misread as '1' in a 12-character name.
        let similarity = name_similarity("ShadowStrike", "ShadowStr1ke");
        assert!((similarity - (1.0 - 1.0 / 12.0)).abs() < 1e-9);
        assert!(similarity >= 0.85);
    }

    #[test]
    fn unrelated_names_score_low() {
        assert!(name_similarity("ShadowStrike", "xXNoScopeXx") < 0.5);
    }

    #[test]
    fn empty_against_nonempty_scores_zero() {
        assert_eq!(name_similarity("", "abc"), 0.0);
        assert_eq!(name_similarity("", ""), 1.0);
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("abc", ""), 3);
    }
}
