//! Show a saved clip report.

use std::path::PathBuf;

use clipforge_highlight_model::ClipReport;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let report =
        ClipReport::load(&path).map_err(|e| anyhow::anyhow!("Failed to load clip report: {e}"))?;

    println!("Clip report: {}", path.display());
    println!("  Generated: {}", report.generated_at);
    println!("  Clips: {}", report.clips.len());
    println!();

    let total: f64 = report.clips.iter().map(|c| c.duration()).sum();
    for (i, clip) in report.clips.iter().enumerate() {
        let label = match &clip.narrative {
            Some(kind) => format!("  {kind:?}"),
            None => String::new(),
        };
        println!(
            "  #{:<2} {:>8.2}s - {:>8.2}s  ({:.1}s)  score {:.1}  events {}{}",
            i + 1,
            clip.start,
            clip.end,
            clip.duration(),
            clip.score,
            clip.events.len(),
            label
        );
    }
    println!();
    println!("Total highlight time: {total:.1}s");

    Ok(())
}
