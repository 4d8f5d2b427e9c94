use engine::query::ScoredDoc;
use engine::DocMap;

/// Result presentation. Zero-score rows are a ranking artifact (every
/// document is a candidate) and are filtered here, not in the engine.
pub trait ResultFormatter {
    fn print_results(&self, results: &[ScoredDoc], docs: &DocMap);
}

/// Plain id / name / score table.
pub struct GeneralFormatter;

impl ResultFormatter for GeneralFormatter {
    fn print_results(&self, results: &[ScoredDoc], docs: &DocMap) {
        println!("{:10}|{:^25}| {:5}", "Doc ID", "Doc Name", "Similarity Score");
        println!("{}", "=".repeat(60));
        for hit in results {
            if hit.score == 0.0 {
                continue;
            }
            let name = docs.get(hit.doc_id).map_or("", |info| info.name.as_str());
            println!("{:<10}|{:^25}| {:.6}", hit.doc_id, name, hit.score);
        }
    }
}

/// Lyrics corpus table: document names are `<artist>_<song>`.
pub struct LyricsFormatter;

impl ResultFormatter for LyricsFormatter {
    fn print_results(&self, results: &[ScoredDoc], docs: &DocMap) {
        println!("{:45}|{:^25}| {:5}", "Song", "Artist", "Similarity Score");
        println!("{}", "=".repeat(80));
        for hit in results {
            if hit.score == 0.0 {
                continue;
            }
            let name = docs.get(hit.doc_id).map_or("", |info| info.name.as_str());
            let (artist, song) = name.split_once('_').unwrap_or((name, ""));
            println!("{song:<45}|{artist:^25}| {:.6}", hit.score);
        }
    }
}
