use anyhow::{Context, Result};
use clap::Parser;
use engine::persist::{load_query_artifacts, IndexPaths};
use engine::query::QueryEngine;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "eval")]
#[command(about = "Score index retrieval against ground-truth relevance judgments", long_about = None)]
struct Args {
    /// Index directory produced by the indexer
    #[arg(long, default_value = "./index")]
    index: String,
    /// Query file with `*FIND <id>` blocks terminated by `*STOP` (e.g. TIME.QUE)
    #[arg(long)]
    queries: PathBuf,
    /// Judgment file with `<query_id> <doc_nr>...` lines (e.g. TIME.REL)
    #[arg(long)]
    judgments: PathBuf,
    /// Results to request per query
    #[arg(long, default_value_t = 10)]
    results: usize,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let paths = IndexPaths::new(&args.index);
    let (weighted, doc_map, meta) = load_query_artifacts(&paths)?;
    tracing::info!(num_docs = meta.num_docs, index = %args.index, "loaded index");
    let engine = QueryEngine::new(weighted, doc_map)?;

    let judgments = parse_judgments(BufReader::new(
        File::open(&args.judgments).with_context(|| format!("opening {}", args.judgments.display()))?,
    ))?;
    let queries = parse_queries(BufReader::new(
        File::open(&args.queries).with_context(|| format!("opening {}", args.queries.display()))?,
    ))?;

    println!("{:10}| {:10}", "Query", "Score");
    println!("{}", "=".repeat(30));

    let mut total = 0.0;
    let mut scored = 0;
    for (query_id, text) in &queries {
        let Some(relevant) = judgments.get(query_id) else {
            tracing::warn!(query_id = %query_id, "no relevance judgments; skipping");
            continue;
        };
        let returned: HashSet<u32> = engine
            .query(text, args.results)
            .iter()
            .filter_map(|hit| engine.doc_map().get(hit.doc_id))
            .filter_map(|info| doc_number(&info.name))
            .collect();

        let matches = relevant.iter().filter(|nr| returned.contains(*nr)).count();
        let score = matches as f64 / relevant.len() as f64;
        total += score;
        scored += 1;
        println!("{query_id:<10}| {score:<10.4}");
    }

    if scored > 0 {
        println!("Average Score: {}", total / f64::from(scored));
    } else {
        println!("No queries scored");
    }
    Ok(())
}

/// Parse `<query_id> <doc_nr>...` lines into a judgment table. Lines
/// without at least one document number are skipped.
fn parse_judgments(reader: impl BufRead) -> Result<BTreeMap<String, Vec<u32>>> {
    let mut judgments = BTreeMap::new();
    for line in reader.lines() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let Some(query_id) = fields.next() else { continue };
        let docs: Vec<u32> = fields.filter_map(|nr| nr.parse().ok()).collect();
        if !docs.is_empty() {
            judgments.insert(normalize_id(query_id), docs);
        }
    }
    Ok(judgments)
}

/// Parse `*FIND <id>` query blocks; `*STOP` ends the file.
fn parse_queries(reader: impl BufRead) -> Result<Vec<(String, String)>> {
    let mut queries = Vec::new();
    let mut current_id: Option<String> = None;
    let mut text = String::new();

    for line in reader.lines() {
        let line = line?;
        if line.starts_with("*FIND") {
            if let Some(id) = current_id.take() {
                queries.push((id, std::mem::take(&mut text)));
            }
            current_id = line.split_whitespace().last().map(normalize_id);
        } else if line.starts_with("*STOP") {
            break;
        } else {
            text.push_str(&line);
            text.push('\n');
        }
    }
    if let Some(id) = current_id.take() {
        queries.push((id, text));
    }
    Ok(queries)
}

/// Strip leading zeros so ids compare the same across files.
fn normalize_id(id: &str) -> String {
    id.parse::<u32>().map_or_else(|_| id.to_string(), |n| n.to_string())
}

/// Trailing number of a converted document's display name
/// (`text_237` -> 237); documents from other corpora yield `None`.
fn doc_number(name: &str) -> Option<u32> {
    name.rsplit_once('_')?.1.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judgments_parse_per_line() {
        let input = "1 268 288 304\n\n17 33\n";
        let judgments = parse_judgments(input.as_bytes()).unwrap();
        assert_eq!(judgments.get("1").unwrap(), &vec![268, 288, 304]);
        assert_eq!(judgments.get("17").unwrap(), &vec![33]);
        assert_eq!(judgments.len(), 2);
    }

    #[test]
    fn queries_split_on_find_markers() {
        let input = "*FIND      1\nkennedy administration\npressure\n*FIND      2\nsoviet troops\n*STOP\n";
        let queries = parse_queries(input.as_bytes()).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].0, "1");
        assert_eq!(queries[0].1, "kennedy administration\npressure\n");
        assert_eq!(queries[1].0, "2");
    }

    #[test]
    fn doc_numbers_come_from_display_names() {
        assert_eq!(doc_number("text_237"), Some(237));
        assert_eq!(doc_number("text_017"), Some(17));
        assert_eq!(doc_number("eminem_lose yourself"), None);
        assert_eq!(doc_number("plain"), None);
    }
}
