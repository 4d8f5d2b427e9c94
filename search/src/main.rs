mod format;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use engine::persist::{load_query_artifacts, IndexPaths};
use engine::query::QueryEngine;
use format::{GeneralFormatter, LyricsFormatter, ResultFormatter};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Query a built TF-IDF index by cosine similarity", long_about = None)]
struct Args {
    /// Index directory produced by the indexer
    #[arg(long, default_value = "./index")]
    index: String,
    /// One-shot query; omit for an interactive prompt
    #[arg(long)]
    query: Option<String>,
    /// Maximum number of results to return
    #[arg(long, default_value_t = 5)]
    results: usize,
    /// Output table style
    #[arg(long, value_enum, default_value_t = Format::General)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    General,
    Lyrics,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let paths = IndexPaths::new(&args.index);
    let (weighted, doc_map, meta) = load_query_artifacts(&paths)?;
    tracing::info!(num_docs = meta.num_docs, index = %args.index, "loaded index");
    let engine = QueryEngine::new(weighted, doc_map)?;

    let formatter: Box<dyn ResultFormatter> = match args.format {
        Format::General => Box::new(GeneralFormatter),
        Format::Lyrics => Box::new(LyricsFormatter),
    };

    match args.query {
        Some(query) => run_query(&engine, formatter.as_ref(), &query, args.results),
        None => interactive(&engine, formatter.as_ref(), args.results)?,
    }
    Ok(())
}

fn run_query(engine: &QueryEngine, formatter: &dyn ResultFormatter, query: &str, results: usize) {
    let start = std::time::Instant::now();
    let hits = engine.query(query, results);
    formatter.print_results(&hits, engine.doc_map());
    tracing::debug!(query, took = ?start.elapsed(), "query complete");
}

fn interactive(engine: &QueryEngine, formatter: &dyn ResultFormatter, results: usize) -> Result<()> {
    println!("Enter search query ('exit' to quit):");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut buffer = String::new();
        if stdin.lock().read_line(&mut buffer)? == 0 {
            break;
        }
        let query = buffer.trim();
        if query == "exit" {
            break;
        }
        if query.is_empty() {
            continue;
        }
        run_query(engine, formatter, query, results);
    }
    Ok(())
}
