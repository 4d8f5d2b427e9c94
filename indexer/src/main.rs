use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine::index::build_index;
use engine::persist::{
    save_doc_map, save_inverted_index, save_meta, save_weighted_index, IndexPaths, MetaFile,
};
use engine::weight::{vector_lengths, weigh};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build TF-IDF index artifacts from a document corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the raw and weighted indexes plus the document mapping
    Build {
        /// Corpus directory (one document per file, no subfolders)
        #[arg(long)]
        input: String,
        /// Output index directory
        #[arg(long)]
        output: String,
    },
    /// Split a legacy `*TEXT`/`*STOP` test collection into per-document files
    Convert {
        /// Path to the collection file (e.g. TIME.ALL)
        #[arg(long)]
        input: String,
        /// Corpus directory to write `text_<id>.txt` files into
        #[arg(long)]
        output: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build(Path::new(&input), Path::new(&output)),
        Commands::Convert { input, output } => {
            let written = convert_collection(Path::new(&input), Path::new(&output))?;
            tracing::info!(written, output = %output, "corpus conversion complete");
            Ok(())
        }
    }
}

fn build(input: &Path, output: &Path) -> Result<()> {
    let documents = load_corpus(input)?;
    tracing::info!(num_docs = documents.len(), "loaded corpus");

    let (index, doc_map) = build_index(documents);
    let num_docs = doc_map.len() as u32;
    let weighted = weigh(&index, num_docs)?;
    let doc_map = vector_lengths(&weighted, &doc_map)?;

    let paths = IndexPaths::new(output);
    save_inverted_index(&paths, &index)?;
    save_weighted_index(&paths, &weighted)?;
    save_doc_map(&paths, &doc_map)?;
    let meta = MetaFile {
        num_docs,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: 1,
    };
    save_meta(&paths, &meta)?;

    tracing::info!(
        num_docs,
        num_terms = index.num_terms(),
        output = %output.display(),
        "index build complete"
    );
    Ok(())
}

/// Enumerate the corpus directory (non-recursive, file-name order) and read
/// each file as one document. Files are decoded as Latin-1, matching the
/// legacy corpora; non-ASCII tokens are dropped during normalization
/// anyway. The display name is the file name up to its first `.`.
fn load_corpus(dir: &Path) -> Result<Vec<(String, String)>> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(dir)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.path().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let name = file_name
            .split_once('.')
            .map_or(file_name.as_str(), |(stem, _)| stem)
            .to_string();
        let text = read_latin1(entry.path())
            .with_context(|| format!("reading document {}", entry.path().display()))?;
        documents.push((name, text));
    }
    Ok(documents)
}

fn read_latin1(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(bytes.into_iter().map(char::from).collect())
}

/// Split a `*TEXT <id> ...` delimited collection file into one
/// `text_<id>.txt` per document, stopping at the `*STOP` marker. Returns
/// the number of documents written.
fn convert_collection(input: &Path, output: &Path) -> Result<usize> {
    fs::create_dir_all(output)?;
    let reader = BufReader::new(
        fs::File::open(input).with_context(|| format!("opening {}", input.display()))?,
    );

    let mut current_id: Option<String> = None;
    let mut content = String::new();
    let mut written = 0;

    for line in reader.lines() {
        let line = line?;
        if line.starts_with("*TEXT") {
            written += flush_document(output, current_id.take(), &content)?;
            current_id = line.split_whitespace().nth(1).map(str::to_string);
            content.clear();
        } else if line.starts_with("*STOP") {
            written += flush_document(output, current_id.take(), &content)?;
            content.clear();
        } else {
            content.push_str(&line);
            content.push('\n');
        }
    }
    // Collections without a trailing *STOP still flush the last document.
    written += flush_document(output, current_id.take(), &content)?;
    Ok(written)
}

fn flush_document(output: &Path, id: Option<String>, content: &str) -> Result<usize> {
    match id {
        Some(id) => {
            fs::write(output.join(format!("text_{id}.txt")), content)?;
            Ok(1)
        }
        None => Ok(0),
    }
}
