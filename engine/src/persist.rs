use crate::index::{DocMap, InvertedIndex};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Index-level metadata stored alongside the artifacts.
#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub created_at: String,
    pub version: u32,
}

/// Locations of the JSON artifacts under one index directory.
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn inverted_index(&self) -> PathBuf {
        self.root.join("inverted_index.json")
    }
    fn weighted_index(&self) -> PathBuf {
        self.root.join("weighted_index.json")
    }
    fn doc_map(&self) -> PathBuf {
        self.root.join("doc_mapping.json")
    }
    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

fn save_index(path: PathBuf, index: &InvertedIndex) -> Result<()> {
    let mut f = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut f, index)?;
    f.flush()?;
    Ok(())
}

fn load_index(path: PathBuf) -> Result<InvertedIndex> {
    let f = BufReader::new(File::open(path)?);
    let index = serde_json::from_reader(f)?;
    Ok(index)
}

pub fn save_inverted_index(paths: &IndexPaths, index: &InvertedIndex) -> Result<()> {
    create_dir_all(&paths.root)?;
    save_index(paths.inverted_index(), index)
}

pub fn load_inverted_index(paths: &IndexPaths) -> Result<InvertedIndex> {
    load_index(paths.inverted_index())
}

pub fn save_weighted_index(paths: &IndexPaths, index: &InvertedIndex) -> Result<()> {
    create_dir_all(&paths.root)?;
    save_index(paths.weighted_index(), index)
}

pub fn load_weighted_index(paths: &IndexPaths) -> Result<InvertedIndex> {
    load_index(paths.weighted_index())
}

pub fn save_doc_map(paths: &IndexPaths, doc_map: &DocMap) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = BufWriter::new(File::create(paths.doc_map())?);
    serde_json::to_writer(&mut f, doc_map)?;
    f.flush()?;
    Ok(())
}

pub fn load_doc_map(paths: &IndexPaths) -> Result<DocMap> {
    let f = BufReader::new(File::open(paths.doc_map())?);
    let doc_map = serde_json::from_reader(f)?;
    Ok(doc_map)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let f = BufReader::new(File::open(paths.meta())?);
    let meta = serde_json::from_reader(f)?;
    Ok(meta)
}

/// Load everything a query session needs: weighted index, document
/// mapping, and metadata.
pub fn load_query_artifacts(paths: &IndexPaths) -> Result<(InvertedIndex, DocMap, MetaFile)> {
    let weighted = load_weighted_index(paths)?;
    let doc_map = load_doc_map(paths)?;
    let meta = load_meta(paths)?;
    Ok((weighted, doc_map, meta))
}
