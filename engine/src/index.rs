use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub type DocId = u32;

/// One entry of a postings list. Serializes as `[doc_id, weight]`; the
/// weight is a raw occurrence count in the unweighted index and a TF-IDF
/// weight after [`crate::weight::weigh`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(DocId, f64)", into = "(DocId, f64)")]
pub struct Posting {
    pub doc_id: DocId,
    pub weight: f64,
}

impl From<(DocId, f64)> for Posting {
    fn from((doc_id, weight): (DocId, f64)) -> Self {
        Self { doc_id, weight }
    }
}

impl From<Posting> for (DocId, f64) {
    fn from(p: Posting) -> Self {
        (p.doc_id, p.weight)
    }
}

/// Per-term statistics. Serializes as `[doc_freq, total_freq, postings]`.
///
/// Invariants for a built index: `doc_freq == postings.len()`,
/// `total_freq` is the sum of the raw counts, and postings are sorted
/// ascending by doc id with no duplicates. Weighting changes posting
/// weights only; `doc_freq` and `total_freq` keep their raw values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(u32, f64, Vec<Posting>)", into = "(u32, f64, Vec<Posting>)")]
pub struct TermEntry {
    pub doc_freq: u32,
    pub total_freq: f64,
    pub postings: Vec<Posting>,
}

impl From<(u32, f64, Vec<Posting>)> for TermEntry {
    fn from((doc_freq, total_freq, postings): (u32, f64, Vec<Posting>)) -> Self {
        Self { doc_freq, total_freq, postings }
    }
}

impl From<TermEntry> for (u32, f64, Vec<Posting>) {
    fn from(e: TermEntry) -> Self {
        (e.doc_freq, e.total_freq, e.postings)
    }
}

/// Mapping from normalized term to its statistics and postings list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    pub(crate) terms: BTreeMap<String, TermEntry>,
}

impl InvertedIndex {
    pub fn get(&self, term: &str) -> Option<&TermEntry> {
        self.terms.get(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TermEntry)> {
        self.terms.iter()
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Display name and vector length of one document. Serializes as
/// `[name, vector_length]`. The vector length stays 0 until
/// [`crate::weight::vector_lengths`] fills it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f64)", into = "(String, f64)")]
pub struct DocInfo {
    pub name: String,
    pub vector_length: f64,
}

impl From<(String, f64)> for DocInfo {
    fn from((name, vector_length): (String, f64)) -> Self {
        Self { name, vector_length }
    }
}

impl From<DocInfo> for (String, f64) {
    fn from(d: DocInfo) -> Self {
        (d.name, d.vector_length)
    }
}

/// Mapping from document id to [`DocInfo`]. JSON keys are strings, as the
/// artifact format requires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocMap {
    pub(crate) docs: BTreeMap<DocId, DocInfo>,
}

impl DocMap {
    pub fn get(&self, doc_id: DocId) -> Option<&DocInfo> {
        self.docs.get(&doc_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, &DocInfo)> {
        self.docs.iter().map(|(id, info)| (*id, info))
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Build the raw-count inverted index and document mapping from a corpus.
///
/// Documents are consumed in the order given and assigned ids `1..=N` in
/// that order; each pair is `(display_name, raw_text)`. Every document's
/// tokens are counted individually, the per-document tables are flattened
/// into `(term, doc_id, count)` triples, sorted by `(term, doc_id)`, and
/// merged in one pass, so postings come out ascending by doc id with one
/// posting per (term, document). An empty corpus yields an empty index and
/// an empty mapping.
pub fn build_index(documents: impl IntoIterator<Item = (String, String)>) -> (InvertedIndex, DocMap) {
    let mut docs: BTreeMap<DocId, DocInfo> = BTreeMap::new();
    let mut triples: Vec<(String, DocId, u32)> = Vec::new();
    let mut next_id: DocId = 0;

    for (name, text) in documents {
        next_id += 1;
        docs.insert(next_id, DocInfo { name, vector_length: 0.0 });

        let mut counts: HashMap<String, u32> = HashMap::new();
        for token in tokenize(&text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        for (term, count) in counts {
            triples.push((term, next_id, count));
        }
    }

    // (term, doc) pairs are unique, so the count never acts as a key.
    triples.sort();

    let mut terms: BTreeMap<String, TermEntry> = BTreeMap::new();
    for (term, doc_id, count) in triples {
        let entry = terms.entry(term).or_insert_with(|| TermEntry {
            doc_freq: 0,
            total_freq: 0.0,
            postings: Vec::new(),
        });
        entry.doc_freq += 1;
        entry.total_freq += f64::from(count);
        entry.postings.push(Posting { doc_id, weight: f64::from(count) });
    }

    tracing::debug!(num_docs = next_id, num_terms = terms.len(), "built inverted index");
    (InvertedIndex { terms }, DocMap { docs })
}
