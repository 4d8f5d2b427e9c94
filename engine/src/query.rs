use crate::index::{DocId, DocMap, InvertedIndex};
use crate::tokenizer::tokenize;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One ranked result row. Serializes as `[doc_id, score]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(DocId, f64)", into = "(DocId, f64)")]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub score: f64,
}

impl From<(DocId, f64)> for ScoredDoc {
    fn from((doc_id, score): (DocId, f64)) -> Self {
        Self { doc_id, score }
    }
}

impl From<ScoredDoc> for (DocId, f64) {
    fn from(s: ScoredDoc) -> Self {
        (s.doc_id, s.score)
    }
}

/// Ranks documents against free-text queries by cosine similarity.
///
/// Holds the TF-IDF weighted index and the document mapping (with vector
/// lengths already computed) immutably for its whole lifetime, so one
/// engine may serve any number of concurrent queries through shared
/// references.
pub struct QueryEngine {
    index: InvertedIndex,
    doc_map: DocMap,
}

impl QueryEngine {
    /// Validate the artifacts and wrap them in an engine.
    ///
    /// Every posting must reference a document present in the mapping;
    /// checking this once up front is what makes [`Self::query`]
    /// infallible.
    pub fn new(index: InvertedIndex, doc_map: DocMap) -> Result<Self> {
        for (term, entry) in index.iter() {
            for posting in &entry.postings {
                if doc_map.get(posting.doc_id).is_none() {
                    return Err(Error::UnknownDocument {
                        term: term.clone(),
                        doc_id: posting.doc_id,
                    });
                }
            }
        }
        Ok(Self { index, doc_map })
    }

    pub fn doc_map(&self) -> &DocMap {
        &self.doc_map
    }

    /// Return the top `num_results` documents for a free-text query,
    /// ordered by cosine similarity descending.
    ///
    /// The query is normalized with the same tokenizer used at index time
    /// and treated as a vector of unit weights, so its vector length is
    /// the square root of its token count. Every known document starts as
    /// a candidate with score 0; each query term found in the index adds
    /// `weight / (doc_length * query_length)` to the documents in its
    /// postings list. Terms absent from the index contribute nothing, as
    /// do documents with vector length 0, and a query with no surviving
    /// tokens leaves every score at 0. Equal scores order by ascending
    /// doc id; zero-score rows may appear when fewer than `num_results`
    /// documents match.
    pub fn query(&self, text: &str, num_results: usize) -> Vec<ScoredDoc> {
        let tokens = tokenize(text);
        let query_length = (tokens.len() as f64).sqrt();

        // Seeding in doc-id order is what the tie-break contract rests on:
        // the sort below is stable, so equal scores stay id-ascending.
        let mut scores: BTreeMap<DocId, f64> =
            self.doc_map.iter().map(|(id, _)| (id, 0.0)).collect();

        if query_length > 0.0 {
            for token in &tokens {
                let Some(entry) = self.index.get(token) else { continue };
                for posting in &entry.postings {
                    let doc_length = self
                        .doc_map
                        .get(posting.doc_id)
                        .map_or(0.0, |info| info.vector_length);
                    if doc_length == 0.0 {
                        continue;
                    }
                    if let Some(score) = scores.get_mut(&posting.doc_id) {
                        *score += posting.weight / (doc_length * query_length);
                    }
                }
            }
        }

        let mut ranked: Vec<ScoredDoc> = scores
            .into_iter()
            .map(|(doc_id, score)| ScoredDoc { doc_id, score })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(num_results);
        ranked
    }
}
