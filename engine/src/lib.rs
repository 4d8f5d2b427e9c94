//! Term-based retrieval over a fixed document collection.
//!
//! The pipeline is: [`tokenizer`] normalizes raw text into stemmed terms,
//! [`index`] builds the raw-count inverted index and document mapping,
//! [`weight`] derives the TF-IDF weighted index and document vector
//! lengths, and [`query`] ranks documents by cosine similarity against the
//! weighted index. [`persist`] reads and writes the JSON artifacts that
//! connect an index build to later query sessions.
//!
//! Indexes are plain values: building, weighting, and vector-length
//! computation are pure functions, and a [`query::QueryEngine`] holds its
//! inputs immutably, so queries may run concurrently over shared
//! references.

pub mod index;
pub mod persist;
pub mod query;
pub mod tokenizer;
pub mod weight;

pub use index::{DocId, DocInfo, DocMap, InvertedIndex, Posting, TermEntry};

pub use error::{Error, Result};

mod error {
    use crate::index::DocId;

    /// Errors surfaced by index construction, weighting, and artifact IO.
    ///
    /// Degenerate numeric conditions at query time (a term missing from
    /// the index, a zero-length document or query vector) are not errors;
    /// they contribute a score of zero instead.
    #[derive(thiserror::Error, Debug)]
    pub enum Error {
        /// The corpus contained no documents, so idf is undefined.
        #[error("corpus contains no documents")]
        EmptyCorpus,
        /// A loaded index entry claims a document frequency of zero.
        #[error("term {0:?} has zero document frequency")]
        ZeroDocFrequency(String),
        /// A posting references a document id missing from the mapping.
        #[error("posting for term {term:?} references unknown document {doc_id}")]
        UnknownDocument { term: String, doc_id: DocId },
        #[error(transparent)]
        Io(#[from] std::io::Error),
        #[error(transparent)]
        Json(#[from] serde_json::Error),
    }

    pub type Result<T> = std::result::Result<T, Error>;
}
