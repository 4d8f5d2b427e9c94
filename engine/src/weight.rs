use crate::index::{DocMap, InvertedIndex, Posting, TermEntry};
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Derive the TF-IDF weighted index from a raw-count index.
///
/// For a term with document frequency `df`, `idf = log2(total_docs / df)`
/// and every posting weight becomes `count * idf`. No smoothing is applied:
/// a term present in every document gets idf 0 and its weights collapse to
/// 0 exactly. The input is left untouched; the result is a new index with
/// the same `doc_freq`/`total_freq` values.
///
/// Rejects `total_docs == 0` ([`Error::EmptyCorpus`]) and entries claiming
/// a zero document frequency ([`Error::ZeroDocFrequency`], possible only
/// in a corrupt loaded artifact), since both leave idf undefined.
pub fn weigh(index: &InvertedIndex, total_docs: u32) -> Result<InvertedIndex> {
    if total_docs == 0 {
        return Err(Error::EmptyCorpus);
    }

    let mut terms: BTreeMap<String, TermEntry> = BTreeMap::new();
    for (term, entry) in index.iter() {
        if entry.doc_freq == 0 {
            return Err(Error::ZeroDocFrequency(term.clone()));
        }
        let idf = (f64::from(total_docs) / f64::from(entry.doc_freq)).log2();
        let postings = entry
            .postings
            .iter()
            .map(|p| Posting { doc_id: p.doc_id, weight: p.weight * idf })
            .collect();
        terms.insert(
            term.clone(),
            TermEntry {
                doc_freq: entry.doc_freq,
                total_freq: entry.total_freq,
                postings,
            },
        );
    }
    Ok(InvertedIndex { terms })
}

/// Compute every document's vector length from the weighted index.
///
/// The length is the Euclidean norm of the document's TF-IDF vector: the
/// square root of the sum of squared weights over every posting addressed
/// to it anywhere in the index. Documents without postings (or whose
/// weights all collapsed to 0) keep length 0. Returns an updated copy of
/// the mapping; the input is not mutated.
pub fn vector_lengths(weighted: &InvertedIndex, doc_map: &DocMap) -> Result<DocMap> {
    let mut sums: BTreeMap<u32, f64> = doc_map.iter().map(|(id, _)| (id, 0.0)).collect();

    for (term, entry) in weighted.iter() {
        for posting in &entry.postings {
            let sum = sums.get_mut(&posting.doc_id).ok_or_else(|| Error::UnknownDocument {
                term: term.clone(),
                doc_id: posting.doc_id,
            })?;
            *sum += posting.weight * posting.weight;
        }
    }

    let mut out = doc_map.clone();
    for (doc_id, sum) in sums {
        if let Some(info) = out.docs.get_mut(&doc_id) {
            info.vector_length = sum.sqrt();
        }
    }
    Ok(out)
}
