use engine::index::build_index;
use engine::query::QueryEngine;
use engine::weight::{vector_lengths, weigh};
use engine::{DocMap, Error, InvertedIndex};

fn doc(name: &str, text: &str) -> (String, String) {
    (name.to_string(), text.to_string())
}

fn engine_for(corpus: Vec<(String, String)>) -> QueryEngine {
    let (index, doc_map) = build_index(corpus);
    let n = doc_map.len() as u32;
    let weighted = weigh(&index, n).unwrap();
    let doc_map = vector_lengths(&weighted, &doc_map).unwrap();
    QueryEngine::new(weighted, doc_map).unwrap()
}

#[test]
fn weighting_is_pure_and_idempotent() {
    let (index, _) = build_index(vec![
        doc("one", "red fish blue fish"),
        doc("two", "green fish"),
    ]);
    let before = index.clone();
    let first = weigh(&index, 2).unwrap();
    let second = weigh(&index, 2).unwrap();
    assert_eq!(first, second);
    assert_eq!(index, before);
}

#[test]
fn term_in_every_document_collapses_to_zero() {
    let (index, _) = build_index(vec![
        doc("one", "red fish blue fish"),
        doc("two", "green fish"),
    ]);
    let weighted = weigh(&index, 2).unwrap();
    let fish = weighted.get("fish").unwrap();
    assert!(fish.postings.iter().all(|p| p.weight == 0.0));
    // Raw statistics survive weighting untouched.
    assert_eq!(fish.doc_freq, 2);
    assert_eq!(fish.total_freq, 3.0);
}

#[test]
fn vector_length_is_euclidean_norm() {
    let (index, doc_map) = build_index(vec![
        doc("one", "red fish blue fish"),
        doc("two", "green fish"),
    ]);
    let weighted = weigh(&index, 2).unwrap();
    let doc_map = vector_lengths(&weighted, &doc_map).unwrap();
    // idf is 1 for single-document terms and 0 for "fish".
    assert!((doc_map.get(1).unwrap().vector_length - 2f64.sqrt()).abs() < 1e-12);
    assert!((doc_map.get(2).unwrap().vector_length - 1.0).abs() < 1e-12);
}

#[test]
fn cosine_scores_match_hand_computation() {
    let engine = engine_for(vec![
        doc("one", "red fish blue fish"),
        doc("two", "green fish"),
    ]);

    let results = engine.query("red fish", 5);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].doc_id, 1);
    // weight 1 / (doc length sqrt(2) * query length sqrt(2))
    assert!((results[0].score - 0.5).abs() < 1e-12);
    assert_eq!(results[1].doc_id, 2);
    assert_eq!(results[1].score, 0.0);

    let results = engine.query("green", 5);
    assert_eq!(results[0].doc_id, 2);
    assert!((results[0].score - 1.0).abs() < 1e-12);
}

#[test]
fn cat_dog_corpus_ranks_dog_document_first() {
    let engine = engine_for(vec![
        doc("doc1", "the cat sat on the mat"),
        doc("doc2", "dogs chase cats"),
    ]);
    // "cat" appears in both documents, so its idf (and weight) is 0;
    // only "dog" separates the two.
    let results = engine.query("cat dog", 5);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].doc_id, 2);
    assert!(results[0].score > 0.0);
    assert_eq!(results[1].doc_id, 1);
}

#[test]
fn cat_dog_corpus_with_third_document_scores_both() {
    let engine = engine_for(vec![
        doc("doc1", "the cat sat on the mat"),
        doc("doc2", "dogs chase cats"),
        doc("doc3", "green fish"),
    ]);
    let results = engine.query("cat dog", 5);
    assert_eq!(results[0].doc_id, 2);
    assert_eq!(results[1].doc_id, 1);
    assert!(results[0].score > results[1].score);
    assert!(results[1].score > 0.0);
    assert_eq!(results[2].score, 0.0);
}

#[test]
fn querying_own_content_ranks_document_first() {
    let engine = engine_for(vec![
        doc("doc1", "the cat sat on the mat"),
        doc("doc2", "dogs chase cats"),
        doc("doc3", "green fish"),
    ]);
    let results = engine.query("dogs chase cats", 3);
    assert_eq!(results[0].doc_id, 2);
    assert!(results[0].score > results[1].score);
}

#[test]
fn equal_scores_break_ties_by_doc_id() {
    // Identical documents accumulate identical scores.
    let engine = engine_for(vec![
        doc("a", "red fish"),
        doc("b", "red fish"),
        doc("c", "green fish"),
    ]);
    let results = engine.query("red", 3);
    assert_eq!(results[0].doc_id, 1);
    assert_eq!(results[1].doc_id, 2);
    assert_eq!(results[0].score, results[1].score);
}

#[test]
fn stop_word_only_query_scores_everything_zero() {
    let engine = engine_for(vec![
        doc("one", "red fish blue fish"),
        doc("two", "green fish"),
    ]);
    let results = engine.query("the and of", 5);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.score == 0.0));
    assert_eq!(results[0].doc_id, 1);
    assert_eq!(results[1].doc_id, 2);
}

#[test]
fn unindexed_terms_contribute_nothing() {
    let engine = engine_for(vec![
        doc("one", "red fish blue fish"),
        doc("two", "green fish"),
    ]);
    let with_noise = engine.query("red zzzgibberish", 5);
    assert_eq!(with_noise[0].doc_id, 1);
    assert!(with_noise[0].score > 0.0);
}

#[test]
fn results_truncate_to_requested_count() {
    let engine = engine_for(vec![
        doc("a", "red fish"),
        doc("b", "blue fish"),
        doc("c", "green fish"),
    ]);
    assert_eq!(engine.query("fish", 2).len(), 2);
    assert_eq!(engine.query("fish", 10).len(), 3);
}

#[test]
fn postings_must_reference_known_documents() {
    let index: InvertedIndex = serde_json::from_str(r#"{"cat": [1, 1.0, [[9, 1.0]]]}"#).unwrap();
    let doc_map: DocMap = serde_json::from_str(r#"{"1": ["one", 1.0]}"#).unwrap();
    assert!(matches!(
        QueryEngine::new(index, doc_map),
        Err(Error::UnknownDocument { doc_id: 9, .. })
    ));
}

#[test]
fn zero_doc_frequency_is_rejected() {
    let index: InvertedIndex = serde_json::from_str(r#"{"cat": [0, 0.0, []]}"#).unwrap();
    assert!(matches!(weigh(&index, 3), Err(Error::ZeroDocFrequency(_))));
}
