use engine::tokenizer::tokenize;

#[test]
fn it_normalizes_and_stems() {
    let words = tokenize("Running Runners RUN!");
    // Stemming to "run" should appear
    assert!(words.contains(&"run".to_string()));
    assert!(!words.iter().any(|w| w.chars().any(char::is_uppercase)));
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(words.contains(&"fox".to_string()));
}

#[test]
fn it_strips_punctuation_before_stopword_check() {
    // "don't" loses its apostrophe first and is then dropped as "dont".
    let words = tokenize("don't stop the music");
    assert_eq!(words, vec!["stop", "music"]);
}

#[test]
fn it_drops_non_ascii_words() {
    let words = tokenize("doctors visit the café");
    assert_eq!(words, vec!["doctor", "visit"]);
}

#[test]
fn stop_word_only_text_yields_no_tokens() {
    assert!(tokenize("the and of").is_empty());
    assert!(tokenize("").is_empty());
}
