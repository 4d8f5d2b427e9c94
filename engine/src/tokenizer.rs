use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

lazy_static! {
    static ref PUNCT: Regex = Regex::new(r"[[:punct:]]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    // Punctuation is stripped before the stop-word check, so contractions
    // are stored without apostrophes ("don't" arrives here as "dont").
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","arent","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cant","cannot","could","couldnt",
            "did","didnt","do","does","doesnt","doing","dont","down","during",
            "each","few","for","from","further",
            "had","hadnt","has","hasnt","have","havent","having","he","hed","hell","hes","her","here","heres","hers","herself","him","himself","his","how","hows",
            "i","id","ill","im","ive","if","in","into","is","isnt","it","its","itself",
            "lets","me","more","most","mustnt","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","shed","shell","shes","should","shouldnt","so","some","such",
            "than","that","thats","the","their","theirs","them","themselves","then","there","theres","these","they","theyd","theyll","theyre","theyve","this","those","through","to","too",
            "under","until","up","very",
            "was","wasnt","we","wed","well","were","werent","weve","what","whats","when","whens","where","wheres","which","while","who","whos","whom","why","whys","with","wont","would","wouldnt",
            "you","youd","youll","youre","youve","your","yours","yourself","yourselves",
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Normalize raw text into an ordered sequence of stemmed terms.
///
/// ASCII punctuation is stripped, the remainder is split on whitespace and
/// lowercased, stop words and tokens containing any non-ASCII character are
/// dropped, and survivors are stemmed (English Porter family). Duplicates
/// are preserved; frequency counting happens downstream.
pub fn tokenize(text: &str) -> Vec<String> {
    let stripped = PUNCT.replace_all(text, "");
    let mut tokens = Vec::new();
    for word in stripped.split_whitespace() {
        let word = word.to_lowercase();
        if is_stopword(&word) || !word.is_ascii() {
            continue;
        }
        tokens.push(STEMMER.stem(&word).to_string());
    }
    tokens
}
