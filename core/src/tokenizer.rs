use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

use crate::stopwords::StopWords;

lazy_static! {
    // ASCII word run, optionally continued by dot-separated word runs ("u.s.a", "3.14").
    static ref RE: Regex = Regex::new(r"[A-Za-z0-9_]+(?:\.?[A-Za-z0-9_]+)*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Split text into lowercased surface tokens, dropping stop words.
pub fn tokenize(text: &str, stop_words: &StopWords) -> Vec<String> {
    RE.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|token| !stop_words.contains(token))
        .collect()
}

/// Stem each token, keeping order and cardinality.
pub fn stem_tokens(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| stem(t)).collect()
}

fn stem(token: &str) -> String { STEMMER.stem(token).into_owned() }

/// Tokenize, lowercase, stop-filter and stem. Index `i` of the result is
/// the term at 1-based position `i + 1`. Used unchanged at index and query time.
pub fn normalize(text: &str, stop_words: &StopWords) -> Vec<String> {
    stem_tokens(&tokenize(text, stop_words))
}

/// First normalized term of a query string, if any survives.
pub fn first_term(text: &str, stop_words: &StopWords) -> Option<String> {
    tokenize(text, stop_words).first().map(|token| stem(token))
}
