use posidx_core::tokenizer::{normalize, tokenize};
use posidx_core::StopWords;

#[test]
fn it_normalizes_and_stems() {
    let words = normalize("Running Runners RUN! The quick brown foxes.", &StopWords::english());
    assert_eq!(words, vec!["run", "runner", "run", "quick", "brown", "fox"]);
}

#[test]
fn it_filters_stopwords_before_stemming() {
    let sw = StopWords::from_iter(["the", "and"]);
    let words = normalize("The quick brown fox and the lazy dog", &sw);
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert_eq!(words.len(), 5);
}

#[test]
fn positions_count_surviving_tokens() {
    let sw = StopWords::from_iter(["the"]);
    let surface = tokenize("the fox the dog", &sw);
    assert_eq!(surface, vec!["fox", "dog"]);
    assert_eq!(normalize("the fox the dog", &sw).len(), surface.len());
}

#[test]
fn normalization_is_idempotent_on_its_output() {
    let sw = StopWords::from_iter(["over"]);
    let once = normalize("Foxes jumping over dogs, 3.14 and U.S.A", &sw);
    let twice = normalize(&once.join(" "), &sw);
    assert_eq!(once, twice);
}

#[test]
fn word_characters_include_digits_and_underscore() {
    let words = tokenize("snake_case x86 42", &StopWords::default());
    assert_eq!(words, vec!["snake_case", "x86", "42"]);
}

#[test]
fn non_ascii_letters_split_words() {
    let words = tokenize("café naïve Ünïcode", &StopWords::default());
    assert_eq!(words, vec!["caf", "na", "ve", "n", "code"]);
}

#[test]
fn stems_follow_english_snowball() {
    let words = normalize("dying generalization", &StopWords::default());
    assert_eq!(words, vec!["die", "general"]);
}
