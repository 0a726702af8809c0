use criterion::{criterion_group, criterion_main, Criterion};
use posidx_core::tokenizer::normalize;
use posidx_core::StopWords;

const TEXT: &str = "The inverted index maps every normalized term to the documents \
    containing it, together with the positions at which it occurs. Running the \
    indexer over a corpus of U.S. government pages assigns document ids in the \
    order files are encountered, and term ids in the order terms are first seen.";

fn bench_normalize(c: &mut Criterion) {
    let stop_words = StopWords::english();
    let text = TEXT.repeat(50);
    c.bench_function("normalize_paragraphs", |b| b.iter(|| normalize(&text, &stop_words)));
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
