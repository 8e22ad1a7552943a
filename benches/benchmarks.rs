//! Performance benchmarks for colcomplete
//!
//! Run with: cargo bench

use colcomplete::dataset::Dataset;
use colcomplete::registry::FieldRegistry;
use colcomplete::trie::Trie;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const STEMS: &[&str] = &[
    "Alphabet", "City", "Bay", "Ridge", "Upper", "West", "Side", "Park", "Slope", "Long", "Island",
    "Hell's", "Kitchen", "Murray", "Hill", "Sunset", "Harbor", "Old", "Town", "Fort",
];

/// Deterministic multi-word values, e.g. "Upper West-Side Park 17"
fn sample_words(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let a = STEMS[i % STEMS.len()];
            let b = STEMS[(i / 3 + 7) % STEMS.len()];
            let c = STEMS[(i / 11 + 13) % STEMS.len()];
            let sep = if i % 4 == 0 { '-' } else { ' ' };
            format!("{a} {b}{sep}{c} {i}")
        })
        .collect()
}

fn bench_trie_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("trie_build");

    for count in [100, 1_000, 10_000] {
        let words = sample_words(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &words, |b, words| {
            b.iter(|| Trie::from_words(black_box(words)))
        });
    }

    group.finish();
}

fn bench_keystrokes(c: &mut Criterion) {
    let trie = Trie::from_words(sample_words(10_000));

    // Each prefix of a query is what the trie sees while the user types
    let query = "UpWeSiPa";
    let mut group = c.benchmark_group("keystrokes");

    for len in 2..=query.len() {
        let typed = &query[..len];
        group.bench_with_input(BenchmarkId::new("insensitive", typed), typed, |b, typed| {
            b.iter(|| trie.matches(black_box(typed), false))
        });
    }

    group.bench_function("sensitive_prefix", |b| {
        b.iter(|| trie.matches(black_box("Alph"), true))
    });
    group.bench_function("sensitive_skip", |b| {
        b.iter(|| trie.matches(black_box("AC"), true))
    });

    group.finish();
}

fn bench_registry_build(c: &mut Criterion) {
    let words = sample_words(5_000);
    let mut content = String::from("Name,Borough,Code\n");
    for (i, word) in words.iter().enumerate() {
        content.push_str(&format!("{},{},C{}\n", word, STEMS[i % 5], i % 97));
    }
    let dataset = Dataset::from_delimited(&content, b',').expect("valid csv");
    let fields: Vec<String> = dataset.columns().to_vec();

    c.bench_function("registry_build", |b| {
        b.iter(|| FieldRegistry::build(black_box(&dataset), &fields).expect("known fields"))
    });
}

criterion_group!(
    benches,
    bench_trie_build,
    bench_keystrokes,
    bench_registry_build,
);
criterion_main!(benches);
