//! Performance benchmarks for querycomplete.
//!
//! Run with: cargo bench
//!
//! Suggestions are rebuilt on every keystroke, so each call should stay well
//! under a millisecond for a vocabulary of a few thousand keywords.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use querycomplete::core::{complete, isolate_term};
use querycomplete::services::frecency::{frecency_at, now_millis};
use querycomplete::services::{rank_recent, Description, FilterDefinition, FilterFormat};
use querycomplete::{Autocompleter, SearchHistoryEntry, Vocabulary};

/// A vocabulary roughly the size of a real item-search language.
fn large_vocabulary() -> Vocabulary {
    let simple: Vec<String> = (0..400).map(|i| format!("flag{}", i)).collect();
    let values: Vec<String> = (0..40).map(|i| format!("value{}", i)).collect();

    let mut filters = vec![FilterDefinition {
        keywords: simple,
        description: Description::Key("Filter.Flag".into()),
        format: FilterFormat::Simple,
        suggestions: Vec::new(),
        exact: false,
    }];
    for i in 0..40 {
        filters.push(FilterDefinition {
            keywords: vec![format!("key{}", i)],
            description: Description::Key("Filter.Key".into()),
            format: if i % 4 == 0 {
                FilterFormat::Stat
            } else {
                FilterFormat::Query
            },
            suggestions: values.clone(),
            exact: false,
        });
    }
    Vocabulary::from_filters(filters)
}

fn history(len: usize) -> Vec<SearchHistoryEntry> {
    let now = now_millis();
    (0..len)
        .map(|i| SearchHistoryEntry {
            query: format!("is:flag{} key{}:value{}", i % 400, i % 40, i % 40),
            saved: i % 10 == 0,
            usage_count: (i % 15) as u32,
            last_usage: now - (i as u64 * 3_600_000),
        })
        .collect()
}

/// Benchmark term isolation.
fn bench_isolate_term(c: &mut Criterion) {
    let query = "is:flag12 or (key3:value1 and not:flag9) stat:rp";

    c.bench_function("isolate_term", |b| {
        b.iter(|| black_box(isolate_term(black_box(query), black_box(query.len()))))
    });
}

/// Benchmark keyword completion.
fn bench_complete(c: &mut Criterion) {
    let vocab = large_vocabulary();
    let mut group = c.benchmark_group("complete");

    for typed in ["fla", "is:flag1", "key1", "key4:value", "key0:value1:"] {
        group.bench_with_input(BenchmarkId::from_parameter(typed), &typed, |b, typed| {
            b.iter(|| black_box(complete(black_box(typed), &vocab)))
        });
    }

    group.finish();
}

/// Benchmark frecency scoring and history ranking.
fn bench_recent(c: &mut Criterion) {
    let now = now_millis();
    c.bench_function("frecency", |b| {
        b.iter(|| black_box(frecency_at(black_box(7), black_box(now - 86_400_000), now)))
    });

    let entries = history(500);
    let mut group = c.benchmark_group("rank_recent");
    for query in ["", "flag1", "key3:value3"] {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, query| {
            b.iter(|| black_box(rank_recent(black_box(query), &entries)))
        });
    }
    group.finish();
}

/// Benchmark the full pipeline, with and without the memo.
fn bench_suggestions(c: &mut Criterion) {
    let entries = history(200);
    let mut autocompleter = Autocompleter::new(large_vocabulary());
    let query = "is:flag1 key2:val";

    c.bench_function("build_suggestions", |b| {
        b.iter(|| black_box(autocompleter.build_suggestions(black_box(query), query.len(), &entries)))
    });

    c.bench_function("suggest_memo_hit", |b| {
        b.iter(|| black_box(autocompleter.suggest(black_box(query), query.len(), &entries).len()))
    });
}

criterion_group!(
    benches,
    bench_isolate_term,
    bench_complete,
    bench_recent,
    bench_suggestions
);
criterion_main!(benches);
