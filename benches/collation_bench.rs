// Criterion benchmark suite: natural ordering, conversion and folding.
//
// Run: cargo bench
// Specific group: cargo bench -- natural_order
// HTML report: target/criterion/report/index.html

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use unitext::codec;
use unitext::compare::{alpha_numeric_collation_with, alpha_numeric_compare_with};
use unitext::config::AlphaNumericMode;
use unitext::prelude::*;

// ---------------------------------------------------------------------------
// 1. natural order
// ---------------------------------------------------------------------------

fn bench_natural_order(c: &mut Criterion) {
    let cases: &[(&str, &str, &str)] = &[
        ("shared_prefix", "The Lord of the Rings - Part 2", "The Lord of the Rings - Part 10"),
        ("identical_prefix_fast_path", "Season 01 Episode 01", "Season 01 Episode 01 (Extended)"),
        ("accented", "Amélie Poulain", "Amelie Poulain"),
        ("cjk", "千と千尋の神隠し 2", "千と千尋の神隠し 10"),
    ];

    let mut group = c.benchmark_group("natural_order");
    for (name, a, b) in cases {
        group.bench_with_input(BenchmarkId::new("string", name), &(a, b), |bench, (a, b)| {
            bench.iter(|| {
                black_box(alpha_numeric_compare_with(black_box(a), black_box(b), AlphaNumericMode::AccentFolding, None))
            });
        });
        group.bench_with_input(BenchmarkId::new("bytes", name), &(a, b), |bench, (a, b)| {
            bench.iter(|| {
                black_box(alpha_numeric_collation_with(
                    black_box(a.as_bytes()),
                    black_box(b.as_bytes()),
                    AlphaNumericMode::AccentFolding,
                    None,
                ))
            });
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// 2. collator
// ---------------------------------------------------------------------------

fn bench_collator(c: &mut Criterion) {
    let service = CollatorService::new(&Locale::new("en", Some("US")), false).expect("collator data");
    let mut group = c.benchmark_group("collator");
    group.bench_function("whole_string", |bench| {
        bench.iter(|| black_box(service.compare(black_box("Track 10 - Épilogue"), black_box("track 9 - epilogue"))));
    });
    group.bench_function("natural_with_collator", |bench| {
        bench.iter(|| {
            black_box(alpha_numeric_compare_with(
                black_box("Track 10 - Épilogue"),
                black_box("track 9 - epilogue"),
                AlphaNumericMode::Collator,
                Some(&service),
            ))
        });
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// 3. conversions
// ---------------------------------------------------------------------------

fn bench_conversions(c: &mut Criterion) {
    let text = "Grüße aus Köln! 日本語のテキスト 🎬 ".repeat(64);
    let utf16 = codec::utf8_to_utf16(text.as_bytes()).into_inner();

    let mut group = c.benchmark_group("conversions");
    group.bench_function("utf8_to_utf16", |bench| {
        bench.iter(|| black_box(codec::utf8_to_utf16(black_box(text.as_bytes()))));
    });
    group.bench_function("utf16_to_utf8", |bench| {
        bench.iter(|| black_box(codec::utf16_to_utf8(black_box(&utf16))));
    });
    group.bench_function("fold_case", |bench| {
        bench.iter(|| black_box(fold_case(black_box(&text), StringOptions::empty())));
    });
    group.bench_function("normalize_nfd", |bench| {
        bench.iter(|| black_box(normalize(black_box(&text), StringOptions::empty(), NormalizerType::Nfd)));
    });
    group.finish();
}

criterion_group!(benches, bench_natural_order, bench_collator, bench_conversions);
criterion_main!(benches);
