//! 关键词拆分与匹配性能基准测试

use chrono::Utc;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use geoabbr::services::split_keywords;
use geoabbr::storage::AbbreviationEntry;
use std::hint::black_box;

fn create_entries(n: usize) -> Vec<AbbreviationEntry> {
    let now = Utc::now();
    (0..n)
        .map(|i| AbbreviationEntry {
            id: format!("id-{}", i),
            abbreviation: format!("TD{:04}", i),
            full_name: format!("土地利用分类第{}项", i),
            copy_count: i as u64,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// split_keywords 性能
fn bench_split_keywords(c: &mut Criterion) {
    let mut group = c.benchmark_group("keywords/split");

    let short = "GSDJ,JZDJ;TDLY\nXXXX";
    group.throughput(Throughput::Bytes(short.len() as u64));
    group.bench_function("short", |b| b.iter(|| split_keywords(black_box(short))));

    // 粘贴一整列表格的情况
    let long: String = (0..500)
        .map(|i| format!("TD{:04}", i % 200))
        .collect::<Vec<_>>()
        .join("\r\n");
    group.throughput(Throughput::Bytes(long.len() as u64));
    group.bench_function("pasted_column_with_duplicates", |b| {
        b.iter(|| split_keywords(black_box(&long)))
    });

    group.finish();
}

/// 匹配结果分类（unmatched 判定）性能
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("keywords/classify");
    let entries = create_entries(10);
    let keywords = split_keywords(
        &(0..50)
            .map(|i| format!("TD{:04}", i))
            .collect::<Vec<_>>()
            .join(","),
    );

    group.throughput(Throughput::Elements(keywords.len() as u64));
    group.bench_function("50_keywords_vs_10_matches", |b| {
        b.iter(|| {
            keywords
                .iter()
                .filter(|kw| !entries.iter().any(|e| e.matches_keyword(kw)))
                .count()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_split_keywords, bench_classify);
criterion_main!(benches);
