// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use chrono::DateTime;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gitlogfeed_git::Commit;
use gitlogfeed_render::{FeedBuilder, FeedSettings, colorize, render_page};

/// Build a single-file patch with `hunk_lines` changed lines
fn synthetic_patch(hunk_lines: usize) -> Vec<Vec<u8>> {
    let mut lines = vec![
        b"diff --git a/src/lib.rs b/src/lib.rs".to_vec(),
        b"index 1111111..2222222 100644".to_vec(),
        b"--- a/src/lib.rs".to_vec(),
        b"+++ b/src/lib.rs".to_vec(),
        format!("@@ -1,{hunk_lines} +1,{hunk_lines} @@").into_bytes(),
    ];
    for n in 0..hunk_lines {
        lines.push(format!("-    let old_{n} = a < b && c > {n};").into_bytes());
        lines.push(format!("+    let new_{n} = a < b && c > {n};").into_bytes());
        lines.push(format!("     context_{n}();").into_bytes());
    }
    lines
}

fn synthetic_commit(i: usize) -> Commit {
    Commit {
        hash: format!("{i:040x}"),
        title: format!("Commit {i} <with> markup & entities"),
        date: DateTime::parse_from_rfc3339("2026-01-17T02:33:06+01:00").expect("valid date"),
        author_name: format!("Author {}", i % 10),
        author_email: format!("author{}@example.com", i % 10),
        message: vec![format!("Body of commit {i}"), String::new(), "More".to_string()],
        patch: Vec::new(),
    }
}

fn colorize_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("colorize");

    for size in [10, 100, 1000].iter() {
        let patch = synthetic_patch(*size);
        group.bench_with_input(BenchmarkId::new("hunk_lines", size), &patch, |b, patch| {
            b.iter(|| colorize(patch).filter(|l| l.section_start).count())
        });
    }

    group.finish();
}

fn html_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("html");

    for size in [10, 100, 1000].iter() {
        let patch = synthetic_patch(*size);
        group.bench_with_input(BenchmarkId::new("render_page", size), &patch, |b, patch| {
            b.iter(|| render_page("Benchmark page", patch).expect("render failed"))
        });
    }

    group.finish();
}

fn feed_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("feed");

    for count in [20, 200].iter() {
        let commits: Vec<Commit> = (0..*count).map(synthetic_commit).collect();
        group.bench_with_input(BenchmarkId::new("entries", count), &commits, |b, commits| {
            b.iter(|| {
                let mut feed =
                    FeedBuilder::new(FeedSettings::new("Bench", "https://example.com", "atom.xml"));
                for commit in commits {
                    feed.push(commit);
                }
                feed.finish()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, colorize_benchmarks, html_benchmarks, feed_benchmarks);
criterion_main!(benches);
