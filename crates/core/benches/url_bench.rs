//! URL 정규화 벤치마크

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hitcount_core::url::normalize_url;

const URLS: &[&str] = &[
    "/",
    "/posts/2023/10/rust-async/",
    "/posts/2023/10/rust-async/?utm_source=rss&utm_medium=feed#comments",
    "/search?q=tokio+select",
    "/static/css/site.min.css",
];

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_url", |b| {
        b.iter(|| {
            for url in URLS {
                black_box(normalize_url(black_box(url)));
            }
        })
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
