//! Performance benchmarks for the offline extraction path.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A generated review page at several sizes (container strategy)
//! - A page with review links only (alternative strategy)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use review_scraper::{locate, scrape_document, RenderedDocument, Thresholds};

fn review_page(reviews: usize) -> String {
    let mut html = String::from("<html><body><section>");
    for i in 0..reviews {
        html.push_str(&format!(
            r#"<div data-testid="review-card">
                <span class="rating">{rating}/10</span>
                <a class="title" href="/review/rw{i}">Review number {i} of the film</a>
                <div data-testid="review-text">Review {i}: the layered dream structure rewards close attention, and the score carries every act.</div>
                <div class="actions"><button class="ipc-btn">Helpful</button></div>
            </div>"#,
            rating = i % 10 + 1
        ));
    }
    html.push_str("</section></body></html>");
    html
}

fn link_page(reviews: usize) -> String {
    let mut html = String::from("<html><body>");
    for i in 0..reviews {
        html.push_str(&format!(
            r#"<article><header><a href="/review/rw{i}">Link review {i}</a></header>
                <div class="body">Review {i} body text that is comfortably longer than one hundred characters so the alternative extractor accepts it as a review.</div>
            </article>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

fn bench_containers(c: &mut Criterion) {
    let thresholds = Thresholds::default();
    let mut group = c.benchmark_group("containers");

    for count in [10, 100, 500] {
        let html = review_page(count);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("scrape_document", count), &html, |b, html| {
            b.iter(|| {
                let doc = RenderedDocument::from_html("https://example.com/reviews", black_box(html));
                scrape_document(&doc, &thresholds)
            });
        });
    }

    group.finish();
}

fn bench_locate(c: &mut Criterion) {
    let doc = RenderedDocument::from_html("https://example.com/reviews", &review_page(100));
    c.bench_function("locate_100", |b| {
        b.iter(|| locate(black_box(&doc)).len());
    });
}

fn bench_alternative(c: &mut Criterion) {
    let thresholds = Thresholds::default();
    let html = link_page(100);
    c.bench_function("alternative_100", |b| {
        b.iter(|| {
            let doc = RenderedDocument::from_html("https://example.com/reviews", black_box(&html));
            scrape_document(&doc, &thresholds)
        });
    });
}

criterion_group!(benches, bench_containers, bench_locate, bench_alternative);
criterion_main!(benches);
