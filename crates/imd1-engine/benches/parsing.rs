use criterion::{Criterion, criterion_group, criterion_main};
use imd1_engine::{HtmlMode, ParseOptions, Report, parse_document, to_html};
mod common;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = common::generate_document(100);
    group.bench_function("parse_document", |b| {
        b.iter(|| {
            let mut report = Report::new();
            let doc = parse_document(
                std::hint::black_box(&content),
                &ParseOptions::default(),
                &mut report,
            );
            let _ = std::hint::black_box(doc);
        });
    });

    let cited = common::generate_cited_document(200);
    group.bench_function("cross_reference", |b| {
        b.iter(|| {
            let mut report = Report::new();
            let doc = parse_document(
                std::hint::black_box(&cited),
                &ParseOptions::default(),
                &mut report,
            );
            let _ = std::hint::black_box(doc);
        });
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    group.sample_size(10);

    let content = common::generate_document(100);
    group.bench_function("to_html", |b| {
        b.iter(|| {
            let mut report = Report::new();
            let html = to_html(
                std::hint::black_box(&content),
                HtmlMode::Direct,
                &ParseOptions::default(),
                &mut report,
            );
            let _ = std::hint::black_box(html);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);
