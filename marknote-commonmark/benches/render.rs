#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  reason = "Fine in benchmarks"
)]
use std::{fmt::Write, hint::black_box};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use marknote_commonmark::{
  Heading,
  MarkdownOptions,
  MarkdownProcessor,
  TocOptions,
  build_tree,
  make_id,
  render_toc,
};

const DOC_SMALL: &str = r"# Notes

[TOC]

## Intro

Some *emphasis* and a [link](other.md).

### Details

- one
- two
";

/// A long document with many sections and some raw HTML to sanitize.
fn doc_large() -> String {
  let mut doc = String::from("# Handbook\n\n[TOC]\n\n");
  for section in 0..100 {
    let _ = write!(
      doc,
      "## Section {section}\n\nParagraph with **bold** text and \
       `code`.\n\n<div onclick=\"x()\">raw</div>\n\n### Part \
       {section}.1\n\n```rust\nfn f() {{}}\n```\n\n"
    );
  }
  doc
}

fn bench_render(c: &mut Criterion) {
  let mut group = c.benchmark_group("render");
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let large = doc_large();

  group.bench_with_input(
    BenchmarkId::new("document", "small"),
    &DOC_SMALL,
    |b, doc| b.iter(|| processor.render(black_box(doc))),
  );

  group.bench_with_input(
    BenchmarkId::new("document", "large"),
    &large.as_str(),
    |b, doc| b.iter(|| processor.render(black_box(doc))),
  );

  group.finish();
}

fn bench_toc(c: &mut Criterion) {
  let mut group = c.benchmark_group("toc");
  let flat: Vec<Heading> = (0..500)
    .map(|i| Heading::new(if i % 4 == 0 { 2 } else { 3 }, format!("Heading {i}")))
    .collect();

  group.bench_function("build_and_render", |b| {
    b.iter(|| {
      let tree = build_tree(black_box(flat.clone()));
      render_toc(&tree, &TocOptions::default())
    });
  });

  group.bench_function("make_id", |b| {
    b.iter(|| make_id(black_box("A reasonably long heading title")));
  });

  group.finish();
}

criterion_group!(benches, bench_render, bench_toc);
criterion_main!(benches);
