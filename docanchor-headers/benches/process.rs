use std::{fmt::Write as _, hint::black_box};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use docanchor_headers::{HeaderProcessor, generate_table_of_contents, slugify};

// Documents are generated rather than checked in: a long page of prose with a
// heading every few paragraphs, many of them sharing titles so the collision
// path is exercised as well.
fn document(sections: usize) -> String {
  let mut doc = String::from("# Reference\n\n");
  for i in 0..sections {
    let _ = writeln!(doc, "## Section {}\n", i % 10);
    doc.push_str(
      "Events are appended to the stream and never rewritten. Projections \
       fold them into read models.\n\n",
    );
    let _ = writeln!(doc, "### Details {{#details-{}}}\n", i % 5);
  }
  doc
}

fn bench_process(c: &mut Criterion) {
  let processor = HeaderProcessor::default();
  let mut group = c.benchmark_group("process");

  for sections in [10, 100, 1000] {
    let doc = document(sections);
    group.bench_with_input(
      BenchmarkId::from_parameter(sections),
      &doc,
      |b, doc| b.iter(|| processor.process(black_box(doc))),
    );
  }
  group.finish();
}

fn bench_toc(c: &mut Criterion) {
  let headers = HeaderProcessor::default().process(&document(1000)).headers;
  c.bench_function("generate_table_of_contents", |b| {
    b.iter(|| generate_table_of_contents(black_box(&headers)));
  });
}

fn bench_slugify(c: &mut Criterion) {
  c.bench_function("slugify", |b| {
    b.iter(|| slugify(black_box("  Replaying Events: Snapshots & Upcasting  ")));
  });
}

criterion_group!(benches, bench_process, bench_toc, bench_slugify);
criterion_main!(benches);
