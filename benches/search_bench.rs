use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use geosearch::config::IndexSettings;
use geosearch::models::Document;
use geosearch::SearchIndex;

const NAMES: [&str; 6] = ["Lac", "Mont", "Rivière", "Pointe", "Baie", "Île"];
const QUALIFIERS: [&str; 5] = ["Long", "Rond", "Noir", "du Nord", "aux Sables"];
const TYPES: [&str; 4] = ["Lake", "Mountain", "River", "Bay"];
const REGIONS: [&str; 3] = ["Quebec", "Ontario", "Manitoba"];

fn make_doc(i: usize) -> Document {
    let latitude = 42.0 + (i % 1_000) as f64 * 0.01;
    let longitude = -60.0 - (i % 2_000) as f64 * 0.01;
    Document::new(
        format!("{:08}", i),
        format!(
            "{} {} {}",
            NAMES[i % NAMES.len()],
            QUALIFIERS[i % QUALIFIERS.len()],
            i
        ),
        TYPES[i % TYPES.len()],
        format!("{:.2}N", latitude),
        format!("{:.2}W", -longitude),
        REGIONS[i % REGIONS.len()],
    )
}

fn build_index(doc_count: usize) -> SearchIndex {
    let mut index = SearchIndex::new(IndexSettings::default()).unwrap();
    index
        .add_documents((0..doc_count).map(make_doc))
        .unwrap();
    index
}

fn bench_ingestion(c: &mut Criterion) {
    let counts = [1_000usize, 10_000];

    let mut group = c.benchmark_group("ingestion");
    group.sample_size(10);
    for count in counts {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| black_box(build_index(count)));
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let counts = [1_000usize, 10_000, 50_000];
    let mut indices: Vec<(usize, SearchIndex)> = Vec::new();
    for &count in &counts {
        indices.push((count, build_index(count)));
    }

    let queries = [
        ("match_all", "name:lac long"),
        ("match_any", "name:MATCH_ANY(lac|baie noir)"),
        ("exact", "type:EXACT_MATCH(Lake) AND region:quebec"),
        ("at", "location:AT(43.5,-65.5)"),
        ("within", "location:WITHIN(43,-62|44,-64)"),
    ];

    for (label, query) in queries {
        let mut group = c.benchmark_group(format!("query_{}", label));
        for (count, index) in indices.iter() {
            group.bench_with_input(BenchmarkId::from_parameter(count), index, |b, index| {
                b.iter(|| black_box(index.search(query).unwrap()));
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_ingestion, bench_queries);
criterion_main!(benches);
