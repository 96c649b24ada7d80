use criterion::{criterion_group, criterion_main, Criterion};
use geojson_codec::{from_str, to_string, FeatureCollection, GeoJson};
use std::fs;

fn load() -> String {
    let sample = fs::read_to_string("./tests/data/airports.geojson").unwrap();
    let collection: FeatureCollection = from_str(&sample).unwrap();
    // repeat the sample to get a collection of a realistic size
    let features = (0..500)
        .flat_map(|_| collection.features.iter().cloned())
        .collect::<FeatureCollection>();
    to_string(&features).unwrap()
}

pub fn decode_bench(c: &mut Criterion) {
    let text = load();
    let mut group = c.benchmark_group("airports");
    group.sample_size(10);
    group.bench_function("decode", |b| {
        b.iter(|| {
            let _: GeoJson = from_str(&text).unwrap();
        })
    });
    group.finish();
}

pub fn encode_bench(c: &mut Criterion) {
    let document: GeoJson = from_str(&load()).unwrap();
    let mut group = c.benchmark_group("airports");
    group.sample_size(10);
    group.bench_function("encode", |b| b.iter(|| to_string(&document).unwrap()));
    group.finish();
}

criterion_group!(benches, decode_bench, encode_bench);
criterion_main!(benches);
