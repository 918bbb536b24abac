//! Benchmarks for reading and writing datasets.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};

use reldata::codec::Codec;
use reldata::config::CodecConfig;
use reldata::graph::KnowledgeGraph;
use reldata::store::{Layer, Polarity, Truth};

const INDIVIDUALS: usize = 2_000;
const CLASSES: usize = 20;
const RELATIONS: usize = 10;
const TRIPLES: usize = 20_000;

fn generate() -> KnowledgeGraph {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let mut kg = KnowledgeGraph::new();
    let individuals: Vec<_> = (0..INDIVIDUALS)
        .map(|k| kg.add_individual(format!("ind{k}")).unwrap())
        .collect();
    let classes: Vec<_> = (0..CLASSES)
        .map(|k| kg.add_class(format!("Class{k}")).unwrap())
        .collect();
    let relations: Vec<_> = (0..RELATIONS)
        .map(|k| kg.add_relation(format!("rel{k}")).unwrap())
        .collect();
    let name = kg.add_literal_type("name").unwrap();

    for &individual in &individuals {
        for &class in &classes {
            let truth = match rng.gen_range(0..10) {
                0 => Truth::Positive,
                1 => Truth::Negative,
                _ => continue,
            };
            let layer = Layer::ALL[rng.gen_range(0..3)];
            kg.set_membership(layer, individual, class, truth).unwrap();
        }
        kg.add_literal(Layer::Fact, individual, name, format!("Individual {}", individual))
            .unwrap();
    }

    for _ in 0..TRIPLES {
        let subject = individuals[rng.gen_range(0..INDIVIDUALS)];
        let object = individuals[rng.gen_range(0..INDIVIDUALS)];
        let predicate = relations[rng.gen_range(0..RELATIONS)];
        let polarity = if rng.gen_bool(0.8) {
            Polarity::Positive
        } else {
            Polarity::Negative
        };
        let layer = Layer::ALL[rng.gen_range(0..3)];
        let _ = kg.assert_relation(layer, subject, predicate, object, polarity);
    }
    kg
}

fn bench_write(c: &mut Criterion) {
    let kg = generate();
    let dir = tempfile::TempDir::new().unwrap();
    let staged = Codec::default();
    let direct = Codec::new(CodecConfig {
        atomic_writes: false,
        sync_on_write: false,
        ..Default::default()
    });

    c.bench_function("write_staged_2k", |bench| {
        bench.iter(|| staged.write(black_box(&kg), dir.path(), "bench").unwrap())
    });
    c.bench_function("write_direct_2k", |bench| {
        bench.iter(|| direct.write(black_box(&kg), dir.path(), "bench").unwrap())
    });
}

fn bench_read(c: &mut Criterion) {
    let kg = generate();
    let dir = tempfile::TempDir::new().unwrap();
    let codec = Codec::default();
    codec.write(&kg, dir.path(), "bench").unwrap();

    c.bench_function("read_2k", |bench| {
        bench.iter(|| black_box(codec.read(dir.path(), "bench").unwrap()))
    });
}

criterion_group!(benches, bench_write, bench_read);
criterion_main!(benches);
