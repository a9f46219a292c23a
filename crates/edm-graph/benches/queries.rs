use edm_core::rng::RngHandle;
use edm_graph::{canonical_hash, gen_cascade_event, GenealogyBuilder};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn queries_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(7);
    let candidates = gen_cascade_event(2, 500, &mut rng).unwrap();
    let graph = GenealogyBuilder::default().build(&candidates).unwrap();
    let vertices: Vec<_> = graph.vertices().map(|(id, _)| id).collect();

    c.bench_function("vertex_neighbourhoods", |b| {
        b.iter(|| {
            for vertex in &vertices {
                black_box(graph.incoming(*vertex).unwrap());
                black_box(graph.outgoing(*vertex).unwrap());
            }
        });
    });

    c.bench_function("canonical_hash", |b| {
        b.iter(|| black_box(canonical_hash(&graph)));
    });
}

criterion_group!(benches, queries_bench);
criterion_main!(benches);
