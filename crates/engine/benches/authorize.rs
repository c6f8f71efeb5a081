use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::sync::Arc;

use portcullis_engine::{Authorizer, Registry};
use portcullis_store::InMemoryStore;

/// One user with `n` domains, one object with `n` types, and a single grant
/// at the far corner of the cross product (worst case for the short-circuit).
fn setup(n: usize) -> Authorizer<Arc<InMemoryStore>> {
    let store = Arc::new(InMemoryStore::new());
    let registry = Registry::new(store.clone());

    registry.add_user("bob", "pw").unwrap();
    for d in 0..n {
        registry.set_domain("bob", &format!("domain-{d}")).unwrap();
    }
    for t in 0..n {
        registry.set_type("essay.txt", &format!("type-{t}")).unwrap();
    }
    registry
        .add_grant(
            "write",
            &format!("domain-{}", n - 1),
            &format!("type-{}", n - 1),
        )
        .unwrap();

    Authorizer::new(store)
}

fn bench_can_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("can_access");

    for n in [4usize, 16, 64] {
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_with_input(BenchmarkId::new("worst_case_hit", n), &n, |b, &n| {
            let authorizer = setup(n);
            b.iter(|| {
                authorizer
                    .can_access(black_box("write"), black_box("bob"), black_box("essay.txt"))
                    .is_ok()
            });
        });

        group.bench_with_input(BenchmarkId::new("full_scan_miss", n), &n, |b, &n| {
            let authorizer = setup(n);
            b.iter(|| {
                authorizer
                    .can_access(black_box("read"), black_box("bob"), black_box("essay.txt"))
                    .is_err()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_can_access);
criterion_main!(benches);
