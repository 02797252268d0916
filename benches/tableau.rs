use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fxhash::FxHashSet;
use ltl2nga::automata::{tableau::generate_states, Closure};
use ltl2nga::ltl::parse::parse;
use ltl2nga::utils::BitSet;

fn bench_state_enumeration(c: &mut Criterion) {
    // each extra until roughly doubles the closure width
    let formulas = [
        ("until_1", "U p0 p1"),
        ("until_2", "U p0 U p1 p2"),
        ("until_3", "U p0 U p1 U p2 p3"),
        ("until_4", "U p0 U p1 U p2 U p3 p4"),
    ];
    let mut group = c.benchmark_group("tableau_enumeration");
    for (name, text) in formulas {
        let closure = Closure::new(&parse(text).unwrap());
        group.bench_function(name, |b| {
            b.iter(|| generate_states(black_box(&closure), None).unwrap())
        });
    }
    group.finish();
}

fn bench_state_membership(c: &mut Criterion) {
    for size in [4, 8, 16, 32] {
        let mut hashset = FxHashSet::default();
        let mut bitset: u64 = 0;
        for i in 0..size {
            hashset.insert(i);
            bitset.set_bit(i);
        }
        let mut group = c.benchmark_group(format!("membership_size_{}", size));

        group.bench_function("hashset_contains", |b| {
            b.iter(|| black_box(&hashset).contains(&1))
        });

        group.bench_function("bitset_contains", |b| {
            b.iter(|| BitSet::contains(black_box(&bitset), 1))
        });

        group.finish();
    }
}

criterion_group!(benches, bench_state_enumeration, bench_state_membership);
criterion_main!(benches);
