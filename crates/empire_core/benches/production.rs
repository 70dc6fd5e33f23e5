//! Production and battle benchmarks for empire_core.
//!
//! Run with: `cargo bench -p empire_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use empire_core::units::UnitKind;
use empire_test_utils::fixtures::{empire_with_army, gold_rush_empire};

/// Benchmarks one production cycle and one battle.
pub fn production_benchmark(c: &mut Criterion) {
    c.bench_function("tick_1000_cycles", |b| {
        b.iter(|| {
            let mut state = gold_rush_empire();
            for _ in 0..1000 {
                state.tick();
            }
            black_box(state.resources().gold)
        })
    });

    let army = empire_with_army(UnitKind::Siege, 20);
    c.bench_function("battle_rival_kingdom", |b| {
        b.iter(|| {
            let mut state = army.clone();
            black_box(state.fight("Rival Kingdom", black_box(1000)))
        })
    });
}

criterion_group!(benches, production_benchmark);
criterion_main!(benches);
