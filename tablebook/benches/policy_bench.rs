use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use tablebook::{BookingId, Inventory, ReservationPolicy};

const TABLE_COUNTS: &[i64] = &[10, 100, 1000];

fn setup_inventory(table_count: i64) -> Inventory {
    let inventory = Inventory::new();
    ReservationPolicy::new(&inventory)
        .initialize_tables(Some(table_count), None)
        .expect("failed to initialize benchmark inventory");
    inventory
}

fn fill_inventory(inventory: &Inventory) -> Vec<BookingId> {
    let policy = ReservationPolicy::new(inventory);
    let mut ids = Vec::new();
    while let Ok(result) = policy.reserve_tables(Some(4), Some("bench")) {
        ids.push(result.booking_id);
    }
    ids
}

fn bench_reserve(c: &mut Criterion) {
    let mut group = c.benchmark_group("reserve_tables");

    for &count in TABLE_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || setup_inventory(count),
                |inventory| {
                    let policy = ReservationPolicy::new(&inventory);
                    black_box(policy.reserve_tables(Some(12), Some("bench")))
                        .expect("reservation failed");
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_fill_and_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_and_cancel");

    for &count in TABLE_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || setup_inventory(count),
                |inventory| {
                    let ids = fill_inventory(&inventory);
                    let policy = ReservationPolicy::new(&inventory);
                    for id in &ids {
                        policy
                            .cancel_booking(Some(id.as_str()))
                            .expect("cancellation failed");
                    }
                    black_box(inventory.available_count());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let inventory = setup_inventory(1000);
    let _ = fill_inventory(&inventory);

    c.bench_function("snapshot_full_inventory", |b| {
        b.iter(|| black_box(inventory.snapshot()));
    });
}

criterion_group!(benches, bench_reserve, bench_fill_and_cancel, bench_snapshot);
criterion_main!(benches);
