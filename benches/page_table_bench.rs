use std::hint::black_box;

use bufpool_core::hash::{BuildIdentityHasher, ExtendibleHashTable};
use bufpool_core::{FrameId, FrameReplacer, PageId, PageTable};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const N: u32 = 10_000;

fn bench_page_table_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_table_insert");
    for capacity in [4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &cap| {
            b.iter(|| {
                let table = PageTable::with_hasher(cap, BuildIdentityHasher::default()).unwrap();
                for i in 0..N {
                    table.insert(PageId::new(i), FrameId::new(i as usize));
                }
                black_box(table.global_depth())
            })
        });
    }
    group.finish();
}

fn bench_page_table_find(c: &mut Criterion) {
    let table: ExtendibleHashTable<u64, u64> = ExtendibleHashTable::new(16).unwrap();
    for i in 0..N as u64 {
        table.insert(i, i);
    }

    c.bench_function("page_table_find_hit", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i = (i + 7919) % N as u64;
            black_box(table.find(&i))
        })
    });
}

fn bench_replacer(c: &mut Criterion) {
    c.bench_function("lru_insert_touch_victim", |b| {
        b.iter(|| {
            let replacer = FrameReplacer::new();
            for i in 0..1024 {
                replacer.insert(FrameId::new(i));
            }
            for i in (0..1024).step_by(3) {
                replacer.insert(FrameId::new(i));
            }
            while let Some(frame) = replacer.victim() {
                black_box(frame);
            }
        })
    });
}

criterion_group!(
    benches,
    bench_page_table_insert,
    bench_page_table_find,
    bench_replacer
);
criterion_main!(benches);
