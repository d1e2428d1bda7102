//! Criterion benchmark untuk BlockingQueue
//!
//! Run dengan: cargo bench

use std::sync::Arc;
use std::thread;

use blockq::BlockingQueue;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn bench_put_take(c: &mut Criterion) {
    let mut group = c.benchmark_group("blocking_queue");
    group.throughput(Throughput::Elements(1));

    // Benchmark try_put (drain saat penuh supaya tidak pernah block)
    group.bench_function("try_put", |b| {
        let q: BlockingQueue<u64> = BlockingQueue::new(65536);
        let mut i = 0u64;
        b.iter(|| {
            if q.try_put(black_box(i)).is_err() {
                q.poll();
                let _ = q.try_put(black_box(i));
            }
            i = i.wrapping_add(1);
        });
    });

    // Benchmark poll
    group.bench_function("poll", |b| {
        let q: BlockingQueue<u64> = BlockingQueue::new(65536);
        // Pre-fill
        for i in 0..32768 {
            q.put(i);
        }
        b.iter(|| {
            if let Some(v) = q.poll() {
                q.put(black_box(v));
            }
        });
    });

    // Benchmark put+take cycle
    group.bench_function("put_take_cycle", |b| {
        let q: BlockingQueue<u64> = BlockingQueue::new(1024);
        let mut i = 0u64;
        b.iter(|| {
            q.put(black_box(i));
            black_box(q.take());
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("peek", |b| {
        let q: BlockingQueue<u64> = BlockingQueue::new(16);
        q.put(7);
        b.iter(|| black_box(q.peek()));
    });

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for capacity in [16usize, 256, 4096].iter() {
        const ITEMS: u64 = 10_000;
        group.throughput(Throughput::Elements(ITEMS));
        group.bench_function(format!("spsc_capacity_{}", capacity), |b| {
            b.iter(|| {
                let q = Arc::new(BlockingQueue::new(*capacity));
                let consumer = {
                    let q = Arc::clone(&q);
                    thread::spawn(move || {
                        let mut sum = 0u64;
                        for _ in 0..ITEMS {
                            sum = sum.wrapping_add(q.take());
                        }
                        sum
                    })
                };
                for i in 0..ITEMS {
                    q.put(i);
                }
                black_box(consumer.join().unwrap());
            });
        });
    }

    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");

    for size in [100usize, 1000].iter() {
        let q: BlockingQueue<u64> = BlockingQueue::new(*size);
        for i in 0..*size as u64 {
            q.put(i);
        }
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_function(format!("iter_{}", size), |b| {
            b.iter(|| black_box(q.iter().flatten().count()));
        });
        group.bench_function(format!("snapshot_{}", size), |b| {
            b.iter(|| black_box(q.snapshot().len()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_put_take, bench_pipeline, bench_iter);
criterion_main!(benches);
