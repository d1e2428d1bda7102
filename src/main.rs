//! blockq - Pipeline Benchmark Runner
//!
//! Menjalankan producer/consumer pipeline di atas BlockingQueue dan
//! mengukur latency serta throughput.
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!   cargo run --release --features tracing -- --verbose

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use blockq::trace::init_tracing;
use blockq::BlockingQueue;

/// Konfigurasi pipeline
#[derive(Debug, Clone)]
struct PipelineConfig {
    capacity: usize,
    items: usize,
    producers: usize,
    consumers: usize,
    verbose: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            items: 1_000_000,
            producers: 1,
            consumers: 1,
            verbose: false,
        }
    }
}

/// Item yang mengalir lewat pipeline. `Stop` adalah sentinel shutdown:
/// queue sendiri tidak punya mekanisme close.
#[derive(Clone, Copy)]
enum Job {
    Work(u64),
    Stop,
}

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Config error: {}", e);
            eprintln!("   Run with --help for usage");
            std::process::exit(1);
        }
    };

    if config.verbose {
        init_tracing();
    }

    println!("🚀 blockq - Bounded Blocking Queue");
    println!("==================================\n");

    benchmark_single_thread(&config);
    benchmark_pipeline(&config);
    benchmark_snapshot_iter(&config);

    println!("\n✅ All benchmarks complete!");
}

fn benchmark_single_thread(config: &PipelineConfig) {
    println!("📊 Single-Thread put/take");
    println!("-------------------------");

    let q: BlockingQueue<u64> = BlockingQueue::new(config.capacity);
    let batch = config.capacity as u64;
    let rounds = (config.items / config.capacity).max(1);

    // Warm up
    for i in 0..batch {
        q.put(i);
    }
    while q.poll().is_some() {}

    let mut put_duration = Duration::ZERO;
    let mut take_duration = Duration::ZERO;
    for _ in 0..rounds {
        let start = Instant::now();
        for i in 0..batch {
            q.put(i);
        }
        put_duration += start.elapsed();

        let start = Instant::now();
        for _ in 0..batch {
            q.take();
        }
        take_duration += start.elapsed();
    }

    let ops = (rounds as u64 * batch) as f64;
    let put_ns = put_duration.as_nanos() as f64 / ops;
    let take_ns = take_duration.as_nanos() as f64 / ops;

    println!("  Operations:   {}", ops as u64);
    println!("  Put latency:  {:.2} ns/op", put_ns);
    println!("  Take latency: {:.2} ns/op\n", take_ns);
}

fn benchmark_pipeline(config: &PipelineConfig) {
    println!(
        "📊 Pipeline ({} producer -> {} consumer, capacity {})",
        config.producers, config.consumers, config.capacity
    );
    println!("-----------------------------------------------------");

    let q = Arc::new(BlockingQueue::new(config.capacity));
    let per_producer = config.items / config.producers;
    let total = per_producer * config.producers;

    let start = Instant::now();

    let consumers: Vec<_> = (0..config.consumers)
        .map(|_| {
            let q = Arc::clone(&q);
            thread::spawn(move || {
                let mut received = 0u64;
                let mut checksum = 0u64;
                loop {
                    match q.take() {
                        Job::Work(v) => {
                            received += 1;
                            checksum = checksum.wrapping_add(v);
                        }
                        Job::Stop => break,
                    }
                }
                (received, checksum)
            })
        })
        .collect();

    let producers: Vec<_> = (0..config.producers)
        .map(|p| {
            let q = Arc::clone(&q);
            thread::spawn(move || {
                let base = (p * per_producer) as u64;
                for i in 0..per_producer as u64 {
                    q.put(Job::Work(base + i));
                }
            })
        })
        .collect();

    for handle in producers {
        if handle.join().is_err() {
            eprintln!("⚠️ producer thread panicked");
        }
    }
    for _ in 0..config.consumers {
        q.put(Job::Stop);
    }

    let mut received = 0u64;
    let mut checksum = 0u64;
    for handle in consumers {
        match handle.join() {
            Ok((r, c)) => {
                received += r;
                checksum = checksum.wrapping_add(c);
            }
            Err(_) => eprintln!("⚠️ consumer thread panicked"),
        }
    }
    let duration = start.elapsed();

    let expected = (0..total as u64).fold(0u64, |acc, v| acc.wrapping_add(v));

    println!("  Items:      {} (received {})", total, received);
    println!(
        "  Checksum:   {}",
        if checksum == expected { "OK" } else { "MISMATCH ⚠️" }
    );
    println!("  Duration:   {:.3}s", duration.as_secs_f64());
    println!(
        "  Throughput: {:.2} M items/sec\n",
        received as f64 / duration.as_secs_f64() / 1_000_000.0
    );
}

fn benchmark_snapshot_iter(config: &PipelineConfig) {
    println!("📊 Snapshot Iteration");
    println!("---------------------");

    const ROUNDS: usize = 100;

    let q: BlockingQueue<u64> = BlockingQueue::new(config.capacity);
    for i in 0..config.capacity as u64 {
        q.put(i);
    }

    let start = Instant::now();
    let mut seen = 0usize;
    for _ in 0..ROUNDS {
        seen += q.iter().flatten().count();
    }
    let iter_duration = start.elapsed();

    let start = Instant::now();
    for _ in 0..ROUNDS {
        seen += q.snapshot().len();
    }
    let snapshot_duration = start.elapsed();

    let per_item = (ROUNDS * config.capacity) as f64;
    println!("  Items visited:    {}", seen);
    println!(
        "  iter() latency:   {:.2} ns/item",
        iter_duration.as_nanos() as f64 / per_item
    );
    println!(
        "  snapshot() latency: {:.2} ns/item",
        snapshot_duration.as_nanos() as f64 / per_item
    );
}

fn parse_positive(flag: &str, value: Option<&String>) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("{} requires a value", flag))?;
    match value.parse::<usize>() {
        Ok(0) => Err(format!("{} must be greater than zero", flag)),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid value for {}: {} ({})", flag, value, e)),
    }
}

fn parse_args() -> Result<PipelineConfig, String> {
    let args: Vec<String> = std::env::args().collect();
    parse_args_from(&args[1..])
}

fn parse_args_from(args: &[String]) -> Result<PipelineConfig, String> {
    let mut config = PipelineConfig::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--capacity" | "-c" => {
                config.capacity = parse_positive("--capacity", args.get(i + 1))?;
                i += 1;
            }
            "--items" | "-n" => {
                config.items = parse_positive("--items", args.get(i + 1))?;
                i += 1;
            }
            "--producers" | "-p" => {
                config.producers = parse_positive("--producers", args.get(i + 1))?;
                i += 1;
            }
            "--consumers" | "-k" => {
                config.consumers = parse_positive("--consumers", args.get(i + 1))?;
                i += 1;
            }
            "--verbose" | "-v" => {
                config.verbose = true;
            }
            "--help" | "-h" => {
                println!("blockq - Bounded Blocking Queue benchmark\n");
                println!("Usage: blockq [OPTIONS]\n");
                println!("Options:");
                println!("  -c, --capacity <N>   Queue capacity (default: 1024)");
                println!("  -n, --items <N>      Items pushed through the pipeline (default: 1000000)");
                println!("  -p, --producers <N>  Producer threads (default: 1)");
                println!("  -k, --consumers <N>  Consumer threads (default: 1)");
                println!("  -v, --verbose        Enable tracing output (needs --features tracing)");
                println!("  -h, --help           Show this help");
                std::process::exit(0);
            }
            other => return Err(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(config)
}
