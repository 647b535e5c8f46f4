/// Pure Rust core benchmarks for the dam and lake balance.
///
/// Uses std::time::Instant for timing, a deterministic LCG PRNG for forcing generation,
/// and std::hint::black_box to prevent dead-code elimination.
use std::hint::black_box;
use std::time::{Duration, Instant};

use dambalance_core::{
    run_dam, run_lake, BasinConfig, DailyForcing, ForcingSeries, LakeConfig, LakeOptions, Result,
    RunSummary,
};

const REPEATS: usize = 7;

/// Simple LCG PRNG for deterministic forcing generation.
fn make_forcing(n: usize, seed: u64) -> Result<ForcingSeries> {
    let mut state = seed;
    let mut next_f64 = || -> f64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    let days: Vec<DailyForcing> = (0..n)
        .map(|_| {
            let rain = if next_f64() < 0.3 { next_f64() * 0.02 } else { 0.0 };
            let evap = 0.001 + next_f64() * 0.009;
            let inflow = if rain > 0.0 { next_f64() * 400.0 } else { 0.0 };
            let outflow = 20.0 + next_f64() * 30.0;
            DailyForcing::new(rain, evap, inflow, outflow)
        })
        .collect();
    ForcingSeries::new(days)
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn basin() -> BasinConfig {
    BasinConfig::new(20_000.0, 8_000.0, 3.0, 25.0)
}

fn bench_dam(sizes: &[usize]) -> Result<Vec<(&'static str, usize, Duration, f64)>> {
    let config = basin();
    let mut results = Vec::new();

    for &n in sizes {
        let forcing = make_forcing(n, 42)?;

        // Warmup
        let out = run_dam(&config, &forcing)?;
        let residual = RunSummary::from_output(&out).balance_residual();

        let dur = median_time(|| {
            let _ = black_box(run_dam(&config, &forcing));
        });
        results.push(("dam", n, dur, residual));
    }
    Ok(results)
}

fn bench_leaky_lake(sizes: &[usize]) -> Result<Vec<(&'static str, usize, Duration, f64)>> {
    let config = LakeConfig::new(basin(), LakeOptions::new(true, 30.0));
    let mut results = Vec::new();

    for &n in sizes {
        let forcing = make_forcing(n, 42)?;

        // Warmup
        let out = black_box(run_lake(&config, &forcing)?);
        let residual = RunSummary::from_output(&out).balance_residual();

        let dur = median_time(|| {
            let _ = black_box(run_lake(&config, &forcing));
        });
        results.push(("leaky lake", n, dur, residual));
    }
    Ok(results)
}

fn main() -> Result<()> {
    println!("Pure Rust Core Benchmarks");
    println!("============================================================");
    println!(
        "{:<18} {:>6}   {:>12}   {:>10}",
        "Model", "N", "Median (ms)", "Residual"
    );
    println!("------------------------------------------------------------");

    let mut all_results: Vec<(&str, usize, Duration, f64)> = Vec::new();

    all_results.extend(bench_dam(&[365, 3650, 36500])?);
    all_results.extend(bench_leaky_lake(&[3650, 36500])?);

    for (model, n, dur, residual) in &all_results {
        let ms = dur.as_secs_f64() * 1000.0;
        println!("{:<18} {:>6}      {:>8.2}   {:>10.3e}", model, n, ms, residual);
    }

    println!("============================================================");
    Ok(())
}
