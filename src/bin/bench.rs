//! Times the reference kernel against the fast kernel on the Barnsley
//! fern, over a ladder of step counts. Repeats run in parallel and the
//! table reports per-rung medians.

use std::fs;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chaosgame::{Attractor, Kernel, WeightedMapSet, DEFAULT_DISCARD};

const LADDER: [usize; 4] = [10_000, 100_000, 1_000_000, 5_000_000];
const REPEATS: usize = 5;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error running benchmark: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Warm pass so first-touch costs hit neither timed kernel.
    time_kernel(10, Kernel::Reference, 0);
    time_kernel(10, Kernel::Fast, 0);

    let passes: Vec<Vec<(f64, f64)>> = (0..REPEATS)
        .into_par_iter()
        .map(|rep| {
            LADDER
                .iter()
                .map(|&steps| {
                    // Same seed for both kernels: they consume draws in the
                    // same order, so the timed work is identical.
                    let seed = rep as u64;
                    (
                        time_kernel(steps, Kernel::Reference, seed),
                        time_kernel(steps, Kernel::Fast, seed),
                    )
                })
                .collect()
        })
        .collect();

    let mut txt = format!(
        "{:>12} |{:>10} |{:>10} |{:>12}\n",
        "n", "slow", "fast", "slow/fast"
    );
    for (i, &steps) in LADDER.iter().enumerate() {
        let mut slow: Vec<f64> = passes.iter().map(|pass| pass[i].0).collect();
        let mut fast: Vec<f64> = passes.iter().map(|pass| pass[i].1).collect();
        let slow = median(&mut slow);
        let fast = median(&mut fast);
        txt += &format!(
            "{:>12.1e} |{:>10.6} |{:>10.6} |{:>12.3}\n",
            steps as f64,
            slow,
            fast,
            slow / fast
        );
        info!(
            steps,
            slow_s = slow,
            fast_s = fast,
            ratio = slow / fast,
            "rung complete"
        );
    }

    print!("{}", txt);
    fs::write("time_comparison.txt", &txt)?;
    Ok(())
}

fn time_kernel(steps: usize, kernel: Kernel, seed: u64) -> f64 {
    let mut fern = Attractor::ifs(WeightedMapSet::barnsley_fern());
    fern.set_starting_point((0.0, 0.0));
    let mut rng = StdRng::seed_from_u64(seed);

    let started = Instant::now();
    fern.iterate_with(steps, DEFAULT_DISCARD, kernel, &mut rng)
        .expect("benchmark step counts are positive");
    started.elapsed().as_secs_f64()
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).expect("timings are finite"));
    values[values.len() / 2]
}
