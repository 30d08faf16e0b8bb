use std::collections::HashMap;
use std::fs;
use std::time::Instant;

use plotters::prelude::*;
use rand::thread_rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chaosgame::{Attractor, WeightedMapSet};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 1000;
const STEPS: usize = 1_000_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error generating fern: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all("figures")?;

    let started = Instant::now();
    let mut fern = Attractor::ifs(WeightedMapSet::barnsley_fern());
    fern.set_starting_point((0.0, 0.0));

    let mut rng = thread_rng();
    fern.iterate(STEPS, &mut rng)?;
    info!(
        steps = STEPS,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "fern trajectory generated"
    );

    render_green(fern.points()?, "figures/barnsley_fern.png")?;
    info!("wrote figures/barnsley_fern.png");
    Ok(())
}

fn render_green(points: &[(f64, f64)], filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let min_x = points.iter().map(|&(x, _)| x).fold(f64::INFINITY, f64::min);
    let max_x = points
        .iter()
        .map(|&(x, _)| x)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_y = points.iter().map(|&(_, y)| y).fold(f64::INFINITY, f64::min);
    let max_y = points
        .iter()
        .map(|&(_, y)| y)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut histogram: HashMap<(i32, i32), u32> = HashMap::new();
    for &(x, y) in points {
        let pixel_x = ((x - min_x) / (max_x - min_x) * (WIDTH as f64 - 1.0)).round() as i32;
        let pixel_y = ((y - min_y) / (max_y - min_y) * (HEIGHT as f64 - 1.0)).round() as i32;
        // Inverting y-axis for typical graphical representation
        *histogram
            .entry((pixel_x, HEIGHT as i32 - 1 - pixel_y))
            .or_insert(0) += 1;
    }

    let root = BitMapBackend::new(filename, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&BLACK)?;

    let max_hits = *histogram.values().max().unwrap_or(&1) as f64;
    for (&(x, y), &count) in &histogram {
        let intensity = (count as f64).ln_1p() / max_hits.ln_1p();
        let shade = (96.0 + intensity * 159.0).round() as u8;
        root.draw_pixel((x, y), &RGBColor(0, shade, 0))?;
    }

    root.present()?;
    Ok(())
}
