//! Renders every registry variation of a Barnsley-fern point cloud, plus a
//! disc-to-horseshoe blend sweep over a chaos-game triangle.

use std::collections::HashMap;
use std::fs;

use plotters::prelude::*;
use rand::thread_rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chaosgame::variations::normalize;
use chaosgame::{Attractor, Blend, Variation, WeightedMapSet};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 800;
const FERN_STEPS: usize = 100_000;
const NGON_STEPS: usize = 1_000_000;

// Quarter steps keep each weight pair summing to exactly 1.
const BLEND_WEIGHTS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error generating variation figures: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all("variation_figures")?;
    let mut rng = thread_rng();

    // Every variation of the fern, plotted in green.
    let mut fern = Attractor::ifs(WeightedMapSet::barnsley_fern());
    fern.set_starting_point((0.0, 0.0));
    fern.iterate(FERN_STEPS, &mut rng)?;
    // The raw fern leans on its side; normalize and flip so the variations
    // see the same upright unit-box cloud the gallery expects.
    let cloud: Vec<(f64, f64)> = normalize(fern.points()?)
        .into_iter()
        .map(|(x, y)| (x, -y))
        .collect();

    for variation in Variation::ALL {
        let transformed: Vec<(f64, f64)> = variation
            .apply_points(&cloud)
            .into_iter()
            .map(|(u, v)| (u, -v))
            .collect();
        let filename = format!("variation_figures/fern_{}.png", variation.name());
        render_density(&transformed, RGBColor(0, 200, 0), &filename)?;
        info!(variation = variation.name(), "wrote {}", filename);
    }

    // Blend sweep over a Sierpinski triangle, disc fading into horseshoe.
    let mut triangle = Attractor::chaos_game(3.0, 0.5)?;
    triangle.random_starting_point(&mut rng);
    triangle.iterate(NGON_STEPS, &mut rng)?;
    let cloud: Vec<(f64, f64)> = triangle
        .points()?
        .iter()
        .map(|&(x, y)| (x, -y))
        .collect();

    for (i, &w) in BLEND_WEIGHTS.iter().enumerate() {
        let blend = Blend::new(vec![(Variation::Disc, 1.0 - w), (Variation::Horseshoe, w)])?;
        let transformed: Vec<(f64, f64)> = blend
            .apply_points(&cloud)
            .into_iter()
            .map(|(u, v)| (u, -v))
            .collect();
        let filename = format!("variation_figures/blend_disc_horseshoe_{}.png", i);
        render_density(&transformed, RGBColor(200, 120, 0), &filename)?;
        info!(weight = w, "wrote {}", filename);
    }

    Ok(())
}

fn render_density(
    points: &[(f64, f64)],
    base: RGBColor,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
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
        root.draw_pixel((x, y), &base.mix(0.25 + 0.75 * intensity))?;
    }

    root.present()?;
    Ok(())
}
