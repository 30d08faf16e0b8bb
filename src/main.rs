use std::collections::HashMap;
use std::fs;
use std::time::Instant;

use plotters::prelude::*;
use rand::thread_rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chaosgame::Attractor;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 800;
const STEPS: usize = 1_000_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error generating figures: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all("figures")?;

    let n_vals = [3.0, 4.0, 5.0, 5.0, 6.0];
    let r_vals = [1.0 / 2.0, 1.0 / 3.0, 1.0 / 3.0, 3.0 / 8.0, 1.0 / 3.0];

    let mut rng = thread_rng();
    for (i, (&n, &r)) in n_vals.iter().zip(&r_vals).enumerate() {
        let started = Instant::now();

        let mut game = Attractor::chaos_game(n, r)?;
        game.random_starting_point(&mut rng);
        game.iterate(STEPS, &mut rng)?;

        let filename = format!("figures/chaos{}.png", i + 1);
        render_colored(game.points()?, &game.color_trace()?, &filename)?;

        info!(
            n,
            r,
            steps = STEPS,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "wrote {}",
            filename
        );
    }
    Ok(())
}

fn render_colored(
    points: &[(f64, f64)],
    trace: &[f64],
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

    let max_trace = trace.iter().cloned().fold(1.0, f64::max);

    let mut histogram: HashMap<(i32, i32), ((f64, f64, f64), u32)> = HashMap::new();
    for (&(x, y), &t) in points.iter().zip(trace) {
        let pixel_x = ((x - min_x) / (max_x - min_x) * (WIDTH as f64 - 1.0)).round() as i32;
        let pixel_y = ((y - min_y) / (max_y - min_y) * (HEIGHT as f64 - 1.0)).round() as i32;
        let color = color_map(t / max_trace);

        // Inverting y-axis for typical graphical representation
        let entry = histogram
            .entry((pixel_x, HEIGHT as i32 - 1 - pixel_y))
            .or_insert((color, 0));
        entry.1 += 1;
        if entry.1 > 1 {
            entry.0 .0 = (entry.0 .0 + color.0) / 2.0;
            entry.0 .1 = (entry.0 .1 + color.1) / 2.0;
            entry.0 .2 = (entry.0 .2 + color.2) / 2.0;
        }
    }

    let root = BitMapBackend::new(filename, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&BLACK)?;

    let max_hits = histogram.values().map(|&(_, c)| c).max().unwrap_or(1) as f64;
    for (&(x, y), &((r, g, b), count)) in &histogram {
        let intensity = (count as f64).ln_1p() / max_hits.ln_1p();
        let color = RGBColor(
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        );
        root.draw_pixel((x, y), &color.mix(intensity.max(0.25)))?;
    }

    root.present()?;
    Ok(())
}

fn color_map(value: f64) -> (f64, f64, f64) {
    let value = value.clamp(0.0, 1.0);

    let start_color = (0.0, 0.0, 1.0); // Blue
    let end_color = (1.0, 0.0, 0.0); // Red

    let r = start_color.0 + value * (end_color.0 - start_color.0);
    let g = start_color.1 + value * (end_color.1 - start_color.1);
    let b = start_color.2 + value * (end_color.2 - start_color.2);

    (r, g, b)
}
