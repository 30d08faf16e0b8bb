use rand::Rng;

use crate::color;
use crate::error::{Error, Result};
use crate::maps::WeightedMapSet;
use crate::polygon::Polygon;
use crate::Point;

/// Warm-up steps discarded before recording, so the recorded sequence lies
/// on the attractor rather than on the path in from the starting point.
pub const DEFAULT_DISCARD: usize = 5;

/// Which loop implementation to run. Both consume the same pre-drawn batch
/// of random choices and produce identical output; `Fast` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    Reference,
    Fast,
}

/// The recurrence driving an [`Attractor`].
#[derive(Debug, Clone)]
pub enum Rule {
    /// Move a fraction `1 - r` of the way toward a randomly chosen corner.
    Polygon { polygon: Polygon, r: f64 },
    /// Apply a randomly chosen affine map.
    Maps(WeightedMapSet),
}

#[derive(Debug, Clone)]
struct Trajectory {
    points: Vec<Point>,
    choices: Vec<usize>,
}

/// The core stochastic point iterator.
///
/// Holds a [`Rule`], a current starting point and the last recorded
/// trajectory. Each `iterate` call runs a discard phase from the current
/// starting point, then records `steps` points; the trajectory is
/// overwritten wholesale on every call.
#[derive(Debug, Clone)]
pub struct Attractor {
    rule: Rule,
    start: Option<Point>,
    trajectory: Option<Trajectory>,
}

impl Attractor {
    /// Chaos-game mode: an `n`-gon and a move fraction `r` in `(0, 1)`.
    pub fn chaos_game(n: f64, r: f64) -> Result<Self> {
        if !(0.0 < r && r < 1.0) {
            return Err(Error::InvalidConfiguration(format!(
                "move fraction must be strictly between 0 and 1, got {r}"
            )));
        }
        Ok(Attractor {
            rule: Rule::Polygon {
                polygon: Polygon::new(n)?,
                r,
            },
            start: None,
            trajectory: None,
        })
    }

    /// Iterated-function-system mode, driven by a weighted map set.
    pub fn ifs(maps: WeightedMapSet) -> Self {
        Attractor {
            rule: Rule::Maps(maps),
            start: None,
            trajectory: None,
        }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn polygon(&self) -> Option<&Polygon> {
        match &self.rule {
            Rule::Polygon { polygon, .. } => Some(polygon),
            Rule::Maps(_) => None,
        }
    }

    pub fn set_starting_point(&mut self, point: Point) {
        self.start = Some(point);
    }

    /// Draws a starting point: a random interior point of the polygon in
    /// chaos-game mode, a uniform point in `[-1, 1]²` in IFS mode.
    pub fn random_starting_point<R: Rng>(&mut self, rng: &mut R) -> Point {
        let point = match &self.rule {
            Rule::Polygon { polygon, .. } => polygon.random_interior_point(rng),
            Rule::Maps(_) => (rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
        };
        self.start = Some(point);
        point
    }

    pub fn starting_point(&self) -> Result<Point> {
        self.start.ok_or(Error::NotInitialized)
    }

    /// Runs the default iteration: `DEFAULT_DISCARD` warm-up steps and the
    /// fast kernel.
    pub fn iterate<R: Rng>(&mut self, steps: usize, rng: &mut R) -> Result<()> {
        self.iterate_with(steps, DEFAULT_DISCARD, Kernel::Fast, rng)
    }

    /// Runs `discard` unrecorded warm-up steps, draws the whole main-phase
    /// choice batch up front, then records `steps` points with the chosen
    /// kernel. Entry 0 of the recorded points is the post-discard current
    /// point; entry 0 of the choice batch is drawn but never applied.
    pub fn iterate_with<R: Rng>(
        &mut self,
        steps: usize,
        discard: usize,
        kernel: Kernel,
        rng: &mut R,
    ) -> Result<()> {
        if steps == 0 {
            return Err(Error::InvalidConfiguration(
                "step count must be at least 1".into(),
            ));
        }
        let mut current = self.start.ok_or(Error::NotInitialized)?;

        let (current, points, choices) = match &self.rule {
            Rule::Polygon { polygon, r } => {
                let corners = polygon.corners();
                let n = corners.len();

                let warmup: Vec<usize> = (0..discard).map(|_| rng.gen_range(0..n)).collect();
                for &k in &warmup {
                    current = step_toward(current, *r, corners[k]);
                }

                let choices: Vec<usize> = (0..steps).map(|_| rng.gen_range(0..n)).collect();
                let points = match kernel {
                    Kernel::Reference => polygon_reference(corners, *r, current, &choices),
                    Kernel::Fast => polygon_fast(corners, *r, current, &choices),
                };
                (current, points, choices)
            }
            Rule::Maps(maps) => {
                let warmup: Vec<f64> = (0..discard).map(|_| rng.gen::<f64>()).collect();
                for &draw in &warmup {
                    current = maps.map(maps.resolve(draw)).apply(current);
                }

                let draws: Vec<f64> = (0..steps).map(|_| rng.gen::<f64>()).collect();
                let (points, choices) = match kernel {
                    Kernel::Reference => maps_reference(maps, current, &draws),
                    Kernel::Fast => maps_fast(maps, current, &draws),
                };
                (current, points, choices)
            }
        };

        self.start = Some(current);
        self.trajectory = Some(Trajectory { points, choices });
        Ok(())
    }

    /// The recorded points of the last iteration.
    pub fn points(&self) -> Result<&[Point]> {
        self.trajectory
            .as_ref()
            .map(|t| t.points.as_slice())
            .ok_or(Error::NotRun)
    }

    /// The corner/map index chosen at each step of the last iteration.
    pub fn choices(&self) -> Result<&[usize]> {
        self.trajectory
            .as_ref()
            .map(|t| t.choices.as_slice())
            .ok_or(Error::NotRun)
    }

    /// Running-average gradient trace over the last iteration's choices.
    pub fn color_trace(&self) -> Result<Vec<f64>> {
        color::gradient_trace(self.choices()?)
    }
}

fn step_toward((x, y): Point, r: f64, (cx, cy): Point) -> Point {
    (x * r + (1.0 - r) * cx, y * r + (1.0 - r) * cy)
}

/// Straightforward loop: recomputes the pull toward the chosen corner at
/// every step.
fn polygon_reference(corners: &[Point], r: f64, start: Point, choices: &[usize]) -> Vec<Point> {
    let mut points = vec![(0.0, 0.0); choices.len()];
    points[0] = start;
    for i in 1..choices.len() {
        points[i] = step_toward(points[i - 1], r, corners[choices[i]]);
    }
    points
}

/// Tight loop: hoists the per-corner pull `(1-r)*corner` out of the loop
/// and walks the pre-drawn choices with no per-step re-derivation. The
/// per-step expression tree is unchanged, so the output matches the
/// reference loop bit for bit.
fn polygon_fast(corners: &[Point], r: f64, start: Point, choices: &[usize]) -> Vec<Point> {
    let pulled: Vec<Point> = corners
        .iter()
        .map(|&(cx, cy)| ((1.0 - r) * cx, (1.0 - r) * cy))
        .collect();

    let mut points = Vec::with_capacity(choices.len());
    points.push(start);
    let mut cur = start;
    for &k in &choices[1..] {
        let pull = pulled[k];
        cur = (cur.0 * r + pull.0, cur.1 * r + pull.1);
        points.push(cur);
    }
    points
}

/// Straightforward loop: resolves each draw as it is consumed.
fn maps_reference(
    maps: &WeightedMapSet,
    start: Point,
    draws: &[f64],
) -> (Vec<Point>, Vec<usize>) {
    let mut points = vec![(0.0, 0.0); draws.len()];
    let mut choices = vec![0usize; draws.len()];
    points[0] = start;
    choices[0] = maps.resolve(draws[0]);
    for i in 1..draws.len() {
        let j = maps.resolve(draws[i]);
        choices[i] = j;
        points[i] = maps.map(j).apply(points[i - 1]);
    }
    (points, choices)
}

/// Tight loop: resolves the whole draw batch first, then applies the chosen
/// maps in a second pass over plain indices.
fn maps_fast(maps: &WeightedMapSet, start: Point, draws: &[f64]) -> (Vec<Point>, Vec<usize>) {
    let choices: Vec<usize> = draws.iter().map(|&d| maps.resolve(d)).collect();

    let mut points = Vec::with_capacity(draws.len());
    points.push(start);
    let mut cur = start;
    for &j in &choices[1..] {
        cur = maps.map(j).apply(cur);
        points.push(cur);
    }
    (points, choices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn move_fraction_must_be_strictly_inside_unit_interval() {
        for r in [0.0, 1.0, 5.0, -0.5] {
            assert!(matches!(
                Attractor::chaos_game(3.0, r),
                Err(Error::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn iterate_without_starting_point_is_rejected() {
        let mut game = Attractor::chaos_game(3.0, 0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            game.iterate(100, &mut rng),
            Err(Error::NotInitialized)
        ));
        assert!(matches!(game.starting_point(), Err(Error::NotInitialized)));
    }

    #[test]
    fn derived_access_before_iteration_is_rejected() {
        let mut game = Attractor::chaos_game(3.0, 0.5).unwrap();
        game.set_starting_point((0.0, 0.5));
        assert!(matches!(game.points(), Err(Error::NotRun)));
        assert!(matches!(game.choices(), Err(Error::NotRun)));
        assert!(matches!(game.color_trace(), Err(Error::NotRun)));
    }

    #[test]
    fn zero_steps_is_rejected_before_anything_runs() {
        let mut game = Attractor::chaos_game(3.0, 0.5).unwrap();
        game.set_starting_point((0.0, 0.5));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            game.iterate(0, &mut rng),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(game.points(), Err(Error::NotRun)));
    }

    #[test]
    fn trajectory_starts_at_post_discard_point_and_has_requested_length() {
        let mut game = Attractor::chaos_game(4.0, 0.5).unwrap();
        game.set_starting_point((0.1, 0.1));
        let mut rng = StdRng::seed_from_u64(7);
        game.iterate(250, &mut rng).unwrap();

        let points = game.points().unwrap();
        let choices = game.choices().unwrap();
        assert_eq!(points.len(), 250);
        assert_eq!(choices.len(), 250);
        assert_eq!(points[0], game.starting_point().unwrap());
        // Five discard steps from (0.1, 0.1) cannot land back on it.
        assert_ne!(game.starting_point().unwrap(), (0.1, 0.1));
        assert!(choices.iter().all(|&c| c < 4));
    }

    #[test]
    fn kernels_agree_in_chaos_game_mode() {
        let mut reference = Attractor::chaos_game(3.0, 0.5).unwrap();
        let mut fast = Attractor::chaos_game(3.0, 0.5).unwrap();
        reference.set_starting_point((0.2, 0.3));
        fast.set_starting_point((0.2, 0.3));

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        reference
            .iterate_with(1000, DEFAULT_DISCARD, Kernel::Reference, &mut rng_a)
            .unwrap();
        fast.iterate_with(1000, DEFAULT_DISCARD, Kernel::Fast, &mut rng_b)
            .unwrap();

        assert_eq!(reference.choices().unwrap(), fast.choices().unwrap());
        assert_eq!(reference.points().unwrap(), fast.points().unwrap());
    }

    #[test]
    fn kernels_agree_in_ifs_mode() {
        let mut reference = Attractor::ifs(WeightedMapSet::barnsley_fern());
        let mut fast = Attractor::ifs(WeightedMapSet::barnsley_fern());
        reference.set_starting_point((0.0, 0.0));
        fast.set_starting_point((0.0, 0.0));

        let mut rng_a = StdRng::seed_from_u64(1234);
        let mut rng_b = StdRng::seed_from_u64(1234);
        reference
            .iterate_with(1000, DEFAULT_DISCARD, Kernel::Reference, &mut rng_a)
            .unwrap();
        fast.iterate_with(1000, DEFAULT_DISCARD, Kernel::Fast, &mut rng_b)
            .unwrap();

        assert_eq!(reference.choices().unwrap(), fast.choices().unwrap());
        assert_eq!(reference.points().unwrap(), fast.points().unwrap());
    }

    #[test]
    fn same_seed_reproduces_the_same_trajectory() {
        let run = |seed| {
            let mut game = Attractor::chaos_game(5.0, 0.4).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            game.random_starting_point(&mut rng);
            game.iterate(500, &mut rng).unwrap();
            game.points().unwrap().to_vec()
        };
        assert_eq!(run(5), run(5));
        assert_ne!(run(5), run(6));
    }

    #[test]
    fn reiterating_overwrites_the_trajectory() {
        let mut game = Attractor::ifs(WeightedMapSet::barnsley_fern());
        game.set_starting_point((0.0, 0.0));
        let mut rng = StdRng::seed_from_u64(3);
        game.iterate(100, &mut rng).unwrap();
        let first = game.points().unwrap().to_vec();
        game.iterate(100, &mut rng).unwrap();
        assert_eq!(game.points().unwrap().len(), 100);
        assert_ne!(game.points().unwrap(), first.as_slice());
    }
}
