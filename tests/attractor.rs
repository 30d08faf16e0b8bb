//! Geometry and cross-kernel properties of the chaos-game iterator.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use chaosgame::{AffineMap, Attractor, Error, Kernel, Polygon, WeightedMapSet, DEFAULT_DISCARD};

/// The corners run clockwise, so a point is inside (or on) the polygon iff
/// the cross product of each edge with the edge-to-point vector is
/// non-positive.
fn hull_contains(polygon: &Polygon, (px, py): (f64, f64), tol: f64) -> bool {
    let corners = polygon.corners();
    let n = corners.len();
    (0..n).all(|i| {
        let (ax, ay) = corners[i];
        let (bx, by) = corners[(i + 1) % n];
        let cross = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
        cross <= tol
    })
}

#[test]
fn corners_are_unit_length_and_evenly_spaced() {
    for n in [3, 4, 5, 6, 7, 10, 20, 25] {
        let poly = Polygon::new(n as f64).unwrap();
        let corners = poly.corners();

        for &(x, y) in corners {
            assert_abs_diff_eq!((x * x + y * y).sqrt(), 1.0, epsilon = 1e-12);
        }

        let dist = |(ax, ay): (f64, f64), (bx, by): (f64, f64)| {
            ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
        };
        let first = dist(corners[n - 1], corners[0]);
        for w in corners.windows(2) {
            assert_abs_diff_eq!(dist(w[0], w[1]), first, epsilon = 1e-12);
        }
    }
}

#[test]
fn random_starting_points_lie_inside_the_hull() {
    let mut rng = StdRng::seed_from_u64(2718);
    for n in [3, 4, 5, 6, 7, 10] {
        let poly = Polygon::new(n as f64).unwrap();
        for _ in 0..1000 {
            let p = poly.random_interior_point(&mut rng);
            assert!(
                hull_contains(&poly, p, 1e-9),
                "point {p:?} escaped the {n}-gon"
            );
        }
    }
}

#[test]
fn trajectories_never_leave_the_hull() {
    let mut rng = StdRng::seed_from_u64(314159);
    for (n, r) in [(3.0, 0.5), (4.0, 1.0 / 3.0), (5.0, 1.0 / 3.0), (6.0, 3.0 / 8.0)] {
        for kernel in [Kernel::Reference, Kernel::Fast] {
            let mut game = Attractor::chaos_game(n, r).unwrap();
            game.random_starting_point(&mut rng);
            game.iterate_with(1000, DEFAULT_DISCARD, kernel, &mut rng)
                .unwrap();

            let poly = game.polygon().unwrap().clone();
            for &p in game.points().unwrap() {
                assert!(
                    hull_contains(&poly, p, 1e-9),
                    "trajectory point {p:?} escaped the {n}-gon"
                );
            }
        }
    }
}

#[test]
fn reference_and_fast_kernels_are_interchangeable() {
    // Chaos-game mode, n = 3, r = 0.5.
    let mut reference = Attractor::chaos_game(3.0, 0.5).unwrap();
    let mut fast = Attractor::chaos_game(3.0, 0.5).unwrap();

    let mut rng = StdRng::seed_from_u64(1);
    let start = {
        reference.random_starting_point(&mut rng);
        reference.starting_point().unwrap()
    };
    fast.set_starting_point(start);

    let mut rng_a = StdRng::seed_from_u64(77);
    let mut rng_b = StdRng::seed_from_u64(77);
    reference
        .iterate_with(1000, DEFAULT_DISCARD, Kernel::Reference, &mut rng_a)
        .unwrap();
    fast.iterate_with(1000, DEFAULT_DISCARD, Kernel::Fast, &mut rng_b)
        .unwrap();

    assert_eq!(reference.choices().unwrap(), fast.choices().unwrap());
    assert_eq!(reference.points().unwrap(), fast.points().unwrap());

    // IFS mode over the fern maps.
    let mut reference = Attractor::ifs(WeightedMapSet::barnsley_fern());
    let mut fast = Attractor::ifs(WeightedMapSet::barnsley_fern());
    reference.set_starting_point((0.0, 0.0));
    fast.set_starting_point((0.0, 0.0));

    let mut rng_a = StdRng::seed_from_u64(78);
    let mut rng_b = StdRng::seed_from_u64(78);
    reference
        .iterate_with(1000, DEFAULT_DISCARD, Kernel::Reference, &mut rng_a)
        .unwrap();
    fast.iterate_with(1000, DEFAULT_DISCARD, Kernel::Fast, &mut rng_b)
        .unwrap();

    assert_eq!(reference.choices().unwrap(), fast.choices().unwrap());
    assert_eq!(reference.points().unwrap(), fast.points().unwrap());
}

#[test]
fn invalid_configurations_are_rejected() {
    assert!(matches!(
        Attractor::chaos_game(2.0, 0.5),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Attractor::chaos_game(3.5, 0.5),
        Err(Error::InvalidConfiguration(_))
    ));
    for r in [0.0, 1.0, 5.0] {
        assert!(matches!(
            Attractor::chaos_game(3.0, r),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    let maps = vec![
        AffineMap::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
        AffineMap::new(0.5, 0.0, 0.0, 0.5, 0.0, 0.0),
    ];
    assert!(matches!(
        WeightedMapSet::new(maps, &[0.45, 0.45]),
        Err(Error::InvalidConfiguration(_))
    ));
}

#[test]
fn resolve_matches_the_reference_vectors() {
    let maps = (0..4)
        .map(|_| AffineMap::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0))
        .collect();
    let set = WeightedMapSet::new(maps, &[0.01, 0.85, 0.07, 0.07]).unwrap();
    assert_eq!(set.cumulative(), &[0.01, 0.86, 0.93, 1.0][..]);
    assert_eq!(set.resolve(0.005), 0);
    assert_eq!(set.resolve(0.5), 1);
}

#[test]
fn fern_trajectory_stays_bounded() {
    let mut fern = Attractor::ifs(WeightedMapSet::barnsley_fern());
    fern.set_starting_point((0.0, 0.0));
    let mut rng = StdRng::seed_from_u64(8);
    fern.iterate(10_000, &mut rng).unwrap();

    for &(x, y) in fern.points().unwrap() {
        assert!(x.is_finite() && y.is_finite());
        assert!((-3.0..=3.0).contains(&x), "fern x out of range: {x}");
        assert!((-0.5..=10.5).contains(&y), "fern y out of range: {y}");
    }
}
