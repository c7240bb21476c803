//! Behavioural properties of directional IDW over small, hand-checkable layouts.

use aire_algorithms::interpolation::{directional_idw, DirectionalIdwParams};
use aire_core::{CoordinateSystem, Point};

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

/// Smallest angle between two bearings
fn circular_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Deterministic scatter of sources with varied bearings
fn scattered(n: usize) -> (Vec<f64>, Vec<Point>) {
    let values = (0..n).map(|i| ((i * 137 + 11) % 720) as f64 - 180.0).collect();
    let points = (0..n)
        .map(|i| Point::new(((i * 7) % 23) as f64 * 0.5, ((i * 13) % 17) as f64 * 0.75))
        .collect();
    (values, points)
}

#[test]
fn results_stay_in_one_rotation() {
    let (values, sources) = scattered(40);
    let targets: Vec<Point> = (0..30)
        .flat_map(|r| (0..30).map(move |c| Point::new(c as f64 * 0.4, r as f64 * 0.45)))
        .collect();

    for power in [0.5, 1.0, 2.0, 3.0] {
        let params = DirectionalIdwParams {
            power,
            ..Default::default()
        };
        let out = directional_idw(&values, &sources, &targets, &params).unwrap();
        assert_eq!(out.len(), targets.len());
        for v in out {
            assert!((0.0..360.0).contains(&v), "out of range: {} (power {})", v, power);
        }
    }
}

#[test]
fn wraparound_through_north() {
    let out = directional_idw(
        &[355.0, 5.0],
        &pts(&[(-1.0, 0.0), (1.0, 0.0)]),
        &pts(&[(0.0, 0.0), (0.0, 3.0)]),
        &DirectionalIdwParams::default(),
    )
    .unwrap();

    for v in out {
        assert!(circular_diff(v, 0.0) < 1e-9, "expected ~0, got {}", v);
    }
}

#[test]
fn coincident_source_wins_regardless_of_neighbours() {
    let (mut values, mut sources) = scattered(25);
    values.push(123.0);
    sources.push(Point::new(3.3, 4.4));

    let out = directional_idw(
        &values,
        &sources,
        &pts(&[(3.3, 4.4)]),
        &DirectionalIdwParams {
            power: 1.0,
            ..Default::default()
        },
    )
    .unwrap();

    assert!((out[0] - 123.0).abs() < 1e-9, "got {}", out[0]);
}

#[test]
fn single_coincident_source_returns_value_mod_360() {
    for (theta, expected) in [(0.0, 0.0), (45.0, 45.0), (359.0, 359.0), (370.0, 10.0), (-90.0, 270.0)] {
        let p = Point::new(2.0, -7.0);
        let out = directional_idw(&[theta], &[p], &[p], &DirectionalIdwParams::default()).unwrap();
        assert!(
            circular_diff(out[0], expected) < 1e-9,
            "theta {} -> {}, expected {}",
            theta,
            out[0],
            expected
        );
    }
}

#[test]
fn scenario_two_stations_four_targets() {
    let out = directional_idw(
        &[55.0, 355.0],
        &pts(&[(1.0, 1.0), (2.0, 2.0)]),
        &pts(&[(1.0, 1.0), (2.0, 2.0), (1.0, 2.0), (2.0, 1.0)]),
        &DirectionalIdwParams::default(),
    )
    .unwrap();

    assert!((out[0] - 55.0).abs() < 1e-9, "got {}", out[0]);
    assert!((out[1] - 355.0).abs() < 1e-9, "got {}", out[1]);

    // Off-source targets are equidistant: the blend goes through north,
    // landing halfway between 355 and 55
    for v in &out[2..] {
        assert!(*v < 55.0, "blend should pass through north, got {}", v);
        assert!((v - 25.0).abs() < 1e-9, "got {}", v);
    }
}

#[test]
fn higher_power_sharpens_toward_nearest() {
    let values = [10.0, 100.0];
    let sources = pts(&[(0.0, 0.0), (10.0, 0.0)]);
    let targets = pts(&[(2.0, 0.0)]);

    let low = directional_idw(
        &values,
        &sources,
        &targets,
        &DirectionalIdwParams {
            power: 1.0,
            ..Default::default()
        },
    )
    .unwrap();
    let high = directional_idw(
        &values,
        &sources,
        &targets,
        &DirectionalIdwParams {
            power: 4.0,
            ..Default::default()
        },
    )
    .unwrap();

    assert!(circular_diff(high[0], 10.0) < circular_diff(low[0], 10.0));
}

#[test]
fn geographic_stations_around_mexico_city() {
    // Lon/lat of a few monitoring sites, wind bearings in degrees
    let sources = pts(&[(-99.1521, 19.4840), (-99.2035, 19.3262), (-99.0733, 19.5783)]);
    let values = [350.0, 20.0, 340.0];
    let params = DirectionalIdwParams {
        coordinates: CoordinateSystem::Geographic,
        ..Default::default()
    };

    let out = directional_idw(
        &values,
        &sources,
        &pts(&[(-99.1332, 19.4326), (-99.2035, 19.3262)]),
        &params,
    )
    .unwrap();

    // All inputs point roughly north, so the blend must as well
    assert!(circular_diff(out[0], 0.0) < 25.0, "got {}", out[0]);
    assert!((out[1] - 20.0).abs() < 1e-9, "got {}", out[1]);
}

#[test]
fn opposite_bearings_equal_weight_is_undefined_or_orthogonal() {
    // Exactly opposing vectors cancel; the direction is then numerically
    // arbitrary but must still be reported inside [0, 360)
    let out = directional_idw(
        &[90.0, 270.0],
        &pts(&[(-1.0, 0.0), (1.0, 0.0)]),
        &pts(&[(0.0, 0.0)]),
        &DirectionalIdwParams::default(),
    )
    .unwrap();
    assert!(out[0].is_nan() || (0.0..360.0).contains(&out[0]));
}
