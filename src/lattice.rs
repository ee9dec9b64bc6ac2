//! Staggered point lattice with bounded jitter.

use crate::{
    config::GridConfig,
    core::{Point, PointId, Rect},
    jitter::{CREATION_TICK, point_rng},
};

/// Lay out `n * n` points on a staggered lattice covering the canvas.
///
/// Points are emitted column by column; a point's index is its id. Odd
/// columns are shifted down by half a step so neighboring columns interleave.
/// Jitter drawn here is baked into the returned positions.
pub fn generate(config: &GridConfig, seed: u64) -> Vec<Point> {
    let n = config.points_per_side;
    let delta = config.min_delta();
    let range = config.jitter.range(delta);
    let logo = config.logo_bounds();

    let mut points = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let id = PointId(points.len());
            let mut p = Point::new(i as f64 * delta, j as f64 * delta);
            if i % 2 == 1 {
                p.y += delta / 2.0;
            }
            let mut rng = point_rng(seed, CREATION_TICK, id);
            if let Some(d) = config
                .jitter
                .sample(&mut rng, range, strictly_inside(logo, p))
            {
                p += d;
            }
            points.push(p);
        }
    }
    points
}

fn strictly_inside(rect: Rect, p: Point) -> bool {
    p.x > rect.x0 && p.x < rect.x1 && p.y > rect.y0 && p.y < rect.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::JitterParams;

    fn still(n: usize) -> GridConfig {
        GridConfig {
            points_per_side: n,
            jitter: JitterParams {
                chance: 0.0,
                ..JitterParams::default()
            },
            ..GridConfig::default()
        }
    }

    #[test]
    fn lattice_is_staggered_without_jitter() {
        let cfg = still(6);
        let pts = generate(&cfg, 1);
        assert_eq!(pts.len(), 36);
        let d = 100.0 / 5.0;
        assert_eq!(pts[0], Point::new(0.0, 0.0));
        assert_eq!(pts[5], Point::new(0.0, 5.0 * d));
        assert_eq!(pts[6], Point::new(d, d / 2.0));
        assert_eq!(pts[13], Point::new(2.0 * d, d));
    }

    #[test]
    fn jitter_is_bounded_by_spacing() {
        let cfg = GridConfig {
            jitter: JitterParams {
                chance: 1.0,
                ..JitterParams::default()
            },
            ..GridConfig::default()
        };
        let still = generate(&still(20), 0);
        let noisy = generate(&cfg, 42);
        let bound = cfg.jitter.range(cfg.min_delta()) + 1e-12;
        let mut moved = 0;
        for (a, b) in still.iter().zip(&noisy) {
            assert!((a.x - b.x).abs() <= bound && (a.y - b.y).abs() <= bound);
            if a != b {
                moved += 1;
            }
        }
        assert!(moved > 300);
    }

    #[test]
    fn logo_region_gets_damped_creation_jitter() {
        let cfg = GridConfig {
            jitter: JitterParams {
                chance: 1.0,
                ..JitterParams::default()
            },
            ..GridConfig::default()
        };
        let still = generate(&still(20), 0);
        let noisy = generate(&cfg, 7);
        let logo = cfg.logo_bounds();
        let damped = cfg.jitter.range(cfg.min_delta()) * cfg.jitter.logo_factor;

        let (mut inside, mut wide_outside) = (0, 0);
        for (a, b) in still.iter().zip(&noisy) {
            let d = *b - *a;
            if strictly_inside(logo, *a) {
                inside += 1;
                assert!(d.x.abs() <= damped + 1e-12 && d.y.abs() <= damped + 1e-12);
            } else if d.x.abs() > damped || d.y.abs() > damped {
                wide_outside += 1;
            }
        }
        assert!(inside > 0);
        assert!(wide_outside > 0);
    }

    #[test]
    fn same_seed_same_lattice() {
        let cfg = GridConfig::default();
        assert_eq!(generate(&cfg, 5), generate(&cfg, 5));
        assert_ne!(generate(&cfg, 5), generate(&cfg, 6));
    }
}
