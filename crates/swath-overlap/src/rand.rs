//! Synthetic survey swaths (straight track + across-track fan + jitter).
//!
//! Purpose
//! - Provide small, deterministic survey lines for tests, benchmarks and the
//!   demo program. No sonar model: samples are laid out on a regular
//!   ping × beam lattice and perturbed.
//!
//! Model
//! - Ping `k` is centred at `start + k · ping_spacing · (cos h, sin h, 0)`.
//! - Beam `j` sits across track, evenly spread over `swath_width`.
//! - Depth is `-depth` plus a gentle across-track slope, then every
//!   coordinate receives bounded uniform jitter.
//! - Samples are emitted ping-major (all beams of ping 0 first).
//! - Determinism uses a replay token `(seed, index)` mixed into one RNG.

use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Swath generator configuration.
#[derive(Clone, Copy, Debug)]
pub struct SwathCfg {
    pub start: Point3<f64>,
    /// Heading in radians, counter-clockwise from +x.
    pub heading: f64,
    pub pings: usize,
    pub ping_spacing: f64,
    pub beams: usize,
    pub swath_width: f64,
    pub depth: f64,
    /// Depth change per metre across track.
    pub slope: f64,
    /// Half-width of the uniform jitter applied to every coordinate.
    pub jitter: f64,
}

impl Default for SwathCfg {
    fn default() -> Self {
        Self {
            start: Point3::origin(),
            heading: 0.0,
            pings: 40,
            ping_spacing: 1.0,
            beams: 32,
            swath_width: 60.0,
            depth: 20.0,
            slope: 0.05,
            jitter: 0.1,
        }
    }
}

impl SwathCfg {
    #[inline]
    fn along(&self) -> Vector3<f64> {
        Vector3::new(self.heading.cos(), self.heading.sin(), 0.0)
    }

    #[inline]
    fn across(&self) -> Vector3<f64> {
        Vector3::new(-self.heading.sin(), self.heading.cos(), 0.0)
    }

    /// Same line moved `offset` metres to port (negative: starboard).
    pub fn shifted_across(&self, offset: f64) -> Self {
        Self {
            start: self.start + self.across() * offset,
            ..*self
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }

    #[inline]
    pub fn next(self) -> Self {
        Self {
            index: self.index.wrapping_add(1),
            ..self
        }
    }
}

/// Draw one swath; `pings · beams` samples, ping-major.
pub fn draw_swath(cfg: SwathCfg, tok: ReplayToken) -> Vec<Point3<f32>> {
    let mut rng = tok.to_std_rng();
    let along = cfg.along();
    let across = cfg.across();
    let jitter = cfg.jitter.max(0.0);
    let beams = cfg.beams.max(1);
    let step = if beams > 1 {
        cfg.swath_width / (beams - 1) as f64
    } else {
        0.0
    };
    let mut noise = move || {
        if jitter > 0.0 {
            rng.gen_range(-jitter..=jitter)
        } else {
            0.0
        }
    };

    let mut out = Vec::with_capacity(cfg.pings * beams);
    for k in 0..cfg.pings {
        let centre = cfg.start + along * (k as f64 * cfg.ping_spacing);
        for j in 0..beams {
            let offset = -0.5 * cfg.swath_width + j as f64 * step;
            let base = centre + across * offset;
            let z = -cfg.depth + cfg.slope * offset;
            let p = Point3::new(base.x + noise(), base.y + noise(), z + noise());
            out.push(p.cast::<f32>());
        }
    }
    out
}

/// Two adjacent passes along the same track, `separation` metres apart across
/// track. The second pass runs in the opposite direction, as survey lines do.
pub fn draw_adjacent_pair(
    cfg: SwathCfg,
    separation: f64,
    tok: ReplayToken,
) -> (Vec<Point3<f32>>, Vec<Point3<f32>>) {
    let first = draw_swath(cfg, tok);
    let length = cfg.ping_spacing * cfg.pings.saturating_sub(1) as f64;
    let back = SwathCfg {
        start: cfg.shifted_across(separation).start + cfg.along() * length,
        heading: cfg.heading + std::f64::consts::PI,
        ..cfg
    };
    let second = draw_swath(back, tok.next());
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_draw() {
        let cfg = SwathCfg::default();
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = draw_swath(cfg, tok);
        let b = draw_swath(cfg, tok);
        assert_eq!(a, b);
        assert_eq!(a.len(), cfg.pings * cfg.beams);
        let c = draw_swath(cfg, tok.next());
        assert_ne!(a, c);
    }

    #[test]
    fn lattice_without_jitter() {
        let cfg = SwathCfg {
            pings: 3,
            beams: 3,
            swath_width: 10.0,
            depth: 5.0,
            slope: 0.0,
            jitter: 0.0,
            ..SwathCfg::default()
        };
        let pts = draw_swath(cfg, ReplayToken { seed: 0, index: 0 });
        assert_eq!(pts[0], Point3::new(0.0, -5.0, -5.0));
        assert_eq!(pts[2], Point3::new(0.0, 5.0, -5.0));
        assert_eq!(pts[8], Point3::new(2.0, 5.0, -5.0));
    }

    #[test]
    fn adjacent_pair_is_offset_and_reversed() {
        let cfg = SwathCfg {
            jitter: 0.0,
            slope: 0.0,
            ..SwathCfg::default()
        };
        let (a, b) = draw_adjacent_pair(cfg, 40.0, ReplayToken { seed: 3, index: 0 });
        assert_eq!(a.len(), b.len());
        // Second pass starts abeam the end of the first one, 40 m to port.
        let first = b[0];
        assert!((first.x - 39.0).abs() < 1e-4);
        // Reversed heading: beam 0 is now the outer (port) edge.
        assert!((first.y - 70.0).abs() < 1e-4);
        assert!((b[b.len() - 1].y - 10.0).abs() < 1e-4);
    }
}
