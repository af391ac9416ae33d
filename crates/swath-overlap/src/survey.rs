//! Survey records that travel alongside the point lines.
//!
//! Plain holders with accessors. Nothing in the overlap pipeline reads them;
//! callers carry them next to the lines they describe.

use serde::{Deserialize, Serialize};

/// One side-scan ping: an amplitude trace for a single channel.
///
/// Samples of every source type are widened to `f64`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SidescanPing {
    channel: i32,
    timestamp: u64,
    distance_per_sample: f64,
    samples: Vec<f64>,
}

impl SidescanPing {
    pub fn new(channel: i32, timestamp: u64, distance_per_sample: f64, samples: Vec<f64>) -> Self {
        Self {
            channel,
            timestamp,
            distance_per_sample,
            samples,
        }
    }

    #[inline]
    pub fn channel(&self) -> i32 {
        self.channel
    }

    #[inline]
    pub fn set_channel(&mut self, channel: i32) {
        self.channel = channel;
    }

    /// Microseconds since the Unix epoch.
    #[inline]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    #[inline]
    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    /// Slant range covered by one sample, in metres.
    #[inline]
    pub fn distance_per_sample(&self) -> f64 {
        self.distance_per_sample
    }

    #[inline]
    pub fn set_distance_per_sample(&mut self, d: f64) {
        self.distance_per_sample = d;
    }

    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    #[inline]
    pub fn samples_mut(&mut self) -> &mut Vec<f64> {
        &mut self.samples
    }

    #[inline]
    pub fn set_samples(&mut self, samples: Vec<f64>) {
        self.samples = samples;
    }

    /// Slant range of the last sample.
    pub fn max_range(&self) -> f64 {
        self.distance_per_sample * self.samples.len() as f64
    }
}

/// Sound speed as a function of depth: `(depth m, speed m/s)` pairs kept in
/// insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundVelocityProfile {
    samples: Vec<(f64, f64)>,
}

impl SoundVelocityProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constant 1520 m/s from the surface to 15 km.
    pub fn salt_water() -> Self {
        let mut svp = Self::new();
        svp.add(0.0, 1520.0);
        svp.add(15000.0, 1520.0);
        svp
    }

    pub fn add(&mut self, depth: f64, speed: f64) {
        self.samples.push((depth, speed));
    }

    #[inline]
    pub fn samples(&self) -> &[(f64, f64)] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Linear interpolation between the bracketing samples, clamped to the
    /// first/last speed outside the table. Assumes depths are ascending.
    pub fn speed_at(&self, depth: f64) -> Option<f64> {
        let (&(d0, s0), rest) = self.samples.split_first()?;
        if depth <= d0 {
            return Some(s0);
        }
        let mut prev = (d0, s0);
        for &(d1, s1) in rest {
            if depth <= d1 {
                let (da, sa) = prev;
                let span = d1 - da;
                if span <= 0.0 {
                    return Some(s1);
                }
                return Some(sa + (s1 - sa) * (depth - da) / span);
            }
            prev = (d1, s1);
        }
        Some(prev.1)
    }
}
