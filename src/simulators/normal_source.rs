// src/simulators/normal_source.rs

use rand::distributions::Distribution;
use rand::rngs::{StdRng, ThreadRng};
use rand::SeedableRng;
use rand_distr::Normal;

/// A source of independent standard-normal variates.
///
/// The simulator consumes this as an injected capability instead of reaching
/// for a process-global generator, which is what makes runs reproducible
/// (seed the source) and parallel trajectories safe (give each worker its
/// own disjoint stream). A source that can no longer produce a draw returns
/// `None`; the simulator treats that as fatal rather than resampling.
pub trait NormalSource {
    fn next_standard_normal(&mut self) -> Option<f64>;
}

/// A reproducible source: a seeded `StdRng` feeding a standard normal
/// distribution. Two sources built from the same seed produce the same
/// stream of draws.
pub struct SeededNormal {
    rng: StdRng,
    normal_dist: Normal<f64>,
}

impl SeededNormal {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            // Unit normal parameters are always valid, so this cannot fail.
            normal_dist: Normal::new(0.0, 1.0).unwrap(),
        }
    }

    /// Derives the disjoint sub-stream for one trajectory of a parallel run.
    ///
    /// The master seed and the trajectory index are mixed through SplitMix64
    /// before seeding, so neighbouring trajectory indices do not land on
    /// correlated `StdRng` states.
    pub fn for_trajectory(master_seed: u64, trajectory: u64) -> Self {
        Self::new(splitmix64(
            master_seed ^ trajectory.wrapping_mul(0x9E37_79B9_7F4A_7C15),
        ))
    }
}

impl NormalSource for SeededNormal {
    fn next_standard_normal(&mut self) -> Option<f64> {
        Some(self.normal_dist.sample(&mut self.rng))
    }
}

/// A convenience source backed by the thread-local generator, for callers
/// who do not need reproducibility.
pub struct ThreadRngNormal {
    rng: ThreadRng,
    normal_dist: Normal<f64>,
}

impl ThreadRngNormal {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
            normal_dist: Normal::new(0.0, 1.0).unwrap(),
        }
    }
}

impl Default for ThreadRngNormal {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalSource for ThreadRngNormal {
    fn next_standard_normal(&mut self) -> Option<f64> {
        Some(self.normal_dist.sample(&mut self.rng))
    }
}

// One round of SplitMix64. Good bit avalanche for cheap.
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}
