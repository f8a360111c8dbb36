pub mod sampler;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use sampler::Sampler;

/// One triaxial accelerometer reading in g.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelReading {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelReading {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A reading coupled with its session-local sequence number. The sequence
/// never goes on the wire; it exists for ordering bookkeeping on the
/// sending node only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub reading: AccelReading,
    pub seq: u32,
}

/// The accelerometer seam. Reads must be cheap; the sampler calls this
/// once per period tick.
pub trait Accelerometer {
    fn read(&mut self) -> AccelReading;
}

/// Pseudo-motion source for hosts without a MEMS part: a bounded random
/// walk around rest orientation (z near -1 g).
pub struct SyntheticAccelerometer {
    rng: StdRng,
    current: AccelReading,
}

impl SyntheticAccelerometer {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            current: AccelReading::new(0.0, 0.0, -1.0),
        }
    }

    fn step(rng: &mut StdRng, value: f32) -> f32 {
        (value + rng.random_range(-0.05..0.05)).clamp(-2.0, 2.0)
    }
}

impl Default for SyntheticAccelerometer {
    fn default() -> Self {
        Self::new()
    }
}

impl Accelerometer for SyntheticAccelerometer {
    fn read(&mut self) -> AccelReading {
        self.current = AccelReading::new(
            Self::step(&mut self.rng, self.current.x),
            Self::step(&mut self.rng, self.current.y),
            Self::step(&mut self.rng, self.current.z),
        );
        self.current
    }
}

/// Deterministic source for tests: always returns the same reading.
pub struct FixedAccelerometer(pub AccelReading);

impl Accelerometer for FixedAccelerometer {
    fn read(&mut self) -> AccelReading {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_walk_stays_bounded() {
        let mut accel = SyntheticAccelerometer::seeded(7);
        for _ in 0..10_000 {
            let r = accel.read();
            for axis in [r.x, r.y, r.z] {
                assert!((-2.0..=2.0).contains(&axis), "axis out of range: {axis}");
            }
        }
    }

    #[test]
    fn synthetic_walk_is_deterministic_per_seed() {
        let mut a = SyntheticAccelerometer::seeded(42);
        let mut b = SyntheticAccelerometer::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.read(), b.read());
        }
    }
}
