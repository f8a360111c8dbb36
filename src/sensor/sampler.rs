use std::time::{Duration, Instant};

use super::{Accelerometer, Sample};
use crate::config::SamplerConfig;

/// Fixed-cadence sampling loop as a lazy, finite iterator.
///
/// Before each emission the sampler measures how much wall time the
/// previous iteration (reading plus whatever the consumer did with it)
/// actually took and sleeps only for the remainder of the period, so the
/// nominal cadence holds under variable per-sample processing cost. A
/// plain fixed sleep would drift under load.
///
/// The session clock starts on the first pull; emission stops once the
/// configured duration has elapsed.
pub struct Sampler<'a, A: Accelerometer> {
    accel: &'a mut A,
    period: Duration,
    duration: Duration,
    started: Option<Instant>,
    last_emit: Option<Instant>,
    next_seq: u32,
}

impl<'a, A: Accelerometer> Sampler<'a, A> {
    pub fn new(accel: &'a mut A, config: &SamplerConfig) -> Self {
        Self {
            accel,
            period: config.period(),
            duration: config.duration(),
            started: None,
            last_emit: None,
            next_seq: 0,
        }
    }
}

impl<A: Accelerometer> Iterator for Sampler<'_, A> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let started = *self.started.get_or_insert_with(Instant::now);

        if let Some(prev) = self.last_emit {
            let elapsed = prev.elapsed();
            if elapsed < self.period {
                std::thread::sleep(self.period - elapsed);
            }
        }

        if started.elapsed() >= self.duration {
            return None;
        }

        self.last_emit = Some(Instant::now());
        let sample = Sample {
            reading: self.accel.read(),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        Some(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{AccelReading, FixedAccelerometer};

    fn config(period_ms: u64, duration_ms: u64) -> SamplerConfig {
        SamplerConfig {
            period_ms,
            duration_ms,
        }
    }

    #[test]
    fn emits_duration_over_period_samples() {
        let mut accel = FixedAccelerometer(AccelReading::new(0.0, 0.0, -1.0));
        let samples: Vec<_> = Sampler::new(&mut accel, &config(10, 200)).collect();
        // 200ms / 10ms = 20, +-1 for boundary rounding
        assert!(
            (19..=21).contains(&samples.len()),
            "expected ~20 samples, got {}",
            samples.len()
        );
    }

    #[test]
    fn sequence_starts_at_zero_and_is_contiguous() {
        let mut accel = FixedAccelerometer(AccelReading::new(1.0, 2.0, 3.0));
        let samples: Vec<_> = Sampler::new(&mut accel, &config(1, 20)).collect();
        for (i, sample) in samples.iter().enumerate() {
            assert_eq!(sample.seq, i as u32);
        }
    }

    #[test]
    fn cadence_holds_under_consumer_processing() {
        let mut accel = FixedAccelerometer(AccelReading::new(0.0, 0.0, -1.0));
        let start = Instant::now();
        let mut count = 0usize;
        for _ in Sampler::new(&mut accel, &config(10, 200)) {
            // Simulate per-sample processing shorter than the period; the
            // sampler must absorb it instead of adding it to the sleep.
            std::thread::sleep(Duration::from_millis(5));
            count += 1;
        }
        let total = start.elapsed();
        assert!(
            (18..=22).contains(&count),
            "cadence drifted: {count} samples in {total:?}"
        );
        assert!(
            total < Duration::from_millis(300),
            "burst overran its duration: {total:?}"
        );
    }
}
