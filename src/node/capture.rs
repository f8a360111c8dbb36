use tracing::{info, warn};

use super::NodeError;
use super::pad::{Trigger, TriggerPad};
use crate::config::CaptureConfig;
use crate::consts::MAX_TAKES;
use crate::sensor::{Accelerometer, Sampler};
use crate::storage::BurstWriter;
use crate::ui::{Indicator, countdown, glyphs};

/// Radio-less acquisition mode: record a fixed number of takes straight
/// to per-burst CSV files, one armed/sampling round per take. The
/// cancel trigger redraws a remaining-takes fill on the panel instead of
/// broadcasting anything.
pub struct CaptureNode<A, P, I> {
    accel: A,
    pad: P,
    indicator: I,
    config: CaptureConfig,
}

impl<A, P, I> CaptureNode<A, P, I>
where
    A: Accelerometer,
    P: TriggerPad,
    I: Indicator,
{
    pub fn new(accel: A, pad: P, indicator: I, config: CaptureConfig) -> Self {
        Self {
            accel,
            pad,
            indicator,
            config,
        }
    }

    pub fn run(&mut self) -> Result<(), NodeError> {
        let takes = self.config.takes.clamp(1, MAX_TAKES);
        info!("=== Capture Mode: {} take(s) ===", takes);

        let mut taken: u32 = 0;
        while taken < takes {
            match self.pad.poll() {
                Some(Trigger::Confirm) => {
                    self.record_take(taken)?;
                    taken += 1;
                }
                Some(Trigger::Cancel) => {
                    // Remaining-takes fill, row-major from the top left.
                    let r = takes - taken - 1;
                    self.indicator
                        .fill_until((r % 5) as usize, (r / 5) as usize);
                }
                Some(Trigger::Exit) => {
                    warn!("capture aborted with {} of {} take(s) done", taken, takes);
                    break;
                }
                None => self.indicator.show(&glyphs::IDLE_ARROW),
            }
            std::thread::sleep(self.config.ready_tick());
        }

        self.indicator.show(&glyphs::SHUTDOWN);
        Ok(())
    }

    fn record_take(&mut self, index: u32) -> Result<(), NodeError> {
        countdown(
            &mut self.indicator,
            self.config.countdown_secs,
            self.config.countdown_tick(),
        );
        self.indicator.show(&glyphs::TARGET);

        let path = self.config.out_dir.join(format!("file_{}.csv", index));
        let mut writer = BurstWriter::create(&path)?;
        for sample in Sampler::new(&mut self.accel, &self.config.sampler) {
            writer.append(&sample.reading)?;
        }
        let rows = writer.finish()?;
        info!("take {} captured: {} sample(s) -> {}", index, rows, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SamplerConfig;
    use crate::node::pad::ScriptedPad;
    use crate::sensor::{AccelReading, FixedAccelerometer};
    use crate::ui::{IndicatorEvent, RecordingIndicator};

    fn test_config(takes: u32, out_dir: std::path::PathBuf) -> CaptureConfig {
        CaptureConfig {
            sampler: SamplerConfig {
                period_ms: 1,
                duration_ms: 10,
            },
            takes,
            out_dir,
            countdown_secs: 1,
            countdown_tick_ms: 0,
            ready_tick_ms: 0,
        }
    }

    #[test]
    fn captures_one_csv_per_take() {
        let dir = std::env::temp_dir().join(format!("capture_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut node = CaptureNode::new(
            FixedAccelerometer(AccelReading::new(1.0, 2.0, 3.0)),
            ScriptedPad::new([Some(Trigger::Confirm), Some(Trigger::Confirm)]),
            RecordingIndicator::new(),
            test_config(2, dir.clone()),
        );
        node.run().unwrap();

        for index in 0..2 {
            let text = std::fs::read_to_string(dir.join(format!("file_{}.csv", index))).unwrap();
            let mut lines = text.lines();
            assert_eq!(lines.next(), Some("x,y,z"));
            assert!(lines.clone().count() >= 5);
            assert!(lines.all(|l| l == "1.0,2.0,3.0"));
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn cancel_redraws_the_remaining_takes_fill() {
        let dir = std::env::temp_dir().join(format!("capture_fill_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut node = CaptureNode::new(
            FixedAccelerometer(AccelReading::new(0.0, 0.0, -1.0)),
            ScriptedPad::new([Some(Trigger::Cancel), Some(Trigger::Exit)]),
            RecordingIndicator::new(),
            test_config(7, dir.clone()),
        );
        node.run().unwrap();

        // 6 takes remain after the current one: fill up to (1, 1).
        assert!(
            node.indicator
                .events
                .contains(&IndicatorEvent::Filled(1, 1))
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
