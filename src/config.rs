use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Radio data-rate selector. The UDP stand-in logs it instead of
/// applying it physically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataRate {
    Rate1Mbit,
    Rate2Mbit,
}

/// Static per-deployment channel parameters, applied once at open.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioConfig {
    pub channel: u8,
    pub data_rate: DataRate,
    pub tx_power: u8,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL,
            data_rate: DataRate::Rate2Mbit,
            tx_power: DEFAULT_TX_POWER,
        }
    }
}

/// Parameters of the send/await-ack/retry primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub max_attempts: u32,
    pub ack_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub retry_backoff_ms: u64,
}

impl LinkConfig {
    pub fn ack_timeout(&self) -> Duration {
        Duration::from_millis(self.ack_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            ack_timeout_ms: ACK_TIMEOUT_MS,
            poll_interval_ms: ACK_POLL_INTERVAL_MS,
            retry_backoff_ms: RETRY_BACKOFF_MS,
        }
    }
}

/// Sampling cadence of one burst.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub period_ms: u64,
    pub duration_ms: u64,
}

impl SamplerConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            period_ms: SAMPLE_PERIOD_MS,
            duration_ms: SAMPLE_DURATION_MS,
        }
    }
}

/// Sensor-node telemetry mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderConfig {
    pub radio: RadioConfig,
    pub link: LinkConfig,
    pub sampler: SamplerConfig,
    pub countdown_secs: u64,
    pub countdown_tick_ms: u64,
    pub ready_tick_ms: u64,
}

impl SenderConfig {
    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms)
    }

    pub fn ready_tick(&self) -> Duration {
        Duration::from_millis(self.ready_tick_ms)
    }
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            radio: RadioConfig::default(),
            link: LinkConfig::default(),
            sampler: SamplerConfig::default(),
            countdown_secs: COUNTDOWN_SECS,
            countdown_tick_ms: COUNTDOWN_TICK_MS,
            ready_tick_ms: READY_TICK_MS,
        }
    }
}

/// Receiver-bridge mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub radio: RadioConfig,
    pub poll_interval_ms: u64,
    pub shutdown_hold_ms: u64,
}

impl BridgeConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn shutdown_hold(&self) -> Duration {
        Duration::from_millis(self.shutdown_hold_ms)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            radio: RadioConfig::default(),
            poll_interval_ms: BRIDGE_POLL_INTERVAL_MS,
            shutdown_hold_ms: SHUTDOWN_HOLD_MS,
        }
    }
}

/// Radio-less local capture mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub sampler: SamplerConfig,
    pub takes: u32,
    pub out_dir: PathBuf,
    pub countdown_secs: u64,
    pub countdown_tick_ms: u64,
    pub ready_tick_ms: u64,
}

impl CaptureConfig {
    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms)
    }

    pub fn ready_tick(&self) -> Duration {
        Duration::from_millis(self.ready_tick_ms)
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sampler: SamplerConfig::default(),
            takes: DEFAULT_TAKES,
            out_dir: PathBuf::from("."),
            // The capture workflow fires bursts back to back, so the
            // original used the shortest countdown here.
            countdown_secs: 1,
            countdown_tick_ms: COUNTDOWN_TICK_MS,
            ready_tick_ms: READY_TICK_MS,
        }
    }
}

/// Whole-node configuration, loadable from a JSON file. Every field
/// falls back to the defaults in `consts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub sender: SenderConfig,
    pub bridge: BridgeConfig,
    pub capture: CaptureConfig,
}

impl NodeConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
