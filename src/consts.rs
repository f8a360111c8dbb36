/// Log level (overridable via RUST_LOG)
pub const LOG_LEVEL: &str = "info";

/// Radio channel id (both nodes must match)
pub const DEFAULT_CHANNEL: u8 = 25;

/// Transmit power level (0-7)
pub const DEFAULT_TX_POWER: u8 = 7;

/// Base UDP port for the broadcast channel stand-in; the channel id is
/// added to it so different channels never share a socket.
pub const UDP_PORT_BASE: u16 = 42000;

/// Sample period in ms
pub const SAMPLE_PERIOD_MS: u64 = 10;

/// Total sample time per burst in ms
pub const SAMPLE_DURATION_MS: u64 = 1500;

// --- Reliable link constants ---
/// Maximum transmission attempts per frame. 1 keeps the sampling cadence
/// intact; raise it only when loss matters more than timing.
pub const MAX_ATTEMPTS: u32 = 1;
/// Maximum wait for an acknowledgement per attempt (ms). Must stay below
/// SAMPLE_PERIOD_MS or the burst cadence degrades.
pub const ACK_TIMEOUT_MS: u64 = 5;
/// Interval between acknowledgement polls (ms)
pub const ACK_POLL_INTERVAL_MS: u64 = 1;
/// Pause between failed attempts (ms)
pub const RETRY_BACKOFF_MS: u64 = 100;

/// Trigger-pad poll tick while idle (ms)
pub const READY_TICK_MS: u64 = 100;

/// Bridge idle interval when the medium is silent (ms)
pub const BRIDGE_POLL_INTERVAL_MS: u64 = 100;

/// Countdown shown before a burst starts (seconds, clamped to 1-3)
pub const COUNTDOWN_SECS: u64 = 3;

/// Pace of the countdown digits (ms)
pub const COUNTDOWN_TICK_MS: u64 = 1000;

/// How long the bridge holds the shutdown glyph before releasing the
/// channel (ms)
pub const SHUTDOWN_HOLD_MS: u64 = 2000;

/// Matrix indicator capacity; the burst/reception counters wrap here
pub const DISPLAY_CAPACITY: u32 = 25;

/// Header row of the per-burst CSV artifact
pub const CSV_HEADER: &str = "x,y,z";

/// Default number of takes in capture mode
pub const DEFAULT_TAKES: u32 = 1;

/// Upper bound on takes per capture run
pub const MAX_TAKES: u32 = 12;
