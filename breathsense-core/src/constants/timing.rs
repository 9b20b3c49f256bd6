//! Timing Constants
//!
//! Warm-up duration, sampling cadences, and button gesture thresholds for
//! the single cooperative control loop.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

// ===== CONTROL LOOP =====

/// Recommended loop poll interval (milliseconds).
///
/// The platform calls `Device::tick` at this cadence and sleeps between
/// calls. Anything at or under 250 ms keeps the button responsive during
/// calibration; 50 ms leaves comfortable margin.
pub const POLL_INTERVAL_MS: u64 = 50;

// ===== CALIBRATION =====

/// Fixed sensor warm-up duration before the baseline is taken (milliseconds).
///
/// The MQ-3 heater needs tens of seconds to approach equilibrium. The
/// duration is fixed, not adaptive: calibration waits this long and takes
/// the smoothed voltage as the baseline without checking convergence. A
/// known precision limitation, kept deliberately.
pub const WARMUP_DURATION_MS: u64 = 20 * MS_PER_SECOND;

/// Cadence of samples fed into the smoothing filter during warm-up (milliseconds).
pub const CALIBRATION_SAMPLE_INTERVAL_MS: u64 = 250;

// ===== MEASUREMENT =====

/// Cadence of measurement readings while the device is on (milliseconds).
///
/// 1 Hz matches how fast a breath sample develops on the sensor and keeps
/// the display legible.
pub const MEASUREMENT_INTERVAL_MS: u64 = MS_PER_SECOND;

/// Consecutive failed reads before a fault is surfaced to the display.
///
/// A single failed ADC conversion is skipped silently; a run of them means
/// the sensor path is actually broken and the user should see it.
pub const PERSISTENT_FAULT_READS: u32 = 10;

// ===== BUTTON GESTURES =====

/// Debounce floor (milliseconds).
///
/// A press shorter than this is electrical noise, not a gesture.
///
/// Source: typical tactile switch bounce is under 20 ms
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Hold duration that classifies a press as long (milliseconds).
pub const LONG_PRESS_MS: u64 = 1500;
