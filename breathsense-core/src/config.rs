//! Injected device configuration
//!
//! One [`DeviceConfig`] is handed to [`Device::new`](crate::device::Device::new)
//! at startup and never changes afterwards. Defaults come from the
//! documented values in [`constants`](crate::constants); deployments
//! override individual fields with struct-update syntax:
//!
//! ```
//! use breathsense_core::config::{CalibrationConfig, DeviceConfig};
//!
//! let config = DeviceConfig {
//!     calibration: CalibrationConfig {
//!         warmup_ms: 30_000,
//!         ..CalibrationConfig::default()
//!     },
//!     ..DeviceConfig::default()
//! };
//! assert_eq!(config.calibration.warmup_ms, 30_000);
//! ```

use crate::constants::{sensor, timing};
use crate::curve::ResponseCurve;

/// Analog front-end configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdcConfig {
    /// Analog input pin carrying the MQ-3 signal
    pub pin: u8,
    /// Reference voltage the full-scale count maps to (V)
    pub reference_volts: f32,
    /// Full-scale converter count (4095 for a 12-bit ADC)
    pub full_scale: u16,
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self {
            pin: sensor::ANALOG_PIN,
            reference_volts: sensor::ADC_REFERENCE_VOLTS,
            full_scale: sensor::ADC_FULL_SCALE,
        }
    }
}

/// Button input and gesture thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonConfig {
    /// Button input pin
    pub pin: u8,
    /// Whether the pressed level is electrically low (pulled-up input)
    ///
    /// Polarity is normalized by the platform adapter; this field records
    /// the wiring so adapters can be built from config alone.
    pub active_low: bool,
    /// Presses shorter than this are ignored as noise (ms)
    pub debounce_ms: u64,
    /// Holds at least this long classify as a long press (ms)
    pub long_press_ms: u64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            pin: sensor::BUTTON_PIN,
            active_low: true,
            debounce_ms: timing::BUTTON_DEBOUNCE_MS,
            long_press_ms: timing::LONG_PRESS_MS,
        }
    }
}

/// Warm-up and baseline validation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationConfig {
    /// Fixed warm-up duration before the baseline is taken (ms)
    pub warmup_ms: u64,
    /// Cadence of samples fed to the smoothing filter during warm-up (ms)
    pub sample_interval_ms: u64,
    /// Lowest acceptable baseline voltage (V); below it the sensor is
    /// treated as disconnected
    pub baseline_min_volts: f32,
    /// Highest acceptable baseline voltage (V); above it the sensor is
    /// treated as saturated
    pub baseline_max_volts: f32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            warmup_ms: timing::WARMUP_DURATION_MS,
            sample_interval_ms: timing::CALIBRATION_SAMPLE_INTERVAL_MS,
            baseline_min_volts: sensor::BASELINE_MIN_VOLTS,
            baseline_max_volts: sensor::BASELINE_MAX_VOLTS,
        }
    }
}

/// Measurement cadence and fault surfacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingConfig {
    /// Cadence of measurement readings while the device is on (ms)
    pub measurement_interval_ms: u64,
    /// Consecutive failed reads before a fault is surfaced to the sink
    pub persistent_fault_reads: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            measurement_interval_ms: timing::MEASUREMENT_INTERVAL_MS,
            persistent_fault_reads: timing::PERSISTENT_FAULT_READS,
        }
    }
}

/// Complete device configuration
///
/// The smoothing window size is the one setting not carried here: it is a
/// compile-time parameter of [`Device`](crate::device::Device) so the
/// filter can live in a fixed-size ring without allocation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Analog front end
    pub adc: AdcConfig,
    /// Button input and gesture thresholds
    pub button: ButtonConfig,
    /// Warm-up and baseline validation
    pub calibration: CalibrationConfig,
    /// MQ-3 response curve
    pub curve: ResponseCurve,
    /// Measurement cadence and fault surfacing
    pub sampling: SamplingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let config = DeviceConfig::default();
        assert_eq!(config.adc.pin, 34);
        assert_eq!(config.button.pin, 0);
        assert!(config.button.active_low);
        assert_eq!(config.calibration.warmup_ms, 20_000);
        assert_eq!(config.sampling.measurement_interval_ms, 1000);
    }

    #[test]
    fn baseline_band_is_inside_the_supply_rail() {
        let config = CalibrationConfig::default();
        assert!(config.baseline_min_volts > 0.0);
        assert!(config.baseline_max_volts < sensor::ADC_REFERENCE_VOLTS);
    }
}
