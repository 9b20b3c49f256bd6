//! Constants for the BreathSense core
//!
//! Centralized, documented constants consumed at startup through
//! [`DeviceConfig`](crate::config::DeviceConfig). There is no dynamic
//! reconfiguration at runtime; everything the device needs is named here
//! with its source and rationale.
//!
//! ## Organization
//!
//! - **Sensor**: MQ-3 electrical characteristics and response-curve fit
//! - **Timing**: warm-up, cadences, and button gesture thresholds

/// MQ-3 electrical characteristics, response-curve fit, and unit conversions.
pub mod sensor;

/// Warm-up duration, sampling cadences, and button gesture thresholds.
pub mod timing;

// Re-export commonly used constants for convenience
pub use sensor::{
    ADC_FULL_SCALE, ADC_REFERENCE_VOLTS, ANALOG_PIN, BASELINE_MAX_VOLTS, BASELINE_MIN_VOLTS,
    BUTTON_PIN, CURVE_EXPONENT, CURVE_SCALE_MG_L, DEFAULT_SMOOTHING_WINDOW, LOAD_RESISTANCE_OHMS,
};

pub use timing::{
    BUTTON_DEBOUNCE_MS, CALIBRATION_SAMPLE_INTERVAL_MS, LONG_PRESS_MS, MEASUREMENT_INTERVAL_MS,
    POLL_INTERVAL_MS, WARMUP_DURATION_MS,
};
