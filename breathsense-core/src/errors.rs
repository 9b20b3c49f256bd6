//! Error Types for the Device Control Loop
//!
//! Errors here are sized for a control loop that must keep running:
//!
//! 1. **Small and `Copy`**: every variant carries only inline scalars, so
//!    errors can be returned from the hot path and stored in status events
//!    without move semantics complications.
//!
//! 2. **No Heap Allocation**: no `String`, no boxed sources. Rendering for
//!    the display sink happens into a bounded buffer at the edge.
//!
//! 3. **Locally Handled**: nothing propagates out of the loop. Each tick
//!    inspects the result of its own operations and decides between
//!    skip-and-retry, suppress-output, and mode fallback.
//!
//! ## Error Severity
//!
//! - [`DeviceError::SensorReadFault`] is transient: the tick is skipped and
//!   the next tick retries. It only becomes user-visible when persistent.
//! - [`DeviceError::CalibrationOutOfRange`] is fatal to one calibration
//!   attempt: the device surfaces it and falls back to Off.
//! - [`DeviceError::InvalidEstimate`] suppresses a single reading; it is
//!   never shown to the user as a number.

use thiserror_no_std::Error;

/// Result type for device operations
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Errors the control loop handles locally - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DeviceError {
    /// Transient hardware read failure; skip this tick, retry on the next
    #[error("sensor read fault")]
    SensorReadFault,

    /// Calibration produced a baseline outside the sensor's operating band
    #[error("baseline {volts}V outside range [{min}, {max}]")]
    CalibrationOutOfRange {
        /// The smoothed clean-air voltage that failed validation
        volts: f32,
        /// Lower bound of the valid band; below it the sensor is likely disconnected
        min: f32,
        /// Upper bound of the valid band; above it the sensor is saturated
        max: f32,
    },

    /// Degenerate resistance ratio during estimation; the reading is suppressed
    #[error("invalid estimate: degenerate sensor ratio")]
    InvalidEstimate,
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::SensorReadFault => defmt::write!(fmt, "sensor read fault"),
            Self::CalibrationOutOfRange { volts, min, max } => {
                defmt::write!(fmt, "baseline {}V outside [{}, {}]", volts, min, max)
            }
            Self::InvalidEstimate => defmt::write!(fmt, "invalid estimate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_copy_and_comparable() {
        let err = DeviceError::CalibrationOutOfRange {
            volts: 0.0,
            min: 0.1,
            max: 3.2,
        };
        let copy = err;
        assert_eq!(err, copy);
    }

    #[cfg(feature = "std")]
    #[test]
    fn out_of_range_message_names_the_band() {
        let err = DeviceError::CalibrationOutOfRange {
            volts: 0.0,
            min: 0.1,
            max: 3.2,
        };
        let text = format!("{err}");
        assert!(text.contains("0.1"));
        assert!(text.contains("3.2"));
    }
}
