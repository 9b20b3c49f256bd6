//! Hardware seams for the device core
//!
//! These traits keep the core independent of any particular HAL: an
//! ESP32 ADC driver, a Linux IIO channel, and a scripted test double all
//! implement the same two input traits, and anything from an OLED to a
//! log stream can be the output sink. Keep them simple - the device needs
//! exactly three collaborators.

use core::fmt::Write as _;

use heapless::String;

use crate::{curve::ConcentrationEstimate, errors::DeviceError};

/// Driver-level failure reading the analog input
///
/// Deliberately carries no detail: the loop's only response is to skip
/// the tick and retry, whatever the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorFault;

/// Raw analog input carrying the gas-sensor signal
///
/// Implementations read the configured pin and return the raw converter
/// count; the core maps counts to volts. `WouldBlock` is treated the same
/// as a fault: skip this tick, sample again on the next one.
pub trait AnalogSource {
    /// Read the current raw conversion
    fn read_raw(&mut self) -> nb::Result<u16, SensorFault>;
}

/// Logical button level, polarity already normalized
pub trait ButtonSource {
    /// True while the button is held down
    fn is_pressed(&mut self) -> bool;
}

/// Maximum rendered length of a status event
pub const MAX_STATUS_LEN: usize = 64;

/// Discrete status events for the display/log sink
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusEvent {
    /// Calibration finished; the device is measuring
    On,
    /// The device powered down
    Off,
    /// Warm-up and baseline establishment started
    Calibrating,
    /// An error worth showing the user
    Error(DeviceError),
}

impl StatusEvent {
    /// Render the event as display text without allocating
    ///
    /// Produces `"ON"`, `"OFF"`, `"CALIBRATING"`, or `"ERROR: <reason>"`.
    /// An error message that overflows the buffer is truncated.
    pub fn render(&self) -> String<MAX_STATUS_LEN> {
        let mut out = String::new();
        match self {
            Self::On => {
                let _ = out.push_str("ON");
            }
            Self::Off => {
                let _ = out.push_str("OFF");
            }
            Self::Calibrating => {
                let _ = out.push_str("CALIBRATING");
            }
            Self::Error(err) => {
                let _ = write!(out, "ERROR: {err}");
            }
        }
        out
    }
}

/// Output sink for status events and periodic measurements
///
/// The core treats this purely as an output: rendering details (pixels,
/// fonts, persistence to a log stream) live behind it.
pub trait StatusSink {
    /// Show a discrete status event
    fn status(&mut self, event: StatusEvent);

    /// Show one measurement
    fn measurement(&mut self, estimate: &ConcentrationEstimate);
}
