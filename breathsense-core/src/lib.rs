//! Device core for a breath-alcohol meter built on the MQ-3 gas sensor
//!
//! Samples an analog gas sensor, establishes a clean-air baseline over a
//! fixed warm-up, smooths sample noise, converts voltage to concentration
//! through the sensor's power-law response curve, and runs the
//! Off/Calibrating/Measuring state machine - all from a single
//! cooperative control loop the platform drives.
//!
//! Key constraints:
//! - `no_std` capable; the `std` feature exists for host tests and simulation
//! - No heap allocation in the control loop
//! - Every fallible operation returns a `Result` the loop handles locally;
//!   no single-tick failure stops the loop
//!
//! Hardware lives behind three traits ([`AnalogSource`], [`ButtonSource`],
//! [`StatusSink`]), so the same core runs against an ESP32 ADC, a host
//! simulator, or scripted test doubles:
//!
//! ```no_run
//! use breathsense_core::{
//!     AnalogSource, ButtonSource, ConcentrationEstimate, Device, DeviceConfig, SensorFault,
//!     StatusEvent, StatusSink,
//! };
//!
//! struct Adc;
//! impl AnalogSource for Adc {
//!     fn read_raw(&mut self) -> nb::Result<u16, SensorFault> {
//!         Ok(1861) // ~1.5V on a 12-bit, 3.3V converter
//!     }
//! }
//!
//! struct Button;
//! impl ButtonSource for Button {
//!     fn is_pressed(&mut self) -> bool {
//!         false
//!     }
//! }
//!
//! struct Console;
//! impl StatusSink for Console {
//!     fn status(&mut self, event: StatusEvent) {
//!         println!("{}", event.render());
//!     }
//!     fn measurement(&mut self, estimate: &ConcentrationEstimate) {
//!         println!("{:.3} mg/L", estimate.mg_per_l);
//!     }
//! }
//!
//! let mut device: Device = Device::new(DeviceConfig::default());
//! let (mut adc, mut button, mut console) = (Adc, Button, Console);
//!
//! for now_ms in (0u64..).step_by(50) {
//!     device.tick(&mut adc, &mut button, &mut console, now_ms);
//!     // platform sleeps for the poll interval here
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod button;
pub mod calibration;
pub mod config;
pub mod constants;
pub mod curve;
pub mod device;
pub mod errors;
pub mod filter;
pub mod reader;
pub mod time;
pub mod traits;

// Public API
pub use button::Gesture;
pub use calibration::{Baseline, CalibrationStatus, Calibrator};
pub use config::DeviceConfig;
pub use curve::{ConcentrationEstimate, ResponseCurve};
pub use device::{Device, DeviceMode};
pub use errors::{DeviceError, DeviceResult};
pub use filter::MovingAverage;
pub use time::{Clock, Timestamp};
pub use traits::{AnalogSource, ButtonSource, SensorFault, StatusEvent, StatusSink};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
