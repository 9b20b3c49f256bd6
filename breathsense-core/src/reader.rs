//! Analog front end: raw converter counts to volts
//!
//! Thin and stateless. The linear mapping is the only thing that happens
//! here; smoothing and estimation live downstream.

use crate::{
    config::AdcConfig,
    errors::{DeviceError, DeviceResult},
    time::Timestamp,
    traits::AnalogSource,
};

/// One raw sample from the gas sensor
///
/// Immutable once created; consumed and discarded within the cycle that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Pin voltage (V)
    pub volts: f32,
    /// When the sample was taken
    pub timestamp: Timestamp,
}

/// Converts raw counts from an [`AnalogSource`] into voltages
#[derive(Debug, Clone, Copy)]
pub struct AnalogReader {
    cfg: AdcConfig,
}

impl AnalogReader {
    /// Create a reader for the configured front end
    pub const fn new(cfg: AdcConfig) -> Self {
        Self { cfg }
    }

    /// Take one sample
    ///
    /// Any driver failure, including `WouldBlock`, surfaces as the
    /// transient [`DeviceError::SensorReadFault`]: the caller skips the
    /// tick and retries on the next one.
    pub fn sample<S: AnalogSource>(
        &self,
        source: &mut S,
        now: Timestamp,
    ) -> DeviceResult<SensorReading> {
        let raw = source
            .read_raw()
            .map_err(|_| DeviceError::SensorReadFault)?;

        Ok(SensorReading {
            volts: self.counts_to_volts(raw),
            timestamp: now,
        })
    }

    /// Linear count-to-voltage mapping, clamped at full scale
    fn counts_to_volts(&self, raw: u16) -> f32 {
        let clamped = raw.min(self.cfg.full_scale);
        clamped as f32 * self.cfg.reference_volts / self.cfg.full_scale as f32
    }
}
