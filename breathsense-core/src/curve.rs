//! MQ-3 Resistance-Ratio Response Curve
//!
//! ## Physics Background
//!
//! The MQ-3 is a tin-dioxide surface that loses electrical resistance as
//! alcohol vapor adsorbs onto it. The module exposes that resistance
//! through a voltage divider against a fixed load resistor:
//!
//! ```text
//! Rs = RL * (Vcc - V) / V
//! ```
//!
//! Concentration is recovered from the dimensionless ratio of the live
//! resistance to the clean-air baseline resistance `R0 = Rs(baseline)`,
//! via the datasheet's log-log (power-law) sensitivity curve:
//!
//! ```text
//! mg/L = a * (Rs / R0)^b        (b < 0)
//! ```
//!
//! At the baseline itself the ratio is exactly 1 and the curve reads its
//! floor `a` - the clean-air minimum.
//!
//! ## Design
//!
//! The curve is a pure, configuration-driven function: all constants live
//! in [`ResponseCurve`] so unit tests substitute synthetic curves without
//! hardware, and the device carries exactly one copy inside its config.
//! Degenerate inputs (voltage at or beyond the rails, non-positive ratio)
//! yield [`DeviceError::InvalidEstimate`] instead of a numeric fault.

use libm::powf;

use crate::{
    calibration::Baseline,
    constants::sensor,
    errors::{DeviceError, DeviceResult},
    time::Timestamp,
};

/// Power-law fit of the sensor's sensitivity curve plus divider constants
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponseCurve {
    /// Scale constant `a` (mg/L at ratio 1); also the curve's floor
    pub scale_mg_l: f32,
    /// Exponent `b`; negative for resistance-drop sensors like the MQ-3
    pub exponent: f32,
    /// Load resistor of the divider (ohms)
    pub load_ohms: f32,
    /// Divider supply voltage (V)
    pub supply_volts: f32,
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self {
            scale_mg_l: sensor::CURVE_SCALE_MG_L,
            exponent: sensor::CURVE_EXPONENT,
            load_ohms: sensor::LOAD_RESISTANCE_OHMS,
            supply_volts: sensor::ADC_REFERENCE_VOLTS,
        }
    }
}

impl ResponseCurve {
    /// Create a curve with custom constants (synthetic curves in tests)
    pub const fn new(scale_mg_l: f32, exponent: f32, load_ohms: f32, supply_volts: f32) -> Self {
        Self {
            scale_mg_l,
            exponent,
            load_ohms,
            supply_volts,
        }
    }

    /// Sensor resistance from the divider, `Rs = RL * (Vcc - V) / V`
    ///
    /// Returns `None` outside the open interval `(0, Vcc)`, where the
    /// divider equation degenerates.
    fn sensor_resistance(&self, volts: f32) -> Option<f32> {
        if !volts.is_finite() || volts <= 0.0 || volts >= self.supply_volts {
            return None;
        }
        Some(self.load_ohms * (self.supply_volts - volts) / volts)
    }

    /// Resistance ratio `Rs / R0` for a live voltage against the baseline
    pub fn ratio(&self, volts: f32, baseline: Baseline) -> Option<f32> {
        let rs = self.sensor_resistance(volts)?;
        let r0 = self.sensor_resistance(baseline.volts())?;
        let ratio = rs / r0;
        (ratio > 0.0 && ratio.is_finite()).then_some(ratio)
    }

    /// Estimate breath-alcohol concentration from a smoothed voltage
    ///
    /// Pure and deterministic. A degenerate ratio yields
    /// [`DeviceError::InvalidEstimate`]; the loop suppresses that tick
    /// rather than displaying it.
    pub fn estimate(
        &self,
        volts: f32,
        baseline: Baseline,
        timestamp: Timestamp,
    ) -> DeviceResult<ConcentrationEstimate> {
        let ratio = self
            .ratio(volts, baseline)
            .ok_or(DeviceError::InvalidEstimate)?;

        let mg_per_l = self.scale_mg_l * powf(ratio, self.exponent);
        if !mg_per_l.is_finite() {
            return Err(DeviceError::InvalidEstimate);
        }

        Ok(ConcentrationEstimate {
            mg_per_l,
            timestamp,
        })
    }
}

/// One estimated breath-alcohol reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConcentrationEstimate {
    /// Breath-alcohol concentration (mg/L)
    pub mg_per_l: f32,
    /// When the underlying sample was taken
    pub timestamp: Timestamp,
}

impl ConcentrationEstimate {
    /// Concentration in parts-per-million
    pub fn ppm(&self) -> f32 {
        self.mg_per_l * sensor::MG_L_TO_PPM
    }

    /// Blood alcohol concentration equivalent (percent)
    pub fn bac_percent(&self) -> f32 {
        self.mg_per_l * sensor::MG_L_TO_BAC_PERCENT
    }

    /// Concentration in grams per millilitre
    pub fn grams_per_ml(&self) -> f32 {
        self.mg_per_l * sensor::MG_L_TO_G_PER_ML
    }
}
