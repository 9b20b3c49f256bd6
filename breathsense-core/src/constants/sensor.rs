//! MQ-3 Sensor Specifications and Conversion Constants
//!
//! Electrical characteristics of the MQ-3 alcohol sensor module and the
//! constants of its documented response curve. Values trace back to the
//! MQ-3 datasheet (Hanwei Electronics) and the ESP32 board the reference
//! device was built on.

// ===== PIN ASSIGNMENT =====

/// Default analog input pin for the MQ-3 signal output.
///
/// GPIO34 is input-only on the ESP32 and wired to ADC1, which stays usable
/// alongside WiFi. Any ADC-capable pin works; this is the board default.
pub const ANALOG_PIN: u8 = 34;

/// Default button input pin.
///
/// GPIO0 is the BOOT button present on most ESP32 dev boards, pulled up
/// and active-low. Using it means no extra hardware for the one-button UI.
pub const BUTTON_PIN: u8 = 0;

// ===== ADC FRONT END =====

/// ADC reference voltage (V).
///
/// Full-attenuation ESP32 ADC input range; raw counts map linearly onto
/// 0..=ADC_REFERENCE_VOLTS.
pub const ADC_REFERENCE_VOLTS: f32 = 3.3;

/// Full-scale ADC count (12-bit converter).
pub const ADC_FULL_SCALE: u16 = 4095;

// ===== LOAD CIRCUIT =====

/// Load resistor of the sensor's voltage divider (ohms).
///
/// The MQ-3 module's onboard RL. Sensor resistance is recovered from the
/// divider as `Rs = RL * (Vcc - V) / V`.
///
/// Source: module schematic (RL = 1 kOhm)
pub const LOAD_RESISTANCE_OHMS: f32 = 1000.0;

// ===== RESPONSE CURVE =====

/// Scale constant `a` of the power-law fit `mg/L = a * (Rs/R0)^b`.
///
/// Fitted against the MQ-3 datasheet sensitivity curve. At a ratio of 1
/// (live resistance equals the clean-air baseline resistance) the curve
/// reads its floor, which is this constant.
pub const CURVE_SCALE_MG_L: f32 = 0.4;

/// Exponent `b` of the power-law fit.
///
/// Negative: sensor resistance drops as alcohol concentration rises, so a
/// shrinking ratio maps to a growing concentration.
pub const CURVE_EXPONENT: f32 = -1.43068;

// ===== BASELINE OPERATING BAND =====

/// Lowest plausible clean-air baseline voltage (V).
///
/// A baseline at or near 0 V means the divider is not conducting - the
/// sensor is disconnected or unpowered. Calibration fails below this.
pub const BASELINE_MIN_VOLTS: f32 = 0.1;

/// Highest plausible clean-air baseline voltage (V).
///
/// A baseline pinned near the supply rail means the sensor is saturated
/// or shorted. Calibration fails above this.
pub const BASELINE_MAX_VOLTS: f32 = 3.2;

// ===== SMOOTHING =====

/// Default moving-average window size (samples).
///
/// Eight samples cuts sample-to-sample ADC noise without masking the
/// multi-second rise of a real breath event. Power of two so the ring
/// index wrap compiles to a mask.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 8;

// ===== UNIT CONVERSIONS =====

/// mg/L of breath alcohol to parts-per-million.
pub const MG_L_TO_PPM: f32 = 500.0;

/// mg/L of breath alcohol to blood alcohol concentration (percent).
///
/// Standard 1:2100 breath-to-blood partition ratio folded into a single
/// display factor.
pub const MG_L_TO_BAC_PERCENT: f32 = 0.2;

/// mg/L of breath alcohol to grams per millilitre.
pub const MG_L_TO_G_PER_ML: f32 = 0.002;
