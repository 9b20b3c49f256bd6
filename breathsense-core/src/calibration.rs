//! Clean-Air Baseline Establishment
//!
//! ## Overview
//!
//! The MQ-3 has no absolute scale: every concentration it reports is
//! relative to its own resistance in clean air, which drifts with heater
//! temperature, humidity, and age. Calibration runs the sensor through a
//! fixed warm-up, smoothing samples the whole way, and takes the final
//! smoothed voltage as the [`Baseline`] all later estimates divide
//! against.
//!
//! ## Tick-Driven, Not Blocking
//!
//! The warm-up is tens of seconds, but the control loop must keep polling
//! the button so a long-press can abort calibration immediately. The
//! [`Calibrator`] therefore never sleeps: the loop asks
//! [`sample_due`](Calibrator::sample_due) each tick, feeds one voltage
//! when the cadence timer elapses, and inspects the returned
//! [`CalibrationStatus`]. Aborting is just dropping the calibrator.
//!
//! ## Known Limitation
//!
//! The warm-up duration is fixed, not adaptive: it waits the configured
//! time and does not detect whether the sensor actually stabilized. A
//! convergence check (stop early once smoothed variance falls below a
//! threshold) would be an enhancement, not a correctness fix; the fixed
//! wait is the deliberate design.

use crate::{
    config::CalibrationConfig,
    errors::{DeviceError, DeviceResult},
    filter::MovingAverage,
    time::Timestamp,
};

/// Clean-air equilibrium voltage, validated at construction
///
/// The only way to obtain one is [`Baseline::try_new`], so any baseline
/// the estimator sees is already inside the sensor's operating band, and
/// estimation before calibration completes is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Baseline(f32);

impl Baseline {
    /// Validate a smoothed clean-air voltage against the operating band
    ///
    /// Too low suggests a disconnected sensor, too high a saturated one;
    /// either way the calibration attempt has failed.
    pub fn try_new(volts: f32, min: f32, max: f32) -> DeviceResult<Self> {
        if !volts.is_finite() || volts < min || volts > max {
            return Err(DeviceError::CalibrationOutOfRange { volts, min, max });
        }
        Ok(Self(volts))
    }

    /// The baseline voltage (V)
    pub fn volts(&self) -> f32 {
        self.0
    }
}

/// Progress of an in-flight calibration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationStatus {
    /// Warm-up still running; fields let a display draw progress
    Warming {
        /// Milliseconds elapsed since calibration started
        elapsed_ms: u64,
        /// Total configured warm-up duration
        total_ms: u64,
    },
    /// Warm-up finished and the smoothed voltage passed validation
    Complete(Baseline),
    /// Warm-up finished but the baseline fell outside the operating band
    Failed(DeviceError),
}

/// Tick-driven calibration engine
///
/// Created on entry to the Calibrating mode with a fresh smoothing
/// window, fed one sample per cadence tick, dropped on completion or
/// abort. Deterministic: identical sample sequences produce identical
/// baselines regardless of how the ticks were scheduled, because the
/// result is simply the mean of the last window.
#[derive(Debug, Clone)]
pub struct Calibrator<const N: usize> {
    cfg: CalibrationConfig,
    filter: MovingAverage<N>,
    started_at: Timestamp,
    last_sample_at: Option<Timestamp>,
}

impl<const N: usize> Calibrator<N> {
    /// Start a calibration at `now`
    pub fn new(cfg: CalibrationConfig, now: Timestamp) -> Self {
        Self {
            cfg,
            filter: MovingAverage::new(),
            started_at: now,
            last_sample_at: None,
        }
    }

    /// True when the cadence timer says the loop should take a sample
    pub fn sample_due(&self, now: Timestamp) -> bool {
        match self.last_sample_at {
            None => true,
            Some(at) => now.saturating_sub(at) >= self.cfg.sample_interval_ms,
        }
    }

    /// Feed one raw voltage and report progress
    ///
    /// Until the warm-up duration elapses this only smooths; on the first
    /// sample at or past the deadline the smoothed voltage is validated
    /// and becomes the baseline (or the failure).
    pub fn step(&mut self, volts: f32, now: Timestamp) -> CalibrationStatus {
        self.last_sample_at = Some(now);
        let smoothed = self.filter.push(volts);

        let elapsed_ms = now.saturating_sub(self.started_at);
        if elapsed_ms < self.cfg.warmup_ms {
            return CalibrationStatus::Warming {
                elapsed_ms,
                total_ms: self.cfg.warmup_ms,
            };
        }

        match Baseline::try_new(
            smoothed,
            self.cfg.baseline_min_volts,
            self.cfg.baseline_max_volts,
        ) {
            Ok(baseline) => CalibrationStatus::Complete(baseline),
            Err(err) => CalibrationStatus::Failed(err),
        }
    }
}
