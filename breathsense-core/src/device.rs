//! Device Mode State Machine and Control-Loop Body
//!
//! ## Overview
//!
//! One [`Device`] owns every piece of mutable state the meter has: the
//! mode, the baseline, the active smoothing window, and the in-flight
//! calibrator. The platform runs a single cooperative loop - read the
//! clock, call [`Device::tick`], sleep for the poll interval - and the
//! device does everything else from inside that tick. No locks, no second
//! writer, no operation that blocks.
//!
//! ## Mode Transitions
//!
//! ```text
//!                  long press            calibration ok
//!        Off ───────────────▶ Calibrating ─────────────▶ Measuring
//!         ▲                      │    ▲                      │
//!         │     long press /     │    │     short press      │
//!         └──────────────────────┘    └──────────────────────┘
//!               calibration failed         (recalibrate)
//!         ▲                                                  │
//!         └────────────────── long press ────────────────────┘
//! ```
//!
//! Entering a mode installs a fresh smoothing window, so calibration
//! noise never leaks into measurement smoothing or vice versa. Leaving
//! for Off discards all transient state: baseline, window, calibrator.
//!
//! ## Failure Behavior
//!
//! Every per-tick failure is handled locally and the loop keeps running:
//! a read fault skips the tick (surfaced only once it turns persistent),
//! a degenerate estimate suppresses one reading, a bad baseline falls the
//! device back to Off with the error on the sink.

use crate::{
    button::{Gesture, GestureDetector},
    calibration::{Baseline, CalibrationStatus, Calibrator},
    config::DeviceConfig,
    filter::MovingAverage,
    reader::AnalogReader,
    time::Timestamp,
    traits::{AnalogSource, ButtonSource, StatusEvent, StatusSink},
};

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {{}};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{}};
}

/// Power/calibration/measurement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceMode {
    /// Powered down; only a long press does anything
    Off,
    /// Warming up and establishing the clean-air baseline
    Calibrating,
    /// Ticking measurements to the sink
    Measuring,
}

/// The breath-alcohol meter core
///
/// `WINDOW` is the smoothing window size in samples; the default of 8
/// matches [`DEFAULT_SMOOTHING_WINDOW`](crate::constants::sensor::DEFAULT_SMOOTHING_WINDOW).
pub struct Device<const WINDOW: usize = 8> {
    config: DeviceConfig,
    reader: AnalogReader,
    button: GestureDetector,
    mode: DeviceMode,
    baseline: Option<Baseline>,
    calibrator: Option<Calibrator<WINDOW>>,
    filter: MovingAverage<WINDOW>,
    last_measurement_at: Option<Timestamp>,
    consecutive_faults: u32,
    fault_surfaced: bool,
}

impl<const WINDOW: usize> Device<WINDOW> {
    /// Create a device in the Off mode
    pub fn new(config: DeviceConfig) -> Self {
        Self {
            reader: AnalogReader::new(config.adc),
            button: GestureDetector::new(config.button.debounce_ms, config.button.long_press_ms),
            config,
            mode: DeviceMode::Off,
            baseline: None,
            calibrator: None,
            filter: MovingAverage::new(),
            last_measurement_at: None,
            consecutive_faults: 0,
            fault_surfaced: false,
        }
    }

    /// Current mode
    pub fn mode(&self) -> DeviceMode {
        self.mode
    }

    /// The active baseline, if calibration has completed
    pub fn baseline(&self) -> Option<Baseline> {
        self.baseline
    }

    /// Advance the device by one loop tick
    ///
    /// Polls the button, then does whatever the current mode calls for:
    /// nothing (Off), one calibration sub-tick (Calibrating), or one
    /// measurement when the cadence timer elapses (Measuring). Never
    /// blocks and never panics; per-tick failures are handled here.
    pub fn tick<A, B, S>(&mut self, adc: &mut A, button: &mut B, sink: &mut S, now: Timestamp)
    where
        A: AnalogSource,
        B: ButtonSource,
        S: StatusSink,
    {
        if let Some(gesture) = self.button.update(button.is_pressed(), now) {
            self.on_gesture(gesture, sink, now);
        }

        match self.mode {
            DeviceMode::Off => {}
            DeviceMode::Calibrating => self.calibration_tick(adc, sink, now),
            DeviceMode::Measuring => self.measurement_tick(adc, sink, now),
        }
    }

    fn on_gesture<S: StatusSink>(&mut self, gesture: Gesture, sink: &mut S, now: Timestamp) {
        match (self.mode, gesture) {
            // Power on; measurement is only reachable through calibration
            (DeviceMode::Off, Gesture::Long) => self.enter_calibrating(sink, now),

            // Recalibrate, discarding the previous baseline
            (DeviceMode::Measuring, Gesture::Short) => self.enter_calibrating(sink, now),

            // Power off from anywhere, aborting a calibration in flight
            (DeviceMode::Measuring, Gesture::Long) | (DeviceMode::Calibrating, Gesture::Long) => {
                self.discard_transient_state();
                self.mode = DeviceMode::Off;
                sink.status(StatusEvent::Off);
                log_info!("device off");
            }

            // A short press while Off or mid-warm-up means nothing
            (DeviceMode::Off, Gesture::Short) | (DeviceMode::Calibrating, Gesture::Short) => {}
        }
    }

    fn enter_calibrating<S: StatusSink>(&mut self, sink: &mut S, now: Timestamp) {
        self.discard_transient_state();
        self.calibrator = Some(Calibrator::new(self.config.calibration, now));
        self.mode = DeviceMode::Calibrating;
        sink.status(StatusEvent::Calibrating);
        log_info!("calibration started");
    }

    fn enter_measuring<S: StatusSink>(&mut self, baseline: Baseline, sink: &mut S) {
        self.discard_transient_state();
        self.baseline = Some(baseline);
        self.mode = DeviceMode::Measuring;
        sink.status(StatusEvent::On);
        log_info!("calibration complete, baseline {}V", baseline.volts());
    }

    /// Drop everything that must not survive a mode change
    fn discard_transient_state(&mut self) {
        self.baseline = None;
        self.calibrator = None;
        self.filter = MovingAverage::new();
        self.last_measurement_at = None;
        self.consecutive_faults = 0;
        self.fault_surfaced = false;
    }

    fn calibration_tick<A, S>(&mut self, adc: &mut A, sink: &mut S, now: Timestamp)
    where
        A: AnalogSource,
        S: StatusSink,
    {
        let due = match self.calibrator.as_ref() {
            Some(calibrator) => calibrator.sample_due(now),
            None => return,
        };
        if !due {
            return;
        }

        // A failed read just skips this sub-tick; the cadence timer was
        // not advanced, so the next tick retries.
        let reading = match self.reader.sample(adc, now) {
            Ok(reading) => reading,
            Err(_) => return,
        };

        let status = match self.calibrator.as_mut() {
            Some(calibrator) => calibrator.step(reading.volts, now),
            None => return,
        };

        match status {
            CalibrationStatus::Warming { .. } => {}
            CalibrationStatus::Complete(baseline) => self.enter_measuring(baseline, sink),
            CalibrationStatus::Failed(err) => {
                log_warn!("calibration failed: {:?}", err);
                sink.status(StatusEvent::Error(err));
                self.discard_transient_state();
                self.mode = DeviceMode::Off;
            }
        }
    }

    fn measurement_tick<A, S>(&mut self, adc: &mut A, sink: &mut S, now: Timestamp)
    where
        A: AnalogSource,
        S: StatusSink,
    {
        let Some(baseline) = self.baseline else {
            // Unreachable while Measuring; enter_measuring always sets it
            return;
        };

        let due = match self.last_measurement_at {
            None => true,
            Some(at) => now.saturating_sub(at) >= self.config.sampling.measurement_interval_ms,
        };
        if !due {
            return;
        }

        let reading = match self.reader.sample(adc, now) {
            Ok(reading) => {
                self.consecutive_faults = 0;
                self.fault_surfaced = false;
                reading
            }
            Err(err) => {
                // Transient: skip the tick, stay in Measuring. Surface the
                // fault once if it keeps happening.
                self.consecutive_faults = self.consecutive_faults.saturating_add(1);
                if self.consecutive_faults >= self.config.sampling.persistent_fault_reads
                    && !self.fault_surfaced
                {
                    log_warn!("persistent sensor fault after {} reads", self.consecutive_faults);
                    sink.status(StatusEvent::Error(err));
                    self.fault_surfaced = true;
                }
                return;
            }
        };

        self.last_measurement_at = Some(now);
        let smoothed = self.filter.push(reading.volts);

        match self.config.curve.estimate(smoothed, baseline, now) {
            Ok(estimate) => sink.measurement(&estimate),
            Err(_) => {
                // Degenerate ratio; suppress this reading rather than
                // display it
                log_warn!("estimate suppressed at {}V", smoothed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SensorFault;

    struct ConstantAdc(u16);

    impl AnalogSource for ConstantAdc {
        fn read_raw(&mut self) -> nb::Result<u16, SensorFault> {
            Ok(self.0)
        }
    }

    struct Released;

    impl ButtonSource for Released {
        fn is_pressed(&mut self) -> bool {
            false
        }
    }

    struct NullSink;

    impl StatusSink for NullSink {
        fn status(&mut self, _event: StatusEvent) {}
        fn measurement(&mut self, _estimate: &crate::curve::ConcentrationEstimate) {}
    }

    #[test]
    fn boots_off_with_no_baseline() {
        let device: Device = Device::new(DeviceConfig::default());
        assert_eq!(device.mode(), DeviceMode::Off);
        assert!(device.baseline().is_none());
    }

    #[test]
    fn off_ticks_do_nothing() {
        let mut device: Device = Device::new(DeviceConfig::default());
        let mut adc = ConstantAdc(2000);
        let mut button = Released;
        let mut sink = NullSink;

        for tick in 0..100 {
            device.tick(&mut adc, &mut button, &mut sink, tick * 50);
        }
        assert_eq!(device.mode(), DeviceMode::Off);
        assert!(device.baseline().is_none());
    }
}
