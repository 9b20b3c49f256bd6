//! Host simulator for the BreathSense device loop
//!
//! Runs the real core against a synthetic MQ-3 and a console sink: a long
//! press powers the device on, calibration establishes the clean-air
//! baseline, a simulated breath sample drifts the sensor voltage up and
//! back down, and a final long press powers off. The warm-up is shortened
//! so the whole run takes about twenty seconds of wall clock.
//!
//! ```bash
//! RUST_LOG=info cargo run -p breathsense-sim
//! ```

use std::{thread, time::Duration};

use breathsense_core::{
    config::{AdcConfig, CalibrationConfig},
    constants::timing::POLL_INTERVAL_MS,
    time::{Clock, SystemClock},
    AnalogSource, ButtonSource, ConcentrationEstimate, Device, DeviceConfig, SensorFault,
    StatusEvent, StatusSink,
};

/// Synthetic MQ-3: clean-air level, ADC noise, and one breath event
struct SimulatedMq3 {
    adc: AdcConfig,
    clean_air_volts: f32,
    /// Peak voltage the breath event adds on top of clean air
    breath_peak_volts: f32,
    /// Start and end of the breath event (ms)
    breath_window: (u64, u64),
    /// Current simulation time, fed in by the loop (ms)
    now: u64,
    /// xorshift32 state for deterministic ADC noise
    rng: u32,
}

impl SimulatedMq3 {
    fn new(adc: AdcConfig, breath_window: (u64, u64)) -> Self {
        Self {
            adc,
            clean_air_volts: 1.5,
            breath_peak_volts: 1.2,
            breath_window,
            now: 0,
            rng: 0x1234_5678,
        }
    }

    /// Deterministic +-10mV of converter noise
    fn noise(&mut self) -> f32 {
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng = x;
        (x as f32 / u32::MAX as f32 - 0.5) * 0.02
    }

    /// Triangular rise and fall of the breath event, 0..1
    fn breath_envelope(&self) -> f32 {
        let (start, end) = self.breath_window;
        if self.now < start || self.now >= end {
            return 0.0;
        }
        let t = (self.now - start) as f32 / (end - start) as f32;
        if t < 0.5 {
            t * 2.0
        } else {
            (1.0 - t) * 2.0
        }
    }
}

impl AnalogSource for SimulatedMq3 {
    fn read_raw(&mut self) -> nb::Result<u16, SensorFault> {
        let volts =
            self.clean_air_volts + self.breath_envelope() * self.breath_peak_volts + self.noise();
        let fraction = (volts / self.adc.reference_volts).clamp(0.0, 1.0);
        Ok((fraction * self.adc.full_scale as f32) as u16)
    }
}

/// Button held during fixed windows of the simulation timeline
struct ScriptedButton {
    held_windows: [(u64, u64); 2],
    now: u64,
}

impl ButtonSource for ScriptedButton {
    fn is_pressed(&mut self) -> bool {
        self.held_windows
            .iter()
            .any(|&(start, end)| self.now >= start && self.now < end)
    }
}

/// Renders everything the device shows onto the log
struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn status(&mut self, event: StatusEvent) {
        log::info!("display: [{}]", event.render());
    }

    fn measurement(&mut self, estimate: &ConcentrationEstimate) {
        log::info!(
            "display: {:.3} mg/L  ({:.0} ppm, {:.3}% BAC)",
            estimate.mg_per_l,
            estimate.ppm(),
            estimate.bac_percent(),
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Shortened warm-up; everything else is the shipped default
    let config = DeviceConfig {
        calibration: CalibrationConfig {
            warmup_ms: 3000,
            ..CalibrationConfig::default()
        },
        ..DeviceConfig::default()
    };

    let mut device: Device = Device::new(config);
    let mut sensor = SimulatedMq3::new(config.adc, (8_000, 12_000));
    let mut button = ScriptedButton {
        // Power on with a long press, power off with another near the end
        held_windows: [(500, 2_200), (15_000, 17_000)],
        now: 0,
    };
    let mut sink = ConsoleSink;
    let clock = SystemClock::new();

    log::info!("simulation starting: long press at 0.5s, breath at 8s, power off at 15s");

    loop {
        let now = clock.now();
        sensor.now = now;
        button.now = now;

        device.tick(&mut sensor, &mut button, &mut sink, now);

        if now > 18_000 {
            break;
        }
        thread::sleep(Duration::from_millis(POLL_INTERVAL_MS));
    }

    log::info!("simulation finished");
}
