//! Shared scripted hardware for integration tests
//!
//! The ADC replays a fixed sequence of conversions (holding its last
//! entry forever), the button is a plain level the test flips, and the
//! sink records everything it is shown.

#![allow(dead_code)]

use breathsense_core::{
    AnalogSource, ButtonSource, ConcentrationEstimate, Device, SensorFault, StatusEvent,
    StatusSink,
};

/// Loop poll cadence used by every scenario (ms)
pub const POLL_MS: u64 = 50;

/// One scripted ADC conversion
#[derive(Debug, Clone, Copy)]
pub enum Conversion {
    /// A successful read of this raw count
    Value(u16),
    /// A driver fault
    Fault,
}

/// Replays a scripted sequence of conversions, holding the last entry
pub struct ScriptedAdc {
    script: Vec<Conversion>,
    index: usize,
}

impl ScriptedAdc {
    /// An ADC that always converts the same raw count
    pub fn constant(raw: u16) -> Self {
        Self::new(vec![Conversion::Value(raw)])
    }

    /// An ADC that always faults
    pub fn broken() -> Self {
        Self::new(vec![Conversion::Fault])
    }

    /// Replay `script` in order, repeating the final entry forever
    pub fn new(script: Vec<Conversion>) -> Self {
        assert!(!script.is_empty(), "script must have at least one entry");
        Self { script, index: 0 }
    }
}

impl AnalogSource for ScriptedAdc {
    fn read_raw(&mut self) -> nb::Result<u16, SensorFault> {
        let entry = self.script[self.index];
        if self.index + 1 < self.script.len() {
            self.index += 1;
        }
        match entry {
            Conversion::Value(raw) => Ok(raw),
            Conversion::Fault => Err(nb::Error::Other(SensorFault)),
        }
    }
}

/// A button level the test sets directly
pub struct ScriptedButton {
    /// Current logical level (true = held)
    pub pressed: bool,
}

impl ScriptedButton {
    /// A button that starts released
    pub fn released() -> Self {
        Self { pressed: false }
    }
}

impl ButtonSource for ScriptedButton {
    fn is_pressed(&mut self) -> bool {
        self.pressed
    }
}

/// Records every status event and measurement the device emits
#[derive(Default)]
pub struct RecordingSink {
    /// Rendered status texts, in order
    pub statuses: Vec<String>,
    /// Raw status events, in order
    pub events: Vec<StatusEvent>,
    /// Every measurement shown
    pub measurements: Vec<ConcentrationEstimate>,
}

impl RecordingSink {
    /// Number of recorded statuses starting with "ERROR"
    pub fn error_count(&self) -> usize {
        self.statuses.iter().filter(|s| s.starts_with("ERROR")).count()
    }
}

impl StatusSink for RecordingSink {
    fn status(&mut self, event: StatusEvent) {
        self.statuses.push(event.render().as_str().to_owned());
        self.events.push(event);
    }

    fn measurement(&mut self, estimate: &ConcentrationEstimate) {
        self.measurements.push(*estimate);
    }
}

/// Advance the loop `ticks` times at the poll cadence
pub fn run_ticks(
    device: &mut Device,
    adc: &mut ScriptedAdc,
    button: &mut ScriptedButton,
    sink: &mut RecordingSink,
    now: &mut u64,
    ticks: u64,
) {
    for _ in 0..ticks {
        *now += POLL_MS;
        device.tick(adc, button, sink, *now);
    }
}

/// Hold the button past the long threshold, then release
pub fn long_press(
    device: &mut Device,
    adc: &mut ScriptedAdc,
    button: &mut ScriptedButton,
    sink: &mut RecordingSink,
    now: &mut u64,
) {
    button.pressed = true;
    run_ticks(device, adc, button, sink, now, 32); // 1.6s held
    button.pressed = false;
    run_ticks(device, adc, button, sink, now, 1);
}

/// Tap the button: past the debounce floor, well under the long threshold
pub fn short_press(
    device: &mut Device,
    adc: &mut ScriptedAdc,
    button: &mut ScriptedButton,
    sink: &mut RecordingSink,
    now: &mut u64,
) {
    button.pressed = true;
    run_ticks(device, adc, button, sink, now, 4); // 200ms held
    button.pressed = false;
    run_ticks(device, adc, button, sink, now, 1);
}
