//! Button Gesture Classification
//!
//! One physical button drives the whole device, so the difference between
//! a short and a long press carries all the intent. Classification is an
//! explicit timer-driven edge-detection state machine rather than inline
//! timing logic in the loop:
//!
//! ```text
//! Idle --press--> Held(since) --hold past long threshold--> emit Long
//!                    |
//!                 release
//!                    |--held < debounce floor --> nothing (noise)
//!                    |--held < long threshold --> emit Short
//! ```
//!
//! A long press fires the moment the threshold is crossed, while the
//! button is still held. That matters during calibration: the abort must
//! happen immediately, not whenever the user lets go. Once fired, the
//! release of the same hold emits nothing.
//!
//! The detector consumes the logical pressed level; electrical polarity
//! (active-low on a pulled-up pin) is normalized by the platform adapter.

use crate::time::Timestamp;

/// A classified button gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Released after the debounce floor but before the long threshold
    Short,
    /// Held past the long threshold
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    Idle,
    Held {
        since: Timestamp,
        long_fired: bool,
    },
}

/// Debounced short/long press classifier
#[derive(Debug, Clone)]
pub struct GestureDetector {
    debounce_ms: u64,
    long_press_ms: u64,
    state: PressState,
}

impl GestureDetector {
    /// Create a detector with the given debounce floor and long threshold
    pub const fn new(debounce_ms: u64, long_press_ms: u64) -> Self {
        Self {
            debounce_ms,
            long_press_ms,
            state: PressState::Idle,
        }
    }

    /// Feed the current logical level; returns a gesture when one completes
    ///
    /// Call once per loop tick. The poll cadence bounds how precisely the
    /// long threshold is detected, which is why the loop should tick at
    /// 250 ms or faster.
    pub fn update(&mut self, pressed: bool, now: Timestamp) -> Option<Gesture> {
        match (self.state, pressed) {
            (PressState::Idle, false) => None,
            (PressState::Idle, true) => {
                self.state = PressState::Held {
                    since: now,
                    long_fired: false,
                };
                None
            }
            (PressState::Held { since, long_fired }, true) => {
                if !long_fired && now.saturating_sub(since) >= self.long_press_ms {
                    self.state = PressState::Held {
                        since,
                        long_fired: true,
                    };
                    Some(Gesture::Long)
                } else {
                    None
                }
            }
            (PressState::Held { since, long_fired }, false) => {
                self.state = PressState::Idle;
                let held_ms = now.saturating_sub(since);

                if long_fired || held_ms < self.debounce_ms {
                    None
                } else if held_ms >= self.long_press_ms {
                    // Released in the same tick window the threshold was
                    // crossed; still a long press.
                    Some(Gesture::Long)
                } else {
                    Some(Gesture::Short)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> GestureDetector {
        GestureDetector::new(50, 1500)
    }

    #[test]
    fn idle_stays_idle() {
        let mut d = detector();
        assert_eq!(d.update(false, 0), None);
        assert_eq!(d.update(false, 100), None);
    }

    #[test]
    fn sub_debounce_blip_is_noise() {
        let mut d = detector();
        assert_eq!(d.update(true, 0), None);
        assert_eq!(d.update(false, 20), None);
    }

    #[test]
    fn short_press_classifies_on_release() {
        let mut d = detector();
        assert_eq!(d.update(true, 0), None);
        assert_eq!(d.update(true, 100), None);
        assert_eq!(d.update(false, 200), Some(Gesture::Short));
    }

    #[test]
    fn long_press_fires_while_still_held() {
        let mut d = detector();
        assert_eq!(d.update(true, 0), None);
        assert_eq!(d.update(true, 1000), None);
        assert_eq!(d.update(true, 1500), Some(Gesture::Long));

        // Holding further and releasing emit nothing more
        assert_eq!(d.update(true, 3000), None);
        assert_eq!(d.update(false, 3100), None);
    }

    #[test]
    fn release_exactly_at_threshold_is_long() {
        let mut d = detector();
        d.update(true, 0);
        assert_eq!(d.update(false, 1500), Some(Gesture::Long));
    }

    #[test]
    fn detector_is_reusable_after_a_gesture() {
        let mut d = detector();
        d.update(true, 0);
        assert_eq!(d.update(false, 200), Some(Gesture::Short));

        d.update(true, 1000);
        assert_eq!(d.update(true, 2500), Some(Gesture::Long));
        d.update(false, 2600);

        d.update(true, 5000);
        assert_eq!(d.update(false, 5200), Some(Gesture::Short));
    }
}
