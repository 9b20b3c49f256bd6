//! Property tests for the smoothing filter, the response curve, and
//! calibration determinism.

use breathsense_core::{
    config::CalibrationConfig, Baseline, CalibrationStatus, Calibrator, MovingAverage,
    ResponseCurve,
};
use proptest::prelude::*;

proptest! {
    /// The smoothed output can never leave the envelope of the window
    /// contents: a mean is bounded by its extremes.
    #[test]
    fn smoothed_mean_is_bounded_by_window_extremes(
        volts in proptest::collection::vec(0.0f32..3.3, 1..64),
    ) {
        let mut filter = MovingAverage::<8>::new();
        let mut window: Vec<f32> = Vec::new();

        for v in volts {
            window.push(v);
            if window.len() > 8 {
                window.remove(0);
            }

            let mean = filter.push(v);
            let min = window.iter().copied().fold(f32::INFINITY, f32::min);
            let max = window.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            prop_assert!(mean >= min - 1e-4, "mean {mean} below window min {min}");
            prop_assert!(mean <= max + 1e-4, "mean {mean} above window max {max}");
        }
    }

    /// For a fixed baseline, a higher live voltage never lowers the
    /// estimate anywhere in the valid operating range.
    #[test]
    fn estimator_is_monotonic_in_live_voltage(
        baseline_volts in 0.5f32..3.0,
        a in 0.05f32..3.2,
        b in 0.05f32..3.2,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let curve = ResponseCurve::default();
        let baseline = Baseline::try_new(baseline_volts, 0.1, 3.2).unwrap();

        let low = curve.estimate(lo, baseline, 0).unwrap().mg_per_l;
        let high = curve.estimate(hi, baseline, 0).unwrap().mg_per_l;
        prop_assert!(
            high >= low - low.abs() * 1e-3,
            "estimate fell from {low} ({lo}V) to {high} ({hi}V)"
        );
    }

    /// Measuring the baseline itself always reads the curve floor.
    #[test]
    fn baseline_voltage_reads_the_curve_floor(baseline_volts in 0.2f32..3.0) {
        let curve = ResponseCurve::default();
        let baseline = Baseline::try_new(baseline_volts, 0.1, 3.2).unwrap();

        let estimate = curve.estimate(baseline_volts, baseline, 0).unwrap();
        prop_assert!((estimate.mg_per_l - curve.scale_mg_l).abs() < 1e-5);
    }

    /// Identical sample sequences on an identical tick schedule always
    /// produce the identical calibration outcome.
    #[test]
    fn calibration_is_deterministic(
        samples in proptest::collection::vec(0.3f32..3.0, 8..32),
    ) {
        let cfg = CalibrationConfig {
            warmup_ms: 2000,
            sample_interval_ms: 250,
            ..CalibrationConfig::default()
        };

        let run = |samples: &[f32]| {
            let mut calibrator: Calibrator<8> = Calibrator::new(cfg, 0);
            let mut now = 0;
            let mut last = None;
            for &v in samples {
                now += 250;
                let status = calibrator.step(v, now);
                let done = !matches!(status, CalibrationStatus::Warming { .. });
                last = Some(status);
                if done {
                    break;
                }
            }
            last
        };

        prop_assert_eq!(run(&samples), run(&samples));
    }
}
