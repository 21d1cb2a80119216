//! Property-based tests for the detectors

mod common;

use common::series_every_second;
use proptest::prelude::*;
use rssi_core::{BatchFilter, FilterProperties, OnlineDetector};
use rssi_detectors::*;

proptest! {
    // Property: a perfectly flat signal never triggers the variance cascade
    #[test]
    fn prop_flat_series_never_fires(
        level in -100i32..0,
        n in 0usize..200,
        wbase in 1usize..40,
        winstant in 1usize..20,
        r in 0.0f64..5.0,
        std_min in 0.0f64..3.0
    ) {
        let series = series_every_second(&vec![level; n]);
        let out = WindowedVarianceDetector::new(wbase, winstant, r, std_min)
            .apply(&series)
            .unwrap();
        prop_assert!(out.as_values().unwrap().iter().all(|&x| x <= 0.0));
    }

    // Property: the average cascade stays quiet while its baseline fills
    #[test]
    fn prop_average_warmup_never_fires(
        level in -100i32..0,
        wbase in 1usize..40,
        winstant in 1usize..20,
        r in 0.0f64..5.0
    ) {
        let mut state = WindowedAverageState::new(WindowedAverageParameters { wbase, winstant, r })
            .unwrap();
        for k in 0..wbase + winstant {
            prop_assert!(state.warming_up());
            let out = state.process_sample(f64::from(level));
            prop_assert!(out <= 0.0, "k = {}: {}", k, out);
        }
        prop_assert!(!state.warming_up());
    }

    // Property: youssef2007a has no output until wl + ws samples exist
    #[test]
    fn prop_relative_ratio_leading_none(
        values in prop::collection::vec(-100i32..-1, 0..80),
        wl in 1usize..20,
        ws in 1usize..10,
        tau in 0.0f64..1.0
    ) {
        let series = series_every_second(&values);
        let margins = RelativeRatio::new(wl, ws, tau, OutputForm::Margin).apply(&series).unwrap();
        let flags = RelativeRatio::new(wl, ws, tau, OutputForm::Flags).apply(&series).unwrap();
        let m = margins.as_margins().unwrap();
        let f = flags.as_flags().unwrap();
        for i in 0..values.len() {
            let has_history = i + 1 >= wl + ws;
            prop_assert_eq!(m[i].is_some(), has_history);
            prop_assert_eq!(f[i].is_some(), has_history);
            if let (Some(x), Some(flag)) = (m[i], f[i]) {
                prop_assert_eq!(x > 0.0, flag);
            }
        }
    }

    // Property: every detector returns one output per sample
    #[test]
    fn prop_output_is_aligned(
        values in prop::collection::vec(-100i32..0, 0..100),
        w in 1usize..20
    ) {
        let series = series_every_second(&values);
        let detectors: Vec<Box<dyn BatchFilter>> = vec![
            Box::new(ThresholdDifference::new(1.6, OutputForm::Margin)),
            Box::new(ThresholdDifference::new(1.6, OutputForm::Flags)),
            Box::new(RelativeRatio::new(w, 2, 0.1, OutputForm::Margin)),
            Box::new(VarianceExceedance::new(
                VarianceExceedanceParameters { w, vtbar: 2.0, sigmav: 1.0, r: 3.0 },
                OutputForm::Flags,
            )),
            Box::new(VarianceTraining::new(w)),
            Box::new(WindowedVarianceDetector::new(w, 5, 3.0, 1.0)),
            Box::new(WindowedAverageDetector::new(w, 5, 2.0)),
        ];
        for detector in detectors {
            let out = detector.apply(&series).unwrap();
            prop_assert_eq!(out.len(), values.len(), "{}", detector.filter_name());
        }
    }

    // Property: windowed variances are never negative and count full windows
    #[test]
    fn prop_windowed_variances(
        values in prop::collection::vec(-100i32..0, 0..100),
        w in 1usize..20
    ) {
        let vt = windowed_variances(&values, w).unwrap();
        prop_assert_eq!(vt.len(), (values.len() + 1).saturating_sub(w));
        prop_assert!(vt.iter().all(|&v| v >= 0.0));
    }
}
