//! Property-based tests for the batch filters
//!
//! Invariants that hold for any series: outputs align 1:1 with the input and
//! the causal detector never reports a value above zero.

mod common;

use common::series_from_gaps;
use proptest::prelude::*;
use rssi_core::{BatchFilter, FilterProperties, Window};
use rssi_filters::*;

fn all_filters(window_s: f64, event_s: f64) -> Vec<Box<dyn BatchFilter>> {
    let w = Window::from_secs_f64(window_s).unwrap();
    let e = Window::from_secs_f64(event_s).unwrap();
    vec![
        Box::new(Passthrough),
        Box::new(Difference),
        Box::new(MovingAverage::new(w)),
        Box::new(MovingVariance::new(w)),
        Box::new(MovingMinimum::new(w)),
        Box::new(MovingEnvelope::new(w)),
        Box::new(MovingAverageEvent::new(w, e)),
        Box::new(CausalMaEvent::new(w, e)),
    ]
}

proptest! {
    #[test]
    fn prop_output_is_aligned(
        samples in prop::collection::vec((0u32..4000, -100i32..0), 0..120),
        window_s in 0.1f64..30.0,
        event_s in 0.1f64..10.0
    ) {
        let series = series_from_gaps(&samples);
        for filter in all_filters(window_s, event_s) {
            let out = filter.apply(&series).unwrap();
            prop_assert_eq!(out.len(), series.len(), "{}", filter.filter_name());
        }
    }

    #[test]
    fn prop_causal_output_never_positive(
        samples in prop::collection::vec((0u32..4000, -100i32..0), 0..200),
        background_s in 0.1f64..60.0,
        event_s in 0.1f64..10.0
    ) {
        let series = series_from_gaps(&samples);
        let filter = CausalMaEvent::new(
            Window::from_secs_f64(background_s).unwrap(),
            Window::from_secs_f64(event_s).unwrap(),
        );
        let out = filter.apply(&series).unwrap();
        prop_assert!(out.as_values().unwrap().iter().all(|&v| v <= 0.0));
    }

    #[test]
    fn prop_difference_matches_definition(
        samples in prop::collection::vec((0u32..4000, -100i32..0), 1..100)
    ) {
        let series = series_from_gaps(&samples);
        let out = Difference.apply(&series).unwrap();
        let d = out.as_values().unwrap();
        let v = series.values();
        prop_assert_eq!(d[0], 0.0);
        for i in 1..v.len() {
            prop_assert_eq!(d[i], f64::from(v[i] - v[i - 1]));
        }
    }

    #[test]
    fn prop_wide_window_average_of_constant(
        gaps in prop::collection::vec(0u32..4000, 2..100),
        v in -100i32..0
    ) {
        let samples: Vec<(u32, i32)> = gaps.into_iter().map(|g| (g, v)).collect();
        let series = series_from_gaps(&samples);
        let out = MovingAverage::new(Window::from_secs_f64(1e6).unwrap())
            .apply(&series)
            .unwrap();
        prop_assert!(out.as_values().unwrap().iter().all(|&x| x == f64::from(v)));
    }

    #[test]
    fn prop_envelope_and_variance_non_negative(
        samples in prop::collection::vec((0u32..4000, -100i32..0), 0..120),
        window_s in 0.1f64..30.0
    ) {
        let series = series_from_gaps(&samples);
        let w = Window::from_secs_f64(window_s).unwrap();
        for filter in [
            Box::new(MovingVariance::new(w)) as Box<dyn BatchFilter>,
            Box::new(MovingEnvelope::new(w)),
        ] {
            let out = filter.apply(&series).unwrap();
            prop_assert!(out.as_values().unwrap().iter().all(|&x| x.is_nan() || x >= 0.0));
        }
    }
}
