use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use tchart::api::{AxisLabelPlanner, DateLabelFormat, RULER_COUNT, RulerPlanner, ruler_step};
use tchart::core::{ChartDataset, Series, SeriesColor, ValueRange, ViewportWindow};

const DAY_MS: i64 = 86_400_000;
const FADE: Duration = Duration::from_millis(250);
const LABEL_WIDTH: f64 = 48.0;

fn daily_dataset(len: usize) -> Arc<ChartDataset> {
    let axis = (0..len as i64).map(|day| 1_552_089_600_000 + day * DAY_MS).collect();
    let series = vec![Series::new(
        "#0",
        SeriesColor::rgb(0x3d, 0xc2, 0x3f),
        vec![1; len],
    )];
    Arc::new(ChartDataset::new(axis, series).expect("valid dataset"))
}

fn label_planner(len: usize) -> AxisLabelPlanner {
    AxisLabelPlanner::new(daily_dataset(len), DateLabelFormat::default(), LABEL_WIDTH, FADE)
}

fn settle_labels(planner: &mut AxisLabelPlanner) {
    for _ in 0..100 {
        if !planner.advance(Duration::from_millis(16)) {
            break;
        }
    }
}

#[test]
fn first_label_set_shows_without_fade() {
    let mut planner = label_planner(100);
    assert!(planner.plan(20.0));
    assert!(!planner.is_active());

    let set = planner.current().expect("label set");
    assert_eq!(set.first_labeled(), 2);
    assert_eq!(set.last_labeled(), 97);
    assert_eq!(planner.label_step(), 4);
    assert_eq!(set.labels().get(&2).map(String::as_str), Some("Mar 11"));
}

#[test]
fn replans_only_when_first_or_step_changes() {
    let mut planner = label_planner(100);
    assert!(planner.plan(20.0));
    assert!(!planner.plan(20.0));
    // Same first index and step, different scale.
    assert!(!planner.plan(19.9));

    assert!(planner.plan(10.0));
    assert_eq!(planner.retired_len(), 1);
    assert!(planner.is_active());
    let alphas: Vec<f64> = planner.visible_sets().map(|set| set.alpha()).collect();
    assert_eq!(alphas, vec![1.0]);

    settle_labels(&mut planner);
    assert_eq!(planner.retired_len(), 0);
    assert!(!planner.is_active());
    let current = planner.visible_sets().last().expect("current set");
    assert_eq!(current.alpha(), 1.0);
}

#[test]
fn labels_are_filtered_to_window_with_slack() {
    let mut planner = label_planner(100);
    planner.plan(20.0);
    let set = planner.current().expect("label set");
    let window = ViewportWindow {
        first_visible_index: 40,
        last_visible_index: 50,
        visible_index_count: 10.0,
        pixel_per_index: 20.0,
        offset_x: 800.0,
    };
    let indices: Vec<usize> = set.in_window(window).map(|(index, _)| index).collect();
    assert!(!indices.is_empty());
    assert!(
        indices
            .iter()
            .all(|index| (36..=54).contains(index))
    );
}

#[test]
fn narrow_axis_keeps_edge_labels() {
    let mut planner = label_planner(3);
    assert!(planner.plan(1.0));
    let set = planner.current().expect("label set");
    assert_eq!(set.first_labeled(), 1);
    assert_eq!(set.last_labeled(), 1);
    assert!(set.contains(1));
}

#[test]
fn ruler_values_start_at_range_minimum() {
    let mut rulers = RulerPlanner::new(FADE);
    assert!(rulers.plan(ValueRange::new(0.0, 100.0)));
    let set = rulers.current().expect("ruler set");
    assert_eq!(set.len(), RULER_COUNT);
    assert_eq!(
        set.values().collect::<Vec<_>>(),
        vec![0.0, 16.0, 32.0, 48.0, 64.0, 80.0]
    );
}

#[test]
fn small_step_changes_keep_rulers() {
    let mut rulers = RulerPlanner::new(FADE);
    rulers.plan(ValueRange::new(0.0, 100.0));
    assert!(!rulers.plan(ValueRange::new(0.0, 99.0)));
    assert_eq!(rulers.step(), 16.0);

    assert!(rulers.plan(ValueRange::new(0.0, 200.0)));
    assert_eq!(rulers.step(), 32.0);
    assert_eq!(rulers.retired_len(), 1);
}

#[test]
fn degenerate_range_keeps_previous_rulers() {
    let mut rulers = RulerPlanner::new(FADE);
    rulers.plan(ValueRange::new(0.0, 100.0));
    assert!(!rulers.plan(ValueRange::ZERO));
    assert_eq!(rulers.step(), 16.0);
    assert!(!rulers.layout(ValueRange::ZERO, 0.0, 100.0));
    assert_eq!(ruler_step(ValueRange::ZERO), None);
}

#[test]
fn layout_maps_values_to_plot_pixels() {
    let mut rulers = RulerPlanner::new(FADE);
    rulers.plan(ValueRange::new(0.0, 100.0));
    assert!(rulers.layout(ValueRange::new(0.0, 100.0), 10.0, 210.0));
    let lines: Vec<(f64, f64)> = rulers.current().expect("ruler set").lines().collect();
    assert_eq!(lines[0], (0.0, 210.0));
    assert_eq!(lines[1], (16.0, 178.0));
    assert_eq!(lines[5], (80.0, 50.0));
}

proptest! {
    #[test]
    fn edge_labels_always_present(len in 2usize..400, pixel_per_index in 0.01f64..500.0) {
        let mut planner = label_planner(len);
        prop_assert!(planner.plan(pixel_per_index));
        let set = planner.current().expect("label set");

        prop_assert!(set.first_labeled() <= set.last_labeled());
        prop_assert_eq!(set.last_labeled(), len - 1 - set.first_labeled());
        prop_assert!(set.contains(set.first_labeled()));
        prop_assert!(set.contains(set.last_labeled()));
        prop_assert!(set.labels().keys().all(|index| *index < len));
    }

    #[test]
    fn ruler_set_always_has_six_lines(max in 1.0f64..1.0e9) {
        let mut rulers = RulerPlanner::new(FADE);
        prop_assert!(rulers.plan(ValueRange::new(0.0, max)));
        let set = rulers.current().expect("ruler set");
        prop_assert_eq!(set.len(), RULER_COUNT);
        let step = ruler_step(ValueRange::new(0.0, max)).expect("step");
        prop_assert!(step >= 1.0);
        prop_assert_eq!(set.step(), step);
    }
}
