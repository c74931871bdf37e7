use std::sync::Arc;

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use tchart::core::{
    ChartDataset, RangeAggregator, SelectionWindow, Series, SeriesColor, ValueRange,
    ViewportMapper, VisibilitySet,
};

const COLOR: SeriesColor = SeriesColor::rgb(0x3d, 0xc2, 0x3f);

fn flat_dataset(len: usize, value: i64, series_count: usize) -> Arc<ChartDataset> {
    let axis = (0..len as i64).collect();
    let series = (0..series_count)
        .map(|index| Series::new(format!("#{index}"), COLOR, vec![value; len]))
        .collect();
    Arc::new(ChartDataset::new(axis, series).expect("valid dataset"))
}

#[test]
fn degenerate_inputs_have_no_mapping() {
    let mut mapper = ViewportMapper::new(5);
    assert!(mapper.update(SelectionWindow::FULL, 0.0).is_none());
    assert!(mapper.update(SelectionWindow::FULL, -3.0).is_none());
    assert!(mapper.positions().is_empty());

    let empty = SelectionWindow::new(0.4, 0.4).expect("valid");
    assert!(mapper.update(empty, 100.0).is_none());

    let mut single = ViewportMapper::new(1);
    assert!(single.update(SelectionWindow::FULL, 100.0).is_none());
}

#[test]
fn window_indices_follow_ceil_rules() {
    let mut mapper = ViewportMapper::new(10);
    let selection = SelectionWindow::new(0.25, 0.5).expect("valid");
    let window = mapper.update(selection, 250.0).expect("mapping");

    assert_abs_diff_eq!(window.visible_index_count, 2.5, epsilon = 1e-12);
    assert_abs_diff_eq!(window.pixel_per_index, 100.0, epsilon = 1e-9);
    assert_eq!(window.first_visible_index, 3);
    assert_eq!(window.last_visible_index, 6);
    assert_abs_diff_eq!(window.offset_x, 250.0, epsilon = 1e-9);
}

#[test]
fn translation_keeps_position_table() {
    let mut mapper = ViewportMapper::new(10);
    let first = SelectionWindow::new(0.25, 0.75).expect("valid");
    mapper.update(first, 200.0).expect("mapping");
    let before = mapper.positions().to_vec();

    let shifted = SelectionWindow::new(0.5, 1.0).expect("valid");
    let window = mapper.update(shifted, 200.0).expect("mapping");
    assert_eq!(mapper.positions(), before.as_slice());
    assert_abs_diff_eq!(window.offset_x, 200.0, epsilon = 1e-9);
}

#[test]
fn nearest_index_snaps_and_rejects_outside_axis() {
    let mut mapper = ViewportMapper::new(5);
    mapper.update(SelectionWindow::FULL, 100.0).expect("mapping");
    assert_eq!(mapper.nearest_index(0.0), Some(0));
    assert_eq!(mapper.nearest_index(29.0), Some(1));
    assert_eq!(mapper.nearest_index(31.0), Some(2));
    assert_eq!(mapper.nearest_index(80.0), Some(4));
    assert_eq!(mapper.nearest_index(81.0), None);
    assert_eq!(mapper.nearest_index(-1.0), None);
}

#[test]
fn end_to_end_range_scenario() {
    let dataset = Arc::new(
        ChartDataset::new(
            vec![0, 1, 2, 3, 4],
            vec![Series::new("y0", COLOR, vec![0, 10, 5, 8, 2])],
        )
        .expect("valid dataset"),
    );
    let aggregator = RangeAggregator::new(dataset);
    let mut visibility = VisibilitySet::all_visible(1);

    let mut mapper = ViewportMapper::new(5);
    let window = mapper.update(SelectionWindow::FULL, 100.0).expect("mapping");
    let range = aggregator.compute_range(
        window.first_visible_index,
        window.last_visible_index,
        &visibility,
    );
    assert_eq!(range, ValueRange::new(0.0, 10.0));

    visibility.set_visible(0, false).expect("index in range");
    let range = aggregator.compute_range(
        window.first_visible_index,
        window.last_visible_index,
        &visibility,
    );
    assert_eq!(range, ValueRange::ZERO);
}

proptest! {
    #[test]
    fn full_selection_spans_whole_axis(len in 2usize..2_000, width in 1.0f64..5_000.0) {
        let mut mapper = ViewportMapper::new(len);
        let window = mapper.update(SelectionWindow::FULL, width).expect("mapping");
        prop_assert_eq!(window.first_visible_index, 0);
        prop_assert_eq!(window.last_visible_index, len - 1);
        prop_assert!((window.pixel_per_index * len as f64 - width).abs() <= 1e-6 * width);
        prop_assert_eq!(mapper.positions().len(), len);
    }

    #[test]
    fn window_stays_inside_axis(
        len in 2usize..500,
        start in 0.0f64..1.0,
        length in 0.001f64..1.0,
        width in 1.0f64..3_000.0
    ) {
        let end = (start + length).min(1.0);
        prop_assume!(end > start);
        let selection = SelectionWindow::new(start, end).expect("valid");
        let mut mapper = ViewportMapper::new(len);
        let window = mapper.update(selection, width).expect("mapping");
        prop_assert!(window.first_visible_index <= window.last_visible_index);
        prop_assert!(window.last_visible_index < len);
    }

    #[test]
    fn hidden_series_always_yield_zero_range(
        len in 2usize..64,
        value in 0i64..1_000_000,
        series_count in 1usize..6
    ) {
        let aggregator = RangeAggregator::new(flat_dataset(len, value, series_count));
        let mut visibility = VisibilitySet::all_visible(series_count);
        for index in 0..series_count {
            visibility.set_visible(index, false).expect("index in range");
        }
        prop_assert_eq!(aggregator.compute_full_range(&visibility), ValueRange::ZERO);
    }

    #[test]
    fn single_constant_series_range_is_zero_to_value(
        len in 2usize..64,
        value in 0i64..1_000_000
    ) {
        let aggregator = RangeAggregator::new(flat_dataset(len, value, 1));
        let visibility = VisibilitySet::all_visible(1);
        prop_assert_eq!(
            aggregator.compute_full_range(&visibility),
            ValueRange::new(0.0, value as f64)
        );
    }
}
