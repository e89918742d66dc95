// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `feedview_window` crate.
//!
//! These drive `WindowEngine` the way a feed host does: replace the id
//! sequence, feed measured heights, rebuild offsets, recompute, then scroll.

use feedview_window::{
    ConfigError, Measurement, RangeLog, ScrollDirection, WindowConfig, WindowEngine, WindowRange,
};
use proptest::prelude::*;

type Engine = WindowEngine<String, f64, RangeLog<f64>>;

const ITEM_HEIGHT: f64 = 120.0;

fn config() -> WindowConfig<f64> {
    WindowConfig::new(20, 130.0, 10)
}

/// Ids `"0"` through `"{last}"`, inclusive.
fn ids_through(last: usize) -> Vec<String> {
    (0..=last).map(|i| i.to_string()).collect()
}

fn range(start: usize, end: usize, pad_front: f64, pad_behind: f64) -> WindowRange<f64> {
    WindowRange {
        start,
        end,
        pad_front,
        pad_behind,
    }
}

/// Loads `ids`, measures the first `measured` of them at `ITEM_HEIGHT`, then
/// rebuilds offsets and recomputes the window.
fn loaded(ids: Vec<String>, measured: usize) -> Engine {
    let mut engine = WindowEngine::new(config(), RangeLog::new()).unwrap();
    engine.set_ids(ids.clone());
    for id in ids.iter().take(measured) {
        engine.record_height(id, ITEM_HEIGHT);
    }
    engine.rebuild_offsets();
    engine.recompute_range();
    engine
}

#[test]
fn construction_notifies_once_with_an_empty_window() {
    let engine: Engine = WindowEngine::new(config(), RangeLog::new()).unwrap();
    assert_eq!(engine.observer().ranges(), &[range(0, 0, 0.0, 0.0)]);
    assert!(engine.visible_indices().is_empty());
}

#[test]
fn debug_output_summarizes_the_engine() {
    let engine = loaded(ids_through(4), 2);
    let debug = format!("{engine:?}");
    assert!(debug.starts_with("WindowEngine"), "unexpected: {debug}");
    assert!(debug.contains("len: 5"), "unexpected: {debug}");
    assert!(debug.contains("known_heights: 2"), "unexpected: {debug}");
}

#[test]
fn invalid_config_fails_before_notifying() {
    let mut calls = 0;
    let result =
        WindowEngine::<u32, f64, _>::new(config().with_keep_count(0), |_: &WindowRange<f64>| {
            calls += 1;
        });
    assert_eq!(result.err().map(|_| ()), Some(()));
    assert_eq!(calls, 0);

    let err = WindowEngine::<u32, f64, _>::new(
        config().with_estimated_item_height(f64::NAN),
        RangeLog::new(),
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::InvalidEstimatedHeight);
}

#[test]
fn small_list_is_mounted_whole_without_padding() {
    let ids: Vec<String> = (0..10).map(|i| i.to_string()).collect();
    let engine = loaded(ids, 10);
    assert_eq!(engine.range(), range(0, 9, 0.0, 0.0));
    assert_eq!(engine.visible_indices(), 0..10);
}

#[test]
fn large_list_starts_anchored_to_the_top() {
    let engine = loaded(ids_through(200), 200);
    assert_eq!(engine.range(), range(0, 19, 0.0, 181.0 * ITEM_HEIGHT));
}

#[test]
fn scrolling_down_moves_the_window_in_order() {
    let mut engine = loaded(ids_through(200), 200);
    engine.on_scroll(2000.0);
    engine.on_scroll(4000.0);
    engine.on_scroll(6000.0);

    assert_eq!(
        engine.observer().ranges(),
        &[
            range(0, 0, 0.0, 0.0),
            range(0, 19, 0.0, 21720.0),
            range(16, 35, 1920.0, 19800.0),
            range(33, 52, 3960.0, 17760.0),
            range(50, 69, 6000.0, 15720.0),
        ]
    );
    assert_eq!(engine.direction(), ScrollDirection::Down);
}

#[test]
fn reaching_the_tail_makes_bottom_padding_exact() {
    let mut engine = loaded(ids_through(50), 50);
    engine.on_scroll(50.0 * ITEM_HEIGHT);
    assert_eq!(engine.range(), range(31, 50, 31.0 * ITEM_HEIGHT, 0.0));
    assert_eq!(engine.visible_indices(), 31..51);
}

#[test]
fn repeating_an_offset_does_not_notify_again() {
    let mut engine = loaded(ids_through(200), 200);
    engine.on_scroll(2000.0);
    let before = engine.observer().ranges().len();

    engine.on_scroll(2000.0);
    engine.on_scroll(2000.0);
    // Still inside the buffer.
    engine.on_scroll(2100.0);
    assert_eq!(engine.observer().ranges().len(), before);
}

#[test]
fn scrolling_up_moves_the_window_back_by_the_buffer() {
    let mut engine = loaded(ids_through(200), 200);
    engine.on_scroll(6000.0);
    engine.observer_mut().take();

    engine.on_scroll(5500.0);
    assert_eq!(engine.direction(), ScrollDirection::Up);
    assert_eq!(engine.range(), range(35, 54, 4200.0, 17520.0));

    // Within the mounted window: no change.
    engine.on_scroll(5450.0);
    assert_eq!(engine.observer().ranges().len(), 1);

    // Negative offsets clamp to the top.
    engine.on_scroll(-100.0);
    assert_eq!(engine.range(), range(0, 19, 0.0, 21720.0));
    assert_eq!(engine.scroll_offset(), 0.0);
}

#[test]
fn recompute_after_shrink_keeps_the_window_full() {
    let mut engine = loaded(ids_through(200), 200);
    engine.on_scroll(6000.0);

    engine.set_ids(ids_through(29));
    engine.recompute_range();
    assert_eq!(engine.range(), range(10, 29, 1200.0, 0.0));

    engine.set_ids(Vec::new());
    engine.recompute_range();
    assert_eq!(engine.range(), range(0, 0, 0.0, 0.0));
    assert!(engine.visible_indices().is_empty());
}

#[test]
fn dropped_ids_leave_the_average() {
    let mut engine = WindowEngine::new(config(), RangeLog::new()).unwrap();
    engine.set_ids(0..30_u32);
    engine.record_height(&0, 100.0);
    engine.record_height(&1, 300.0);
    assert_eq!(engine.average_height(), 200.0);

    engine.set_ids(1..31_u32);
    assert_eq!(engine.height_of(&0), None);
    assert_eq!(engine.known_height_count(), 1);

    engine.record_height(&2, 500.0);
    assert_eq!(engine.average_height(), 400.0);
}

#[test]
fn average_freezes_once_enough_heights_are_known() {
    let mut engine = WindowEngine::new(config().with_keep_count(3), RangeLog::new()).unwrap();
    engine.set_ids(0..10_u32);
    engine.record_height(&0, 100.0);
    engine.record_height(&1, 200.0);
    assert_eq!(engine.average_height(), 150.0);
    assert!(!engine.is_average_frozen());

    engine.record_height(&2, 600.0);
    assert!(engine.is_average_frozen());
    assert_eq!(engine.average_height(), 150.0);

    assert_eq!(engine.record_height(&0, 1000.0), Measurement::Updated);
    assert_eq!(engine.height_of(&0), Some(1000.0));
    assert_eq!(engine.average_height(), 150.0);
}

#[test]
fn estimate_is_used_until_something_is_measured() {
    let mut engine = WindowEngine::new(config(), RangeLog::new()).unwrap();
    engine.set_ids(0..100_u32);
    assert_eq!(engine.average_height(), 130.0);
    engine.recompute_range();
    assert_eq!(engine.range(), range(0, 19, 0.0, 80.0 * 130.0));
}

#[test]
fn measurements_outside_the_sequence_are_ignored() {
    let mut engine = WindowEngine::new(config(), RangeLog::new()).unwrap();
    engine.set_ids(["a", "b"]);
    assert_eq!(engine.record_height(&"z", 50.0), Measurement::Ignored);
    assert_eq!(engine.record_height(&"a", f64::NAN), Measurement::Ignored);
    assert_eq!(engine.record_height(&"a", -4.0), Measurement::Ignored);
    assert_eq!(engine.record_height(&"a", 50.0), Measurement::First);
    assert_eq!(engine.record_height(&"a", 60.0), Measurement::Updated);
    assert_eq!(engine.known_height_count(), 1);
}

#[test]
fn offsets_are_pruned_with_their_ids() {
    let mut engine = loaded(ids_through(9), 10);
    assert_eq!(engine.offset_entry_count(), 10);
    engine.set_ids(ids_through(4));
    assert_eq!(engine.offset_entry_count(), 5);
    assert_eq!(engine.index_of(&"4".to_string()), Some(4));
    assert_eq!(engine.index_of(&"9".to_string()), None);
}

#[test]
fn extents_mix_measured_and_average_heights() {
    let engine = loaded(ids_through(200), 200);
    let block: Vec<String> = ids_through(4);
    assert_eq!(engine.block_extent(&block), 5.0 * ITEM_HEIGHT);
    // Id "200" is unmeasured and counts at the average.
    assert_eq!(engine.estimated_total_extent(), 201.0 * ITEM_HEIGHT);
    assert_eq!(engine.offset_of_index(16), 1920.0);
}

fn arbitrary_feed() -> impl Strategy<Value = (usize, usize, Vec<Option<f64>>, Vec<f64>)> {
    (
        1_usize..40,
        0_usize..20,
        prop::collection::vec(prop::option::of(0.0_f64..400.0), 0..250),
        prop::collection::vec(-500.0_f64..80_000.0, 0..20),
    )
}

proptest! {
    #[test]
    fn window_always_has_keep_count_items(
        (keep, buffer, heights, scrolls) in arbitrary_feed()
    ) {
        let mut engine =
            WindowEngine::new(WindowConfig::new(keep, 100.0, buffer), RangeLog::new()).unwrap();
        engine.set_ids(0..heights.len());
        for (id, height) in heights.iter().enumerate() {
            if let Some(height) = height {
                engine.record_height(&id, *height);
            }
        }
        engine.rebuild_offsets();
        engine.recompute_range();

        for offset in scrolls {
            engine.on_scroll(offset);
            let range = engine.range();
            let total = heights.len();
            if total == 0 {
                prop_assert_eq!(range, range_zero());
                continue;
            }
            prop_assert!(range.start <= range.end);
            prop_assert!(range.end < total);
            prop_assert_eq!(range.end - range.start + 1, keep.min(total));
            prop_assert!(range.pad_front >= 0.0);
            prop_assert!(range.pad_behind >= 0.0);
            if total <= keep {
                prop_assert_eq!(range.start, 0);
                prop_assert_eq!(range.pad_front, 0.0);
                prop_assert_eq!(range.pad_behind, 0.0);
            }
        }
    }

    #[test]
    fn index_lookup_is_monotonic_after_rebuild(
        (_keep, _buffer, heights, mut scrolls) in arbitrary_feed()
    ) {
        let mut engine = WindowEngine::new(config(), RangeLog::new()).unwrap();
        engine.set_ids(0..heights.len());
        for (id, height) in heights.iter().enumerate() {
            if let Some(height) = height {
                engine.record_height(&id, *height);
            }
        }
        engine.rebuild_offsets();

        scrolls.sort_by(f64::total_cmp);
        let mut previous = 0;
        for offset in scrolls {
            let index = engine.index_at_offset(offset);
            prop_assert!(index >= previous);
            prop_assert!(index < heights.len().max(1));
            if offset > 0.0 && !heights.is_empty() {
                prop_assert!(engine.offset_of_index(index) <= offset);
            }
            previous = index;
        }
    }
}

fn range_zero() -> WindowRange<f64> {
    range(0, 0, 0.0, 0.0)
}
