// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless chat feed session.
//!
//! Loads the newest page, lets the feed settle at the bottom, then scrolls up
//! through the whole history. Older pages arrive after a simulated network
//! delay and are prepended above the viewport.
//!
//! Run:
//! - `RUST_LOG=feedview_scroll=debug,info cargo run -p feedview_demos --example feed_session`

use feedview_demos::{MessageId, PageSource, SessionConfig, SimulatedHost};
use feedview_scroll::{FeedCoordinator, ScrollHost};
use feedview_window::WindowRange;
use tracing_subscriber::EnvFilter;

const FRAME_MS: u64 = 16;
const FETCH_LATENCY_MS: u64 = 180;
const SCROLL_STEP: f64 = 240.0;
const MAX_SESSION_MS: u64 = 120_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SessionConfig::from_json(include_str!("session.json"))?;
    let source = PageSource::new(config.newest, config.page_size);
    let mut host = SimulatedHost::new(config.viewport);
    let mut feed = FeedCoordinator::new(config.window, config.scroll, |range: &WindowRange<f64>| {
        tracing::info!(
            start = range.start,
            end = range.end,
            pad_front = range.pad_front,
            pad_behind = range.pad_behind,
            "render window"
        );
    })?;

    // The feed renders oldest first; pages arrive newest first.
    let first = source.page(None);
    let mut cursor = first.next;
    let mut ids: Vec<MessageId> = first.ids.into_iter().rev().collect();
    host.set_items(&ids);
    feed.notify_id_sequence_changed(ids.iter().copied(), &mut host);

    let mut now = 0;
    let mut in_flight: Option<u64> = None;
    let mut frames_at_top = 0;
    while frames_at_top < 30 && now < MAX_SESSION_MS {
        now += FRAME_MS;

        if !feed.is_anchoring() {
            host.scroll_by(-SCROLL_STEP);
            feed.notify_scroll(now);
        }

        let mut wants_older = false;
        feed.tick(now, &mut host, &mut || wants_older = true);
        if wants_older {
            in_flight = Some(now + FETCH_LATENCY_MS);
        }

        if in_flight.is_some_and(|due| now >= due) {
            in_flight = None;
            if let Some(page) = cursor.map(|cursor| source.page(Some(cursor))) {
                tracing::info!(count = page.ids.len(), "older page arrived");
                cursor = page.next;
                let mut older: Vec<MessageId> = page.ids.into_iter().rev().collect();
                older.extend_from_slice(&ids);
                ids = older;
                host.set_items(&ids);
            }
            // An exhausted history still resolves the request.
            feed.notify_id_sequence_changed(ids.iter().copied(), &mut host);
        }

        // Measure whatever the window mounted for the first time.
        for index in feed.engine().visible_indices() {
            let id = feed.engine().ids()[index];
            if feed.engine().height_of(&id).is_some() {
                continue;
            }
            if let Some(height) = host.height_of(id) {
                feed.notify_measured(&id, height, now);
            }
        }

        if cursor.is_none() && in_flight.is_none() && feed.range().start == 0 {
            frames_at_top += 1;
        }
    }

    tracing::info!(
        messages = ids.len(),
        elapsed_ms = now,
        offset = host.scroll_offset(),
        average = feed.engine().average_height(),
        frozen = feed.engine().is_average_frozen(),
        "reached the start of the history"
    );

    // Once torn down, late events are ignored.
    host.unmount();
    feed.notify_scroll(now);
    feed.tick(now + 1_000, &mut host, &mut || {
        tracing::warn!("unmounted feed requested a page");
    });

    Ok(())
}
