// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The external tracking loop.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use crate::cue::ExternalObserver;

/// Samples `observer` every `period` and hands each snapshot to `on_text`,
/// until `stop` turns `true`.
///
/// The first sample is taken one period after the loop starts. A slow
/// `on_text` skips ticks
/// instead of bunching them up.
pub(crate) async fn run_tracking<O, F, Fut>(
    mut observer: O,
    period: Duration,
    mut stop: watch::Receiver<bool>,
    mut on_text: F,
) where
    O: ExternalObserver,
    F: FnMut(String) -> Fut + Send,
    Fut: Future<Output = ()> + Send,
{
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        if *stop.borrow_and_update() {
            break;
        }
        tokio::select! {
            biased;
            _ = stop.changed() => break,
            _ = ticker.tick() => {}
        }

        let text = observer.sample().await;
        if !text.is_empty() {
            on_text(text).await;
        }
    }

    tracing::debug!("External tracking stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn samples_on_period_until_stopped() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (stop, stop_rx) = watch::channel(false);
        let mut counter = 0;
        let observer = move || {
            counter += 1;
            format!("sample {counter}")
        };

        let handle = {
            let seen = Arc::clone(&seen);
            tokio::spawn(run_tracking(
                observer,
                Duration::from_millis(500),
                stop_rx,
                move |text| {
                    seen.lock().push(text);
                    std::future::ready(())
                },
            ))
        };

        tokio::time::sleep(Duration::from_millis(1200)).await;
        stop.send_replace(true);
        handle.await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(*seen.lock(), vec!["sample 1", "sample 2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn first_sample_waits_one_period() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (_stop, stop_rx) = watch::channel(false);

        {
            let seen = Arc::clone(&seen);
            tokio::spawn(run_tracking(
                || String::from("White"),
                Duration::from_millis(500),
                stop_rx,
                move |_| {
                    seen.lock().push(Instant::now());
                    std::future::ready(())
                },
            ));
        }
        let start = Instant::now();

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(seen.lock().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0] - start, Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_samples_are_skipped() {
        let calls = Arc::new(Mutex::new(0));
        let (stop, stop_rx) = watch::channel(false);

        let handle = {
            let calls = Arc::clone(&calls);
            tokio::spawn(run_tracking(
                String::new,
                Duration::from_millis(500),
                stop_rx,
                move |_| {
                    *calls.lock() += 1;
                    std::future::ready(())
                },
            ))
        };

        tokio::time::sleep(Duration::from_secs(2)).await;
        stop.send_replace(true);
        handle.await.unwrap();

        assert_eq!(*calls.lock(), 0);
    }
}
