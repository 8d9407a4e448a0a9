// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The poll loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use super::PollTask;
use crate::error::TransportError;
use crate::protocol::{SerialLink, Transport};
use crate::response::Reading;

/// Receives the outcome of poll cycles.
pub(crate) trait PollSink: Send + Sync + 'static {
    /// A cycle decoded a value.
    fn on_reading(&self, reading: Reading);

    /// A cycle hit a write or read failure. The loop has already stopped.
    fn on_link_failure(&self, error: TransportError);
}

/// Runs one poll task until `stop` turns `true`, the link closes, or the
/// link fails.
///
/// The first fire happens `first_delay` after the call. A stop signal does
/// not interrupt a transaction that is already running.
pub(crate) async fn run_poll_task<T, S>(
    task: PollTask,
    first_delay: Duration,
    link: Arc<SerialLink<T>>,
    mut stop: watch::Receiver<bool>,
    sink: Arc<S>,
) where
    T: Transport,
    S: PollSink,
{
    let mut ticker = tokio::time::interval_at(Instant::now() + first_delay, task.period());
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

        match poll_once(&task, &link).await {
            Ok(Some(reading)) => sink.on_reading(reading),
            Ok(None) => {}
            Err(TransportError::Closed) => break,
            Err(e) => {
                sink.on_link_failure(e);
                break;
            }
        }
    }

    tracing::debug!(task = %task.name(), "Poll task stopped");
}

/// Runs one cycle. Timeouts and unrecognized replies yield `Ok(None)`.
async fn poll_once<T: Transport>(
    task: &PollTask,
    link: &SerialLink<T>,
) -> Result<Option<Reading>, TransportError> {
    match link.transact(&task.kind().query(), task.followup_delay()).await {
        Ok(line) => {
            let reading = task.kind().decode(&line);
            if reading.is_none() {
                tracing::debug!(task = %task.name(), response = %line, "Ignoring unrecognized response");
            }
            Ok(reading)
        }
        Err(TransportError::Timeout(waited)) => {
            tracing::debug!(task = %task.name(), waited = ?waited, "No response this cycle");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
