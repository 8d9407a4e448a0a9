// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-connection resources.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::sync_controller::Inner;
use crate::error::TransportError;
use crate::protocol::{SerialLink, Transport};
use crate::response::Reading;
use crate::scheduler::PollSink;

/// Everything that lives exactly as long as one connection.
///
/// Dropping a session (including through the controller being dropped)
/// drops `stop`, which ends every poll task.
pub(crate) struct Session<T: Transport> {
    pub(crate) link: Arc<SerialLink<T>>,
    stop: watch::Sender<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<T: Transport> Session<T> {
    pub(crate) fn new(link: Arc<SerialLink<T>>) -> Self {
        Self {
            link,
            stop: watch::channel(false).0,
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn stop_receiver(&self) -> watch::Receiver<bool> {
        self.stop.subscribe()
    }

    pub(crate) fn track(&self, handle: JoinHandle<()>) {
        self.tasks.lock().push(handle);
    }

    /// Signals every task to stop without waiting.
    pub(crate) fn signal_stop(&self) {
        self.stop.send_replace(true);
    }

    /// Stops the tasks, lets the in-flight transaction finish, closes the
    /// link and waits for every task to exit.
    pub(crate) async fn shutdown(self) {
        self.signal_stop();
        self.link.close().await;

        for handle in self.tasks.into_inner() {
            if let Err(e) = handle.await {
                tracing::debug!(error = %e, "Poll task ended abnormally");
            }
        }
    }
}

/// Routes poll outcomes of one session back to the controller.
pub(crate) struct SessionSink<T: Transport> {
    inner: Weak<Inner<T>>,
    link: Arc<SerialLink<T>>,
}

impl<T: Transport> SessionSink<T> {
    pub(crate) fn new(inner: Weak<Inner<T>>, link: Arc<SerialLink<T>>) -> Self {
        Self { inner, link }
    }
}

impl<T: Transport> PollSink for SessionSink<T> {
    fn on_reading(&self, reading: Reading) {
        if let Some(inner) = self.inner.upgrade() {
            inner.apply_reading(reading);
        }
    }

    fn on_link_failure(&self, error: TransportError) {
        if let Some(inner) = self.inner.upgrade() {
            inner.link_lost(&self.link, &error);
        }
    }
}
