// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Synchronous notification boundary.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::DeviceState;

/// Receiver of state snapshots and status lines.
///
/// Called synchronously from whichever task committed the change, so
/// implementations should return quickly. Calls arrive in commit order:
/// the next commit waits until every notifier has returned.
pub trait Notifier: Send + Sync {
    /// Called after every commit that changed the state.
    fn on_state_changed(&self, state: &DeviceState);

    /// Called with a human-readable status line, such as
    /// `"Connected: VTG 400"` or `"Send error: ..."`.
    fn on_status(&self, message: &str) {
        let _ = message;
    }
}

/// Unique identifier for a callback registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type StateCallback = Arc<dyn Fn(&DeviceState) + Send + Sync>;
type StatusCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// A [`Notifier`] that forwards to registered closures.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use vtgsync::event::{CallbackNotifier, Notifier};
/// use vtgsync::state::DeviceState;
///
/// let notifier = CallbackNotifier::new();
/// let calls = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&calls);
/// let id = notifier.add_state_callback(move |_| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// notifier.on_state_changed(&DeviceState::new());
/// assert!(notifier.unsubscribe(id));
/// notifier.on_state_changed(&DeviceState::new());
///
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub struct CallbackNotifier {
    next_id: AtomicU64,
    state_callbacks: RwLock<HashMap<SubscriptionId, StateCallback>>,
    status_callbacks: RwLock<HashMap<SubscriptionId, StatusCallback>>,
}

impl CallbackNotifier {
    /// Creates a notifier with no callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            state_callbacks: RwLock::new(HashMap::new()),
            status_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a callback for state snapshots.
    pub fn add_state_callback<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DeviceState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.state_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for status lines.
    pub fn add_status_callback<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.status_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Removes a callback. Returns `true` if it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state_callbacks.write().remove(&id).is_some()
            || self.status_callbacks.write().remove(&id).is_some()
    }

    /// Removes all callbacks.
    pub fn clear(&self) {
        self.state_callbacks.write().clear();
        self.status_callbacks.write().clear();
    }

    /// Returns the number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.state_callbacks.read().len() + self.status_callbacks.read().len()
    }
}

impl Default for CallbackNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CallbackNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackNotifier")
            .field("state_callbacks", &self.state_callbacks.read().len())
            .field("status_callbacks", &self.status_callbacks.read().len())
            .finish_non_exhaustive()
    }
}

impl Notifier for CallbackNotifier {
    fn on_state_changed(&self, state: &DeviceState) {
        // Snapshot so a callback may register or unsubscribe without deadlocking
        let callbacks: Vec<_> = self.state_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(state);
        }
    }

    fn on_status(&self, message: &str) {
        let callbacks: Vec<_> = self.status_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(message);
        }
    }
}
