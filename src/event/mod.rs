// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change notification.
//!
//! Two ways to hear about changes:
//!
//! - [`EventBus`]: a tokio broadcast channel of [`SyncEvent`]s, for async
//!   consumers that want the source and the exact change
//! - [`Notifier`]: a synchronous callback boundary, for display layers
//!   that only need the new snapshot and status lines
//!   ([`CallbackNotifier`] adapts plain closures)
//!
//! State notifications fire only when a field actually changed.
//!
//! # Examples
//!
//! ```
//! use vtgsync::event::{EventBus, SyncEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(SyncEvent::status("Serial not open"));
//! assert!(matches!(rx.try_recv(), Ok(SyncEvent::Status(_))));
//! ```

mod event_bus;
mod notifier;
mod sync_event;

pub use event_bus::EventBus;
pub use notifier::{CallbackNotifier, Notifier, SubscriptionId};
pub use sync_event::SyncEvent;
