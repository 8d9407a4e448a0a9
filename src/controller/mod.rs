// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The sync controller.
//!
//! [`SyncController`] is the one object an application holds. It owns the
//! [`Arbiter`](crate::arbiter::Arbiter) and its state, opens and tears down
//! the serial session, runs the poll tasks while connected and, when
//! enabled, the external tracking loop.
//!
//! # Lifecycle
//!
//! ```text
//! Disconnected -> Connecting -> Identifying -> Connected
//!       ^                                          |
//!       +------------- disconnect / I/O failure ---+
//! ```
//!
//! A port that fails to open leaves the controller `Disconnected`. Any
//! write or read failure while connected stops every poll task and returns
//! to `Disconnected`. Nothing reconnects automatically.
//!
//! # Examples
//!
//! ```no_run
//! use vtgsync::controller::SyncController;
//! use vtgsync::protocol::StreamTransport;
//! use vtgsync::types::{IreLevel, Pattern};
//!
//! # async fn open_port() -> std::io::Result<tokio::io::DuplexStream> { unimplemented!() }
//! #[tokio::main]
//! async fn main() -> vtgsync::Result<()> {
//!     let controller = SyncController::new();
//!
//!     let mut events = controller.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("{event:?}");
//!         }
//!     });
//!
//!     let model = controller
//!         .connect_with(|_settings| async { open_port().await.map(StreamTransport::new) })
//!         .await?;
//!     println!("found {}", model.name());
//!
//!     controller.set_pattern(Pattern::VarIre).await?;
//!     controller.set_ire(IreLevel::new(50)?).await?;
//!
//!     controller.enable_external_tracking(|| String::from("Measuring 30% Gray"));
//!     Ok(())
//! }
//! ```

mod config;
mod session;
mod sync_controller;

pub use config::{
    DEFAULT_BAUD_RATE, DEFAULT_EVENT_CAPACITY, DEFAULT_FIRST_POLL_DELAY, DEFAULT_FOLLOWUP_DELAY,
    DEFAULT_IDENTIFY_DELAY, DEFAULT_OBSERVER_PERIOD, DEFAULT_POLL_PERIOD, DEFAULT_READ_TIMEOUT,
    DEFAULT_TEMPERATURE_PERIOD, SerialSettings, SyncConfig,
};
pub use sync_controller::SyncController;
