// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `vtgsync` - keep a VTG 400 video test-pattern generator in sync.
//!
//! The generator speaks a terse, line-oriented serial protocol. This
//! library keeps one in-memory picture of what the generator shows and
//! reconciles three sources that can change it:
//!
//! - **User commands**: applied immediately and sent to the generator
//! - **Polling**: the generator's own answers, read back periodically
//! - **External cues**: text sampled from a measurement tool ("Red
//!   primary", "30% gray") that steers the generator
//!
//! All serial traffic goes through one transaction queue, so a response is
//! never attributed to the wrong query.
//!
//! # Quick Start
//!
//! ```no_run
//! use vtgsync::{SyncController, StreamTransport};
//! use vtgsync::types::{Color, IreLevel};
//!
//! # async fn open_port() -> std::io::Result<tokio::io::DuplexStream> { unimplemented!() }
//! #[tokio::main]
//! async fn main() -> vtgsync::Result<()> {
//!     let controller = SyncController::new();
//!     controller
//!         .connect_with(|_settings| async { open_port().await.map(StreamTransport::new) })
//!         .await?;
//!
//!     controller.power_on().await?;
//!     controller.set_ire(IreLevel::new(80)?).await?;
//!     controller.set_color(Color::White).await?;
//!
//!     let mut state = controller.watch();
//!     while state.changed().await.is_ok() {
//!         println!("{:?}", state.borrow().ire());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`command`] and [`response`]: the wire codec
//! - [`protocol`]: transport boundary and transaction queue
//! - [`state`] and [`arbiter`]: the device state and who may change it
//! - [`scheduler`]: periodic read-back
//! - [`cue`]: external measurement cues
//! - [`event`]: change notification
//! - [`controller`]: the glue applications hold

pub mod arbiter;
pub mod command;
pub mod controller;
pub mod cue;
pub mod error;
pub mod event;
pub mod protocol;
pub mod response;
pub mod scheduler;
pub mod state;
pub mod types;

pub use arbiter::{Arbiter, Directive, Event, Source, Verdict};
pub use command::Command;
pub use controller::{SerialSettings, SyncConfig, SyncController};
pub use cue::{Cue, CueInterpreter, ExternalObserver};
pub use error::{Error, Result, TransportError, ValueError};
pub use event::{CallbackNotifier, EventBus, Notifier, SubscriptionId, SyncEvent};
pub use protocol::{SerialLink, StreamTransport, Transport};
pub use response::Reading;
pub use state::{ConnectionPhase, DeviceState, StateChange};
pub use types::{Color, IreLevel, Model, Pattern, PowerState, Resolution, Temperature};
