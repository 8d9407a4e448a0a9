// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generator state tracking.
//!
//! [`DeviceState`] is the single in-memory record of what the generator is
//! believed to be showing. It is changed only by applying a
//! [`StateChange`], and in practice only the
//! [`Arbiter`](crate::arbiter::Arbiter) does that.
//!
//! # Examples
//!
//! ```
//! use vtgsync::state::{DeviceState, StateChange};
//! use vtgsync::types::{Color, IreLevel};
//!
//! let mut state = DeviceState::new();
//!
//! assert!(state.apply(&StateChange::Color(Color::Red)));
//! assert!(state.apply(&StateChange::Ire(IreLevel::new(50).unwrap())));
//!
//! // Color and IRE are independent parameters
//! assert_eq!(state.color(), Some(Color::Red));
//! assert_eq!(state.ire(), Some(IreLevel::new(50).unwrap()));
//! ```

mod device_state;
mod state_change;

pub use device_state::{ConnectionPhase, DeviceState};
pub use state_change::StateChange;
