// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sync event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::arbiter::Source;
use crate::state::{ConnectionPhase, DeviceState, StateChange};

/// Events emitted by the sync controller.
///
/// # Examples
///
/// ```
/// use vtgsync::arbiter::Source;
/// use vtgsync::event::SyncEvent;
/// use vtgsync::state::{ConnectionPhase, DeviceState, StateChange};
/// use vtgsync::types::PowerState;
///
/// let event = SyncEvent::state_changed(
///     Source::User,
///     StateChange::Power(PowerState::On),
///     DeviceState::new(),
/// );
/// assert!(event.is_state_change());
///
/// let lost = SyncEvent::connection_lost("read failed: broken pipe");
/// assert!(lost.is_connection());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SyncEvent {
    /// A commit changed the device state.
    StateChanged {
        /// Who caused the change.
        source: Source,
        /// The change as resolved by the arbiter.
        change: StateChange,
        /// The complete state after the change.
        state: DeviceState,
        /// When the change was committed.
        at: DateTime<Utc>,
    },

    /// The link moved to a new lifecycle phase.
    ConnectionChanged {
        /// The new phase.
        phase: ConnectionPhase,
        /// Why the link dropped, if it dropped on an error.
        error: Option<String>,
    },

    /// A human-readable status line.
    Status(String),
}

impl SyncEvent {
    /// Creates a state change event stamped with the current time.
    #[must_use]
    pub fn state_changed(source: Source, change: StateChange, state: DeviceState) -> Self {
        Self::StateChanged {
            source,
            change,
            state,
            at: Utc::now(),
        }
    }

    /// Creates a phase change event.
    #[must_use]
    pub fn phase(phase: ConnectionPhase) -> Self {
        Self::ConnectionChanged { phase, error: None }
    }

    /// Creates a disconnected event carrying the failure.
    #[must_use]
    pub fn connection_lost(error: impl Into<String>) -> Self {
        Self::ConnectionChanged {
            phase: ConnectionPhase::Disconnected,
            error: Some(error.into()),
        }
    }

    /// Creates a status event.
    #[must_use]
    pub fn status(message: impl Into<String>) -> Self {
        Self::Status(message.into())
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Returns `true` if this is a connection event.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::ConnectionChanged { .. })
    }

    /// Returns the state carried by a state change event.
    #[must_use]
    pub fn state(&self) -> Option<&DeviceState> {
        match self {
            Self::StateChanged { state, .. } => Some(state),
            _ => None,
        }
    }
}
