// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! State changes are the only way to update a
//! [`DeviceState`](super::DeviceState). They also travel inside
//! [`SyncEvent::StateChanged`](crate::event::SyncEvent::StateChanged) so
//! that observers can see exactly which field moved.

use serde::{Deserialize, Serialize};

use crate::types::{Color, IreLevel, Model, Pattern, PowerState, Resolution, Temperature};

use super::ConnectionPhase;

/// Represents a change in generator state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StateChange {
    /// The link moved to a new lifecycle phase.
    Connection(ConnectionPhase),
    /// The generator was identified.
    Model(Model),
    /// Output power changed.
    Power(PowerState),
    /// IRE level changed.
    Ire(IreLevel),
    /// Test pattern changed.
    Pattern(Pattern),
    /// Output mode changed.
    Resolution(Resolution),
    /// Full-field color changed.
    Color(Color),
    /// A new temperature reading arrived.
    Temperature(Temperature),
    /// Multiple changes at once.
    Batch(Vec<StateChange>),
}

impl StateChange {
    /// Returns `true` if this change only touches the connection phase.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the number of individual changes.
    ///
    /// For batch changes, returns the total count of nested changes.
    #[must_use]
    pub fn change_count(&self) -> usize {
        match self {
            Self::Batch(changes) => changes.iter().map(Self::change_count).sum(),
            _ => 1,
        }
    }
}
