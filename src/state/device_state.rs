// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generator state record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Color, IreLevel, Model, Pattern, PowerState, Resolution, Temperature};

use super::StateChange;

/// Lifecycle of the serial link.
///
/// The only way out of `Disconnected` is a user-initiated connect. Any I/O
/// failure in any other phase falls straight back to `Disconnected`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionPhase {
    /// No link is open.
    #[default]
    Disconnected,
    /// The port is being opened.
    Connecting,
    /// The identify query is in flight.
    Identifying,
    /// The link is up and polling runs.
    Connected,
}

impl ConnectionPhase {
    /// Returns `true` if the link is fully up.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disconnected => "Disconnected",
            Self::Connecting => "Connecting",
            Self::Identifying => "Identifying",
            Self::Connected => "Connected",
        })
    }
}

/// Tracked state of the generator.
///
/// Every field except the connection phase is optional because nothing is
/// known until the generator reports it or a command sets it.
///
/// Color and IRE are kept side by side: selecting a color does not forget
/// the last IRE level, and the other way around. A front end may still
/// choose to highlight only one of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    connection: ConnectionPhase,
    /// `None` until identified.
    model: Option<Model>,
    power: Option<PowerState>,
    ire: Option<IreLevel>,
    pattern: Option<Pattern>,
    resolution: Option<Resolution>,
    color: Option<Color>,
    temperature: Option<Temperature>,
}

impl DeviceState {
    /// Creates a new empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the connection phase.
    #[must_use]
    pub fn connection(&self) -> ConnectionPhase {
        self.connection
    }

    /// Gets the identified model.
    #[must_use]
    pub fn model(&self) -> Option<Model> {
        self.model
    }

    /// Gets the output power.
    #[must_use]
    pub fn power(&self) -> Option<PowerState> {
        self.power
    }

    /// Gets the IRE level. Always a ladder step.
    #[must_use]
    pub fn ire(&self) -> Option<IreLevel> {
        self.ire
    }

    /// Gets the test pattern.
    #[must_use]
    pub fn pattern(&self) -> Option<Pattern> {
        self.pattern
    }

    /// Gets the output mode.
    #[must_use]
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// Gets the full-field color.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Gets the internal temperature.
    #[must_use]
    pub fn temperature(&self) -> Option<Temperature> {
        self.temperature
    }

    /// Applies a state change and returns whether the state actually changed.
    ///
    /// Writes are last-write-wins per field.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        fn update<T: PartialEq + Copy>(field: &mut Option<T>, value: T) -> bool {
            if *field == Some(value) {
                false
            } else {
                *field = Some(value);
                true
            }
        }

        match change {
            StateChange::Connection(phase) => {
                if self.connection == *phase {
                    false
                } else {
                    self.connection = *phase;
                    true
                }
            }
            StateChange::Model(model) => update(&mut self.model, *model),
            StateChange::Power(power) => update(&mut self.power, *power),
            StateChange::Ire(level) => update(&mut self.ire, *level),
            StateChange::Pattern(pattern) => update(&mut self.pattern, *pattern),
            StateChange::Resolution(resolution) => update(&mut self.resolution, *resolution),
            StateChange::Color(color) => update(&mut self.color, *color),
            StateChange::Temperature(temperature) => update(&mut self.temperature, *temperature),
            StateChange::Batch(changes) => {
                let mut any_changed = false;
                for c in changes {
                    if self.apply(c) {
                        any_changed = true;
                    }
                }
                any_changed
            }
        }
    }

    /// Clears all state, resetting to unknown and disconnected.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
