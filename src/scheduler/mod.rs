// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic read-back of the generator, and external cue tracking.
//!
//! While connected, four [`PollTask`]s each query one parameter on a fixed
//! period. Each fire sends the query, waits a short follow-up delay, reads
//! one line and decodes it. Periods are measured from fire times, so a
//! slow transaction does not push the schedule back.
//!
//! All tasks go through the same [`SerialLink`](crate::protocol::SerialLink),
//! so their transactions never overlap even when their timers coincide.
//!
//! | Task | Query | Default period |
//! |------|-------|----------------|
//! | IRE | `15#` | 20 s |
//! | Pattern | `J` | 20 s |
//! | Resolution | `=` | 20 s |
//! | Temperature | `20S` | 60 s |

mod poll;
mod tracking;

pub(crate) use poll::{PollSink, run_poll_task};
pub(crate) use tracking::run_tracking;

use std::fmt;
use std::time::Duration;

use crate::command::Command;
use crate::controller::SyncConfig;
use crate::response::{self, Reading};

/// The parameter a poll task reads back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollKind {
    /// Luminance level.
    Ire,
    /// Test pattern.
    Pattern,
    /// Output mode.
    Resolution,
    /// Internal temperature.
    Temperature,
}

impl PollKind {
    /// All poll kinds, in start order.
    pub const ALL: [Self; 4] = [Self::Ire, Self::Pattern, Self::Resolution, Self::Temperature];

    /// Returns the query command for this kind.
    #[must_use]
    pub const fn query(&self) -> Command {
        match self {
            Self::Ire => Command::QueryIre,
            Self::Pattern => Command::QueryPattern,
            Self::Resolution => Command::QueryResolution,
            Self::Temperature => Command::QueryTemperature,
        }
    }

    /// Decodes a response line. Returns `None` if it has the wrong shape.
    #[must_use]
    pub fn decode(&self, line: &str) -> Option<Reading> {
        match self {
            Self::Ire => response::decode_ire(line).map(Reading::Ire),
            Self::Pattern => response::decode_pattern(line).map(Reading::Pattern),
            Self::Resolution => response::decode_resolution(line).map(Reading::Resolution),
            Self::Temperature => response::decode_temperature(line).map(Reading::Temperature),
        }
    }

    /// Returns the task name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ire => "ire",
            Self::Pattern => "pattern",
            Self::Resolution => "resolution",
            Self::Temperature => "temperature",
        }
    }
}

impl fmt::Display for PollKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One periodic read-back.
///
/// Tasks are created when the link reaches `Connected` and live until it
/// leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTask {
    kind: PollKind,
    period: Duration,
    followup_delay: Duration,
}

impl PollTask {
    /// Creates a task.
    #[must_use]
    pub const fn new(kind: PollKind, period: Duration, followup_delay: Duration) -> Self {
        Self {
            kind,
            period,
            followup_delay,
        }
    }

    /// Builds the four standard tasks from a configuration.
    #[must_use]
    pub fn from_config(config: &SyncConfig) -> Vec<Self> {
        PollKind::ALL
            .into_iter()
            .map(|kind| {
                let period = match kind {
                    PollKind::Ire => config.ire_period,
                    PollKind::Pattern => config.pattern_period,
                    PollKind::Resolution => config.resolution_period,
                    PollKind::Temperature => config.temperature_period,
                };
                Self::new(kind, period, config.followup_delay)
            })
            .collect()
    }

    /// Returns what this task reads.
    #[must_use]
    pub const fn kind(&self) -> PollKind {
        self.kind
    }

    /// Returns the fire period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Returns the delay between the query and its read.
    #[must_use]
    pub const fn followup_delay(&self) -> Duration {
        self.followup_delay
    }

    /// Returns the task name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }
}
