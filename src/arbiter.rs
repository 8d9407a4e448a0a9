// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Source arbitration.
//!
//! Three sources can claim to know what the generator shows: the user, the
//! generator itself (via polling) and the external measurement tool. Each
//! claim reaches the [`Arbiter`] as a tagged [`Event`], and a single
//! dispatch decides what changes in [`DeviceState`] and which command, if
//! any, must go out to bring the generator in line.
//!
//! | Source | Updates state | Emits command |
//! |--------|---------------|---------------|
//! | [`Source::User`] | yes | always |
//! | [`Source::Poll`] | decoded fields only | never |
//! | [`Source::External`] | yes | always (steers the generator) |
//!
//! Updates are last-write-wins per field. A poll reply that was in flight
//! while the user changed something can therefore overwrite the user's
//! newer value until the next poll or command; no sequence numbers are
//! kept.
//!
//! Resolving and committing are separate steps so that the caller can send
//! the command first and only commit once the write succeeded.
//!
//! # Examples
//!
//! ```
//! use vtgsync::arbiter::{Arbiter, Directive, Event};
//! use vtgsync::command::Command;
//! use vtgsync::types::Pattern;
//!
//! let mut arbiter = Arbiter::new();
//! let verdict = Arbiter::resolve(&Event::User(Directive::Pattern(Pattern::ColorBar)));
//!
//! assert_eq!(verdict.command, Some(Command::SetPattern(Pattern::ColorBar)));
//! assert!(arbiter.commit(&verdict.change));
//! assert_eq!(arbiter.state().pattern(), Some(Pattern::ColorBar));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::cue::Cue;
use crate::response::Reading;
use crate::state::{ConnectionPhase, DeviceState, StateChange};
use crate::types::{Color, IreLevel, Model, Pattern, PowerState, Resolution};

/// Where a state claim came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// A direct user action.
    User,
    /// A value read back from the generator.
    Poll,
    /// A cue from the external measurement tool.
    External,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Poll => "poll",
            Self::External => "external",
        })
    }
}

/// A settable generator parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    /// Output power.
    Power(PowerState),
    /// Luminance level.
    Ire(IreLevel),
    /// Test pattern.
    Pattern(Pattern),
    /// Output mode.
    Resolution(Resolution),
    /// Full-field color.
    Color(Color),
}

impl Directive {
    /// Returns the command that applies this directive.
    #[must_use]
    pub const fn command(&self) -> Command {
        match *self {
            Self::Power(state) => Command::power(state),
            Self::Ire(level) => Command::SetIre(level),
            Self::Pattern(pattern) => Command::SetPattern(pattern),
            Self::Resolution(resolution) => Command::SetResolution(resolution),
            Self::Color(color) => Command::SetColor(color),
        }
    }

    /// Returns the state change this directive implies.
    #[must_use]
    pub fn change(&self) -> StateChange {
        match *self {
            Self::Power(state) => StateChange::Power(state),
            Self::Ire(level) => StateChange::Ire(level),
            Self::Pattern(pattern) => StateChange::Pattern(pattern),
            Self::Resolution(resolution) => StateChange::Resolution(resolution),
            Self::Color(color) => StateChange::Color(color),
        }
    }
}

impl From<Cue> for Directive {
    fn from(cue: Cue) -> Self {
        match cue {
            Cue::Color(color) => Self::Color(color),
            Cue::Ire(level) => Self::Ire(level),
        }
    }
}

/// A state claim tagged with its source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// The user asked for this.
    User(Directive),
    /// A poll decoded this.
    Poll(Reading),
    /// The measurement tool asked for this.
    External(Cue),
}

impl Event {
    /// Returns the event's source.
    #[must_use]
    pub const fn source(&self) -> Source {
        match self {
            Self::User(_) => Source::User,
            Self::Poll(_) => Source::Poll,
            Self::External(_) => Source::External,
        }
    }
}

/// The arbiter's decision for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Where the event came from.
    pub source: Source,
    /// The change to commit once any command has been sent.
    pub change: StateChange,
    /// The command to send to the generator, if any.
    pub command: Option<Command>,
}

/// Owner of the [`DeviceState`].
///
/// Nothing else in the crate writes the state; everyone else gets
/// snapshots.
#[derive(Debug, Clone, Default)]
pub struct Arbiter {
    state: DeviceState,
}

impl Arbiter {
    /// Creates an arbiter with an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> DeviceState {
        self.state.clone()
    }

    /// Decides what an event changes and what must be sent.
    ///
    /// IRE values from any source are snapped onto the ladder here, so the
    /// state never holds an off-ladder level.
    #[must_use]
    pub fn resolve(event: &Event) -> Verdict {
        let source = event.source();
        match event {
            Event::User(directive) => Verdict {
                source,
                change: directive.change(),
                command: Some(directive.command()),
            },
            Event::External(cue) => {
                let directive = Directive::from(*cue);
                Verdict {
                    source,
                    change: directive.change(),
                    command: Some(directive.command()),
                }
            }
            Event::Poll(reading) => Verdict {
                source,
                change: match *reading {
                    Reading::Ire(raw) => StateChange::Ire(IreLevel::nearest(raw)),
                    Reading::Pattern(pattern) => StateChange::Pattern(pattern),
                    Reading::Resolution(resolution) => StateChange::Resolution(resolution),
                    Reading::Temperature(temperature) => StateChange::Temperature(temperature),
                },
                command: None,
            },
        }
    }

    /// Commits a change. Returns `true` if any field actually moved.
    pub fn commit(&mut self, change: &StateChange) -> bool {
        self.state.apply(change)
    }

    /// Resolves and commits in one step, ignoring the command.
    ///
    /// Suitable for events whose command has already been dealt with, and
    /// for poll events, which never carry one.
    pub fn apply(&mut self, event: &Event) -> (Verdict, bool) {
        let verdict = Self::resolve(event);
        let changed = self.commit(&verdict.change);
        (verdict, changed)
    }

    /// Moves the link to a new lifecycle phase.
    pub fn set_phase(&mut self, phase: ConnectionPhase) -> bool {
        self.commit(&StateChange::Connection(phase))
    }

    /// Records the model reported by the identify query.
    pub fn identify(&mut self, model: Model) -> bool {
        self.commit(&StateChange::Model(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Temperature;

    #[test]
    fn user_event_updates_and_emits() {
        let mut arbiter = Arbiter::new();
        let level = IreLevel::new(60).unwrap();

        let (verdict, changed) = arbiter.apply(&Event::User(Directive::Ire(level)));

        assert!(changed);
        assert_eq!(verdict.source, Source::User);
        assert_eq!(verdict.command, Some(Command::SetIre(level)));
        assert_eq!(arbiter.state().ire(), Some(level));
    }

    #[test]
    fn user_power_maps_to_power_commands() {
        let verdict = Arbiter::resolve(&Event::User(Directive::Power(PowerState::Off)));
        assert_eq!(verdict.command, Some(Command::PowerOff));
        assert_eq!(verdict.change, StateChange::Power(PowerState::Off));
    }

    #[test]
    fn poll_event_never_emits() {
        let readings = [
            Reading::Ire(30),
            Reading::Pattern(Pattern::Coarse),
            Reading::Resolution(Resolution::Pal),
            Reading::Temperature(Temperature::fahrenheit(71.0)),
        ];
        for reading in readings {
            let verdict = Arbiter::resolve(&Event::Poll(reading));
            assert_eq!(verdict.source, Source::Poll);
            assert!(verdict.command.is_none());
        }
    }

    #[test]
    fn poll_ire_is_snapped() {
        let mut arbiter = Arbiter::new();
        arbiter.apply(&Event::Poll(Reading::Ire(47)));
        assert_eq!(arbiter.state().ire(), Some(IreLevel::new(50).unwrap()));

        arbiter.apply(&Event::Poll(Reading::Ire(45)));
        assert_eq!(arbiter.state().ire(), Some(IreLevel::new(40).unwrap()));
    }

    #[test]
    fn poll_only_touches_decoded_field() {
        let mut arbiter = Arbiter::new();
        arbiter.apply(&Event::User(Directive::Color(Color::Green)));
        arbiter.apply(&Event::Poll(Reading::Pattern(Pattern::Window80)));

        assert_eq!(arbiter.state().color(), Some(Color::Green));
        assert_eq!(arbiter.state().pattern(), Some(Pattern::Window80));
        assert!(arbiter.state().ire().is_none());
    }

    #[test]
    fn external_cue_steers_generator() {
        let mut arbiter = Arbiter::new();

        let (verdict, changed) = arbiter.apply(&Event::External(Cue::Color(Color::Red)));
        assert!(changed);
        assert_eq!(verdict.source, Source::External);
        assert_eq!(verdict.command, Some(Command::SetColor(Color::Red)));

        let level = IreLevel::new(70).unwrap();
        let verdict = Arbiter::resolve(&Event::External(Cue::Ire(level)));
        assert_eq!(verdict.command, Some(Command::SetIre(level)));
    }

    #[test]
    fn repeated_cue_still_emits_but_does_not_change() {
        let mut arbiter = Arbiter::new();
        arbiter.apply(&Event::External(Cue::Color(Color::White)));

        let (verdict, changed) = arbiter.apply(&Event::External(Cue::Color(Color::White)));
        assert!(!changed);
        assert_eq!(verdict.command, Some(Command::SetColor(Color::White)));
    }

    #[test]
    fn later_poll_overwrites_earlier_user_value() {
        let mut arbiter = Arbiter::new();
        arbiter.apply(&Event::User(Directive::Ire(IreLevel::new(90).unwrap())));
        arbiter.apply(&Event::Poll(Reading::Ire(20)));
        assert_eq!(arbiter.state().ire(), Some(IreLevel::new(20).unwrap()));
    }

    #[test]
    fn lifecycle_helpers() {
        let mut arbiter = Arbiter::new();
        assert!(arbiter.set_phase(ConnectionPhase::Identifying));
        assert!(arbiter.identify(Model::Vtg400Dvi));
        assert!(!arbiter.identify(Model::Vtg400Dvi));
        assert_eq!(arbiter.snapshot().model(), Some(Model::Vtg400Dvi));
        assert_eq!(arbiter.state().connection(), ConnectionPhase::Identifying);
    }
}
