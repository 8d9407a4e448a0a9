// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generator command definitions.
//!
//! This module is the encode half of the wire codec. Every command the
//! generator understands is a variant of [`Command`], and
//! [`Command::encode`] produces its exact, case-sensitive wire string.
//!
//! # Wire Format
//!
//! | Command | Wire string |
//! |---------|-------------|
//! | [`Command::PowerOn`] / [`Command::PowerOff`] | `1P` / `0P` |
//! | [`Command::SetIre`] | `{v}*15#` |
//! | [`Command::QueryIre`] | `15#` |
//! | [`Command::SetPattern`] | `{id}J` |
//! | [`Command::QueryPattern`] | `J` |
//! | [`Command::SetResolution`] | `{code}=` |
//! | [`Command::QueryResolution`] | `=` |
//! | [`Command::SetColor`] | `{index}*10#` |
//! | [`Command::QueryTemperature`] | `20S` |
//! | [`Command::Identify`] | `N` |
//!
//! No terminator is appended: the generator parses each command from its
//! final opcode character.
//!
//! # Examples
//!
//! ```
//! use vtgsync::command::Command;
//! use vtgsync::types::{Color, IreLevel, Pattern};
//!
//! assert_eq!(Command::SetIre(IreLevel::new(40).unwrap()).encode(), "40*15#");
//! assert_eq!(Command::SetPattern(Pattern::ColorBar).encode(), "13J");
//! assert_eq!(Command::SetColor(Color::Red).encode(), "4*10#");
//! assert!(Command::QueryIre.expects_response());
//! ```

use std::fmt;

use crate::types::{Color, IreLevel, Pattern, PowerState, Resolution};

/// A command that can be sent to the generator.
///
/// Commands are plain values: they are built, encoded and sent, and never
/// mutated along the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Turn the output on.
    PowerOn,
    /// Turn the output off.
    PowerOff,
    /// Set the luminance level.
    SetIre(IreLevel),
    /// Query the luminance level.
    QueryIre,
    /// Select a test pattern.
    SetPattern(Pattern),
    /// Query the current test pattern.
    QueryPattern,
    /// Select an output mode.
    SetResolution(Resolution),
    /// Query the current output mode.
    QueryResolution,
    /// Select a full-field color.
    SetColor(Color),
    /// Query the internal temperature.
    QueryTemperature,
    /// Ask the generator for its model string.
    Identify,
}

impl Command {
    /// Creates the power command for the given state.
    #[must_use]
    pub const fn power(state: PowerState) -> Self {
        match state {
            PowerState::On => Self::PowerOn,
            PowerState::Off => Self::PowerOff,
        }
    }

    /// Returns the wire string for this command.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::PowerOn => format!("{}P", PowerState::On.as_num()),
            Self::PowerOff => format!("{}P", PowerState::Off.as_num()),
            Self::SetIre(level) => format!("{}*15#", level.value()),
            Self::QueryIre => "15#".to_string(),
            Self::SetPattern(pattern) => format!("{}J", pattern.id()),
            Self::QueryPattern => "J".to_string(),
            Self::SetResolution(resolution) => format!("{}=", resolution.code()),
            Self::QueryResolution => "=".to_string(),
            Self::SetColor(color) => color.code().to_string(),
            Self::QueryTemperature => "20S".to_string(),
            Self::Identify => "N".to_string(),
        }
    }

    /// Returns `true` if the generator answers this command with a line.
    ///
    /// Only queries are followed by a read. Set commands are fire-and-forget.
    #[must_use]
    pub const fn expects_response(&self) -> bool {
        matches!(
            self,
            Self::QueryIre
                | Self::QueryPattern
                | Self::QueryResolution
                | Self::QueryTemperature
                | Self::Identify
        )
    }

    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PowerOn => "power-on",
            Self::PowerOff => "power-off",
            Self::SetIre(_) => "set-ire",
            Self::QueryIre => "query-ire",
            Self::SetPattern(_) => "set-pattern",
            Self::QueryPattern => "query-pattern",
            Self::SetResolution(_) => "set-resolution",
            Self::QueryResolution => "query-resolution",
            Self::SetColor(_) => "set-color",
            Self::QueryTemperature => "query-temperature",
            Self::Identify => "identify",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_commands() {
        assert_eq!(Command::PowerOn.encode(), "1P");
        assert_eq!(Command::PowerOff.encode(), "0P");
        assert_eq!(Command::power(PowerState::On), Command::PowerOn);
    }

    #[test]
    fn ire_commands() {
        assert_eq!(Command::SetIre(IreLevel::MIN).encode(), "0*15#");
        assert_eq!(Command::SetIre(IreLevel::MAX).encode(), "100*15#");
        assert_eq!(Command::QueryIre.encode(), "15#");
    }

    #[test]
    fn pattern_commands() {
        assert_eq!(Command::SetPattern(Pattern::Window20).encode(), "15J");
        assert_eq!(Command::SetPattern(Pattern::Cross4x4).encode(), "6J");
        assert_eq!(Command::QueryPattern.encode(), "J");
    }

    #[test]
    fn resolution_commands() {
        assert_eq!(Command::SetResolution(Resolution::P240).encode(), "001*99=");
        assert_eq!(Command::SetResolution(Resolution::I1080).encode(), "010*06=");
        assert_eq!(Command::QueryResolution.encode(), "=");
    }

    #[test]
    fn color_and_misc_commands() {
        assert_eq!(Command::SetColor(Color::White).encode(), "7*10#");
        assert_eq!(Command::QueryTemperature.encode(), "20S");
        assert_eq!(Command::Identify.encode(), "N");
    }

    #[test]
    fn only_queries_expect_a_response() {
        assert!(Command::Identify.expects_response());
        assert!(Command::QueryTemperature.expects_response());
        assert!(!Command::PowerOn.expects_response());
        assert!(!Command::SetColor(Color::Black).expects_response());
    }

    #[test]
    fn display_is_wire_string() {
        assert_eq!(Command::SetIre(IreLevel::MAX).to_string(), "100*15#");
    }
}
