// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Test pattern type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A test pattern the generator can output.
///
/// Each pattern is selected on the wire by its numeric id (`{id}J`), and
/// the pattern query answers with that same id.
///
/// # Examples
///
/// ```
/// use vtgsync::types::Pattern;
///
/// assert_eq!(Pattern::ColorBar.id(), 13);
/// assert_eq!(Pattern::from_id(15), Some(Pattern::Window20));
/// assert_eq!(Pattern::from_id(99), None);
/// assert_eq!("FineCross".parse::<Pattern>().unwrap(), Pattern::FineCross);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pattern {
    /// 20% window.
    Window20,
    /// 80% window.
    Window80,
    /// Variable IRE field.
    VarIre,
    /// Full-screen field.
    FullScreen,
    /// 4x4 crosshatch.
    Cross4x4,
    /// Coarse crosshatch.
    Coarse,
    /// Fine crosshatch.
    FineCross,
    /// Color bars.
    ColorBar,
}

impl Pattern {
    /// All patterns, in front-panel order.
    pub const ALL: [Self; 8] = [
        Self::Window20,
        Self::Window80,
        Self::VarIre,
        Self::FullScreen,
        Self::Cross4x4,
        Self::Coarse,
        Self::FineCross,
        Self::ColorBar,
    ];

    /// Returns the generator's id for this pattern.
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::Window20 => 15,
            Self::Window80 => 14,
            Self::VarIre => 16,
            Self::FullScreen => 17,
            Self::Cross4x4 => 6,
            Self::Coarse => 7,
            Self::FineCross => 8,
            Self::ColorBar => 13,
        }
    }

    /// Looks up a pattern by generator id.
    #[must_use]
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Window20 => "Window20",
            Self::Window80 => "Window80",
            Self::VarIre => "VarIRE",
            Self::FullScreen => "FullScreen",
            Self::Cross4x4 => "4x4Cross",
            Self::Coarse => "Coarse",
            Self::FineCross => "FineCross",
            Self::ColorBar => "ColorBar",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValueError::UnknownName {
                kind: "pattern",
                name: s.to_string(),
            })
    }
}

impl TryFrom<u32> for Pattern {
    type Error = ValueError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(ValueError::UnknownPattern(id))
    }
}
