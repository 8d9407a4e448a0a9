// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full-field color type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A full-field color the generator can output.
///
/// Colors are selected with `{index}*10#`, where the index follows the
/// classic 3-bit RGB order (blue = bit 0, green = bit 1, red = bit 2).
///
/// # Examples
///
/// ```
/// use vtgsync::types::Color;
///
/// assert_eq!(Color::Red.code(), "4*10#");
/// assert_eq!("magenta".parse::<Color>().unwrap(), Color::Magenta);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black.
    Black,
    /// Blue primary.
    Blue,
    /// Green primary.
    Green,
    /// Cyan secondary.
    Cyan,
    /// Red primary.
    Red,
    /// Magenta secondary.
    Magenta,
    /// Yellow secondary.
    Yellow,
    /// White.
    White,
}

impl Color {
    /// All colors, in generator index order.
    pub const ALL: [Self; 8] = [
        Self::Black,
        Self::Blue,
        Self::Green,
        Self::Cyan,
        Self::Red,
        Self::Magenta,
        Self::Yellow,
        Self::White,
    ];

    /// Returns the wire code selecting this color.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Black => "0*10#",
            Self::Blue => "1*10#",
            Self::Green => "2*10#",
            Self::Cyan => "3*10#",
            Self::Red => "4*10#",
            Self::Magenta => "5*10#",
            Self::Yellow => "6*10#",
            Self::White => "7*10#",
        }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Cyan => "Cyan",
            Self::Red => "Red",
            Self::Magenta => "Magenta",
            Self::Yellow => "Yellow",
            Self::White => "White",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValueError::UnknownName {
                kind: "color",
                name: s.to_string(),
            })
    }
}
