// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IRE level type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Luminance level of the generator output, in IRE.
///
/// The generator only exposes the eleven decade steps 0, 10, ..., 100.
/// Any value read back from the device or inferred from a cue is snapped
/// onto that ladder with [`IreLevel::nearest`].
///
/// # Examples
///
/// ```
/// use vtgsync::types::IreLevel;
///
/// let level = IreLevel::new(70).unwrap();
/// assert_eq!(level.value(), 70);
///
/// // Off-ladder values are rejected
/// assert!(IreLevel::new(75).is_err());
///
/// // ...or snapped
/// assert_eq!(IreLevel::nearest(47).value(), 50);
/// assert_eq!(IreLevel::nearest(45).value(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct IreLevel(u8);

impl IreLevel {
    /// Black level.
    pub const MIN: Self = Self(0);

    /// Peak white.
    pub const MAX: Self = Self(100);

    /// The full ladder in ascending order.
    pub const LADDER: [Self; 11] = [
        Self(0),
        Self(10),
        Self(20),
        Self(30),
        Self(40),
        Self(50),
        Self(60),
        Self(70),
        Self(80),
        Self(90),
        Self(100),
    ];

    /// Creates a level from an exact ladder value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidIre` unless `value` is a multiple of 10
    /// no greater than 100.
    pub fn new(value: u32) -> Result<Self, ValueError> {
        Self::LADDER
            .into_iter()
            .find(|level| u32::from(level.0) == value)
            .ok_or(ValueError::InvalidIre(value))
    }

    /// Returns the ladder step closest to `value`.
    ///
    /// The ladder is scanned in ascending order and only a strictly smaller
    /// distance replaces the current best, so a tie resolves to the lower
    /// step. Values above 100 snap to 100.
    #[must_use]
    pub fn nearest(value: u32) -> Self {
        let mut best = Self::MIN;
        let mut best_distance = u32::MAX;
        for level in Self::LADDER {
            let distance = value.abs_diff(u32::from(level.0));
            if distance < best_distance {
                best = level;
                best_distance = distance;
            }
        }
        best
    }

    /// Returns the level in IRE.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for IreLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IRE", self.0)
    }
}

impl From<IreLevel> for u8 {
    fn from(level: IreLevel) -> Self {
        level.0
    }
}

impl TryFrom<u8> for IreLevel {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(u32::from(value))
    }
}
