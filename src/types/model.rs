// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generator model type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generator model, as reported by the identify query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    /// VTG 400 (part 60-564-01).
    Vtg400,
    /// VTG 400D (part 60-564-02).
    Vtg400D,
    /// VTG 400DVI (part 60-564-03).
    Vtg400Dvi,
    /// The generator answered but with no known part number.
    Unknown,
}

impl Model {
    /// Returns the part number that identifies this model, if any.
    #[must_use]
    pub const fn part_number(&self) -> Option<&'static str> {
        match self {
            Self::Vtg400 => Some("60-564-01"),
            Self::Vtg400D => Some("60-564-02"),
            Self::Vtg400Dvi => Some("60-564-03"),
            Self::Unknown => None,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Vtg400 => "VTG 400",
            Self::Vtg400D => "VTG 400D",
            Self::Vtg400Dvi => "VTG 400DVI",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
