// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output resolution type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// An output mode of the generator.
///
/// Modes are addressed by a `digits*digits` code. Selecting a mode sends
/// the code followed by `=`; the resolution query answers with a line that
/// contains the code somewhere inside it.
///
/// # Examples
///
/// ```
/// use vtgsync::types::Resolution;
///
/// assert_eq!(Resolution::Ntsc.code(), "001*07");
/// assert_eq!(Resolution::from_code("004*06"), Some(Resolution::P720));
/// assert_eq!(Resolution::P720.to_string(), "720p");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// 240p.
    P240,
    /// NTSC (US).
    Ntsc,
    /// NTSC (Japan).
    NtscJ,
    /// PAL.
    Pal,
    /// 480p.
    P480,
    /// 576p.
    P576,
    /// 720p.
    P720,
    /// 1080i.
    I1080,
}

impl Resolution {
    /// All modes, in front-panel order.
    pub const ALL: [Self; 8] = [
        Self::P240,
        Self::Ntsc,
        Self::NtscJ,
        Self::Pal,
        Self::P480,
        Self::P576,
        Self::P720,
        Self::I1080,
    ];

    /// Returns the mode code without the trailing `=`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::P240 => "001*99",
            Self::Ntsc => "001*07",
            Self::NtscJ => "002*07",
            Self::Pal => "003*07",
            Self::P480 => "001*06",
            Self::P576 => "002*06",
            Self::P720 => "004*06",
            Self::I1080 => "010*06",
        }
    }

    /// Looks up a mode by its exact code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::P240 => "240p",
            Self::Ntsc => "NTSC/U",
            Self::NtscJ => "NTSC/J",
            Self::Pal => "PAL",
            Self::P480 => "480p",
            Self::P576 => "576p",
            Self::P720 => "720p",
            Self::I1080 => "1080i",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resolution {
    type Err = ValueError;

    /// Parses either a display name (`"PAL"`) or a code (`"003*07"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(r) = Self::from_code(s.trim_end_matches('=')) {
            return Ok(r);
        }
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValueError::UnknownResolution(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_table() {
        let table: Vec<(&str, &str)> = Resolution::ALL
            .iter()
            .map(|r| (r.code(), r.name()))
            .collect();
        assert_eq!(
            table,
            vec![
                ("001*99", "240p"),
                ("001*07", "NTSC/U"),
                ("002*07", "NTSC/J"),
                ("003*07", "PAL"),
                ("001*06", "480p"),
                ("002*06", "576p"),
                ("004*06", "720p"),
                ("010*06", "1080i"),
            ]
        );
    }

    #[test]
    fn from_code_requires_exact_match() {
        assert_eq!(Resolution::from_code("1*07"), None);
        assert_eq!(Resolution::from_code("010*06"), Some(Resolution::I1080));
    }

    #[test]
    fn parse_name_or_code() {
        assert_eq!("ntsc/j".parse::<Resolution>().unwrap(), Resolution::NtscJ);
        assert_eq!("003*07=".parse::<Resolution>().unwrap(), Resolution::Pal);
        assert_eq!(
            "4K".parse::<Resolution>(),
            Err(ValueError::UnknownResolution("4K".to_string()))
        );
    }
}
