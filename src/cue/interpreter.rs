// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cue parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{Color, IreLevel};

/// Phrase table, checked in order. Black has no phrase: the measurement
/// tool never asks for it.
const COLOR_PHRASES: [(&str, Color); 7] = [
    ("red primary", Color::Red),
    ("green primary", Color::Green),
    ("blue primary", Color::Blue),
    ("cyan secondary", Color::Cyan),
    ("magenta secondary", Color::Magenta),
    ("yellow secondary", Color::Yellow),
    ("white", Color::White),
];

static GRAY_PERCENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,3})%\s*gray").expect("gray percentage pattern is valid")
});

/// A directive inferred from the measurement tool's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// The generator should show this full-field color.
    Color(Color),
    /// The generator should show this gray level.
    Ire(IreLevel),
}

/// Turns observed text into a [`Cue`].
///
/// Color phrases take priority over gray percentages: when a sample holds
/// both, only the color is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct CueInterpreter;

impl CueInterpreter {
    /// Creates an interpreter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Interprets one text sample.
    #[must_use]
    pub fn interpret(&self, text: &str) -> Option<Cue> {
        if let Some(color) = Self::color_cue(text) {
            return Some(Cue::Color(color));
        }
        Self::gray_cue(text).map(Cue::Ire)
    }

    fn color_cue(text: &str) -> Option<Color> {
        let lower = text.to_lowercase();
        COLOR_PHRASES
            .iter()
            .find(|(phrase, _)| lower.contains(phrase))
            .map(|(_, color)| *color)
    }

    /// Only the first `N% gray` occurrence is considered.
    fn gray_cue(text: &str) -> Option<IreLevel> {
        let captures = GRAY_PERCENT.captures(text)?;
        let percent: u32 = captures[1].parse().ok()?;
        (percent <= 100).then(|| IreLevel::nearest(round_to_decade(percent)))
    }
}

/// Rounds to the nearest multiple of ten, halves going to the even decade.
fn round_to_decade(value: u32) -> u32 {
    let (tens, units) = (value / 10, value % 10);
    let up = units > 5 || (units == 5 && tens % 2 == 1);
    (tens + u32::from(up)) * 10
}
