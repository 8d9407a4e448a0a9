// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Internal temperature reading.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Internal temperature of the generator, in degrees Fahrenheit.
///
/// # Examples
///
/// ```
/// use vtgsync::types::Temperature;
///
/// let t = Temperature::fahrenheit(72.4);
/// assert_eq!(t.value(), 72.4);
/// assert_eq!(t.to_string(), "72 °F");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Temperature(f64);

impl Temperature {
    /// Creates a reading in degrees Fahrenheit.
    #[must_use]
    pub const fn fahrenheit(value: f64) -> Self {
        Self(value)
    }

    /// Returns the reading in degrees Fahrenheit.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} °F", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rounds_to_whole_degrees() {
        assert_eq!(Temperature::fahrenheit(72.0).to_string(), "72 °F");
        assert_eq!(Temperature::fahrenheit(72.6).to_string(), "73 °F");
        assert_eq!(Temperature::fahrenheit(-4.2).to_string(), "-4 °F");
    }
}
