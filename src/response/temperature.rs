// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature response parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Temperature;

static FAHRENHEIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([+-]?\d+\.?\d*)F").expect("temperature pattern is valid")
});

/// Decodes a temperature query reply.
///
/// Looks for a signed, optionally fractional number immediately followed
/// by `F`.
///
/// # Examples
///
/// ```
/// use vtgsync::response::decode_temperature;
///
/// assert_eq!(decode_temperature("+72.5F").map(|t| t.value()), Some(72.5));
/// assert_eq!(decode_temperature("abc"), None);
/// ```
#[must_use]
pub fn decode_temperature(response: &str) -> Option<Temperature> {
    let captures = FAHRENHEIT.captures(response)?;
    captures[1].parse().ok().map(Temperature::fahrenheit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(reply: &str) -> Option<f64> {
        decode_temperature(reply).map(|t| t.value())
    }

    #[test]
    fn signed_and_fractional() {
        assert_eq!(value("+72.5F"), Some(72.5));
        assert_eq!(value("72F"), Some(72.0));
        assert_eq!(value("-3.25F"), Some(-3.25));
    }

    #[test]
    fn trailing_dot_is_accepted() {
        assert_eq!(value("72.F"), Some(72.0));
    }

    #[test]
    fn embedded_in_text() {
        assert_eq!(value("TEMP= 101.0F\r\n"), Some(101.0));
    }

    #[test]
    fn missing_unit_or_number() {
        assert_eq!(value("abc"), None);
        assert_eq!(value("72C"), None);
        assert_eq!(value("72 F"), None);
        assert_eq!(value("F"), None);
    }
}
