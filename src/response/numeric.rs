// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Numeric response parsing (IRE and pattern queries).

use crate::types::Pattern;

/// Parses a reply that must consist solely of ASCII digits.
fn parse_digits(response: &str) -> Option<u32> {
    let trimmed = response.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Decodes an IRE query reply.
///
/// The raw value is returned as reported; snapping onto the IRE ladder is
/// the caller's concern.
///
/// # Examples
///
/// ```
/// use vtgsync::response::decode_ire;
///
/// assert_eq!(decode_ire("70\r\n"), Some(70));
/// assert_eq!(decode_ire("70 IRE"), None);
/// ```
#[must_use]
pub fn decode_ire(response: &str) -> Option<u32> {
    parse_digits(response)
}

/// Decodes a pattern query reply.
///
/// Returns `None` for non-numeric replies and for ids that are not in the
/// pattern table.
#[must_use]
pub fn decode_pattern(response: &str) -> Option<Pattern> {
    parse_digits(response).and_then(Pattern::from_id)
}
