// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resolution response parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Resolution;

static MODE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\*\d+").expect("mode code pattern is valid"));

/// Decodes a resolution query reply.
///
/// The first `digits*digits` run in the reply is taken as the mode code.
/// Returns `None` when there is no such run or the code is not in the
/// resolution table.
///
/// # Examples
///
/// ```
/// use vtgsync::response::decode_resolution;
/// use vtgsync::types::Resolution;
///
/// assert_eq!(decode_resolution("current mode 001*07 ok"), Some(Resolution::Ntsc));
/// assert_eq!(decode_resolution("garbage"), None);
/// ```
#[must_use]
pub fn decode_resolution(response: &str) -> Option<Resolution> {
    MODE_CODE
        .find(response)
        .and_then(|code| Resolution::from_code(code.as_str()))
}
