// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identify response parsing.

use crate::types::Model;

/// Determines the generator model from an identify response.
///
/// The reply is free text containing the part number somewhere inside it.
/// A reply without a known part number, including an empty one, is
/// [`Model::Unknown`]; this decoder never fails.
///
/// # Examples
///
/// ```
/// use vtgsync::response::decode_model;
/// use vtgsync::types::Model;
///
/// assert_eq!(decode_model("VTG-400 60-564-02 V1.3"), Model::Vtg400D);
/// assert_eq!(decode_model(""), Model::Unknown);
/// ```
#[must_use]
pub fn decode_model(response: &str) -> Model {
    [Model::Vtg400, Model::Vtg400D, Model::Vtg400Dvi]
        .into_iter()
        .find(|model| {
            model
                .part_number()
                .is_some_and(|part| response.contains(part))
        })
        .unwrap_or(Model::Unknown)
}
