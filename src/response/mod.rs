// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response decoding for generator replies.
//!
//! This module is the decode half of the wire codec. The generator answers
//! each query with a single text line and the link drops or garbles lines
//! routinely, so every decoder is total: a line that does not have the
//! expected shape yields `None` ("no information this cycle") rather than
//! an error.
//!
//! | Query | Decoder | Accepted shape |
//! |-------|---------|----------------|
//! | identify | [`decode_model`] | contains a known part number |
//! | IRE | [`decode_ire`] | digits only |
//! | pattern | [`decode_pattern`] | digits only, known id |
//! | resolution | [`decode_resolution`] | contains `digits*digits`, known code |
//! | temperature | [`decode_temperature`] | signed decimal immediately before `F` |

mod model;
mod numeric;
mod resolution;
mod temperature;

pub use model::decode_model;
pub use numeric::{decode_ire, decode_pattern};
pub use resolution::decode_resolution;
pub use temperature::decode_temperature;

use serde::{Deserialize, Serialize};

use crate::types::{Pattern, Resolution, Temperature};

/// A value successfully read back from the generator by a poll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Reading {
    /// Raw IRE value as reported, before snapping onto the ladder.
    Ire(u32),
    /// Current test pattern.
    Pattern(Pattern),
    /// Current output mode.
    Resolution(Resolution),
    /// Internal temperature.
    Temperature(Temperature),
}
