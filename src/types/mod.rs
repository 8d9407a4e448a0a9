// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for generator control.
//!
//! Each type mirrors one of the generator's fixed tables. Constructors
//! validate against those tables so that an out-of-table value can never
//! reach the wire.
//!
//! # Types
//!
//! - [`IreLevel`] - Luminance level, one of the eleven decades 0-100
//! - [`Pattern`] - The eight selectable test patterns
//! - [`Resolution`] - The eight selectable output modes
//! - [`Color`] - The eight full-field colors
//! - [`Model`] - Generator model reported by the identify query
//! - [`PowerState`] - Output power
//! - [`Temperature`] - Internal temperature in Fahrenheit

mod color;
mod ire;
mod model;
mod pattern;
mod power;
mod resolution;
mod temperature;

pub use color::Color;
pub use ire::IreLevel;
pub use model::Model;
pub use pattern::Pattern;
pub use power::PowerState;
pub use resolution::Resolution;
pub use temperature::Temperature;
