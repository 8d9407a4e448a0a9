// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! External measurement cues.
//!
//! A measurement tool running next to the generator tells its operator
//! what it expects to see ("Red primary", "55% gray"). An
//! [`ExternalObserver`] samples that tool's visible text, and the
//! [`CueInterpreter`] turns the text into at most one [`Cue`] per sample.
//!
//! # Examples
//!
//! ```
//! use vtgsync::cue::{Cue, CueInterpreter};
//! use vtgsync::types::{Color, IreLevel};
//!
//! let interpreter = CueInterpreter::new();
//!
//! assert_eq!(interpreter.interpret("Measuring Red Primary"), Some(Cue::Color(Color::Red)));
//! assert_eq!(
//!     interpreter.interpret("Next: 30% Gray"),
//!     Some(Cue::Ire(IreLevel::new(30).unwrap()))
//! );
//! assert_eq!(interpreter.interpret("idle"), None);
//! ```

mod interpreter;
mod observer;

pub use interpreter::{Cue, CueInterpreter};
pub use observer::ExternalObserver;
