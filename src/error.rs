// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `vtgsync` library.
//!
//! The serial link to the generator is lossy by nature, so only a few
//! failures are hard errors. A response that does not match the expected
//! shape is never an error: decoders return `None` instead (see
//! [`response`](crate::response)).

use std::time::Duration;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred on the serial link.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The serial port could not be opened.
    #[error("connection failed: {0}")]
    Connection(String),

    /// No serial link is open.
    #[error("serial not open")]
    NotConnected,

    /// A connect was requested while a link is already open.
    #[error("already connected")]
    AlreadyConnected,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The IRE value is not one of the eleven decade steps.
    #[error("IRE level {0} is not a multiple of 10 in [0, 100]")]
    InvalidIre(u32),

    /// The pattern id is not known to the generator.
    #[error("unknown pattern id {0}")]
    UnknownPattern(u32),

    /// The pattern or resolution name is not known.
    #[error("unknown {kind} name: {name}")]
    UnknownName {
        /// What was being looked up.
        kind: &'static str,
        /// The name that failed to match.
        name: String,
    },

    /// The resolution code is not in the table.
    #[error("unknown resolution code: {0}")]
    UnknownResolution(String),

    /// A period or capacity setting is zero.
    #[error("{0} must be non-zero")]
    ZeroSetting(&'static str),
}

/// Errors raised by a [`Transport`](crate::protocol::Transport) or the
/// [`SerialLink`](crate::protocol::SerialLink) that serializes it.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Writing the command bytes failed.
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),

    /// Reading the response line failed.
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    /// No response line arrived in time.
    #[error("no response within {} ms", .0.as_millis())]
    Timeout(Duration),

    /// The link has been torn down.
    #[error("link closed")]
    Closed,
}

impl TransportError {
    /// Returns `true` for failures that mean the link itself is broken.
    ///
    /// Timeouts are not link failures: the generator simply had nothing to
    /// say this cycle.
    #[must_use]
    pub fn is_io_failure(&self) -> bool {
        matches!(self, Self::Write(_) | Self::Read(_))
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
