// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serial link plumbing.
//!
//! The generator is a stateless, line-oriented responder with no request
//! identifiers: a reply can only be matched to its query by timing. Every
//! exchange therefore goes through a [`SerialLink`], which owns the
//! [`Transport`] and lets exactly one transaction run at a time.
//!
//! # Transports
//!
//! - [`Transport`]: the byte-level boundary, implemented by callers for
//!   whatever serial API they use
//! - [`StreamTransport`]: a ready-made transport over any tokio
//!   `AsyncRead + AsyncWrite` stream

mod link;
mod stream;

pub use link::SerialLink;
pub use stream::StreamTransport;

use std::future::Future;
use std::time::Duration;

use crate::error::TransportError;

/// Byte-level access to the generator.
///
/// Implementations do not need to be thread-safe beyond `Send`: the
/// [`SerialLink`] guarantees exclusive access for the duration of each
/// call.
pub trait Transport: Send + 'static {
    /// Writes one command string.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Write`] if the bytes could not be written.
    fn send(&mut self, command: &str) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Reads one response line, without its terminator.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Timeout`] if no complete line arrived within
    /// `timeout`, or [`TransportError::Read`] if the stream failed.
    fn receive_line(
        &mut self,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;

    /// Drops any input already received but not yet read.
    ///
    /// Called before every query so a late reply to an earlier query is
    /// never read as the answer to this one. Transports without an input
    /// buffer can keep the default.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Read`] if the stream failed.
    fn discard_input(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send {
        std::future::ready(Ok(()))
    }
}
