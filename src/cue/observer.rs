// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary to the screen-sampling collaborator.

use std::future::Future;

/// Produces text snapshots of the measurement tool's visible state.
///
/// How the text is obtained (accessibility APIs, OCR, log tailing) is up
/// to the implementor. An empty string means "nothing visible". Any plain
/// `FnMut() -> String` closure is an observer.
///
/// # Examples
///
/// ```
/// use vtgsync::cue::ExternalObserver;
///
/// fn assert_observer<O: ExternalObserver>(_: O) {}
///
/// assert_observer(|| String::from("Red primary"));
/// ```
pub trait ExternalObserver: Send + 'static {
    /// Takes one snapshot.
    fn sample(&mut self) -> impl Future<Output = String> + Send;
}

impl<F> ExternalObserver for F
where
    F: FnMut() -> String + Send + 'static,
{
    fn sample(&mut self) -> impl Future<Output = String> + Send {
        std::future::ready(self())
    }
}
