// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport over a tokio byte stream.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use super::Transport;
use crate::error::TransportError;

/// A [`Transport`] over any `AsyncRead + AsyncWrite` stream.
///
/// Commands are written verbatim. Responses are read up to `\n`, and
/// trailing `\r`/`\n` are stripped. Bytes of a line that was still
/// incomplete when a read timed out are dropped with it.
///
/// End of stream is reported as a read failure.
#[derive(Debug)]
pub struct StreamTransport<S> {
    stream: BufReader<S>,
    pending: Vec<u8>,
}

impl<S> StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    /// Wraps a stream.
    #[must_use]
    pub fn new(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
            pending: Vec::new(),
        }
    }

    /// Returns the underlying stream.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }
}

impl<S> Transport for StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    async fn send(&mut self, command: &str) -> Result<(), TransportError> {
        self.stream
            .write_all(command.as_bytes())
            .await
            .map_err(TransportError::Write)?;
        self.stream.flush().await.map_err(TransportError::Write)
    }

    async fn receive_line(&mut self, timeout: Duration) -> Result<String, TransportError> {
        let read = self.stream.read_until(b'\n', &mut self.pending);
        match tokio::time::timeout(timeout, read).await {
            Err(_) => {
                if !self.pending.is_empty() {
                    tracing::debug!(dropped = self.pending.len(), "Partial line dropped");
                    self.pending.clear();
                }
                Err(TransportError::Timeout(timeout))
            }
            Ok(Err(e)) => Err(TransportError::Read(e)),
            Ok(Ok(0)) => Err(TransportError::Read(io::ErrorKind::UnexpectedEof.into())),
            Ok(Ok(_)) => {
                let bytes = std::mem::take(&mut self.pending);
                let line = String::from_utf8_lossy(&bytes);
                Ok(line.trim_end_matches(['\r', '\n']).to_string())
            }
        }
    }

    async fn discard_input(&mut self) -> Result<(), TransportError> {
        self.pending.clear();
        loop {
            // A zero timeout still polls the read once, so only bytes that
            // are already there get drained.
            let ready = match tokio::time::timeout(Duration::ZERO, self.stream.fill_buf()).await {
                Ok(Ok(buf)) => buf.len(),
                Ok(Err(e)) => return Err(TransportError::Read(e)),
                Err(_) => 0,
            };
            if ready == 0 {
                return Ok(());
            }
            tracing::debug!(dropped = ready, "Stale input discarded");
            self.stream.consume(ready);
        }
    }
}
