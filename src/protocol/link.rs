// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transaction queue over a single transport.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;

use super::Transport;
use crate::command::Command;
use crate::error::TransportError;

/// Exclusive, first-come-first-served access to a [`Transport`].
///
/// A transaction is the whole discard, send, settle, read sequence; no
/// other send can start until it has finished or timed out. Input left
/// over from an earlier transaction that timed out is discarded before the
/// query goes out. Waiters are served in the
/// order they asked (tokio's mutex is fair).
///
/// After a write or read failure, or once [`close`](Self::close) has been
/// called, the transport is dropped and every later call returns
/// [`TransportError::Closed`]. Callers still queued when `close` is called
/// get `Closed` too; only the transaction already running completes.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use vtgsync::command::Command;
/// use vtgsync::protocol::{SerialLink, StreamTransport};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (port, _device) = tokio::io::duplex(64);
/// let link = SerialLink::new(StreamTransport::new(port), Duration::from_secs(1));
///
/// link.send(&Command::PowerOn).await.unwrap();
/// assert!(link.is_open().await);
/// # }
/// ```
#[derive(Debug)]
pub struct SerialLink<T> {
    transport: Mutex<Option<T>>,
    closing: AtomicBool,
    read_timeout: Duration,
}

impl<T: Transport> SerialLink<T> {
    /// Wraps a transport. `read_timeout` bounds every response read.
    #[must_use]
    pub fn new(transport: T, read_timeout: Duration) -> Self {
        Self {
            transport: Mutex::new(Some(transport)),
            closing: AtomicBool::new(false),
            read_timeout,
        }
    }

    /// Returns the read timeout applied to every transaction.
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Sends a command that has no reply.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Closed`] if the link is closed, or the
    /// transport's write error.
    pub async fn send(&self, command: &Command) -> Result<(), TransportError> {
        let wire = command.encode();
        let mut slot = self.transport.lock().await;
        let Some(transport) = self.usable(&mut slot) else {
            return Err(TransportError::Closed);
        };

        tracing::debug!(command = %wire, "Sending command");
        let result = transport.send(&wire).await;
        Self::settle_failure(&mut slot, result.as_ref().err());
        result
    }

    /// Sends a query, waits `settle`, then reads one response line.
    ///
    /// The link stays locked for the whole exchange.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Closed`] if the link is closed,
    /// [`TransportError::Timeout`] if the generator stayed silent, or the
    /// transport's I/O error.
    pub async fn transact(
        &self,
        command: &Command,
        settle: Duration,
    ) -> Result<String, TransportError> {
        let wire = command.encode();
        let mut slot = self.transport.lock().await;
        let Some(transport) = self.usable(&mut slot) else {
            return Err(TransportError::Closed);
        };

        tracing::debug!(command = %wire, "Transaction started");
        let result = Self::exchange(transport, &wire, settle, self.read_timeout).await;
        match &result {
            Ok(line) => tracing::debug!(command = %wire, response = %line, "Transaction finished"),
            Err(e) => tracing::debug!(command = %wire, error = %e, "Transaction failed"),
        }
        Self::settle_failure(&mut slot, result.as_ref().err());
        result
    }

    /// Closes the link, waiting for any in-flight transaction first.
    ///
    /// Returns the transport if it was still open.
    pub async fn close(&self) -> Option<T> {
        self.closing.store(true, Ordering::Release);
        self.transport.lock().await.take()
    }

    /// Returns `true` if the transport is still held.
    ///
    /// Waits for any in-flight transaction.
    pub async fn is_open(&self) -> bool {
        let slot = self.transport.lock().await;
        !self.closing.load(Ordering::Acquire) && slot.is_some()
    }

    fn usable<'a>(&self, slot: &'a mut Option<T>) -> Option<&'a mut T> {
        if self.closing.load(Ordering::Acquire) {
            None
        } else {
            slot.as_mut()
        }
    }

    async fn exchange(
        transport: &mut T,
        wire: &str,
        settle: Duration,
        read_timeout: Duration,
    ) -> Result<String, TransportError> {
        transport.discard_input().await?;
        transport.send(wire).await?;
        tokio::time::sleep(settle).await;
        transport.receive_line(read_timeout).await
    }

    fn settle_failure(slot: &mut Option<T>, error: Option<&TransportError>) {
        if let Some(error) = error.filter(|e| e.is_io_failure()) {
            tracing::warn!(error = %error, "Serial link failed, closing");
            slot.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;
    use crate::protocol::StreamTransport;
    use crate::types::Color;

    /// Records every call and answers reads with a fixed line.
    struct Recorder {
        log: Arc<parking_lot::Mutex<Vec<String>>>,
        fail_writes: bool,
    }

    impl Recorder {
        fn new(fail_writes: bool) -> (Self, Arc<parking_lot::Mutex<Vec<String>>>) {
            let log = Arc::new(parking_lot::Mutex::new(Vec::new()));
            (
                Self {
                    log: Arc::clone(&log),
                    fail_writes,
                },
                log,
            )
        }
    }

    impl Transport for Recorder {
        async fn send(&mut self, command: &str) -> Result<(), TransportError> {
            self.log.lock().push(format!("send {command}"));
            if self.fail_writes {
                return Err(TransportError::Write(std::io::Error::other("unplugged")));
            }
            Ok(())
        }

        async fn receive_line(&mut self, _timeout: Duration) -> Result<String, TransportError> {
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.log.lock().push("recv".to_string());
            Ok("50".to_string())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn transact_sends_then_reads() {
        let (transport, log) = Recorder::new(false);
        let link = SerialLink::new(transport, Duration::from_secs(1));

        let line = link
            .transact(&Command::QueryIre, Duration::from_millis(100))
            .await
            .unwrap();

        assert_eq!(line, "50");
        assert_eq!(*log.lock(), vec!["send 15#", "recv"]);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_transactions_do_not_interleave() {
        let (transport, log) = Recorder::new(false);
        let link = Arc::new(SerialLink::new(transport, Duration::from_secs(1)));

        let settle = Duration::from_millis(100);
        let handles: Vec<_> = [
            Command::QueryIre,
            Command::QueryPattern,
            Command::QueryResolution,
        ]
        .into_iter()
        .map(|command| {
            let link = Arc::clone(&link);
            tokio::spawn(async move { link.transact(&command, settle).await })
        })
        .collect();
        let writer = {
            let link = Arc::clone(&link);
            tokio::spawn(async move { link.send(&Command::SetColor(Color::Red)).await })
        };

        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        writer.await.unwrap().unwrap();

        let log = log.lock();
        for (i, entry) in log.iter().enumerate() {
            let is_query = ["send 15#", "send J", "send ="].contains(&entry.as_str());
            if is_query {
                assert_eq!(log[i + 1], "recv", "query at {i} was not followed by its read");
            }
        }
        assert_eq!(log.len(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn late_reply_is_not_read_by_next_query() {
        let (port, mut device) = tokio::io::duplex(256);
        let link = SerialLink::new(StreamTransport::new(port), Duration::from_secs(1));
        let settle = Duration::from_millis(100);

        let stall = async {
            let mut query = [0u8; 1];
            device.read_exact(&mut query).await.unwrap();
            assert_eq!(&query, b"J");
            device.write_all(b"1").await.unwrap();
        };
        let (result, ()) = tokio::join!(link.transact(&Command::QueryPattern, settle), stall);
        assert!(matches!(result, Err(TransportError::Timeout(_))));

        // Rest of the stalled pattern reply
        device.write_all(b"3\r\n").await.unwrap();

        let answer = async {
            let mut query = [0u8; 3];
            device.read_exact(&mut query).await.unwrap();
            assert_eq!(&query, b"15#");
            device.write_all(b"0\r\n").await.unwrap();
        };
        let (result, ()) = tokio::join!(link.transact(&Command::QueryIre, settle), answer);

        assert_eq!(result.unwrap(), "0");
        assert!(link.is_open().await);
    }

    #[tokio::test]
    async fn write_failure_closes_link() {
        let (transport, _log) = Recorder::new(true);
        let link = SerialLink::new(transport, Duration::from_secs(1));

        let err = link.send(&Command::PowerOn).await.unwrap_err();
        assert!(err.is_io_failure());
        assert!(!link.is_open().await);

        let err = link.send(&Command::PowerOn).await.unwrap_err();
        assert!(matches!(err, TransportError::Closed));
    }

    #[tokio::test(start_paused = true)]
    async fn close_cancels_queued_transactions() {
        let (transport, log) = Recorder::new(false);
        let link = Arc::new(SerialLink::new(transport, Duration::from_secs(1)));
        let settle = Duration::from_millis(100);

        let first = {
            let link = Arc::clone(&link);
            tokio::spawn(async move { link.transact(&Command::QueryIre, settle).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let queued = {
            let link = Arc::clone(&link);
            tokio::spawn(async move { link.transact(&Command::QueryPattern, settle).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(link.close().await.is_some());

        assert_eq!(first.await.unwrap().unwrap(), "50");
        assert!(matches!(
            queued.await.unwrap(),
            Err(TransportError::Closed)
        ));
        assert_eq!(*log.lock(), vec!["send 15#", "recv"]);
    }

    #[tokio::test]
    async fn closed_link_rejects_transactions() {
        let (transport, log) = Recorder::new(false);
        let link = SerialLink::new(transport, Duration::from_secs(1));

        assert!(link.close().await.is_some());
        let err = link
            .transact(&Command::Identify, Duration::ZERO)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Closed));
        assert!(log.lock().is_empty());
    }
}
