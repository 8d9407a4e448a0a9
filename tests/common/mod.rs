// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory generator simulator shared by the integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use vtgsync::TransportError;
use vtgsync::protocol::Transport;

/// Time the simulated generator takes to answer a query.
pub const RESPONSE_LATENCY: Duration = Duration::from_millis(20);

/// One observed transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Send(String),
    Recv,
}

#[derive(Debug)]
struct Shared {
    log: Vec<(Instant, Op)>,
    pending: Option<String>,
    identify_reply: Option<String>,
    ire: String,
    pattern: String,
    resolution: String,
    temperature: String,
    fail_writes: bool,
    fail_reads: bool,
}

/// A generator that answers queries from its current settings and applies
/// set commands to them.
#[derive(Debug, Clone)]
pub struct Generator {
    shared: Arc<Mutex<Shared>>,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                log: Vec::new(),
                pending: None,
                identify_reply: Some("VTG-400 60-564-01".to_string()),
                ire: "0".to_string(),
                pattern: "17".to_string(),
                resolution: "001*06".to_string(),
                temperature: "+70.0F".to_string(),
                fail_writes: false,
                fail_reads: false,
            })),
        }
    }

    pub fn with_identify_reply(self, reply: Option<&str>) -> Self {
        self.shared.lock().identify_reply = reply.map(str::to_string);
        self
    }

    pub fn with_ire_reply(self, reply: &str) -> Self {
        self.shared.lock().ire = reply.to_string();
        self
    }

    pub fn with_pattern_reply(self, reply: &str) -> Self {
        self.shared.lock().pattern = reply.to_string();
        self
    }

    pub fn with_resolution_reply(self, reply: &str) -> Self {
        self.shared.lock().resolution = reply.to_string();
        self
    }

    pub fn with_temperature_reply(self, reply: &str) -> Self {
        self.shared.lock().temperature = reply.to_string();
        self
    }

    pub fn fail_writes(&self) {
        self.shared.lock().fail_writes = true;
    }

    pub fn fail_reads(&self) {
        self.shared.lock().fail_reads = true;
    }

    pub fn transport(&self) -> SimTransport {
        SimTransport {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn ops(&self) -> Vec<Op> {
        self.shared.lock().log.iter().map(|(_, op)| op.clone()).collect()
    }

    pub fn timed_ops(&self) -> Vec<(Instant, Op)> {
        self.shared.lock().log.clone()
    }

    pub fn sends(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Send(command) => Some(command),
                Op::Recv => None,
            })
            .collect()
    }

    pub fn count_sent(&self, command: &str) -> usize {
        self.sends().iter().filter(|c| *c == command).count()
    }

    pub fn op_count(&self) -> usize {
        self.shared.lock().log.len()
    }
}

/// Returns `true` for commands the generator answers.
pub fn is_query(command: &str) -> bool {
    matches!(command, "N" | "15#" | "J" | "=" | "20S")
}

/// Asserts that every query send is immediately followed by its read.
pub fn assert_serialized(ops: &[Op]) {
    for (i, op) in ops.iter().enumerate() {
        if let Op::Send(command) = op
            && is_query(command)
        {
            assert_eq!(
                ops.get(i + 1),
                Some(&Op::Recv),
                "query {command:?} at {i} was not followed by its read: {ops:?}"
            );
        }
    }
}

/// The transport half handed to the controller.
#[derive(Debug)]
pub struct SimTransport {
    shared: Arc<Mutex<Shared>>,
}

impl Transport for SimTransport {
    async fn send(&mut self, command: &str) -> Result<(), TransportError> {
        let mut shared = self.shared.lock();
        shared.log.push((Instant::now(), Op::Send(command.to_string())));
        if shared.fail_writes {
            return Err(TransportError::Write(io::Error::other("device unplugged")));
        }

        shared.pending = match command {
            "N" => shared.identify_reply.clone(),
            "15#" => Some(shared.ire.clone()),
            "J" => Some(shared.pattern.clone()),
            "=" => Some(format!("mode {} ok", shared.resolution)),
            "20S" => Some(shared.temperature.clone()),
            _ => {
                if let Some(level) = command.strip_suffix("*15#") {
                    shared.ire = level.to_string();
                } else if let Some(code) = command.strip_suffix('=') {
                    shared.resolution = code.to_string();
                } else if let Some(id) = command.strip_suffix('J') {
                    shared.pattern = id.to_string();
                }
                None
            }
        };
        Ok(())
    }

    async fn receive_line(&mut self, timeout: Duration) -> Result<String, TransportError> {
        let reply = {
            let mut shared = self.shared.lock();
            shared.log.push((Instant::now(), Op::Recv));
            if shared.fail_reads {
                return Err(TransportError::Read(io::Error::other("device unplugged")));
            }
            shared.pending.take()
        };

        match reply {
            Some(line) => {
                tokio::time::sleep(RESPONSE_LATENCY).await;
                Ok(line)
            }
            None => {
                tokio::time::sleep(timeout).await;
                Err(TransportError::Timeout(timeout))
            }
        }
    }
}
