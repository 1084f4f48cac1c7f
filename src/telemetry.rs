//! Telemetry utilities for command timing and log correlation.

use std::time::{Duration, Instant};

use tracing::{trace, warn};

/// Commands slower than this are logged at `warn`.
const SLOW_COMMAND: Duration = Duration::from_millis(10);

/// Guard for timing command execution.
///
/// Records command latency when dropped.
pub struct CommandTimer {
    command: &'static str,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        if elapsed >= SLOW_COMMAND {
            warn!(command = self.command, elapsed_us = elapsed.as_micros() as u64, "slow command");
        } else {
            trace!(command = self.command, elapsed_us = elapsed.as_micros() as u64, "command done");
        }
    }
}

/// Standardized span constructors.
pub mod spans {
    use std::net::SocketAddr;

    use tracing::{Span, debug_span, info_span};

    use crate::state::Uid;

    /// Create a span for a client connection.
    pub fn connection(uid: Uid, addr: SocketAddr, transport: &str) -> Span {
        info_span!("connection", uid = %uid, addr = %addr, transport = transport)
    }

    /// Create a span for a command execution.
    pub fn command(name: &str, uid: Uid, nick: &str) -> Span {
        debug_span!("command", name = %name, uid = %uid, nick = %nick)
    }
}
