//! Adapter runtime integration.
//!
//! Bridges the synchronous game loop with the async TCP server. The game loop
//! owns the engine; it polls [`Adapter::try_recv`] for commands and hands
//! replies back through [`Adapter::send`].

use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::protocol::{AckMessage, ObservationMessage};
use crate::server::{run_server_with_counters, ServerConfig};
use crate::types::{Coord, GameAction};

/// Command delivered to the game loop.
#[derive(Debug, Clone)]
pub struct InboundCommand {
    pub client_id: usize,
    pub seq: u64,
    pub payload: InboundPayload,
}

#[derive(Debug, Clone)]
pub enum InboundPayload {
    /// A client asked for the current board (sent after a streaming hello).
    SnapshotRequest,
    Command(ClientCommand),
}

/// Engine-level command decoded from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    /// Tap, swipe or restart, exactly as the local player would issue it.
    Action(GameAction),
    Select(Coord),
    MoveTo(Coord),
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    ToClientAck { client_id: usize, ack: AckMessage },
    ToClientObservation {
        client_id: usize,
        obs: ObservationMessage,
    },
    /// Sent to every client that asked for streamed observations.
    BroadcastObservation { obs: ObservationMessage },
}

/// Live connection counters shared between the server tasks and the UI.
#[derive(Debug, Default)]
pub struct AdapterCounters {
    clients: AtomicU16,
    streaming: AtomicU16,
    /// Controller client id, 0 when there is none (ids start at 1).
    controller: AtomicUsize,
}

impl AdapterCounters {
    pub(crate) fn set(&self, clients: usize, streaming: usize, controller: Option<usize>) {
        let clamp = |n: usize| n.min(u16::MAX as usize) as u16;
        let controller = controller.unwrap_or(0);
        self.clients.store(clamp(clients), Ordering::Relaxed);
        self.streaming.store(clamp(streaming), Ordering::Relaxed);
        self.controller.store(controller, Ordering::Relaxed);
    }

    pub fn status(&self) -> AdapterStatus {
        let controller = self.controller.load(Ordering::Relaxed);
        AdapterStatus {
            client_count: self.clients.load(Ordering::Relaxed),
            streaming_count: self.streaming.load(Ordering::Relaxed),
            controller_id: (controller != 0).then_some(controller),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdapterStatus {
    pub client_count: u16,
    pub streaming_count: u16,
    pub controller_id: Option<usize>,
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
    counters: Arc<AdapterCounters>,
}

impl Adapter {
    /// Start the server on its own tokio runtime.
    ///
    /// Returns `Ok(None)` when the config disables the adapter.
    pub fn start(config: ServerConfig) -> Result<Option<Self>> {
        if config.disabled {
            return Ok(None);
        }

        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
        let counters = Arc::new(AdapterCounters::default());

        let rt = Runtime::new()?;
        let quiet = config.quiet;
        let shared = Arc::clone(&counters);
        rt.spawn(async move {
            if let Err(e) = run_server_with_counters(config, cmd_tx, out_rx, None, shared).await {
                if !quiet {
                    eprintln!("[Adapter] server stopped: {}", e);
                }
            }
        });

        Ok(Some(Self {
            _rt: rt,
            cmd_rx,
            out_tx,
            counters,
        }))
    }

    pub fn try_recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.try_recv().ok()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }

    pub fn status(&self) -> AdapterStatus {
        self.counters.status()
    }
}
