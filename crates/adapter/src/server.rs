//! TCP server for the remote adapter
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking. The server never touches the engine: it
//! validates and forwards commands to the game loop and delivers whatever the
//! game loop sends back.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};

use crate::protocol::*;
use crate::runtime::{
    AdapterCounters, ClientCommand, InboundCommand, InboundPayload, OutboundMessage,
};
use crate::types::{Direction, GameAction};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7878;
pub const DEFAULT_MAX_PENDING: usize = 10;

const SEQ_NOT_INCREASING: &str = "seq must be strictly increasing";
const QUEUE_FULL: &str = "Command queue is full";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub protocol_version: String,
    pub max_pending_commands: usize,
    /// Append every inbound and outbound line to this JSONL file.
    pub log_path: Option<String>,
    pub disabled: bool,
    /// Suppress `[Adapter]` console lines (the terminal UI owns the screen).
    pub quiet: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            protocol_version: PROTOCOL_VERSION.to_string(),
            max_pending_commands: DEFAULT_MAX_PENDING,
            log_path: None,
            disabled: false,
            quiet: false,
        }
    }
}

impl ServerConfig {
    /// Apply `PEG_REMOTE_HOST`, `PEG_REMOTE_PORT`, `PEG_REMOTE_MAX_PENDING`,
    /// `PEG_REMOTE_LOG_PATH` and `PEG_REMOTE_DISABLED` on top of `self`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Same as [`with_env_overrides`](Self::with_env_overrides) with a custom
    /// variable source. Unparseable values are ignored.
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = var("PEG_REMOTE_HOST").filter(|s| !s.trim().is_empty()) {
            self.host = host.trim().to_string();
        }
        if let Some(port) = var("PEG_REMOTE_PORT").and_then(|s| s.trim().parse().ok()) {
            self.port = port;
        }
        if let Some(n) = var("PEG_REMOTE_MAX_PENDING").and_then(|s| s.trim().parse().ok()) {
            self.max_pending_commands = n;
        }
        if let Some(path) = var("PEG_REMOTE_LOG_PATH") {
            let path = path.trim();
            self.log_path = (!path.is_empty()).then(|| path.to_string());
        }
        if let Some(v) = var("PEG_REMOTE_DISABLED") {
            self.disabled = is_truthy(&v);
        }
        self
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid remote address {}:{}", self.host, self.port))
    }
}

fn is_truthy(v: &str) -> bool {
    let v = v.trim();
    v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
}

/// Shared server state
struct ServerState {
    config: ServerConfig,
    inner: RwLock<Registry>,
    counters: Arc<AdapterCounters>,
}

#[derive(Default)]
struct Registry {
    clients: Vec<ClientHandle>,
    controller: Option<usize>,
}

impl Registry {
    fn get_mut(&mut self, id: usize) -> Option<&mut ClientHandle> {
        self.clients.iter_mut().find(|c| c.id == id)
    }

    fn get(&self, id: usize) -> Option<&ClientHandle> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Strictly increasing per-client seq. Records `seq` when accepted.
    fn check_and_update_seq(&mut self, id: usize, seq: u64) -> bool {
        let Some(client) = self.get_mut(id) else {
            return true;
        };
        match client.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                client.last_seq = Some(seq);
                true
            }
        }
    }
}

impl ServerState {
    fn log(&self, args: std::fmt::Arguments<'_>) {
        if !self.config.quiet {
            println!("[Adapter] {}", args);
        }
    }

    fn publish_counters(&self, reg: &Registry) {
        let streaming = reg.clients.iter().filter(|c| c.stream_observations).count();
        self.counters
            .set(reg.clients.len(), streaming, reg.controller);
    }
}

/// Handle to a connected client
struct ClientHandle {
    id: usize,
    stream_observations: bool,
    handshaken: bool,
    last_seq: Option<u64>,
    tx: mpsc::UnboundedSender<ClientOutbound>,
}

#[derive(Debug, Clone)]
enum ClientOutbound {
    Ack(AckMessage),
    Error(ErrorMessage),
    Welcome(WelcomeMessage),
    Observation(ObservationMessage),
}

/// Start the TCP server.
///
/// `ready_tx` receives the bound address once the listener is up (useful with
/// port 0 in tests).
pub async fn run_server(
    config: ServerConfig,
    command_tx: mpsc::Sender<InboundCommand>,
    out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    run_server_with_counters(config, command_tx, out_rx, ready_tx, Arc::default()).await
}

pub async fn run_server_with_counters(
    config: ServerConfig,
    command_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
    counters: Arc<AdapterCounters>,
) -> anyhow::Result<()> {
    if config.disabled {
        if !config.quiet {
            println!("[Adapter] remote control disabled");
        }
        return Ok(());
    }

    let wire_log_tx = config.log_path.clone().map(spawn_wire_log);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let bound = listener.local_addr()?;

    let state = Arc::new(ServerState {
        config,
        inner: RwLock::new(Registry::default()),
        counters,
    });
    state.log(format_args!("TCP server listening on {}", bound));
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let reg = state.inner.read().await;
                match msg {
                    OutboundMessage::ToClientAck { client_id, ack } => {
                        send_to(&reg, client_id, ClientOutbound::Ack(ack));
                    }
                    OutboundMessage::ToClientObservation { client_id, obs } => {
                        send_to(&reg, client_id, ClientOutbound::Observation(obs));
                    }
                    OutboundMessage::BroadcastObservation { obs } => {
                        for c in reg.clients.iter().filter(|c| c.stream_observations) {
                            let _ = c.tx.send(ClientOutbound::Observation(obs.clone()));
                        }
                    }
                }
            }
        });
    }

    // Accept incoming connections
    let mut client_id_counter = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        state.log(format_args!("Client {} connected from {}", client_id, addr));

        let state = Arc::clone(&state);
        let command_tx = command_tx.clone();
        let wire_log_tx = wire_log_tx.clone();

        tokio::spawn(async move {
            let result = handle_client(socket, addr, client_id, &state, command_tx, wire_log_tx);
            if let Err(e) = result.await {
                if !state.config.quiet {
                    eprintln!("[Adapter] Client {} error: {}", client_id, e);
                }
            }
            state.log(format_args!("Client {} disconnected", client_id));
        });
    }
}

fn send_to(reg: &Registry, client_id: usize, msg: ClientOutbound) {
    if let Some(c) = reg.get(client_id) {
        let _ = c.tx.send(msg);
    }
}

/// Append-only JSONL log of every line on the wire.
fn spawn_wire_log(path: String) -> mpsc::UnboundedSender<Vec<u8>> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
    tokio::spawn(async move {
        use tokio::fs::OpenOptions;

        let mut options = OpenOptions::new();
        options.create(true).append(true);
        let mut file = match options.open(&path).await {
            Ok(f) => f,
            Err(_) => return,
        };
        while let Some(mut line) = rx.recv().await {
            line.push(b'\n');
            if file.write_all(&line).await.is_err() {
                break;
            }
        }
        let _ = file.flush().await;
    });
    tx
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    addr: SocketAddr,
    client_id: usize,
    state: &Arc<ServerState>,
    command_tx: mpsc::Sender<InboundCommand>,
    wire_log_tx: Option<mpsc::UnboundedSender<Vec<u8>>>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);

    let (tx, mut rx) = mpsc::unbounded_channel::<ClientOutbound>();

    {
        let mut reg = state.inner.write().await;
        reg.clients.push(ClientHandle {
            id: client_id,
            stream_observations: false,
            handshaken: false,
            last_seq: None,
            tx: tx.clone(),
        });
        state.publish_counters(&reg);
    }

    let wire_log_tx_out = wire_log_tx.clone();

    // Writer task: serialize, write one line per message, mirror to the log.
    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            let encoded = match msg {
                ClientOutbound::Ack(v) => serde_json::to_writer(&mut buf, &v),
                ClientOutbound::Error(v) => serde_json::to_writer(&mut buf, &v),
                ClientOutbound::Welcome(v) => serde_json::to_writer(&mut buf, &v),
                ClientOutbound::Observation(v) => serde_json::to_writer(&mut buf, &v),
            };
            if encoded.is_err() {
                continue;
            }
            if let Some(log) = wire_log_tx_out.as_ref() {
                let _ = log.send(buf.clone());
            }
            buf.push(b'\n');
            if writer.write_all(&buf).await.is_err() || writer.flush().await.is_err() {
                break;
            }
        }
    });

    let reply_error = |seq: u64, code: ErrorCode, message: &str| {
        let _ = tx.send(ClientOutbound::Error(create_error(seq, code, message)));
    };

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }

        let raw_line = line.trim_end_matches(['\n', '\r']);
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(log) = wire_log_tx.as_ref() {
            let _ = log.send(raw_line.as_bytes().to_vec());
        }

        match parse_message(trimmed) {
            Ok(ParsedMessage::Hello(hello)) => {
                let mut reg = state.inner.write().await;
                let handshaken = reg.get(client_id).is_some_and(|c| c.handshaken);
                if handshaken && !reg.check_and_update_seq(client_id, hello.seq) {
                    reply_error(hello.seq, ErrorCode::InvalidCommand, SEQ_NOT_INCREASING);
                    continue;
                }

                if !hello.protocol_version.starts_with(PROTOCOL_MAJOR) {
                    reply_error(
                        hello.seq,
                        ErrorCode::ProtocolMismatch,
                        &format!("Protocol version {} not supported", hello.protocol_version),
                    );
                    break;
                }

                let stream = hello.requested.stream_observations;
                if let Some(client) = reg.get_mut(client_id) {
                    client.handshaken = true;
                    client.last_seq = Some(hello.seq);
                    client.stream_observations = stream;
                }

                // First client to hello becomes controller.
                if reg.controller.is_none() {
                    reg.controller = Some(client_id);
                    state.log(format_args!("Client {} is now controller", client_id));
                }
                let role = if reg.controller == Some(client_id) {
                    AssignedRole::Controller
                } else {
                    AssignedRole::Observer
                };
                state.log(format_args!(
                    "Client {} ({}) says hello as {} ({:?})",
                    client_id, addr, hello.client.name, role
                ));
                state.publish_counters(&reg);

                let welcome = create_welcome(
                    hello.seq,
                    &state.config.protocol_version,
                    client_id as u64,
                    role,
                    reg.controller.map(|id| id as u64),
                );
                let _ = tx.send(ClientOutbound::Welcome(welcome));
                drop(reg);

                if stream {
                    let request = InboundCommand {
                        client_id,
                        seq: hello.seq,
                        payload: InboundPayload::SnapshotRequest,
                    };
                    if command_tx.try_send(request).is_err() {
                        reply_error(hello.seq, ErrorCode::Backpressure, QUEUE_FULL);
                    }
                }
            }

            Ok(ParsedMessage::Command(cmd)) => {
                {
                    let mut reg = state.inner.write().await;
                    if !reg.get(client_id).is_some_and(|c| c.handshaken) {
                        reply_error(
                            cmd.seq,
                            ErrorCode::HandshakeRequired,
                            "Send hello before command",
                        );
                        continue;
                    }
                    if !reg.check_and_update_seq(client_id, cmd.seq) {
                        reply_error(cmd.seq, ErrorCode::InvalidCommand, SEQ_NOT_INCREASING);
                        continue;
                    }
                    if reg.controller != Some(client_id) {
                        reply_error(
                            cmd.seq,
                            ErrorCode::NotController,
                            "Only controller may send commands",
                        );
                        continue;
                    }
                }

                let mapped = match map_command(&cmd) {
                    Ok(c) => c,
                    Err(message) => {
                        reply_error(cmd.seq, ErrorCode::InvalidCommand, &message);
                        continue;
                    }
                };

                // Bounded queue; the ack comes from the game loop once applied.
                let inbound = InboundCommand {
                    client_id,
                    seq: cmd.seq,
                    payload: InboundPayload::Command(mapped),
                };
                if command_tx.try_send(inbound).is_err() {
                    reply_error(cmd.seq, ErrorCode::Backpressure, QUEUE_FULL);
                }
            }

            Ok(ParsedMessage::Unknown(msg)) => {
                let mut reg = state.inner.write().await;
                let handshaken = reg.get(client_id).is_some_and(|c| c.handshaken);
                if handshaken && !reg.check_and_update_seq(client_id, msg.seq) {
                    reply_error(msg.seq, ErrorCode::InvalidCommand, SEQ_NOT_INCREASING);
                    continue;
                }
                reply_error(msg.seq, ErrorCode::InvalidCommand, "Unknown message type");
            }

            Err(e) => {
                let seq = extract_seq_best_effort(trimmed).unwrap_or(0);
                let message = format!("JSON parse error: {}", e);
                reply_error(seq, ErrorCode::InvalidCommand, &message);
            }
        }
    }

    // Clean up: remove client and promote the next controller if needed.
    {
        let mut reg = state.inner.write().await;
        reg.clients.retain(|c| c.id != client_id);

        if reg.controller == Some(client_id) {
            let handshaken = reg.clients.iter().filter(|c| c.handshaken);
            let next_id = handshaken.map(|c| c.id).min();
            reg.controller = next_id;
            match next_id {
                Some(new_id) => state.log(format_args!("Controller {} promoted", new_id)),
                None => state.log(format_args!("Controller {} released", client_id)),
            }
        }
        state.publish_counters(&reg);
    }

    drop(tx);
    let _ = write_task.await;

    Ok(())
}

/// Map a protocol command into an engine command.
pub fn map_command(cmd: &CommandMessage) -> Result<ClientCommand, String> {
    let coord = || match cmd.coord() {
        Some(c) => Ok(c),
        None => Err(format!("{} requires row and col", cmd.action.as_str())),
    };
    match cmd.action {
        CommandAction::Tap => Ok(ClientCommand::Action(GameAction::Tap(coord()?))),
        CommandAction::Select => Ok(ClientCommand::Select(coord()?)),
        CommandAction::MoveTo => Ok(ClientCommand::MoveTo(coord()?)),
        CommandAction::Swipe => {
            let name = cmd
                .direction
                .as_deref()
                .ok_or_else(|| "swipe requires direction".to_string())?;
            Direction::from_str(name)
                .map(|d| ClientCommand::Action(GameAction::Swipe(d)))
                .ok_or_else(|| format!("Unknown direction: {}", name))
        }
        CommandAction::Restart => Ok(ClientCommand::Action(GameAction::Restart)),
    }
}
