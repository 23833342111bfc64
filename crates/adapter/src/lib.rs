//! Remote play over TCP with a line-delimited JSON protocol.
//!
//! External agents (bots, test harnesses, other UIs) connect to a local TCP
//! socket, handshake, then either watch the board or drive it.
//!
//! # Protocol Overview
//!
//! 1. **Connection**: client connects to `127.0.0.1:7878` by default
//! 2. **Handshake**: client sends `hello`, server answers with `welcome`
//! 3. **Controller**: the first client to say hello controls the game; the
//!    others observe. When the controller leaves, the lowest remaining
//!    client id is promoted.
//! 4. **Observations**: clients that ask for `stream_observations` get the
//!    full board after every applied command
//! 5. **Commands**: the controller sends `tap`, `swipe`, `select`, `moveTo`
//!    or `restart`; every command is acknowledged
//!
//! # Environment Variables
//!
//! - `PEG_REMOTE_HOST`: bind address (default: "127.0.0.1")
//! - `PEG_REMOTE_PORT`: port number (default: 7878)
//! - `PEG_REMOTE_MAX_PENDING`: queued commands before `backpressure` (default: 10)
//! - `PEG_REMOTE_LOG_PATH`: append every wire line to this JSONL file
//! - `PEG_REMOTE_DISABLED`: "1", "true" or "yes" turns the adapter off
//!
//! # Example Protocol Flow
//!
//! ```text
//! C: {"type":"hello","seq":1,"ts":0,"client":{"name":"bot","version":"0.1"},"protocol_version":"1.0.0","requested":{"stream_observations":true}}
//! S: {"type":"welcome","seq":1,"ts":...,"protocol_version":"1.0.0","client_id":1,"role":"controller","controller_id":1,...}
//! S: {"type":"observation","seq":1,"ts":...,"episode_id":0,"board":{"size":7,"cells":[[2,2,1,1,1,2,2],...]},"pegs":32,...}
//! C: {"type":"command","seq":2,"ts":0,"action":"select","row":3,"col":1}
//! S: {"type":"ack","seq":2,"ts":...,"status":"ok","applied":true}
//! C: {"type":"command","seq":3,"ts":0,"action":"swipe","direction":"right"}
//! S: {"type":"ack","seq":3,"ts":...,"status":"ok","applied":true}
//! ```
//!
//! The network side lives in [`server`] and never touches the engine; the
//! game loop drains commands through [`Adapter`] and answers them with a
//! [`Dispatcher`].

pub mod dispatch;
pub mod protocol;
pub mod runtime;
pub mod server;

pub use peg_solitaire_core as core;
pub use peg_solitaire_types as types;

pub use dispatch::{ack_for, apply_command, build_observation, state_hash, Dispatcher, Handled};
pub use protocol::*;
pub use runtime::{
    Adapter, AdapterCounters, AdapterStatus, ClientCommand, InboundCommand, InboundPayload,
    OutboundMessage,
};
pub use server::*;
