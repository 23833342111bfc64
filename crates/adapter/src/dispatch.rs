//! Game-loop side of the adapter: applies remote commands to the engine and
//! builds the replies.
//!
//! Everything here runs on the thread that owns the [`PegGame`]; nothing in
//! this module touches the network.

use std::hash::{Hash, Hasher};

use crate::core::{ActionOutcome, GameEvent, GameSnapshot, PegGame};
use crate::protocol::*;
use crate::runtime::{ClientCommand, InboundCommand, InboundPayload, OutboundMessage};

/// Stable 64-bit FNV-1a hasher for a deterministic `state_hash`.
///
/// `DefaultHasher` output is not guaranteed stable across Rust versions.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Apply one remote command to the engine.
pub fn apply_command(game: &mut PegGame, cmd: ClientCommand) -> ActionOutcome {
    match cmd {
        ClientCommand::Action(action) => game.apply_action(action),
        ClientCommand::Select(c) => {
            if game.board().is_peg(c) {
                ActionOutcome::Selection(game.select_or_deselect(c))
            } else {
                ActionOutcome::Ignored
            }
        }
        ClientCommand::MoveTo(c) => match game.move_to(c) {
            Ok(jump) => ActionOutcome::Moved(jump),
            Err(e) => ActionOutcome::Rejected(e),
        },
    }
}

/// Ack for command `seq` reporting whether the engine changed state.
pub fn ack_for(seq: u64, outcome: &ActionOutcome) -> AckMessage {
    match outcome {
        ActionOutcome::Moved(_) | ActionOutcome::Selection(_) | ActionOutcome::Restarted => {
            create_ack(seq, true, None)
        }
        ActionOutcome::Rejected(e) => create_ack(seq, false, Some(e.code())),
        ActionOutcome::Ignored => create_ack(seq, false, Some("ignored")),
    }
}

/// Hash of everything an observation reports about the board.
pub fn state_hash(snap: &GameSnapshot) -> StateHash {
    let mut hasher = Fnv1aHasher::new();
    snap.size.hash(&mut hasher);
    for cell in &snap.cells {
        hasher.write_u8(cell.as_u8());
    }
    snap.selection.hash(&mut hasher);
    snap.episode_id.hash(&mut hasher);
    snap.moves.hash(&mut hasher);
    StateHash(hasher.finish())
}

/// Build an observation message from a snapshot
pub fn build_observation(
    seq: u64,
    snap: &GameSnapshot,
    last_event: Option<LastEvent>,
) -> ObservationMessage {
    let cells = snap
        .rows()
        .map(|row| row.iter().map(|c| c.as_u8()).collect())
        .collect();

    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        episode_id: snap.episode_id,
        board: BoardSnapshot {
            size: snap.size,
            cells,
        },
        selection: snap.selection.map(WireCoord::from),
        pegs: snap.pegs,
        moves: snap.moves,
        won: snap.won,
        stuck: snap.stuck,
        last_event,
        state_hash: state_hash(snap),
    }
}

/// Result of handling one inbound command.
#[derive(Debug, Default)]
pub struct Handled {
    pub outbound: Vec<OutboundMessage>,
    /// Engine events drained while applying the command.
    pub events: Vec<GameEvent>,
    pub outcome: Option<ActionOutcome>,
}

/// Owns the observation sequence counter for one game loop.
#[derive(Debug, Default)]
pub struct Dispatcher {
    obs_seq: u64,
    snap: GameSnapshot,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observation of the current state with the next sequence number.
    pub fn observation(
        &mut self,
        game: &PegGame,
        last_event: Option<LastEvent>,
    ) -> ObservationMessage {
        self.obs_seq += 1;
        game.snapshot_into(&mut self.snap);
        build_observation(self.obs_seq, &self.snap, last_event)
    }

    /// Apply `inbound` and collect the replies: an observation for a snapshot
    /// request; an ack plus a broadcast observation for a command.
    pub fn handle(&mut self, game: &mut PegGame, inbound: InboundCommand) -> Handled {
        match inbound.payload {
            InboundPayload::SnapshotRequest => {
                let obs = self.observation(game, None);
                Handled {
                    outbound: vec![OutboundMessage::ToClientObservation {
                        client_id: inbound.client_id,
                        obs,
                    }],
                    ..Handled::default()
                }
            }
            InboundPayload::Command(cmd) => {
                let outcome = apply_command(game, cmd);
                let events = game.take_events();
                let ack = ack_for(inbound.seq, &outcome);
                let last_event = LastEvent::from_outcome(&outcome, &events);
                let obs = self.observation(game, Some(last_event));
                Handled {
                    outbound: vec![
                        OutboundMessage::ToClientAck {
                            client_id: inbound.client_id,
                            ack,
                        },
                        OutboundMessage::BroadcastObservation { obs },
                    ],
                    events,
                    outcome: Some(outcome),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MoveError, Preset};
    use crate::types::{Coord, Direction, GameAction};

    fn english() -> PegGame {
        PegGame::new(Preset::English.layout())
    }

    #[test]
    fn test_select_on_non_peg_is_ignored() {
        let mut game = english();
        let outcome = apply_command(&mut game, ClientCommand::Select(Coord::new(3, 3)));
        assert_eq!(outcome, ActionOutcome::Ignored);
        assert_eq!(
            apply_command(&mut game, ClientCommand::Select(Coord::new(3, 1))),
            ActionOutcome::Selection(Some(Coord::new(3, 1)))
        );
    }

    #[test]
    fn test_ack_reports_rejection_reason() {
        let mut game = english();
        let outcome = apply_command(&mut game, ClientCommand::MoveTo(Coord::new(3, 3)));
        assert_eq!(outcome, ActionOutcome::Rejected(MoveError::NoSelection));
        let ack = ack_for(7, &outcome);
        assert_eq!(ack.seq, 7);
        assert!(!ack.applied);
        assert_eq!(ack.reason.as_deref(), Some("no_selection"));
    }

    #[test]
    fn test_state_hash_tracks_board_and_selection() {
        let mut game = english();
        let h0 = state_hash(&game.snapshot());
        assert_eq!(h0, state_hash(&english().snapshot()));

        game.select_or_deselect(Coord::new(3, 1));
        let h1 = state_hash(&game.snapshot());
        assert_ne!(h0, h1);

        game.move_selected(Direction::Right).unwrap();
        assert_ne!(h1, state_hash(&game.snapshot()));
    }

    #[test]
    fn test_observation_layout() {
        let game = PegGame::new(Preset::Mini.layout());
        let obs = build_observation(3, &game.snapshot(), None);
        assert_eq!(obs.board.size, 5);
        assert_eq!(obs.board.cells.len(), 5);
        assert_eq!(obs.board.cells[0], vec![2, 1, 1, 1, 2]);
        assert_eq!(obs.board.cells[2][2], 0);
        assert_eq!(obs.pegs, 20);
        assert!(!obs.won);
    }

    #[test]
    fn test_handle_command_acks_then_broadcasts() {
        let mut game = english();
        let mut dispatcher = Dispatcher::new();
        let tap = ClientCommand::Action(GameAction::Tap(Coord::new(3, 1)));
        dispatcher.handle(
            &mut game,
            InboundCommand {
                client_id: 1,
                seq: 2,
                payload: InboundPayload::Command(tap),
            },
        );
        let swipe = ClientCommand::Action(GameAction::Swipe(Direction::Right));
        let handled = dispatcher.handle(
            &mut game,
            InboundCommand {
                client_id: 1,
                seq: 3,
                payload: InboundPayload::Command(swipe),
            },
        );

        assert!(matches!(handled.outcome, Some(ActionOutcome::Moved(_))));
        assert_eq!(handled.events.len(), 1);
        match &handled.outbound[..] {
            [
                OutboundMessage::ToClientAck { client_id: 1, ack },
                OutboundMessage::BroadcastObservation { obs },
            ] => {
                assert!(ack.applied);
                assert_eq!(ack.seq, 3);
                assert_eq!(obs.seq, 2);
                assert_eq!(obs.pegs, 31);
                let ev = obs.last_event.as_ref().unwrap();
                assert_eq!(ev.kind, LastEventKind::Jump);
                assert_eq!(ev.jump.unwrap().over, WireCoord { row: 3, col: 2 });
            }
            other => panic!("unexpected outbound: {:?}", other),
        }
    }
}
