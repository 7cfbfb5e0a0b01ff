//! Session orchestration.
//!
//! `GameEngine` ties the pieces together: it owns the session roster, the
//! authoritative `GameState`, and the participant-to-role map, and it turns
//! every accepted request into a batch of addressed notifications for the
//! transport layer to deliver. The engine knows nothing about sockets;
//! participants are opaque handles supplied by the caller.

use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::core::{GameConfig, GameRng, ParticipantId, PlayerId};
use crate::moves::{self, Move, MoveError, MoveOutcome, TsunamiEvent};
use crate::score::{self, PlayerScore};
use crate::session::{LeaveOutcome, Phase, PlayerSeat, Session, SessionError};
use crate::state::{GameState, TurnChange};
use crate::view::{self, PrivateHand, PublicGameState, SessionSnapshot};

/// What a connected participant is to this game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The shared display client.
    Host,
    /// A seated player.
    Player(PlayerId),
}

/// Rejections surfaced to the requesting participant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error("participant already joined")]
    AlreadyJoined,
    #[error("unknown participant")]
    UnknownParticipant,
    #[error("only players may do that")]
    NotAPlayer,
    #[error("only the display client may do that")]
    NotHost,
    #[error("no game in progress")]
    NotPlaying,
    #[error("no such seat")]
    UnknownSeat,
    /// An invariant the engine maintains itself was broken. Logged and
    /// surfaced without touching state.
    #[error("internal inconsistency: {0}")]
    Internal(&'static str),
}

/// A server-to-client event. Everything here is safe to serialize for its
/// audience; private data only ever appears in player-addressed variants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Notification {
    SessionState(SessionSnapshot),
    HostConnected,
    HostDisconnected,
    PlayerJoined(PlayerSeat),
    PlayerLeft { player: PlayerId },
    PlayerDisconnected { player: PlayerId },
    PlayerReconnected { player: PlayerId },
    GameStarted(PublicGameState),
    GameState(PublicGameState),
    PrivateHand(PrivateHand),
    MoveApplied { player: PlayerId, mv: Move },
    CardsDrawn { player: PlayerId, count: usize },
    TsunamiTriggered(TsunamiEvent),
    TurnChanged(TurnChange),
    GameEnded {
        winner: Option<PlayerId>,
        scores: Vec<PlayerScore>,
    },
}

/// Who a notification is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Audience {
    Everyone,
    Player(PlayerId),
}

/// An addressed notification, ready for the transport layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub audience: Audience,
    pub event: Notification,
}

impl Envelope {
    fn everyone(event: Notification) -> Self {
        Self {
            audience: Audience::Everyone,
            event,
        }
    }

    fn to(player: PlayerId, event: Notification) -> Self {
        Self {
            audience: Audience::Player(player),
            event,
        }
    }
}

/// The authoritative engine for one game instance.
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    session: Session,
    state: Option<GameState>,
    roles: FxHashMap<ParticipantId, Role>,
    rng: GameRng,
}

impl GameEngine {
    /// Create an engine with a random seed.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Create an engine with a fixed seed, for reproducible games.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, GameRng::new(seed))
    }

    fn with_rng(config: GameConfig, rng: GameRng) -> Self {
        let session = Session::new(config.min_players, config.max_players);
        Self {
            config,
            session,
            state: None,
            roles: FxHashMap::default(),
            rng,
        }
    }

    /// The session registry (roster, phase).
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The running game state, if one exists.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Resolve a participant's role.
    #[must_use]
    pub fn role(&self, participant: ParticipantId) -> Option<Role> {
        self.roles.get(&participant).copied()
    }

    /// Admit the display client.
    pub fn join_as_host(
        &mut self,
        participant: ParticipantId,
    ) -> Result<Vec<Envelope>, EngineError> {
        if self.roles.contains_key(&participant) {
            return Err(EngineError::AlreadyJoined);
        }
        self.session.add_host()?;
        self.roles.insert(participant, Role::Host);

        info!(%participant, "display client connected");
        Ok(vec![
            Envelope::everyone(Notification::HostConnected),
            self.snapshot_envelope(),
        ])
    }

    /// Admit a player into the lobby.
    pub fn join_as_player(
        &mut self,
        participant: ParticipantId,
        name: &str,
    ) -> Result<Vec<Envelope>, EngineError> {
        if self.roles.contains_key(&participant) {
            return Err(EngineError::AlreadyJoined);
        }
        let seat = self.session.add_player(name)?.clone();
        self.roles.insert(participant, Role::Player(seat.id));

        info!(%participant, player = %seat.id, name = %seat.name, "player joined");
        Ok(vec![
            Envelope::everyone(Notification::PlayerJoined(seat)),
            self.snapshot_envelope(),
        ])
    }

    /// Re-attach a participant to an existing seat after a disconnect.
    ///
    /// Mid-game the player gets their hand and the table state back so the
    /// client can redraw from scratch.
    pub fn rejoin(
        &mut self,
        participant: ParticipantId,
        player: PlayerId,
    ) -> Result<Vec<Envelope>, EngineError> {
        if self.roles.contains_key(&participant) {
            return Err(EngineError::AlreadyJoined);
        }
        if !self.session.reconnect_player(player) {
            return Err(EngineError::UnknownSeat);
        }
        self.roles.insert(participant, Role::Player(player));

        info!(%participant, %player, "player reconnected");
        let mut out = vec![
            Envelope::everyone(Notification::PlayerReconnected { player }),
            self.snapshot_envelope(),
        ];
        if let Some(state) = &self.state {
            out.push(Envelope::to(
                player,
                Notification::GameState(view::public_game_state(state)),
            ));
            if let Some(hand) = view::private_hand(state, player) {
                out.push(Envelope::to(player, Notification::PrivateHand(hand)));
            }
        }
        Ok(out)
    }

    /// Start the game. Display-client only; requires the roster minimum.
    pub fn start_game(
        &mut self,
        participant: ParticipantId,
    ) -> Result<Vec<Envelope>, EngineError> {
        match self.roles.get(&participant) {
            Some(Role::Host) => {}
            Some(Role::Player(_)) => return Err(EngineError::NotHost),
            None => return Err(EngineError::UnknownParticipant),
        }
        self.session.can_start()?;

        let roster: Vec<PlayerId> = self.session.seats().iter().map(|s| s.id).collect();
        let state = GameState::start(&roster, &self.config, &mut self.rng);
        self.session.begin();

        info!(players = roster.len(), "game started");
        let mut out = vec![
            Envelope::everyone(Notification::GameStarted(view::public_game_state(&state))),
            Envelope::everyone(Notification::TurnChanged(TurnChange {
                current_player: state.current_player().id,
                turn_number: state.turn.turn_number,
                round_number: state.turn.round_number,
            })),
        ];
        for player in &state.players {
            out.push(Envelope::to(
                player.id,
                Notification::PrivateHand(PrivateHand {
                    player: player.id,
                    cards: player.hand.clone(),
                }),
            ));
        }
        out.push(self.snapshot_envelope());

        self.state = Some(state);
        Ok(out)
    }

    /// Apply a move on behalf of a participant.
    pub fn submit_move(
        &mut self,
        participant: ParticipantId,
        mv: &Move,
    ) -> Result<Vec<Envelope>, EngineError> {
        let player = match self.roles.get(&participant) {
            Some(Role::Player(id)) => *id,
            Some(Role::Host) => return Err(EngineError::NotAPlayer),
            None => return Err(EngineError::UnknownParticipant),
        };
        if self.session.phase() != Phase::Playing {
            return Err(EngineError::NotPlaying);
        }
        let Some(state) = self.state.as_mut() else {
            error!("playing phase with no game state");
            return Err(EngineError::Internal("playing phase with no game state"));
        };

        let outcome = match moves::apply(state, player, mv, &self.config) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%player, %err, "move rejected");
                return Err(err.into());
            }
        };

        let mut out = vec![Envelope::everyone(Notification::MoveApplied {
            player,
            mv: mv.clone(),
        })];

        if let MoveOutcome::TurnEnded(summary) = &outcome {
            out.push(Envelope::everyone(Notification::CardsDrawn {
                player,
                count: summary.drawn.len(),
            }));
            if let Some(hand) = view::private_hand(state, player) {
                out.push(Envelope::to(player, Notification::PrivateHand(hand)));
            }
            if let Some(event) = &summary.tsunami {
                out.push(Envelope::everyone(Notification::TsunamiTriggered(
                    event.clone(),
                )));
            }
            out.push(Envelope::everyone(Notification::TurnChanged(summary.turn)));
        }

        out.push(Envelope::everyone(Notification::GameState(
            view::public_game_state(state),
        )));

        if matches!(outcome, MoveOutcome::TurnEnded(_)) && score::game_over(state) {
            let scores = score::scores(state);
            for entry in &scores {
                if let Some(p) = state.player_mut(entry.player) {
                    p.score = entry.score;
                }
            }
            let winner = score::winner(state);
            self.session.finish();

            info!(?winner, "game over");
            out.push(Envelope::everyone(Notification::GameEnded { winner, scores }));
        }

        debug!(%player, "move applied");
        Ok(out)
    }

    /// A participant dropped. Lobby players lose their seat; in-game players
    /// are kept for a possible rejoin.
    pub fn leave(&mut self, participant: ParticipantId) -> Vec<Envelope> {
        let Some(role) = self.roles.remove(&participant) else {
            return Vec::new();
        };

        match role {
            Role::Host => {
                self.session.host_disconnected();
                info!(%participant, "display client disconnected");
                vec![
                    Envelope::everyone(Notification::HostDisconnected),
                    self.snapshot_envelope(),
                ]
            }
            Role::Player(player) => {
                let event = match self.session.remove_player(player) {
                    LeaveOutcome::Removed => Notification::PlayerLeft { player },
                    LeaveOutcome::Disconnected => Notification::PlayerDisconnected { player },
                    LeaveOutcome::NotFound => return Vec::new(),
                };
                info!(%participant, %player, "player left");
                vec![Envelope::everyone(event), self.snapshot_envelope()]
            }
        }
    }

    /// Drop all game and roster state, returning the instance to an empty
    /// lobby. Callers schedule this after the post-game window.
    pub fn teardown(&mut self) {
        info!("session teardown");
        self.state = None;
        self.roles.clear();
        self.session.teardown();
    }

    fn snapshot_envelope(&self) -> Envelope {
        Envelope::everyone(Notification::SessionState(view::session_snapshot(
            &self.session,
        )))
    }
}
