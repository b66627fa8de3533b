//! Game state: track, players, dice, and turn bookkeeping.
//!
//! ## GameState
//!
//! Owns everything that changes during play:
//! - The track and its occupants
//! - Both players and their reserves
//! - The dice roller (last roll + consumed flag)
//! - Whose turn it is, the turn counter, and the winner once decided
//! - Action history
//!
//! Fields are private. Reads go through accessors; writes happen only in
//! the move engine and the turn switch, which keeps the piece-count
//! invariant in one place.

use im::Vector;
use tracing::debug;

use super::action::{Action, ActionRecord, MoveKind};
use super::config::GameConfig;
use super::error::{ConfigError, EngineError};
use super::player::{PlayerId, PlayerMap, PlayerRegistry, PLAYER_COUNT};
use crate::board::Track;
use crate::dice::DiceRoller;

/// Pieces of one player, split by where they are.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceCount {
    pub reserve: usize,
    pub on_board: usize,
    pub finished: usize,
}

impl PieceCount {
    #[must_use]
    pub fn total(&self) -> usize {
        self.reserve + self.on_board + self.finished
    }
}

/// Complete state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    track: Track,
    players: PlayerRegistry,
    current: PlayerId,
    dice: DiceRoller,
    winner: Option<PlayerId>,

    /// Turn number (starts at 1, bumps on every turn switch).
    turn_number: u32,

    /// Action sequence within turn.
    action_sequence: u32,

    history: Vector<ActionRecord>,

    /// Pieces already off the board when the game was set up; exits after
    /// that are counted from `history`.
    exited_before_start: PlayerMap<u8>,
}

impl GameState {
    /// Create a fresh game: empty track, full reserves, no roll yet.
    pub fn new(config: &GameConfig, starting_player: PlayerId) -> Result<Self, EngineError> {
        config.validate()?;

        Ok(Self {
            track: Track::from_layout(&config.track)?,
            players: PlayerRegistry::new(&config.colors, config.max_pieces)?,
            current: starting_player,
            dice: DiceRoller::new(config.die_count),
            winner: None,
            turn_number: 1,
            action_sequence: 0,
            history: Vector::new(),
            exited_before_start: PlayerMap::with_value(0),
        })
    }

    /// Create a game from an arbitrary position: explicit reserves and
    /// pieces already on the track. The dice start consumed.
    ///
    /// Useful for puzzles, tutorials and tests. Pieces not in the reserve or
    /// on the track count as finished. Fails if a player would own more than
    /// `max_pieces`, if a player has nothing left to play, or if the pieces
    /// break a cell's occupancy rule.
    ///
    /// ```
    /// use royal_ur::core::{GameConfig, GameState, PlayerId};
    ///
    /// let white = PlayerId::new(0);
    /// let state = GameState::with_position(
    ///     &GameConfig::default(),
    ///     white,
    ///     [0, 5],
    ///     &[(13, white)],
    /// ).unwrap();
    ///
    /// assert_eq!(state.piece_count(white).finished, 4);
    /// ```
    pub fn with_position(
        config: &GameConfig,
        current: PlayerId,
        reserves: [u8; PLAYER_COUNT],
        pieces: &[(usize, PlayerId)],
    ) -> Result<Self, EngineError> {
        let mut state = Self::new(config, current)?;

        for (index, player) in pieces.iter().copied() {
            state.track.place(index, player)?;
        }
        for player in PlayerId::all() {
            let delta = i16::from(reserves[player.index()]) - i16::from(config.max_pieces);
            let delta = i8::try_from(delta).map_err(|_| ConfigError::TooManyPieces {
                player,
                max: config.max_pieces,
            })?;
            state.players.adjust_reserve(player, delta).map_err(|_| {
                ConfigError::TooManyPieces { player, max: config.max_pieces }
            })?;
        }
        let max = config.max_pieces;
        for player in PlayerId::all() {
            let in_play = usize::from(state.players.reserve(player))
                + state.track.pieces_on_board(player);
            let finished = usize::from(max)
                .checked_sub(in_play)
                .and_then(|n| u8::try_from(n).ok())
                .ok_or(ConfigError::TooManyPieces { player, max })?;
            if in_play == 0 {
                return Err(ConfigError::NoPiecesInPlay { player }.into());
            }
            state.exited_before_start[player] = finished;
        }

        Ok(state)
    }

    // === Accessors ===

    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    #[must_use]
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    #[must_use]
    pub fn dice(&self) -> &DiceRoller {
        &self.dice
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Everything that happened so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Piece accounting ===

    /// Where a player's pieces are. `finished` counts exits, recovered from
    /// the history, so it is independent of the reserve and the track.
    #[must_use]
    pub fn piece_count(&self, player: PlayerId) -> PieceCount {
        PieceCount {
            reserve: usize::from(self.players.reserve(player)),
            on_board: self.track.pieces_on_board(player),
            finished: self.exits(player),
        }
    }

    /// Pieces of `player` that have left the track.
    #[must_use]
    pub fn exits(&self, player: PlayerId) -> usize {
        let recorded = self
            .history
            .iter()
            .filter(|record| {
                record.player == player
                    && matches!(record.action, Action::Move { kind: MoveKind::ExitBoard, .. })
            })
            .count();
        usize::from(self.exited_before_start[player]) + recorded
    }

    /// True once every piece of `player` has left the track.
    #[must_use]
    pub fn has_no_pieces_left(&self, player: PlayerId) -> bool {
        let count = self.piece_count(player);
        count.reserve == 0 && count.on_board == 0
    }

    /// Check `reserve + on_board + finished == max_pieces` for both players.
    #[must_use]
    pub fn check_conservation(&self) -> bool {
        let max = usize::from(self.players.max_pieces());
        PlayerId::all().all(|p| self.piece_count(p).total() == max)
    }

    // === Mutation (engine only) ===

    pub(crate) fn track_mut(&mut self) -> &mut Track {
        &mut self.track
    }

    pub(crate) fn players_mut(&mut self) -> &mut PlayerRegistry {
        &mut self.players
    }

    pub(crate) fn dice_mut(&mut self) -> &mut DiceRoller {
        &mut self.dice
    }

    pub(crate) fn set_winner(&mut self, player: PlayerId) {
        self.winner = Some(player);
    }

    /// Hand the turn to the other player.
    pub(crate) fn switch_turn(&mut self) {
        self.current = self.current.opponent();
        self.turn_number += 1;
        self.action_sequence = 0;
        debug!(player = %self.current, turn = self.turn_number, "turn switched");
    }

    /// Append an action by the current player to the history.
    pub(crate) fn record(&mut self, action: Action) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history
            .push_back(ActionRecord::new(self.current, action, self.turn_number, sequence));
    }
}
