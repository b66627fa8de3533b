//! The game facade a presentation layer drives.

use tracing::info;

use crate::board::Track;
use crate::core::{
    EngineError, GameConfig, GameRng, GameState, Origin, PieceCount, Player, PlayerId,
};
use crate::dice::{DiceRoll, DieSource};
use crate::rules::{Decision, GameResult, MoveEngine, MoveResult, PlannedMove, RollReport, TurnPhase};

/// A game in progress: state plus the dice source.
///
/// ## Example
///
/// ```
/// use royal_ur::game::GameBuilder;
/// use royal_ur::core::Origin;
/// use royal_ur::rules::MoveResult;
///
/// let mut game = GameBuilder::new().seed(7).build().unwrap();
///
/// let report = game.roll().unwrap();
/// if !report.passed {
///     // A fresh board always lets a new piece enter
///     let result = game.make_move(Origin::Reserve).unwrap();
///     assert!(matches!(result, MoveResult::Applied(_)));
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Game<S = GameRng> {
    state: GameState,
    source: S,
    seed: Option<u64>,
}

/// Builder for creating a Game.
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    config: GameConfig,
    seed: Option<u64>,
    starting_player: Option<PlayerId>,
    position: Option<([u8; 2], Vec<(usize, PlayerId)>)>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom board, dice count, piece count or colors.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the dice for a reproducible game.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Choose who moves first instead of drawing it.
    pub fn starting_player(mut self, player: PlayerId) -> Self {
        self.starting_player = Some(player);
        self
    }

    /// Start from a set position instead of an empty board.
    ///
    /// See [`GameState::with_position`].
    pub fn position(mut self, reserves: [u8; 2], pieces: &[(usize, PlayerId)]) -> Self {
        self.position = Some((reserves, pieces.to_vec()));
        self
    }

    /// Build with a seeded [`GameRng`]. Without a seed one is drawn from
    /// entropy and recorded on the game.
    pub fn build(self) -> Result<Game<GameRng>, EngineError> {
        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let seed = rng.seed();
        let mut game = self.build_with_source(rng)?;
        game.seed = Some(seed);
        info!(seed, starting = %game.state.current_player(), "game created");
        Ok(game)
    }

    /// Build with any die source, e.g. [`ScriptedDice`](crate::dice::ScriptedDice).
    ///
    /// Without an explicit starting player, the first die flip picks one.
    pub fn build_with_source<S: DieSource>(self, mut source: S) -> Result<Game<S>, EngineError> {
        self.config.validate()?;

        let starting = self
            .starting_player
            .unwrap_or_else(|| PlayerId::new(u8::from(source.flip())));

        let state = match &self.position {
            Some((reserves, pieces)) => {
                GameState::with_position(&self.config, starting, *reserves, pieces)?
            }
            None => GameState::new(&self.config, starting)?,
        };

        Ok(Game {
            state,
            source,
            seed: None,
        })
    }
}

impl<S: DieSource> Game<S> {
    // === Turn operations ===

    /// Throw the dice for the current player.
    ///
    /// A zero roll passes the turn immediately (`report.passed`).
    pub fn roll(&mut self) -> Result<RollReport, EngineError> {
        MoveEngine::roll(&mut self.state, &mut self.source)
    }

    /// Check a move against the current roll without playing it.
    pub fn validate(&self, origin: impl Into<Origin>) -> Result<Decision, EngineError> {
        MoveEngine::check(&self.state, origin.into())
    }

    /// Play a move for the current player.
    ///
    /// `origin` is a track index (`Some(i)` / `Origin::Cell(i)`) or the
    /// reserve (`None` / `Origin::Reserve`).
    pub fn make_move(&mut self, origin: impl Into<Origin>) -> Result<MoveResult, EngineError> {
        MoveEngine::play(&mut self.state, origin.into())
    }

    /// Pass the turn, discarding any unused roll. Returns the new current player.
    pub fn switch_turn(&mut self) -> Result<PlayerId, EngineError> {
        MoveEngine::switch_turn(&mut self.state)
    }

    /// Moves available for the current roll; empty if the dice still need rolling.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<PlannedMove> {
        match self.state.dice().fresh_roll() {
            Ok(roll) if self.state.winner().is_none() => {
                MoveEngine::legal_moves(&self.state, self.state.current_player(), roll.distance)
            }
            _ => Vec::new(),
        }
    }

    // === Read accessors ===

    #[must_use]
    pub fn current_player(&self) -> &Player {
        self.state.players().get(self.state.current_player())
    }

    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.state.current_player()
    }

    /// Copy of the track for rendering.
    #[must_use]
    pub fn board_snapshot(&self) -> Track {
        self.state.track().clone()
    }

    /// The last roll, consumed or not.
    pub fn last_result(&self) -> Result<&DiceRoll, EngineError> {
        self.state.dice().last_result()
    }

    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.state.dice().is_consumed()
    }

    #[must_use]
    pub fn turn_phase(&self) -> TurnPhase {
        MoveEngine::turn_phase(&self.state)
    }

    #[must_use]
    pub fn is_terminal(&self) -> Option<GameResult> {
        MoveEngine::is_terminal(&self.state)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner()
    }

    #[must_use]
    pub fn piece_count(&self, player: PlayerId) -> PieceCount {
        self.state.piece_count(player)
    }

    /// Full state, read-only.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Seed of the dice RNG, when built with one.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MoveKind;
    use crate::dice::ScriptedDice;
    use crate::rules::{Outcome, Rejection};

    const WHITE: PlayerId = PlayerId(0);
    const ORANGE: PlayerId = PlayerId(1);

    fn scripted(distances: &[usize]) -> Game<ScriptedDice> {
        GameBuilder::new()
            .starting_player(WHITE)
            .build_with_source(ScriptedDice::from_distances(4, distances))
            .unwrap()
    }

    #[test]
    fn test_game_creation() {
        let game = GameBuilder::new().seed(42).build().unwrap();

        assert_eq!(game.seed(), Some(42));
        assert_eq!(game.board_snapshot().len(), 14);
        assert!(game.is_consumed());
        assert_eq!(game.last_result(), Err(EngineError::NoRollYet));
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.current_player().reserve(), 5);
    }

    #[test]
    fn test_seeded_games_match() {
        let a = GameBuilder::new().seed(5).build().unwrap();
        let b = GameBuilder::new().seed(5).build().unwrap();
        assert_eq!(a.current_player_id(), b.current_player_id());
    }

    #[test]
    fn test_unseeded_game_records_seed() {
        let game = GameBuilder::new().build().unwrap();
        assert!(game.seed().is_some());
    }

    #[test]
    fn test_starting_player_drawn_from_source() {
        let game = GameBuilder::new()
            .build_with_source(ScriptedDice::new([1]))
            .unwrap();
        assert_eq!(game.current_player_id(), ORANGE);
        assert_eq!(game.current_player().color, "orange");
    }

    #[test]
    fn test_invalid_config_fails_build() {
        let result = GameBuilder::new()
            .config(GameConfig::default().with_colors("x", "x"))
            .seed(1)
            .build();
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_reserve_entry_scenario() {
        let mut game = scripted(&[3]);
        game.roll().unwrap();

        let decision = game.validate(Origin::Reserve).unwrap();
        assert!(decision.is_accepted());
        assert_eq!(decision.kind(), Some(MoveKind::Advance));
        assert_eq!(decision.target(), Some(2));
        assert!(!decision.bonus());
    }

    #[test]
    fn test_bonus_keeps_turn() {
        let mut game = scripted(&[4, 1]);
        game.roll().unwrap();

        let result = game.make_move(Origin::Reserve).unwrap();
        assert_eq!(
            result,
            MoveResult::Applied(Outcome { message: "cell taken", bonus: true })
        );
        assert_eq!(game.current_player_id(), WHITE);
        assert_eq!(game.turn_phase(), TurnPhase::AwaitingRoll(WHITE));
    }

    #[test]
    fn test_non_bonus_passes_turn() {
        let mut game = scripted(&[2]);
        game.roll().unwrap();
        game.make_move(Origin::Reserve).unwrap();
        assert_eq!(game.current_player_id(), ORANGE);
    }

    #[test]
    fn test_legal_moves_follow_roll() {
        let mut game = scripted(&[1]);
        game.roll().unwrap();

        let moves = game.legal_moves();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].origin, Origin::Reserve);
        assert_eq!(moves[0].target, 0);
    }

    #[test]
    fn test_position_builder_and_win() {
        let mut game = GameBuilder::new()
            .starting_player(WHITE)
            .position([0, 5], &[(13, WHITE)])
            .build_with_source(ScriptedDice::from_distances(4, &[2]))
            .unwrap();

        game.roll().unwrap();
        assert_eq!(game.make_move(Origin::Cell(13)), Ok(MoveResult::Won(WHITE)));
        assert_eq!(game.turn_phase(), TurnPhase::Won(WHITE));
        assert_eq!(game.is_terminal(), Some(GameResult::Winner(WHITE)));
        assert_eq!(game.roll(), Err(EngineError::GameOver));
        assert_eq!(game.make_move(Origin::Reserve), Err(EngineError::GameOver));
        assert_eq!(game.switch_turn(), Err(EngineError::GameOver));
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_rejection_lets_player_retry() {
        let mut game = scripted(&[2]);
        game.roll().unwrap();

        assert_eq!(game.make_move(Origin::Cell(5)), Ok(MoveResult::Rejected(Rejection::NotYourPiece)));
        assert!(!game.is_consumed());
        assert!(game.make_move(Origin::Reserve).unwrap().is_applied());
    }
}
