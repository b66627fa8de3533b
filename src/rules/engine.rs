//! The move engine: validation, application, and the turn state machine.
//!
//! Per turn: roll, then (zero: pass automatically) validate a move, apply
//! it, and pass the turn unless the landing cell grants a bonus.
//!
//! Every function takes the [`GameState`] explicitly; the engine itself
//! holds no state.

use tracing::{debug, error, info, trace};

use crate::core::{Action, EngineError, GameState, MoveKind, Origin, PlayerId};
use crate::dice::DieSource;

use super::decision::{
    Decision, GameResult, MoveResult, Outcome, PlannedMove, Rejection, RollReport, TurnPhase,
};

/// Stateless rules engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveEngine;

impl MoveEngine {
    /// Decide whether `player` may move from `origin` by `distance`.
    ///
    /// Pure: never mutates `state`. Rules, first match wins:
    /// 1. new piece with an empty reserve: rejected
    /// 2. origin cell without a piece of the mover: rejected
    /// 3. zero distance: rejected
    /// 4. target past the last cell: accepted, the piece exits
    /// 5. target already holds the mover: rejected
    /// 6. target held by the opponent and protected: rejected
    /// 7. target empty or mirror: accepted, advance
    /// 8. otherwise (opponent on a fight cell): accepted, capture
    ///
    /// Rule 3 extends the classic rule list, which has no zero-distance
    /// check: without it a zero move from a cell would land on the mover's
    /// own piece and be reported as rule 5.
    pub fn validate(
        state: &GameState,
        player: PlayerId,
        origin: Origin,
        distance: usize,
    ) -> Result<Decision, EngineError> {
        let track = state.track();

        match origin {
            Origin::Reserve => {
                if state.players().reserve(player) == 0 {
                    return Ok(Self::reject(player, origin, Rejection::NoPiecesInReserve));
                }
            }
            Origin::Cell(index) => {
                if !track.cell(index)?.contains(player) {
                    return Ok(Self::reject(player, origin, Rejection::NotYourPiece));
                }
            }
        }

        let Some(target) = origin.target(distance).filter(|_| distance > 0) else {
            return Ok(Self::reject(player, origin, Rejection::ZeroDistance));
        };

        let Some(cell) = track.get(target) else {
            return Ok(Self::accept(PlannedMove {
                player,
                origin,
                kind: MoveKind::ExitBoard,
                target,
                bonus: false,
            }));
        };

        if cell.contains(player) {
            return Ok(Self::reject(player, origin, Rejection::OwnPieceOnTarget));
        }

        let spec = cell.spec();
        let opponent_here = cell.held_by_opponent_of(player);

        if opponent_here && spec.is_protected() {
            return Ok(Self::reject(player, origin, Rejection::TargetProtected));
        }

        let kind = if !opponent_here || spec.mirror {
            MoveKind::Advance
        } else {
            MoveKind::Capture
        };

        Ok(Self::accept(PlannedMove {
            player,
            origin,
            kind,
            target,
            bonus: spec.bonus,
        }))
    }

    fn accept(plan: PlannedMove) -> Decision {
        trace!(player = %plan.player, origin = %plan.origin, kind = ?plan.kind, target = plan.target, "move accepted");
        Decision::Accept(plan)
    }

    fn reject(player: PlayerId, origin: Origin, rejection: Rejection) -> Decision {
        trace!(%player, %origin, %rejection, "move rejected");
        Decision::Reject(rejection)
    }

    /// Apply a plan produced by [`MoveEngine::validate`] on this same state.
    ///
    /// Marks the roll consumed. Returns `Won` when the move took the
    /// mover's last piece off the board, `Applied` otherwise. Does not
    /// switch the turn; see [`MoveEngine::play`].
    ///
    /// All-or-nothing: a plan that no longer fits the state (stale or
    /// forged) returns an error and leaves the state untouched.
    pub fn apply(state: &mut GameState, plan: &PlannedMove) -> Result<MoveResult, EngineError> {
        Self::preflight(state, plan)?;
        let mover = plan.player;

        match plan.kind {
            MoveKind::ExitBoard => {
                Self::lift(state, mover, plan.origin)?;
            }
            MoveKind::Advance => {
                Self::lift(state, mover, plan.origin)?;
                state.track_mut().place(plan.target, mover)?;
            }
            MoveKind::Capture => {
                let opponent = mover.opponent();
                state.players_mut().adjust_reserve(opponent, 1)?;
                Self::lift(state, mover, plan.origin)?;
                state.track_mut().replace(plan.target, mover)?;
                debug!(%mover, %opponent, target = plan.target, "piece captured");
            }
        }

        state.dice_mut().mark_consumed();
        state.record(Action::Move {
            origin: plan.origin,
            kind: plan.kind,
            target: plan.target,
            bonus: plan.bonus,
        });
        debug!(%mover, origin = %plan.origin, kind = ?plan.kind, target = plan.target, bonus = plan.bonus, "move applied");

        if plan.kind == MoveKind::ExitBoard && state.has_no_pieces_left(mover) {
            state.set_winner(mover);
            info!(winner = %mover, turn = state.turn_number(), "game won");
            return Ok(MoveResult::Won(mover));
        }

        Ok(MoveResult::Applied(Outcome {
            message: plan.kind.message(),
            bonus: plan.bonus,
        }))
    }

    /// Check every write `apply` is about to make, before it makes any.
    fn preflight(state: &GameState, plan: &PlannedMove) -> Result<(), EngineError> {
        let mover = plan.player;
        let track = state.track();
        let players = state.players();

        match plan.origin {
            Origin::Reserve => {
                if players.reserve(mover) == 0 {
                    error!(%mover, "plan enters a piece from an empty reserve");
                    return Err(EngineError::ReserveUnderflow { player: mover });
                }
            }
            Origin::Cell(index) => {
                if !track.cell(index)?.contains(mover) {
                    error!(%mover, index, "plan moves a piece that is not there");
                    return Err(EngineError::PieceNotOnCell { index });
                }
            }
        }

        match plan.kind {
            MoveKind::ExitBoard => {
                if plan.target < track.len() {
                    error!(%mover, target = plan.target, "plan exits from inside the track");
                    return Err(EngineError::CellConflict { index: plan.target });
                }
            }
            MoveKind::Advance => {
                if !track.cell(plan.target)?.can_accept(mover) {
                    error!(%mover, target = plan.target, "plan lands on an occupied cell");
                    return Err(EngineError::CellConflict { index: plan.target });
                }
            }
            MoveKind::Capture => {
                let opponent = mover.opponent();
                let cell = track.cell(plan.target)?;
                if !cell.contains(opponent) || cell.contains(mover) {
                    error!(%mover, target = plan.target, "capture target holds no lone opponent piece");
                    return Err(EngineError::PieceNotOnCell { index: plan.target });
                }
                let max = players.max_pieces();
                if players.reserve(opponent) >= max {
                    error!(%opponent, max, "capture would overfill the reserve");
                    return Err(EngineError::ReserveOverflow { player: opponent, max });
                }
            }
        }

        Ok(())
    }

    /// Take the moving piece off its origin: the reserve or a cell.
    fn lift(state: &mut GameState, player: PlayerId, origin: Origin) -> Result<(), EngineError> {
        match origin {
            Origin::Reserve => state.players_mut().adjust_reserve(player, -1).map(|_| ()),
            Origin::Cell(index) => state.track_mut().remove(index, player),
        }
    }

    /// Throw the dice for the current player.
    ///
    /// Refused while the previous roll is unused or after the game ended.
    /// A zero roll is consumed immediately and the turn passes.
    pub fn roll(state: &mut GameState, source: &mut impl DieSource) -> Result<RollReport, EngineError> {
        if state.winner().is_some() {
            return Err(EngineError::GameOver);
        }
        if !state.dice().is_consumed() {
            return Err(EngineError::RollPending);
        }

        let player = state.current_player();
        let roll = state.dice_mut().roll(source);
        state.record(Action::Roll { distance: roll.distance });

        let passed = roll.distance == 0;
        if passed {
            debug!(%player, "zero rolled, turn passes");
            state.dice_mut().mark_consumed();
            state.record(Action::Pass);
            state.switch_turn();
        }

        Ok(RollReport { player, roll, passed })
    }

    /// Validate the current player's move against the current roll without
    /// changing anything.
    pub fn check(state: &GameState, origin: Origin) -> Result<Decision, EngineError> {
        if state.winner().is_some() {
            return Err(EngineError::GameOver);
        }
        let distance = state.dice().fresh_roll()?.distance;
        Self::validate(state, state.current_player(), origin, distance)
    }

    /// Validate and apply the current player's move, then pass the turn
    /// unless the move earned a bonus roll or won the game.
    ///
    /// Requires a fresh roll (`StaleRoll` otherwise). A rejected move leaves
    /// the state and the roll untouched.
    pub fn play(state: &mut GameState, origin: Origin) -> Result<MoveResult, EngineError> {
        let decision = Self::check(state, origin)?;

        let plan = match decision {
            Decision::Accept(plan) => plan,
            Decision::Reject(rejection) => return Ok(MoveResult::Rejected(rejection)),
        };

        let result = Self::apply(state, &plan)?;
        if let MoveResult::Applied(outcome) = result {
            if !outcome.bonus {
                state.switch_turn();
            }
        }
        Ok(result)
    }

    /// Give up the rest of the turn: any unused roll is consumed and the
    /// opponent becomes the current player.
    ///
    /// For when the player has no legal move for the roll.
    pub fn switch_turn(state: &mut GameState) -> Result<PlayerId, EngineError> {
        if state.winner().is_some() {
            return Err(EngineError::GameOver);
        }
        if !state.dice().is_consumed() {
            state.dice_mut().mark_consumed();
            state.record(Action::Pass);
        }
        state.switch_turn();
        Ok(state.current_player())
    }

    /// Every accepted move `player` could make with `distance`.
    ///
    /// Reserve entry first, then board pieces in track order.
    #[must_use]
    pub fn legal_moves(state: &GameState, player: PlayerId, distance: usize) -> Vec<PlannedMove> {
        std::iter::once(Origin::Reserve)
            .chain(state.track().positions(player).map(Origin::Cell))
            .filter_map(|origin| Self::validate(state, player, origin, distance).ok())
            .filter_map(|decision| decision.planned().copied())
            .collect()
    }

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    #[must_use]
    pub fn is_terminal(state: &GameState) -> Option<GameResult> {
        state.winner().map(GameResult::Winner)
    }

    /// Current state of the turn machine.
    #[must_use]
    pub fn turn_phase(state: &GameState) -> TurnPhase {
        match state.winner() {
            Some(winner) => TurnPhase::Won(winner),
            None if state.dice().is_consumed() => TurnPhase::AwaitingRoll(state.current_player()),
            None => TurnPhase::Rolled(state.current_player()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::dice::ScriptedDice;

    const WHITE: PlayerId = PlayerId(0);
    const ORANGE: PlayerId = PlayerId(1);

    fn fresh() -> GameState {
        GameState::new(&GameConfig::default(), WHITE).unwrap()
    }

    fn position(reserves: [u8; 2], pieces: &[(usize, PlayerId)]) -> GameState {
        GameState::with_position(&GameConfig::default(), WHITE, reserves, pieces).unwrap()
    }

    fn decide(state: &GameState, origin: Origin, distance: usize) -> Decision {
        MoveEngine::validate(state, WHITE, origin, distance).unwrap()
    }

    #[test]
    fn test_new_piece_enters_before_first_cell() {
        let decision = decide(&fresh(), Origin::Reserve, 3);
        assert_eq!(
            decision,
            Decision::Accept(PlannedMove {
                player: WHITE,
                origin: Origin::Reserve,
                kind: MoveKind::Advance,
                target: 2,
                bonus: false,
            })
        );
    }

    #[test]
    fn test_entering_on_bonus_cell() {
        let decision = decide(&fresh(), Origin::Reserve, 4);
        assert_eq!(decision.target(), Some(3));
        assert!(decision.bonus());
    }

    #[test]
    fn test_empty_reserve_rejected() {
        let state = position([0, 5], &[(0, WHITE)]);
        assert_eq!(
            decide(&state, Origin::Reserve, 2),
            Decision::Reject(Rejection::NoPiecesInReserve)
        );
    }

    #[test]
    fn test_origin_without_own_piece_rejected() {
        let state = position([4, 4], &[(6, ORANGE), (2, WHITE)]);
        assert_eq!(decide(&state, Origin::Cell(6), 1), Decision::Reject(Rejection::NotYourPiece));
        assert_eq!(decide(&state, Origin::Cell(0), 1), Decision::Reject(Rejection::NotYourPiece));
    }

    #[test]
    fn test_origin_out_of_range_is_error() {
        assert_eq!(
            MoveEngine::validate(&fresh(), WHITE, Origin::Cell(14), 1),
            Err(EngineError::OriginOutOfRange { index: 14, len: 14 })
        );
    }

    #[test]
    fn test_zero_distance_rejected() {
        let state = position([4, 5], &[(3, WHITE)]);
        assert_eq!(decide(&state, Origin::Reserve, 0), Decision::Reject(Rejection::ZeroDistance));
        assert_eq!(decide(&state, Origin::Cell(3), 0), Decision::Reject(Rejection::ZeroDistance));
    }

    #[test]
    fn test_exit_past_last_cell() {
        let state = position([4, 5], &[(12, WHITE)]);
        let decision = decide(&state, Origin::Cell(12), 2);
        assert_eq!(decision.kind(), Some(MoveKind::ExitBoard));
        assert_eq!(decision.target(), Some(14));
        assert!(!decision.bonus());

        // Landing exactly on the last cell is a normal advance
        assert_eq!(decide(&state, Origin::Cell(12), 1).kind(), Some(MoveKind::Advance));
    }

    #[test]
    fn test_own_piece_on_target_rejected() {
        let state = position([3, 5], &[(1, WHITE), (3, WHITE)]);
        assert_eq!(decide(&state, Origin::Cell(1), 2), Decision::Reject(Rejection::OwnPieceOnTarget));
        assert_eq!(decide(&state, Origin::Reserve, 4), Decision::Reject(Rejection::OwnPieceOnTarget));
    }

    #[test]
    fn test_protected_cell_rejected() {
        let state = position([4, 4], &[(5, WHITE), (7, ORANGE)]);
        assert_eq!(decide(&state, Origin::Cell(5), 2), Decision::Reject(Rejection::TargetProtected));
    }

    #[test]
    fn test_mirror_cell_shared() {
        let state = position([5, 4], &[(1, ORANGE)]);
        let decision = decide(&state, Origin::Reserve, 2);
        assert_eq!(decision.kind(), Some(MoveKind::Advance));
        assert_eq!(decision.target(), Some(1));
    }

    #[test]
    fn test_fight_cell_capture() {
        let state = position([4, 4], &[(2, WHITE), (5, ORANGE)]);
        let decision = decide(&state, Origin::Cell(2), 3);
        assert_eq!(decision.kind(), Some(MoveKind::Capture));
        assert_eq!(decision.target(), Some(5));
        assert!(!decision.bonus());
    }

    #[test]
    fn test_validate_is_pure() {
        let state = position([4, 4], &[(2, WHITE), (5, ORANGE)]);
        let before = state.clone();

        let first = decide(&state, Origin::Cell(2), 3);
        let second = decide(&state, Origin::Cell(2), 3);

        assert_eq!(first, second);
        assert_eq!(state.track(), before.track());
        assert_eq!(state.players(), before.players());
        assert_eq!(state.dice(), before.dice());
    }

    #[test]
    fn test_apply_advance_from_reserve() {
        let mut state = fresh();
        let plan = *decide(&state, Origin::Reserve, 2).planned().unwrap();

        let result = MoveEngine::apply(&mut state, &plan).unwrap();

        assert_eq!(result, MoveResult::Applied(Outcome { message: "cell taken", bonus: false }));
        assert_eq!(state.players().reserve(WHITE), 4);
        assert!(state.track().occupants(1).contains(WHITE));
        assert!(state.dice().is_consumed());
        assert!(state.check_conservation());
    }

    #[test]
    fn test_apply_capture_replaces_occupant() {
        let mut state = position([4, 4], &[(2, WHITE), (5, ORANGE)]);
        let plan = *decide(&state, Origin::Cell(2), 3).planned().unwrap();

        MoveEngine::apply(&mut state, &plan).unwrap();

        assert_eq!(state.track().occupants(5).iter().collect::<Vec<_>>(), vec![WHITE]);
        assert!(state.track().occupants(2).is_empty());
        assert_eq!(state.players().reserve(ORANGE), 5);
        assert!(state.check_conservation());
    }

    #[test]
    fn test_apply_forged_capture_is_invariant_violation() {
        let mut state = position([4, 5], &[(2, WHITE)]);
        // Forge a capture plan against a cell with no opponent
        let plan = PlannedMove {
            player: WHITE,
            origin: Origin::Cell(2),
            kind: MoveKind::Capture,
            target: 5,
            bonus: false,
        };
        assert_eq!(
            MoveEngine::apply(&mut state, &plan),
            Err(EngineError::PieceNotOnCell { index: 5 })
        );
        assert!(state.check_conservation());
    }

    fn assert_unchanged(state: &GameState, before: &GameState) {
        assert_eq!(state.track(), before.track());
        assert_eq!(state.players(), before.players());
        assert_eq!(state.dice(), before.dice());
        assert_eq!(state.history().len(), before.history().len());
        assert!(state.check_conservation());
    }

    #[test]
    fn test_apply_stale_plan_twice_changes_nothing() {
        let mut state = position([4, 5], &[(5, WHITE)]);
        let plan = *decide(&state, Origin::Reserve, 1).planned().unwrap();
        MoveEngine::apply(&mut state, &plan).unwrap();
        let before = state.clone();

        // Cell 0 now holds the piece the plan was computed to place
        assert_eq!(
            MoveEngine::apply(&mut state, &plan),
            Err(EngineError::CellConflict { index: 0 })
        );
        assert_unchanged(&state, &before);
        assert_eq!(
            state.piece_count(WHITE),
            crate::core::PieceCount { reserve: 3, on_board: 2, finished: 0 }
        );
    }

    #[test]
    fn test_apply_forged_capture_from_empty_origin_changes_nothing() {
        let mut state = position([5, 4], &[(5, ORANGE)]);
        let before = state.clone();
        let plan = PlannedMove {
            player: WHITE,
            origin: Origin::Cell(1),
            kind: MoveKind::Capture,
            target: 5,
            bonus: false,
        };

        assert_eq!(
            MoveEngine::apply(&mut state, &plan),
            Err(EngineError::PieceNotOnCell { index: 1 })
        );
        assert_unchanged(&state, &before);
        assert_eq!(state.players().reserve(ORANGE), 4);
    }

    #[test]
    fn test_apply_forged_advance_onto_opponent_changes_nothing() {
        let mut state = position([4, 4], &[(3, WHITE), (7, ORANGE)]);
        let before = state.clone();
        let plan = PlannedMove {
            player: WHITE,
            origin: Origin::Cell(3),
            kind: MoveKind::Advance,
            target: 7,
            bonus: true,
        };

        assert_eq!(
            MoveEngine::apply(&mut state, &plan),
            Err(EngineError::CellConflict { index: 7 })
        );
        assert_unchanged(&state, &before);
    }

    #[test]
    fn test_apply_exit_wins_with_last_piece() {
        let mut state = position([0, 5], &[(13, WHITE)]);
        let plan = *decide(&state, Origin::Cell(13), 1).planned().unwrap();

        assert_eq!(MoveEngine::apply(&mut state, &plan), Ok(MoveResult::Won(WHITE)));
        assert_eq!(state.winner(), Some(WHITE));
        assert_eq!(state.piece_count(WHITE).finished, 5);
        assert_eq!(MoveEngine::is_terminal(&state), Some(GameResult::Winner(WHITE)));
    }

    #[test]
    fn test_apply_exit_with_pieces_left_is_normal() {
        let mut state = position([1, 5], &[(13, WHITE)]);
        let plan = *decide(&state, Origin::Cell(13), 3).planned().unwrap();

        assert_eq!(
            MoveEngine::apply(&mut state, &plan),
            Ok(MoveResult::Applied(Outcome { message: "piece leaves the board", bonus: false }))
        );
        assert_eq!(state.winner(), None);
        assert_eq!(state.piece_count(WHITE).finished, 4);
    }

    #[test]
    fn test_exit_straight_from_reserve_on_short_track() {
        let config = GameConfig::default().with_track(vec![crate::board::CellSpec::mirror(); 2]);
        let mut state = GameState::with_position(&config, WHITE, [1, 5], &[]).unwrap();

        let plan = *MoveEngine::validate(&state, WHITE, Origin::Reserve, 4)
            .unwrap()
            .planned()
            .unwrap();
        assert_eq!(plan.kind, MoveKind::ExitBoard);
        assert_eq!(MoveEngine::apply(&mut state, &plan), Ok(MoveResult::Won(WHITE)));
    }

    #[test]
    fn test_roll_zero_passes_turn() {
        let mut state = fresh();
        let report = MoveEngine::roll(&mut state, &mut ScriptedDice::new([0])).unwrap();

        assert!(report.passed);
        assert_eq!(report.player, WHITE);
        assert_eq!(state.current_player(), ORANGE);
        assert!(state.dice().is_consumed());
        assert_eq!(MoveEngine::turn_phase(&state), TurnPhase::AwaitingRoll(ORANGE));
    }

    #[test]
    fn test_roll_twice_refused() {
        let mut state = fresh();
        let mut dice = ScriptedDice::new([1]);
        MoveEngine::roll(&mut state, &mut dice).unwrap();

        assert_eq!(MoveEngine::turn_phase(&state), TurnPhase::Rolled(WHITE));
        assert_eq!(MoveEngine::roll(&mut state, &mut dice), Err(EngineError::RollPending));
    }

    #[test]
    fn test_play_requires_fresh_roll() {
        let mut state = fresh();
        assert_eq!(MoveEngine::play(&mut state, Origin::Reserve), Err(EngineError::StaleRoll));

        let mut dice = ScriptedDice::from_distances(4, &[2]);
        MoveEngine::roll(&mut state, &mut dice).unwrap();
        assert!(MoveEngine::play(&mut state, Origin::Reserve).unwrap().is_applied());

        // Orange has not rolled yet
        assert_eq!(MoveEngine::play(&mut state, Origin::Reserve), Err(EngineError::StaleRoll));
    }

    #[test]
    fn test_play_rejection_keeps_roll() {
        let mut state = fresh();
        MoveEngine::roll(&mut state, &mut ScriptedDice::from_distances(4, &[2])).unwrap();

        let result = MoveEngine::play(&mut state, Origin::Cell(4)).unwrap();
        assert_eq!(result, MoveResult::Rejected(Rejection::NotYourPiece));
        assert_eq!(MoveEngine::turn_phase(&state), TurnPhase::Rolled(WHITE));
    }

    #[test]
    fn test_switch_turn_consumes_roll() {
        let mut state = fresh();
        MoveEngine::roll(&mut state, &mut ScriptedDice::new([1])).unwrap();

        assert_eq!(MoveEngine::switch_turn(&mut state), Ok(ORANGE));
        assert_eq!(MoveEngine::turn_phase(&state), TurnPhase::AwaitingRoll(ORANGE));
    }

    #[test]
    fn test_legal_moves() {
        let state = position([3, 4], &[(1, WHITE), (4, WHITE), (7, ORANGE)]);
        let moves = MoveEngine::legal_moves(&state, WHITE, 3);

        // Reserve -> 2 (mirror), 1 -> 4 blocked by own piece, 4 -> 7 protected
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].origin, Origin::Reserve);
        assert_eq!(moves[0].target, 2);
    }
}
