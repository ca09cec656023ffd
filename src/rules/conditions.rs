//! Win and loss conditions.

use crate::board::MAX_LEVEL;
use crate::core::{Action, PlayerId};
use crate::game::Game;

/// A move that ends on a level-3 tower wins.
///
/// Checked after every successful move, god-power extra moves included.
/// Builds never win.
#[must_use]
pub fn check_win_condition(game: &Game, action: &Action) -> bool {
    let Action::Move(_) = action else {
        return false;
    };
    game.worker(action.worker())
        .and_then(|worker| worker.position())
        .and_then(|at| game.board().cell(at))
        .is_some_and(|cell| cell.level() == MAX_LEVEL)
}

/// At least one of the player's workers has a legal move.
#[must_use]
pub fn has_valid_moves(game: &Game, player: PlayerId) -> bool {
    game.player(player).is_some_and(|p| {
        p.workers()
            .iter()
            .any(|worker| !game.board().available_move_cells(worker).is_empty())
    })
}

/// The player is stuck and loses at the start of their turn.
#[must_use]
pub fn check_lose_condition(game: &Game, player: PlayerId) -> bool {
    !has_valid_moves(game, player)
}
