//! God powers and card dealing.

pub mod card;

pub use card::{GodCard, PowerContext, PowerSignal};

use crate::core::GameRng;

/// Shuffle the roster and deal one card per player.
///
/// Deals fewer than `player_count` cards only if the roster runs out,
/// which `Game::initialize_game` then rejects.
pub fn deal(player_count: usize, rng: &mut GameRng) -> Vec<GodCard> {
    let mut roster = GodCard::roster();
    rng.shuffle(&mut roster);
    roster.truncate(player_count);
    roster
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_distinct_cards() {
        let cards = deal(2, &mut GameRng::new(8));

        assert_eq!(cards.len(), 2);
        assert_ne!(cards[0].name(), cards[1].name());
    }

    #[test]
    fn test_deal_is_seeded() {
        let a: Vec<_> = deal(2, &mut GameRng::new(21)).iter().map(GodCard::name).collect();
        let b: Vec<_> = deal(2, &mut GameRng::new(21)).iter().map(GodCard::name).collect();
        assert_eq!(a, b);
    }
}
