//! Card adjacency contract and a concrete card type.
//!
//! The chain model only needs to know whether one card may directly follow
//! another in a legal run; the concrete rule lives with the game. `Card`
//! implements the spider rule (one rank step down within a color group) and
//! is what the tests, benches, and docs play with.

use serde::{Deserialize, Serialize};

/// Strict adjacency relation between two cards.
///
/// `a.is_next_of(&b)` answers: may `a` sit directly beneath `b` in a legal
/// run? The relation is expected to be strict (never reflexive), so a run of
/// distinct positions can satisfy it pairwise.
pub trait Sequenced {
    /// Check whether `self` directly follows `other` in a legal run.
    fn is_next_of(&self, other: &Self) -> bool;
}

/// A spider card: a rank within a color group.
///
/// Runs descend one rank at a time and never cross groups:
///
/// ```
/// use spider_deck::core::{Card, Sequenced};
///
/// let five = Card::new(0, 5);
/// let four = Card::new(0, 4);
///
/// assert!(four.is_next_of(&five));
/// assert!(!five.is_next_of(&four));
/// assert!(!Card::new(1, 4).is_next_of(&five));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Color group this card belongs to.
    pub group: u8,

    /// Rank within the group.
    pub rank: u8,
}

impl Card {
    /// Create a card with the given group and rank.
    #[must_use]
    pub const fn new(group: u8, rank: u8) -> Self {
        Self { group, rank }
    }
}

impl Sequenced for Card {
    fn is_next_of(&self, other: &Self) -> bool {
        self.group == other.group && self.rank.checked_add(1) == Some(other.rank)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({}:{})", self.group, self.rank)
    }
}
