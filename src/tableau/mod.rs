//! Tableau: the pile set a game mutates through validated run moves.
//!
//! The tableau owns the chain arena plus the pile bookkeeping around it:
//! which chain heads each pile, which pile a given run belongs to, and a
//! journal of committed moves for undo. It is the single owning context the
//! chain model assumes; all structural mutation goes through it.

pub mod history;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::{ChainArena, ChainError, SlotId};
use crate::core::{DealRng, Sequenced};

pub use history::MoveRecord;

/// Identifier for a tableau pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileId(pub u8);

impl PileId {
    /// Create a new pile ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pile({})", self.0)
    }
}

/// Errors raised by tableau operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TableauError {
    /// The pile index is outside this tableau.
    #[error("pile {pile} does not exist")]
    UnknownPile { pile: PileId },

    /// The slot does not belong to any pile of this tableau.
    #[error("slot {slot} is not on any pile")]
    NotOnPile { slot: SlotId },

    /// The chain already sits on a pile; lift it with `move_run` instead.
    #[error("chain {slot} is already on a pile")]
    AlreadyPlaced { slot: SlotId },

    /// The run starting at the slot is not a legal ordered sequence.
    #[error("run at {slot} is not draggable")]
    NotDraggable { slot: SlotId },

    /// A chain-level contract violation.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// A set of piles over one chain arena.
///
/// ## Usage
///
/// ```
/// use spider_deck::core::Card;
/// use spider_deck::tableau::{PileId, Tableau};
///
/// let mut tableau = Tableau::new(2);
///
/// let run = tableau.new_chain([Card::new(0, 5), Card::new(0, 4)]).unwrap();
/// tableau.place(PileId::new(0), run).unwrap();
///
/// let other = tableau.new_card(Card::new(0, 6));
/// tableau.place(PileId::new(1), other).unwrap();
///
/// // Drop the 5-4 run onto the 6.
/// tableau.move_run(run, PileId::new(1)).unwrap();
/// assert_eq!(tableau.pile_size(PileId::new(1)), 3);
///
/// tableau.undo();
/// assert_eq!(tableau.pile_size(PileId::new(0)), 2);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tableau<C> {
    /// Every chain of the game.
    arena: ChainArena<C>,

    /// Head of each pile (NONE for an empty pile).
    piles: Vec<SlotId>,

    /// Pile locations of chain heads. Only heads are keyed.
    locations: FxHashMap<SlotId, PileId>,

    /// Committed moves, oldest first.
    history: Vec<MoveRecord>,
}

impl<C> Tableau<C> {
    /// Create a tableau with `pile_count` empty piles.
    ///
    /// Panics unless `pile_count` is 1-256 (`PileId` is a byte).
    #[must_use]
    pub fn new(pile_count: usize) -> Self {
        assert!(
            (1..=256).contains(&pile_count),
            "Pile count must be 1-256, got {pile_count}"
        );
        Self {
            arena: ChainArena::new(),
            piles: vec![SlotId::NONE; pile_count],
            locations: FxHashMap::default(),
            history: Vec::new(),
        }
    }

    /// Read access to the underlying arena.
    #[must_use]
    pub fn arena(&self) -> &ChainArena<C> {
        &self.arena
    }

    /// Number of piles.
    #[must_use]
    pub fn pile_count(&self) -> usize {
        self.piles.len()
    }

    fn pile_index(&self, pile: PileId) -> Result<usize, TableauError> {
        let idx = pile.0 as usize;
        if idx < self.piles.len() {
            Ok(idx)
        } else {
            Err(TableauError::UnknownPile { pile })
        }
    }

    /// Create a fresh one-card chain in the arena, off-pile.
    pub fn new_card(&mut self, card: C) -> SlotId {
        self.arena.single(card)
    }

    /// Build a chain in the arena from a non-empty card sequence, off-pile.
    pub fn new_chain<I>(&mut self, cards: I) -> Result<SlotId, TableauError>
    where
        I: IntoIterator<Item = C>,
    {
        Ok(self.arena.from_cards(cards)?)
    }

    /// Put a detached chain on a pile.
    ///
    /// An empty pile takes the chain as its head; an occupied pile takes it
    /// at the tail. Setup operation, not journaled.
    ///
    /// A chain that already sits on a pile is rejected with `AlreadyPlaced`;
    /// accepting it would leave two piles pointing at one chain.
    pub fn place(&mut self, pile: PileId, head: SlotId) -> Result<(), TableauError> {
        let idx = self.pile_index(pile)?;
        if self.pile_of(head).is_some() {
            return Err(TableauError::AlreadyPlaced { slot: head });
        }
        match self.piles[idx] {
            SlotId::NONE => {
                if self.arena.parent(head).is_some() {
                    return Err(ChainError::AlreadyAttached { slot: head }.into());
                }
                self.piles[idx] = head;
                self.locations.insert(head, pile);
            }
            pile_head => self.arena.append_chain(pile_head, head)?,
        }
        Ok(())
    }

    /// Head of a pile, or `None` when the pile is empty.
    #[must_use]
    pub fn pile_head(&self, pile: PileId) -> Option<SlotId> {
        let head = *self.piles.get(pile.0 as usize)?;
        if head.is_none() { None } else { Some(head) }
    }

    /// Number of cards on a pile.
    #[must_use]
    pub fn pile_size(&self, pile: PileId) -> usize {
        self.pile_head(pile).map_or(0, |head| self.arena.size(head))
    }

    /// Pile a slot currently belongs to, or `None` for an off-pile chain.
    #[must_use]
    pub fn pile_of(&self, slot: SlotId) -> Option<PileId> {
        self.locations.get(&self.arena.head_of(slot)).copied()
    }

    /// Iterate over piles and their heads.
    pub fn piles(&self) -> impl Iterator<Item = (PileId, Option<SlotId>)> + '_ {
        self.piles.iter().enumerate().map(|(i, &head)| {
            let head = if head.is_none() { None } else { Some(head) };
            (PileId::new(i as u8), head)
        })
    }

    /// Committed moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Check if there is a move to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Revert the most recent committed move.
    ///
    /// The moved run is detached from wherever it landed and re-linked under
    /// its previous parent, or restored as the head of its source pile.
    /// Returns the reverted record, or `None` with an empty history.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        let to_idx = record.to_pile.0 as usize;

        // If the run became the destination pile's head, the pile empties.
        if self.piles[to_idx] == record.moved {
            self.piles[to_idx] = SlotId::NONE;
            self.locations.remove(&record.moved);
        }
        self.arena.detach(record.moved);

        if record.lifted_pile_head() {
            let from_idx = record.from_pile.0 as usize;
            self.piles[from_idx] = record.moved;
            self.locations.insert(record.moved, record.from_pile);
        } else {
            // parent_before is detached-from and still in place; relinking
            // a freshly detached run under it cannot fail.
            let relinked = self.arena.append_chain(record.parent_before, record.moved);
            debug_assert!(relinked.is_ok());
        }

        Some(record)
    }

    /// Shuffle `cards` and deal them round-robin across the piles.
    ///
    /// Same seed, same layout. Piles end up within one card of each other.
    pub fn deal(&mut self, mut cards: Vec<C>, rng: &mut DealRng) {
        rng.shuffle(&mut cards);
        let pile_count = self.piles.len();
        for (i, card) in cards.into_iter().enumerate() {
            let pile = PileId::new((i % pile_count) as u8);
            let slot = self.arena.single(card);
            // Fresh detached node on an existing pile; cannot fail.
            let placed = self.place(pile, slot);
            debug_assert!(placed.is_ok());
        }
    }
}

impl<C: Sequenced> Tableau<C> {
    /// Check whether a gesture may lift the run starting at `slot`: it must
    /// sit on a pile and form one legal ordered sequence down to the tail.
    #[must_use]
    pub fn is_liftable(&self, slot: SlotId) -> bool {
        self.pile_of(slot).is_some() && self.arena.is_draggable(slot)
    }

    /// Commit a run move: lift the run at `slot` and drop it on `to_pile`.
    ///
    /// The run must belong to a pile and be draggable; the destination must
    /// exist. On success the move is journaled for undo. On error nothing
    /// changes.
    pub fn move_run(&mut self, slot: SlotId, to_pile: PileId) -> Result<(), TableauError> {
        let to_idx = self.pile_index(to_pile)?;
        let from_pile = self.pile_of(slot).ok_or(TableauError::NotOnPile { slot })?;
        if !self.arena.is_draggable(slot) {
            return Err(TableauError::NotDraggable { slot });
        }

        let parent_before = self.arena.get(slot).parent;

        match self.piles[to_idx] {
            SlotId::NONE => self.arena.detach(slot),
            dest_head => {
                if dest_head == slot {
                    // Lifting a whole pile onto its own spot.
                    return Err(ChainError::WouldCycle { slot }.into());
                }
                self.arena.move_chain(slot, dest_head)?;
            }
        }

        // The run left its source pile; fix both ends of the bookkeeping.
        if parent_before.is_none() {
            let from_idx = from_pile.0 as usize;
            self.piles[from_idx] = SlotId::NONE;
            self.locations.remove(&slot);
        }
        if self.piles[to_idx].is_none() {
            self.piles[to_idx] = slot;
            self.locations.insert(slot, to_pile);
        }

        self.history
            .push(MoveRecord::new(slot, from_pile, to_pile, parent_before));
        Ok(())
    }
}

impl<C: Clone> Tableau<C> {
    /// Cards on a pile, top to bottom.
    #[must_use]
    pub fn pile_cards(&self, pile: PileId) -> Vec<C> {
        self.pile_head(pile)
            .map_or_else(Vec::new, |head| self.arena.cards(head))
    }
}
