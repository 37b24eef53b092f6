//! Arena-based chain storage.
//!
//! Chains live in a flat `Vec<ChainNode>` addressed by `SlotId` indices.
//! Index handles keep the parent/child link pair free of ownership
//! ambiguity and make cycles checkable before any link is rewritten.
//!
//! All operations assume a single owning context serializes structural
//! mutation; the arena carries no locking.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::ChainError;
use super::node::{ChainNode, SlotId};
use crate::core::Sequenced;

/// Arena holding every chain of a game.
///
/// Storage is append-only: a detached chain stays in the arena as an
/// independent head, and callers that discard a chain simply stop referring
/// to its handle.
///
/// ## Usage
///
/// ```
/// use spider_deck::chain::ChainArena;
/// use spider_deck::core::Card;
///
/// let mut arena = ChainArena::new();
///
/// // Build a descending run: 5 -> 4 -> 3 within one color group
/// let run = arena
///     .from_cards([Card::new(0, 5), Card::new(0, 4), Card::new(0, 3)])
///     .unwrap();
///
/// assert_eq!(arena.size(run), 3);
/// assert!(arena.is_draggable(run));
/// assert_eq!(arena.last_card(run).rank, 3);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChainArena<C> {
    /// All nodes, across every chain.
    slots: Vec<ChainNode<C>>,
}

/// Slot handles of one chain, head to tail. Runs rarely exceed a suit.
pub type SlotRun = SmallVec<[SlotId; 13]>;

impl<C> ChainArena<C> {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Create an arena with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Get a node by slot.
    ///
    /// Panics on a stale or foreign `SlotId`, like any out-of-bounds index.
    #[inline]
    #[must_use]
    pub fn get(&self, id: SlotId) -> &ChainNode<C> {
        &self.slots[id.0 as usize]
    }

    #[inline]
    fn get_mut(&mut self, id: SlotId) -> &mut ChainNode<C> {
        &mut self.slots[id.0 as usize]
    }

    /// Total number of nodes in the arena, across all chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over all nodes with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &ChainNode<C>)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, n)| (SlotId::new(i as u32), n))
    }

    /// Create a one-node chain holding `card`.
    pub fn single(&mut self, card: C) -> SlotId {
        let id = SlotId::new(self.slots.len() as u32);
        self.slots.push(ChainNode::new(card));
        id
    }

    /// Build a chain from a non-empty card sequence, first card at the head.
    ///
    /// Each following card is appended to the running tail, so the chain
    /// order equals the input order.
    pub fn from_cards<I>(&mut self, cards: I) -> Result<SlotId, ChainError>
    where
        I: IntoIterator<Item = C>,
    {
        let mut cards = cards.into_iter();
        let head = match cards.next() {
            Some(card) => self.single(card),
            None => return Err(ChainError::EmptySequence),
        };
        let mut tail = head;
        for card in cards {
            tail = self.append_card(tail, card);
        }
        Ok(head)
    }

    /// Parent of a node, or `None` at a chain head.
    #[must_use]
    pub fn parent(&self, id: SlotId) -> Option<SlotId> {
        let p = self.get(id).parent;
        if p.is_none() { None } else { Some(p) }
    }

    /// Child of a node, or `None` at the tail.
    #[must_use]
    pub fn child(&self, id: SlotId) -> Option<SlotId> {
        let c = self.get(id).child;
        if c.is_none() { None } else { Some(c) }
    }

    /// Walk parent links up to the head of `id`'s chain.
    #[must_use]
    pub fn head_of(&self, id: SlotId) -> SlotId {
        let mut cur = id;
        while let Some(parent) = self.parent(cur) {
            cur = parent;
        }
        cur
    }

    /// Walk child links down to the tail of the chain starting at `id`.
    #[must_use]
    pub fn tail_of(&self, id: SlotId) -> SlotId {
        let mut cur = id;
        while let Some(child) = self.child(cur) {
            cur = child;
        }
        cur
    }

    /// Number of nodes from `id` down to the tail (1 for a lone node).
    #[must_use]
    pub fn size(&self, id: SlotId) -> usize {
        let mut count = 1;
        let mut cur = id;
        while let Some(child) = self.child(cur) {
            count += 1;
            cur = child;
        }
        count
    }

    /// Slot handles from `id` down to the tail, in order.
    #[must_use]
    pub fn slots(&self, id: SlotId) -> SlotRun {
        let mut run = SlotRun::new();
        let mut cur = id;
        run.push(cur);
        while let Some(child) = self.child(cur) {
            run.push(child);
            cur = child;
        }
        run
    }

    /// Card held at the tail of the chain starting at `id`.
    #[must_use]
    pub fn last_card(&self, id: SlotId) -> &C {
        &self.get(self.tail_of(id)).card
    }

    /// Wrap `card` as a fresh node and append it to `id`'s chain.
    ///
    /// Returns the new node's handle; `id` keeps addressing the same chain.
    /// Cannot fail: a fresh node has no parent and cannot form a cycle.
    pub fn append_card(&mut self, id: SlotId, card: C) -> SlotId {
        let node = self.single(card);
        // Infallible by construction.
        let _ = self.append_chain(id, node);
        node
    }

    /// Link the detached chain `other` beneath the tail of `id`'s chain.
    ///
    /// Fails with `AlreadyAttached` if `other` still hangs from a parent
    /// (detach it first, as `move_chain` does) and with `WouldCycle` if
    /// `other` heads the chain containing `id`. On error nothing is linked.
    pub fn append_chain(&mut self, id: SlotId, other: SlotId) -> Result<(), ChainError> {
        if self.parent(other).is_some() {
            return Err(ChainError::AlreadyAttached { slot: other });
        }
        if self.head_of(id) == other {
            return Err(ChainError::WouldCycle { slot: other });
        }

        let tail = self.tail_of(id);
        self.get_mut(tail).child = other;
        self.get_mut(other).parent = tail;
        Ok(())
    }

    /// Unlink `id` from its parent, making it the head of an independent
    /// chain. No-op if `id` already heads its chain.
    pub fn detach(&mut self, id: SlotId) {
        if let Some(parent) = self.parent(id) {
            self.get_mut(parent).child = SlotId::NONE;
            self.get_mut(id).parent = SlotId::NONE;
        }
    }

    /// Relocate `id` and its whole tail onto the tail of `target`'s chain.
    ///
    /// This is the drag-and-drop commit: detach, then append. The cycle
    /// check runs before any link is rewritten, so a failed move leaves
    /// every chain exactly as it was.
    pub fn move_chain(&mut self, id: SlotId, target: SlotId) -> Result<(), ChainError> {
        // A target at or below `id` would end up inside the moved run.
        let mut cur = target;
        loop {
            if cur == id {
                return Err(ChainError::WouldCycle { slot: id });
            }
            match self.parent(cur) {
                Some(parent) => cur = parent,
                None => break,
            }
        }

        self.detach(id);
        self.append_chain(target, id)
    }
}

impl<C: Sequenced> ChainArena<C> {
    /// Check whether the chain from `id` down to the tail is one legal run:
    /// every node's card is next-of its parent's card.
    ///
    /// A lone node is trivially draggable. The relation between `id` and
    /// anything above it does not matter; only the tail below is inspected.
    #[must_use]
    pub fn is_draggable(&self, id: SlotId) -> bool {
        let mut cur = id;
        while let Some(child) = self.child(cur) {
            if !self.get(child).card.is_next_of(&self.get(cur).card) {
                return false;
            }
            cur = child;
        }
        true
    }
}

impl<C: Clone> ChainArena<C> {
    /// Cards from `id` down to the tail, head-to-tail order.
    #[must_use]
    pub fn cards(&self, id: SlotId) -> Vec<C> {
        self.slots(id).iter().map(|&s| self.get(s).card.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;

    fn run(arena: &mut ChainArena<Card>, group: u8, ranks: &[u8]) -> SlotId {
        arena
            .from_cards(ranks.iter().map(|&r| Card::new(group, r)))
            .unwrap()
    }

    #[test]
    fn test_single() {
        let mut arena = ChainArena::new();
        let id = arena.single(Card::new(0, 7));

        assert_eq!(arena.size(id), 1);
        assert_eq!(arena.last_card(id), &Card::new(0, 7));
        assert!(arena.is_draggable(id));
        assert!(arena.get(id).is_head());
        assert!(arena.get(id).is_tail());
    }

    #[test]
    fn test_from_cards_order_and_size() {
        let mut arena = ChainArena::new();
        let head = run(&mut arena, 0, &[9, 8, 7, 6]);

        assert_eq!(arena.size(head), 4);
        let ranks: Vec<u8> = arena.cards(head).iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![9, 8, 7, 6]);
        assert_eq!(arena.last_card(head).rank, 6);
    }

    #[test]
    fn test_from_cards_empty_fails() {
        let mut arena: ChainArena<Card> = ChainArena::new();
        let err = arena.from_cards(std::iter::empty()).unwrap_err();

        assert_eq!(err, ChainError::EmptySequence);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_draggable_full_run() {
        let mut arena = ChainArena::new();
        let head = run(&mut arena, 0, &[5, 4, 3]);

        assert!(arena.is_draggable(head));
    }

    #[test]
    fn test_draggable_broken_pair() {
        let mut arena = ChainArena::new();
        // 5 -> 3 breaks, 3 -> 2 holds
        let head = run(&mut arena, 0, &[5, 3, 2]);
        let mid = arena.child(head).unwrap();

        assert!(!arena.is_draggable(head));
        // The sub-chain below the break is unaffected by the break above it.
        assert!(arena.is_draggable(mid));
    }

    #[test]
    fn test_draggable_group_mismatch() {
        let mut arena = ChainArena::new();
        let head = arena
            .from_cards([Card::new(0, 5), Card::new(1, 4)])
            .unwrap();

        assert!(!arena.is_draggable(head));
    }

    #[test]
    fn test_append_card_places_at_tail() {
        let mut arena = ChainArena::new();
        let head = run(&mut arena, 0, &[9, 8]);

        let new_tail = arena.append_card(head, Card::new(0, 7));

        assert_eq!(arena.size(head), 3);
        assert_eq!(arena.tail_of(head), new_tail);
        assert_eq!(arena.last_card(head).rank, 7);
    }

    #[test]
    fn test_append_chain_links_at_tail() {
        let mut arena = ChainArena::new();
        let top = run(&mut arena, 0, &[9, 8]);
        let bottom = run(&mut arena, 0, &[7, 6]);

        arena.append_chain(top, bottom).unwrap();

        assert_eq!(arena.size(top), 4);
        assert_eq!(arena.head_of(bottom), top);
        assert_eq!(arena.parent(bottom), Some(arena.slots(top)[1]));
    }

    #[test]
    fn test_append_attached_fails() {
        let mut arena = ChainArena::new();
        let a = run(&mut arena, 0, &[9, 8]);
        let b = arena.single(Card::new(0, 7));
        let inner = arena.child(a).unwrap();

        let err = arena.append_chain(b, inner).unwrap_err();

        assert_eq!(err, ChainError::AlreadyAttached { slot: inner });
        // Untouched on error.
        assert_eq!(arena.size(a), 2);
        assert_eq!(arena.size(b), 1);
    }

    #[test]
    fn test_append_self_fails() {
        let mut arena = ChainArena::new();
        let a = run(&mut arena, 0, &[9, 8]);

        let err = arena.append_chain(a, a).unwrap_err();

        assert_eq!(err, ChainError::WouldCycle { slot: a });
        assert_eq!(arena.size(a), 2);
    }

    #[test]
    fn test_append_own_head_fails() {
        let mut arena = ChainArena::new();
        let head = run(&mut arena, 0, &[9, 8, 7]);
        let tail = arena.tail_of(head);

        let err = arena.append_chain(tail, head).unwrap_err();

        assert_eq!(err, ChainError::WouldCycle { slot: head });
        assert_eq!(arena.size(head), 3);
    }

    #[test]
    fn test_detach_isolates() {
        let mut arena = ChainArena::new();
        let a = run(&mut arena, 0, &[9, 8, 7]);
        let b = arena.child(a).unwrap();

        arena.detach(b);

        assert_eq!(arena.size(a), 1);
        assert_eq!(arena.child(a), None);
        assert_eq!(arena.size(b), 2);
        assert_eq!(arena.parent(b), None);
        assert_eq!(arena.last_card(b).rank, 7);
    }

    #[test]
    fn test_detach_head_is_noop() {
        let mut arena = ChainArena::new();
        let head = run(&mut arena, 0, &[9, 8, 7]);
        let before = arena.cards(head);

        arena.detach(head);

        assert_eq!(arena.size(head), 3);
        assert_eq!(arena.cards(head), before);
        assert_eq!(arena.parent(head), None);
    }

    #[test]
    fn test_move_relocates_tail_run() {
        let mut arena = ChainArena::new();
        // X: 9 -> 8 -> 7, Y: 5 -> 4
        let x = run(&mut arena, 0, &[9, 8, 7]);
        let y = run(&mut arena, 1, &[5, 4]);
        let b = arena.child(x).unwrap();

        arena.move_chain(b, y).unwrap();

        assert_eq!(arena.size(x), 1);
        assert_eq!(arena.size(y), 4);
        let ranks: Vec<u8> = arena.cards(y).iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![5, 4, 8, 7]);
    }

    #[test]
    fn test_move_onto_own_tail_fails() {
        let mut arena = ChainArena::new();
        let head = run(&mut arena, 0, &[9, 8, 7]);
        let b = arena.child(head).unwrap();
        let tail = arena.tail_of(head);

        let err = arena.move_chain(b, tail).unwrap_err();

        assert_eq!(err, ChainError::WouldCycle { slot: b });
        // Failed move leaves everything in place.
        assert_eq!(arena.size(head), 3);
        assert_eq!(arena.parent(b), Some(head));
    }

    #[test]
    fn test_move_within_same_chain_above() {
        let mut arena = ChainArena::new();
        // Moving 8->7 onto its own head just re-links it where it was.
        let head = run(&mut arena, 0, &[9, 8, 7]);
        let b = arena.child(head).unwrap();

        arena.move_chain(b, head).unwrap();

        assert_eq!(arena.size(head), 3);
        let ranks: Vec<u8> = arena.cards(head).iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![9, 8, 7]);
    }

    #[test]
    fn test_slots_enumeration() {
        let mut arena = ChainArena::new();
        let head = run(&mut arena, 0, &[9, 8, 7]);

        let slots = arena.slots(head);

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0], head);
        assert_eq!(slots[2], arena.tail_of(head));
    }

    #[test]
    fn test_arena_serialization() {
        let mut arena = ChainArena::new();
        let head = run(&mut arena, 0, &[9, 8, 7]);
        let b = arena.child(head).unwrap();
        arena.detach(b);

        let json = serde_json::to_string(&arena).unwrap();
        let restored: ChainArena<Card> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), arena.len());
        assert_eq!(restored.size(head), 1);
        assert_eq!(restored.size(b), 2);
    }
}
