//! Chain node and slot handle structures.
//!
//! Uses arena-based allocation with index references (SlotId) so that
//! parent/child links never carry ownership ambiguity.

use serde::{Deserialize, Serialize};

/// Index into the ChainArena slot storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(pub u32);

impl SlotId {
    /// Sentinel value representing no slot.
    pub const NONE: SlotId = SlotId(u32::MAX);

    /// Create a new slot ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "SlotId(NONE)")
        } else {
            write!(f, "SlotId({})", self.0)
        }
    }
}

/// One position in a chain: a card plus its links.
///
/// The card is fixed for the node's lifetime; only the links change.
/// `child` is the sole forward edge (a chain, never a tree), `parent` is a
/// non-owning back-reference used by detach.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainNode<C> {
    /// The card held at this position.
    pub card: C,

    /// Node directly beneath this one (NONE at the tail).
    pub child: SlotId,

    /// Node this one hangs from (NONE at a chain head).
    pub parent: SlotId,
}

impl<C> ChainNode<C> {
    /// Create an unlinked node holding `card`.
    pub fn new(card: C) -> Self {
        Self {
            card,
            child: SlotId::NONE,
            parent: SlotId::NONE,
        }
    }

    /// Check if this node is the head of its chain.
    #[must_use]
    pub fn is_head(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if this node is the tail of its chain.
    #[must_use]
    pub fn is_tail(&self) -> bool {
        self.child.is_none()
    }
}
