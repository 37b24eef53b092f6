//! Move history for undo.
//!
//! Every committed run move is journaled with enough context to put the run
//! back exactly where it came from, in LIFO order.

use serde::{Deserialize, Serialize};

use super::PileId;
use crate::chain::SlotId;

/// A recorded run move.
///
/// `parent_before` is the node the run hung from before the move, or
/// `SlotId::NONE` when the run headed its pile (in which case undo restores
/// it as the head of `from_pile`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Head of the run that was moved.
    pub moved: SlotId,

    /// Pile the run was lifted from.
    pub from_pile: PileId,

    /// Pile the run was dropped onto.
    pub to_pile: PileId,

    /// Node the run hung from before the move (NONE for a pile head).
    pub parent_before: SlotId,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(moved: SlotId, from_pile: PileId, to_pile: PileId, parent_before: SlotId) -> Self {
        Self {
            moved,
            from_pile,
            to_pile,
            parent_before,
        }
    }

    /// Check if the moved run headed its source pile.
    #[must_use]
    pub fn lifted_pile_head(&self) -> bool {
        self.parent_before.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let record = MoveRecord::new(SlotId::new(4), PileId::new(0), PileId::new(2), SlotId::new(1));

        assert_eq!(record.moved, SlotId::new(4));
        assert_eq!(record.from_pile, PileId::new(0));
        assert_eq!(record.to_pile, PileId::new(2));
        assert!(!record.lifted_pile_head());
    }

    #[test]
    fn test_lifted_pile_head() {
        let record = MoveRecord::new(SlotId::new(4), PileId::new(0), PileId::new(2), SlotId::NONE);

        assert!(record.lifted_pile_head());
    }

    #[test]
    fn test_serialization() {
        let record = MoveRecord::new(SlotId::new(7), PileId::new(1), PileId::new(3), SlotId::NONE);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: MoveRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
