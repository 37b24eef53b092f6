//! Contract-violation errors for chain operations.
//!
//! Structural misuse (appending an attached chain, creating a cycle, building
//! from nothing) is a caller bug, not a runtime condition to recover from.
//! These fail fast with an explicit error and leave the arena untouched.

use thiserror::Error;

use super::node::SlotId;

/// Errors raised by chain construction and linking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ChainError {
    /// A chain cannot be built from an empty card sequence.
    #[error("cannot build a chain from an empty card sequence")]
    EmptySequence,

    /// The appended chain still hangs from a parent; detach it first.
    #[error("chain {slot} is still attached to a parent")]
    AlreadyAttached { slot: SlotId },

    /// Linking would make the chain reachable from itself.
    #[error("linking chain {slot} here would create a cycle")]
    WouldCycle { slot: SlotId },
}
