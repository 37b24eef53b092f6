//! The chain model: singly-linked card stacks with split/re-attach moves.
//!
//! A chain is an ordered run of nodes from head (top) to tail (bottom).
//! Chains support appending a card or a whole detached chain, detaching a
//! node together with everything below it, and moving such a run onto
//! another chain as one atomic unit.

pub mod arena;
pub mod error;
pub mod node;

pub use arena::{ChainArena, SlotRun};
pub use error::ChainError;
pub use node::{ChainNode, SlotId};
