//! # spider-deck
//!
//! Chain/deck model for spider-style solitaire card games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic Sequencing**: The model never defines what a legal run
//!    is. Cards supply a `Sequenced::is_next_of` relation; the game decides
//!    the rule.
//!
//! 2. **Arena Handles Over References**: Chains live in a flat arena and are
//!    addressed by `SlotId` indices, so the parent/child link pair carries no
//!    ownership ambiguity and cycles are checkable before linking.
//!
//! 3. **Fail Fast On Misuse**: Appending an attached chain, self-appends,
//!    and empty constructions return explicit errors instead of silently
//!    corrupting the structure.
//!
//! 4. **Single Owning Context**: All structural mutation is synchronous and
//!    assumed serialized by one owner (the tableau); no internal locking.
//!
//! ## Modules
//!
//! - `core`: The `Sequenced` adjacency contract, the demo `Card`, deal RNG
//! - `chain`: Chain arena, append/detach/move, draggability
//! - `tableau`: Piles over the arena, validated moves, history, undo, deal

pub mod chain;
pub mod core;
pub mod tableau;

// Re-export commonly used types
pub use crate::core::{Card, DealRng, Sequenced};

pub use crate::chain::{ChainArena, ChainError, ChainNode, SlotId, SlotRun};

pub use crate::tableau::{MoveRecord, PileId, Tableau, TableauError};
