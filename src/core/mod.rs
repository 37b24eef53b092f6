//! Core types: the card adjacency contract, the demo card, dealing RNG.
//!
//! The chain and tableau layers are generic over any `Sequenced` card type;
//! `Card` is the concrete spider card the rest of the crate demonstrates
//! with.

pub mod card;
pub mod rng;

pub use card::{Card, Sequenced};
pub use rng::DealRng;
