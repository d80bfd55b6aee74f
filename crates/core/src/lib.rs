//! Draw-odds engine. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod combinatorics;
pub mod deck;
pub mod dispatch;
pub mod form;
pub mod policies;
pub mod probability;
pub mod rng;
pub mod simulate;

pub use cards::*;
pub use combinatorics::*;
pub use deck::*;
pub use dispatch::*;
pub use form::*;
pub use policies::*;
pub use probability::*;
pub use rng::*;
pub use simulate::*;
