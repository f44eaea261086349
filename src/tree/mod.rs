//! Arena-backed history trees.
//!
//! A [`HistoryTree`] maps a path of symbols to a vertex holding one history
//! and its flat index. Action-observation categories step through an
//! intermediate fan-out vertex per action, so every transition is keyed by a
//! single symbol.
mod step;
mod tree;
mod vertex;

pub use step::*;
pub use tree::*;
pub use vertex::*;
