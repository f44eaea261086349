//! The discrete Dec-POMDP model consumed by history indexing and belief updates.
//!
//! - `problem` — The `Problem` trait: alphabets, dynamics, initial distribution
//! - `table` — Dense or sparse row-stochastic probability tables
//! - `decpomdp` — A concrete table-backed model
mod decpomdp;
mod problem;
mod table;

pub use decpomdp::*;
pub use problem::*;
pub use table::*;
