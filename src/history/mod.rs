//! History records and their flat indices.
//!
//! Histories are never stored as sequences. Each record keeps the index of
//! the history it extends and the symbol it appends, and per-stage counts
//! and offsets make flat indices computable with mixed-radix arithmetic
//! alone.
//!
//! - `symbol` — Action, observation and action-observation symbols
//! - `history` — Individual and joint history records
//! - `stages` — Per-stage counts and first-index offsets
//! - `catalog` — Flat index to tree vertex lookup
//! - `histories` — One agent's (or the team's) histories, eager or lazy
//! - `ledger` — One category for every agent and the team
mod catalog;
mod histories;
mod history;
mod ledger;
mod stages;
mod symbol;

pub use catalog::*;
pub use histories::*;
pub use history::*;
pub use ledger::*;
pub use stages::*;
pub use symbol::*;
