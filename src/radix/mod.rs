//! Mixed-radix positional arithmetic and overflow-checked counting.
//!
//! Histories are numbered by reading their symbols as digits, oldest
//! symbol most significant. Joint symbols are numbered the same way over
//! the per-agent alphabet sizes, first agent most significant.
mod checked;
mod mixed;

pub use checked::*;
pub use mixed::*;
