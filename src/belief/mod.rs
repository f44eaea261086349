//! Probability distributions over hidden states and their Bayesian filter update.
//!
//! - `belief` — The `Belief` trait and the shared one-step prediction
//! - `dense` — One probability per state
//! - `sparse` — Only the states with non-negligible mass
//! - `joint` — Dense or sparse, chosen at runtime from the parameters
mod belief;
mod dense;
mod joint;
mod sparse;

pub use belief::*;
pub use dense::*;
pub use joint::*;
pub use sparse::*;
