//! The planning unit: one problem, one horizon, one set of parameters.
//!
//! - `params` — Eager/lazy switches and belief options
//! - `horizon` — Finite or infinite planning horizon
//! - `unit` — `PlanningUnit` construction and rebuild
//! - `indices` — Per-category counts, offsets, successors, conversions
//! - `probs` — Joint beliefs and realization probabilities
//! - `policies` — Policy domains, policy counts, GraphViz export
//! - `print` — Human-readable histories
mod horizon;
mod indices;
mod params;
mod policies;
mod print;
mod probs;
mod unit;

pub use horizon::*;
pub use params::*;
pub use unit::*;

#[cfg(test)]
mod tests;
