//! Policies over history indices.
//!
//! - `domain` — What a policy maps from: observation or action-observation histories
//! - `policy` — A pure individual policy, one action per domain element
//! - `joint` — Joint policies as consumed by realization probabilities
//! - `dot` — GraphViz rendering of policy graphs
mod domain;
mod dot;
mod joint;
mod policy;

pub use domain::*;
pub use dot::*;
pub use joint::*;
pub use policy::*;
