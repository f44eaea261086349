//! History indexing and joint-belief propagation for Dec-POMDP planning.
//!
//! Every planner over a finite-horizon Dec-POMDP needs the same bookkeeping:
//! flat, breadth-first indices for action, observation and
//! action-observation histories (per agent and joint), conversions between
//! joint and individual indices, and the joint belief reached by a joint
//! action-observation history.
//!
//! # Module Structure
//!
//! - `radix` — Mixed-radix encoding and overflow-checked counting
//! - `tree` — Arena-backed history tree with two-level action/observation fan-out
//! - `history` — History records, symbols, per-category index ledgers
//! - `problem` — The discrete Dec-POMDP model consumed by this crate
//! - `belief` — Dense and sparse joint beliefs with Bayesian filter updates
//! - `policy` — Policy domains, joint policies, GraphViz export
//! - `planning` — The `PlanningUnit` tying problem, horizon and parameters together
#![allow(clippy::module_inception)]

mod belief;
mod error;
mod history;
mod planning;
mod policy;
mod problem;
mod radix;
mod tree;

pub use belief::*;
pub use error::*;
pub use history::*;
pub use planning::*;
pub use policy::*;
pub use problem::*;
pub use radix::*;
pub use tree::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Flat history, symbol and policy indices.
#[cfg(not(feature = "wide"))]
pub type Index = u64;
/// Flat history, symbol and policy indices.
#[cfg(feature = "wide")]
pub type Index = u128;
/// Beliefs, transition and observation probabilities, realization weights.
pub type Probability = f64;
/// Time step within the planning horizon, 0-based.
pub type Stage = usize;
/// Agent position within the joint action/observation tuple.
pub type Agent = usize;
/// Hidden state index.
pub type State = usize;

// ============================================================================
// NUMERIC TOLERANCES
// ============================================================================
/// Tolerance on belief normalization and sparse pruning.
pub const PROB_PRECISION: Probability = 1e-6;

// ============================================================================
// LOGGING
// ============================================================================
/// Install terminal (Info) and file (Debug) logging.
/// The file lands in `{directory}/{unix-seconds}.log`.
#[cfg(feature = "server")]
pub fn log(directory: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(directory)?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let path = std::path::Path::new(directory).join(format!("{}.log", secs));
    simplelog::CombinedLogger::init(vec![
        simplelog::TermLogger::new(
            log::LevelFilter::Info,
            config.clone(),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        ),
        simplelog::WriteLogger::new(
            log::LevelFilter::Debug,
            config,
            std::fs::File::create(path)?,
        ),
    ])?;
    Ok(())
}
