use crate::Index;

/// The key of one transition between histories.
///
/// `One` covers action and observation histories. `Pair` covers
/// action-observation histories and goes through an intermediate
/// fan-out vertex keyed by the action, then by the observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    One(Index),
    Pair(Index, Index),
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One(s) => write!(f, "{}", s),
            Self::Pair(a, o) => write!(f, "({}, {})", a, o),
        }
    }
}
