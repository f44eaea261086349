use crate::Category;
use crate::MadpError;
use crate::Result;
use serde::Deserialize;
use serde::Serialize;

/// The index space a policy is defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyDomain {
    ObservationHistory,
    ActionObservationHistory,
    /// Bayesian-game types. Counted and converted elsewhere.
    Type,
}

impl PolicyDomain {
    /// History category backing this domain.
    pub fn category(&self) -> Result<Category> {
        match self {
            Self::ObservationHistory => Ok(Category::Observation),
            Self::ActionObservationHistory => Ok(Category::ActionObservation),
            Self::Type => Err(MadpError::Domain(String::from(
                "type domains have no history category",
            ))),
        }
    }
}

impl std::fmt::Display for PolicyDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ObservationHistory => write!(f, "OHIST"),
            Self::ActionObservationHistory => write!(f, "AOHIST"),
            Self::Type => write!(f, "TYPE"),
        }
    }
}
