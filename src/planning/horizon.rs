use crate::MadpError;
use crate::Result;
use crate::Stage;
use serde::Deserialize;
use serde::Serialize;

/// Planning horizon. History machinery exists only for finite horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizon {
    /// Number of decision stages; histories have length `0..h-1`.
    Finite(Stage),
    Infinite,
}

impl Horizon {
    /// Stage count, or a domain error when unbounded.
    pub fn finite(&self) -> Result<Stage> {
        match self {
            Self::Finite(h) => Ok(*h),
            Self::Infinite => Err(MadpError::Domain(String::from(
                "history indices are undefined for an infinite horizon",
            ))),
        }
    }
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }
}

impl From<Stage> for Horizon {
    fn from(h: Stage) -> Self {
        Self::Finite(h)
    }
}

impl TryFrom<&str> for Horizon {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "inf" | "infinite" => Ok(Self::Infinite),
            n => match n.parse::<Stage>().map_err(|e| anyhow::anyhow!(e))? {
                0 => Err(anyhow::anyhow!("horizon must be positive")),
                h => Ok(Self::Finite(h)),
            },
        }
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(h) => write!(f, "{}", h),
            Self::Infinite => write!(f, "inf"),
        }
    }
}
