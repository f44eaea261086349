use crate::MadpError;
use crate::Result;
use serde::Deserialize;
use serde::Serialize;

/// What a [`crate::PlanningUnit`] materializes up front.
///
/// Each history flag picks eager (tree plus lookup) or lazy (arithmetic
/// only) bookkeeping for one category. Beliefs can be cached only on top of
/// eager joint action-observation histories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub individual_observation_histories: bool,
    pub individual_action_histories: bool,
    pub individual_action_observation_histories: bool,
    pub joint_observation_histories: bool,
    pub joint_action_histories: bool,
    pub joint_action_observation_histories: bool,
    pub joint_beliefs: bool,
    pub sparse_beliefs: bool,
    pub event_observability: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            individual_observation_histories: true,
            individual_action_histories: true,
            individual_action_observation_histories: true,
            joint_observation_histories: true,
            joint_action_histories: true,
            joint_action_observation_histories: true,
            joint_beliefs: false,
            sparse_beliefs: false,
            event_observability: false,
        }
    }
}

impl Parameters {
    /// Materialize every history category and cache every joint belief.
    pub fn everything() -> Self {
        Self {
            joint_beliefs: true,
            ..Self::default()
        }
    }
    /// Keep everything lazy.
    pub fn nothing() -> Self {
        Self {
            individual_observation_histories: false,
            individual_action_histories: false,
            individual_action_observation_histories: false,
            joint_observation_histories: false,
            joint_action_histories: false,
            joint_action_observation_histories: false,
            joint_beliefs: false,
            ..Self::default()
        }
    }
    pub fn sanity_check(&self) -> Result<()> {
        match self.joint_beliefs && !self.joint_action_observation_histories {
            true => Err(MadpError::Sanity(String::from(
                "caching joint beliefs needs eager joint action-observation histories",
            ))),
            false => Ok(()),
        }
    }
    /// Parse from JSON; absent fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let parameters = serde_json::from_str::<Self>(text)?;
        parameters.sanity_check()?;
        Ok(parameters)
    }
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for Parameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flag = |b: bool| if b { "eager" } else { "lazy" };
        writeln!(
            f,
            "individual  OH {:<6} AH {:<6} AOH {}",
            flag(self.individual_observation_histories),
            flag(self.individual_action_histories),
            flag(self.individual_action_observation_histories)
        )?;
        writeln!(
            f,
            "joint       OH {:<6} AH {:<6} AOH {}",
            flag(self.joint_observation_histories),
            flag(self.joint_action_histories),
            flag(self.joint_action_observation_histories)
        )?;
        write!(
            f,
            "beliefs     cached {} sparse {} events {}",
            self.joint_beliefs, self.sparse_beliefs, self.event_observability
        )
    }
}
