use super::PolicyDomain;
use crate::Checked;
use crate::Index;
use crate::Probability;
use crate::Result;

/// A joint policy as seen by realization-probability computations.
pub trait JointPolicy {
    fn domain(&self) -> PolicyDomain;
    /// Probability of joint action `ja` at joint domain element `joint`.
    fn joint_action_probability(&self, joint: Index, ja: Index) -> Result<Probability>;
}

/// A deterministic joint policy, flattened to one joint action per joint
/// domain element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PureJointPolicy {
    domain: PolicyDomain,
    joint_actions: Vec<Index>,
}

impl PureJointPolicy {
    pub fn new(domain: PolicyDomain, joint_actions: Vec<Index>) -> Self {
        Self {
            domain,
            joint_actions,
        }
    }
    pub fn joint_action(&self, joint: Index) -> Result<Index> {
        self.joint_actions
            .get(joint.slot()?)
            .copied()
            .ok_or_else(|| {
                crate::MadpError::InvalidIndex(format!(
                    "joint {} element {} of {}",
                    self.domain,
                    joint,
                    self.joint_actions.len()
                ))
            })
    }
}

impl JointPolicy for PureJointPolicy {
    fn domain(&self) -> PolicyDomain {
        self.domain
    }
    fn joint_action_probability(&self, joint: Index, ja: Index) -> Result<Probability> {
        Ok(match self.joint_action(joint)? == ja {
            true => 1.,
            false => 0.,
        })
    }
}
