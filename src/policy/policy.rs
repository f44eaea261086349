use super::PolicyDomain;
use crate::Checked;
use crate::Index;
use crate::MadpError;
use crate::Result;

/// A deterministic individual policy: `actions[i]` is taken at domain element `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurePolicy {
    domain: PolicyDomain,
    actions: Vec<Index>,
}

impl PurePolicy {
    pub fn new(domain: PolicyDomain, actions: Vec<Index>) -> Self {
        Self { domain, actions }
    }
    pub fn domain(&self) -> PolicyDomain {
        self.domain
    }
    /// Number of domain elements covered.
    pub fn len(&self) -> usize {
        self.actions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
    pub fn actions(&self) -> &[Index] {
        &self.actions
    }
    pub fn action(&self, index: Index) -> Result<Index> {
        self.actions
            .get(index.slot()?)
            .copied()
            .ok_or_else(|| {
                MadpError::InvalidIndex(format!(
                    "{} element {} of {}",
                    self.domain,
                    index,
                    self.actions.len()
                ))
            })
    }
}
