use super::Belief;
use crate::MadpError;
use crate::Probability;
use crate::Result;
use crate::State;
use std::collections::BTreeMap;

/// One probability per state.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseBelief(Vec<Probability>);

impl DenseBelief {
    /// All-zero belief over `size` states.
    pub fn new(size: usize) -> Self {
        Self(vec![0.; size])
    }
}

impl From<Vec<Probability>> for DenseBelief {
    fn from(entries: Vec<Probability>) -> Self {
        Self(entries)
    }
}

impl Belief for DenseBelief {
    fn size(&self) -> usize {
        self.0.len()
    }
    fn get(&self, s: State) -> Probability {
        self.0.get(s).copied().unwrap_or(0.)
    }
    fn set(&mut self, s: State, p: Probability) -> Result<()> {
        let size = self.0.len();
        self.0
            .get_mut(s)
            .map(|slot| *slot = p)
            .ok_or_else(|| MadpError::InvalidIndex(format!("state {} of {}", s, size)))
    }
    fn support(&self) -> impl Iterator<Item = (State, Probability)> {
        self.0.iter().copied().enumerate().filter(|&(_, p)| p != 0.)
    }
    fn absorb(&mut self, mass: BTreeMap<State, Probability>) -> Probability {
        self.0.iter_mut().for_each(|p| *p = 0.);
        for (s, p) in mass {
            if let Some(slot) = self.0.get_mut(s) {
                *slot = p;
            }
        }
        let total = self.0.iter().sum::<Probability>();
        if total > 0. {
            self.0.iter_mut().for_each(|p| *p /= total);
        }
        total
    }
    fn to_dense(&self) -> Vec<Probability> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_normalizes() {
        let mut belief = DenseBelief::new(3);
        let total = belief.absorb(BTreeMap::from([(0, 0.1), (2, 0.3)]));
        assert!((total - 0.4).abs() < 1e-12);
        assert!((belief.get(0) - 0.25).abs() < 1e-12);
        assert!((belief.get(2) - 0.75).abs() < 1e-12);
        assert!(belief.sanity_check().is_ok());
    }

    #[test]
    fn absorb_nothing_leaves_zeros() {
        let mut belief = DenseBelief::from(vec![0.5, 0.5]);
        assert_eq!(belief.absorb(BTreeMap::new()), 0.);
        assert_eq!(belief.to_dense(), vec![0., 0.]);
        assert!(belief.sanity_check().is_err());
    }

    #[test]
    fn sanity_check_rejects_bad_entries() {
        assert!(DenseBelief::new(0).sanity_check().is_err());
        assert!(DenseBelief::from(vec![1.5, -0.5]).sanity_check().is_err());
        assert!(DenseBelief::from(vec![0.5, 0.4]).sanity_check().is_err());
        assert!(DenseBelief::from(vec![0.5, 0.5]).sanity_check().is_ok());
    }

    #[test]
    fn set_out_of_range() {
        let mut belief = DenseBelief::new(2);
        assert!(belief.set(1, 1.).is_ok());
        assert!(matches!(belief.set(2, 1.), Err(MadpError::InvalidIndex(_))));
    }
}
