use super::Belief;
use crate::MadpError;
use crate::PROB_PRECISION;
use crate::Probability;
use crate::Result;
use crate::State;
use std::collections::BTreeMap;

/// Only the states whose unnormalized mass exceeds [`PROB_PRECISION`].
///
/// Pruning happens before normalization, so the returned observation
/// probability counts only the mass that is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseBelief {
    size: usize,
    entries: BTreeMap<State, Probability>,
}

impl SparseBelief {
    /// Empty belief over `size` states.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            entries: BTreeMap::new(),
        }
    }
    /// Number of states held.
    pub fn held(&self) -> usize {
        self.entries.len()
    }
}

impl Belief for SparseBelief {
    fn size(&self) -> usize {
        self.size
    }
    fn get(&self, s: State) -> Probability {
        self.entries.get(&s).copied().unwrap_or(0.)
    }
    fn set(&mut self, s: State, p: Probability) -> Result<()> {
        if s >= self.size {
            return Err(MadpError::InvalidIndex(format!("state {} of {}", s, self.size)));
        }
        match p == 0. {
            true => self.entries.remove(&s),
            false => self.entries.insert(s, p),
        };
        Ok(())
    }
    fn support(&self) -> impl Iterator<Item = (State, Probability)> {
        self.entries.iter().map(|(&s, &p)| (s, p))
    }
    fn absorb(&mut self, mass: BTreeMap<State, Probability>) -> Probability {
        let size = self.size;
        self.entries = mass
            .into_iter()
            .filter(|&(s, p)| s < size && p > PROB_PRECISION)
            .collect();
        let total = self.entries.values().sum::<Probability>();
        if total > 0. {
            self.entries.values_mut().for_each(|p| *p /= total);
        }
        total
    }
}
