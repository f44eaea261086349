use super::Belief;
use super::DenseBelief;
use super::SparseBelief;
use crate::Probability;
use crate::Result;
use crate::State;
use std::collections::BTreeMap;

/// A joint belief whose representation is picked at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum JointBelief {
    Dense(DenseBelief),
    Sparse(SparseBelief),
}

impl JointBelief {
    pub fn new(size: usize, sparse: bool) -> Self {
        match sparse {
            true => Self::Sparse(SparseBelief::new(size)),
            false => Self::Dense(DenseBelief::new(size)),
        }
    }
    pub fn is_sparse(&self) -> bool {
        matches!(self, Self::Sparse(_))
    }
}

impl Belief for JointBelief {
    fn size(&self) -> usize {
        match self {
            Self::Dense(b) => b.size(),
            Self::Sparse(b) => b.size(),
        }
    }
    fn get(&self, s: State) -> Probability {
        match self {
            Self::Dense(b) => b.get(s),
            Self::Sparse(b) => b.get(s),
        }
    }
    fn set(&mut self, s: State, p: Probability) -> Result<()> {
        match self {
            Self::Dense(b) => b.set(s, p),
            Self::Sparse(b) => b.set(s, p),
        }
    }
    fn support(&self) -> impl Iterator<Item = (State, Probability)> {
        let (dense, sparse) = match self {
            Self::Dense(b) => (Some(b.support()), None),
            Self::Sparse(b) => (None, Some(b.support())),
        };
        dense.into_iter().flatten().chain(sparse.into_iter().flatten())
    }
    fn absorb(&mut self, mass: BTreeMap<State, Probability>) -> Probability {
        match self {
            Self::Dense(b) => b.absorb(mass),
            Self::Sparse(b) => b.absorb(mass),
        }
    }
    fn to_dense(&self) -> Vec<Probability> {
        match self {
            Self::Dense(b) => b.to_dense(),
            Self::Sparse(b) => b.to_dense(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Alphabet;
    use crate::DecPomdp;
    use crate::MadpError;
    use crate::PROB_PRECISION;
    use crate::Storage;

    /// One agent, two states, a single action that keeps the state, and an
    /// observation that reports the state correctly with probability 0.8.
    fn listening() -> DecPomdp {
        let mut problem = DecPomdp::new(2, vec![Alphabet::new(1, 2)], Storage::Dense).unwrap();
        for s in 0..2 {
            problem.set_transition(s, 0, s, 1.).unwrap();
            for o in 0..2 {
                let p = if o as usize == s { 0.8 } else { 0.2 };
                problem.set_observation(0, s, o, p).unwrap();
            }
        }
        problem
    }

    #[test]
    fn update_filters() {
        let problem = listening();
        for sparse in [false, true] {
            let mut belief = JointBelief::new(2, sparse);
            belief.set_from_isd(&problem);
            assert_eq!(belief.to_dense(), vec![0.5, 0.5]);
            let p = belief.update(&problem, 0, 0, false);
            assert!((p - 0.5).abs() < PROB_PRECISION);
            assert!((belief.get(0) - 0.8).abs() < PROB_PRECISION);
            assert!(belief.sanity_check().is_ok());
            let p = belief.update(&problem, 0, 0, false);
            // 0.8 * 0.8 + 0.2 * 0.2
            assert!((p - 0.68).abs() < PROB_PRECISION);
        }
    }

    #[test]
    fn impossible_observation_has_zero_mass() {
        let mut problem = listening();
        problem.set_observation(0, 0, 1, 0.).unwrap();
        problem.set_observation(0, 1, 1, 0.).unwrap();
        for sparse in [false, true] {
            let mut belief = JointBelief::new(2, sparse);
            belief.set_from_isd(&problem);
            assert_eq!(belief.update(&problem, 0, 1, false), 0.);
            assert!(matches!(belief.sanity_check(), Err(MadpError::Sanity(_))));
        }
    }

    #[test]
    fn event_driven_update() {
        let mut problem = listening();
        // observation depends on where the system came from
        problem.set_event_observation(0, 0, 0, 0, 1.).unwrap();
        problem.set_event_observation(1, 0, 1, 1, 1.).unwrap();
        let mut belief = JointBelief::new(2, false);
        belief.set_from_isd(&problem);
        let p = belief.update(&problem, 0, 1, true);
        assert!((p - 0.5).abs() < PROB_PRECISION);
        assert_eq!(belief.to_dense(), vec![0., 1.]);
    }

    #[test]
    fn dense_and_sparse_agree_on_random_problems() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;
        let ref mut rng = SmallRng::seed_from_u64(11);
        let alphabets = vec![Alphabet::new(2, 2), Alphabet::new(2, 2)];
        let problem = DecPomdp::random(4, alphabets, Storage::Sparse, rng).unwrap();
        let mut dense = JointBelief::new(4, false);
        let mut sparse = JointBelief::new(4, true);
        dense.set_from_isd(&problem);
        sparse.set_from_isd(&problem);
        for (ja, jo) in [(0, 1), (3, 2), (1, 1)] {
            let p = dense.update(&problem, ja, jo, false);
            let q = sparse.update(&problem, ja, jo, false);
            assert!((p - q).abs() < PROB_PRECISION);
            for s in 0..4 {
                assert!((dense.get(s) - sparse.get(s)).abs() < PROB_PRECISION);
            }
        }
    }
}
