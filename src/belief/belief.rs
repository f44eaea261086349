use crate::Index;
use crate::MadpError;
use crate::PROB_PRECISION;
use crate::Probability;
use crate::Problem;
use crate::Result;
use crate::State;
use std::collections::BTreeMap;

/// A probability distribution over the hidden states of a [`Problem`].
///
/// After a successful [`Belief::update`] the entries sum to one within
/// [`PROB_PRECISION`]. An update that observes an impossible joint
/// observation returns zero and leaves the belief unnormalized, so callers
/// check the returned mass before reading the belief.
pub trait Belief {
    /// Number of states the belief ranges over.
    fn size(&self) -> usize;
    fn get(&self, s: State) -> Probability;
    fn set(&mut self, s: State, p: Probability) -> Result<()>;
    /// States carrying mass, with their probability.
    fn support(&self) -> impl Iterator<Item = (State, Probability)>;
    /// Replace the whole distribution with the unnormalized `mass` it keeps,
    /// normalize when the kept total is positive, and return that total.
    fn absorb(&mut self, mass: BTreeMap<State, Probability>) -> Probability;

    /// Reset to the initial state distribution of `problem`.
    fn set_from_isd<P: Problem>(&mut self, problem: &P) {
        let mass = (0..problem.nr_states())
            .map(|s| (s, problem.initial(s)))
            .filter(|&(_, p)| p > 0.)
            .collect::<BTreeMap<_, _>>();
        self.absorb(mass);
    }

    /// One Bayesian filter step under joint action `ja` and joint observation `jo`.
    ///
    /// `b'(s') ∝ O(ja, s', jo) Σ_s T(s, ja, s') b(s)`, or with `event` set,
    /// `b'(s') ∝ Σ_s O(s, ja, s', jo) T(s, ja, s') b(s)`.
    /// Returns `P(jo | ja, b)`.
    fn update<P: Problem>(&mut self, problem: &P, ja: Index, jo: Index, event: bool) -> Probability {
        let mass = predict(problem, self.support(), ja, jo, event);
        self.absorb(mass)
    }

    /// Sum of all entries.
    fn mass(&self) -> Probability {
        self.support().map(|(_, p)| p).sum()
    }

    fn to_dense(&self) -> Vec<Probability> {
        let mut dense = vec![0.; self.size()];
        for (s, p) in self.support() {
            if let Some(slot) = dense.get_mut(s) {
                *slot = p;
            }
        }
        dense
    }

    /// Nonempty, every entry a probability, and the entries sum to one.
    fn sanity_check(&self) -> Result<()> {
        if self.size() == 0 {
            return Err(MadpError::Sanity(String::from("belief over no states")));
        }
        if let Some((s, p)) = self
            .support()
            .find(|(_, p)| p.is_nan() || *p < 0. || *p > 1.)
        {
            return Err(MadpError::Sanity(format!("belief entry {} is {}", s, p)));
        }
        match (self.mass() - 1.).abs() <= PROB_PRECISION {
            true => Ok(()),
            false => Err(MadpError::Sanity(format!("belief sums to {}", self.mass()))),
        }
    }
}

/// Unnormalized one-step mass per successor state.
pub fn predict<P, I>(problem: &P, support: I, ja: Index, jo: Index, event: bool) -> BTreeMap<State, Probability>
where
    P: Problem,
    I: IntoIterator<Item = (State, Probability)>,
{
    let mut mass = BTreeMap::<State, Probability>::new();
    for (s, b) in support.into_iter().filter(|&(_, b)| b > 0.) {
        for (next, t) in problem.successors(s, ja) {
            let weight = match event {
                true => problem.event_observation(s, ja, next, jo) * t * b,
                false => t * b,
            };
            *mass.entry(next).or_default() += weight;
        }
    }
    if !event {
        for (next, m) in mass.iter_mut() {
            *m *= problem.observation(ja, *next, jo);
        }
    }
    mass
}
