use crate::Agent;
use crate::Alphabet;
use crate::Index;
use crate::Probability;
use crate::Result;
use crate::State;
use crate::individual_to_joint;
use crate::joint_to_individual;

/// A discrete multiagent decision process.
///
/// Joint actions and joint observations are numbered mixed-radix over the
/// per-agent alphabet sizes, first agent most significant.
///
/// # Required Methods
///
/// - `nr_agents`, `nr_states`, `nr_actions`, `nr_observations` — alphabet sizes
/// - `transition` — `T(s, ja, s')`
/// - `observation` — `O(ja, s', jo)`
/// - `initial` — the initial state distribution
///
/// # Provided Methods
///
/// `successors` enumerates the nonzero entries of a transition row by
/// scanning all states; tables that know their sparsity override it.
/// `event_observation` falls back to `observation` for models whose
/// observations do not depend on the predecessor state.
pub trait Problem {
    fn nr_agents(&self) -> usize;
    fn nr_states(&self) -> usize;
    fn nr_actions(&self, agent: Agent) -> Index;
    fn nr_observations(&self, agent: Agent) -> Index;
    fn transition(&self, s: State, ja: Index, next: State) -> Probability;
    fn observation(&self, ja: Index, next: State, jo: Index) -> Probability;
    fn initial(&self, s: State) -> Probability;

    /// `O(s, ja, s', jo)` of event-driven observation models.
    fn event_observation(&self, _: State, ja: Index, next: State, jo: Index) -> Probability {
        self.observation(ja, next, jo)
    }
    /// Nonzero entries `(s', T(s, ja, s'))` of one transition row.
    fn successors(&self, s: State, ja: Index) -> Vec<(State, Probability)> {
        (0..self.nr_states())
            .map(|next| (next, self.transition(s, ja, next)))
            .filter(|&(_, p)| p > 0.)
            .collect()
    }
    fn action_name(&self, _: Agent, a: Index) -> String {
        format!("a{}", a)
    }
    fn observation_name(&self, _: Agent, o: Index) -> String {
        format!("o{}", o)
    }

    fn alphabets(&self) -> Vec<Alphabet> {
        (0..self.nr_agents())
            .map(|i| Alphabet::new(self.nr_actions(i), self.nr_observations(i)))
            .collect()
    }
    fn joint_alphabet(&self) -> Result<Alphabet> {
        Alphabet::joint(&self.alphabets())
    }
    fn nr_joint_actions(&self) -> Result<Index> {
        Ok(self.joint_alphabet()?.actions)
    }
    fn nr_joint_observations(&self) -> Result<Index> {
        Ok(self.joint_alphabet()?.observations)
    }
    fn joint_to_individual_actions(&self, ja: Index) -> Result<Vec<Index>> {
        let sizes = (0..self.nr_agents()).map(|i| self.nr_actions(i)).collect::<Vec<_>>();
        joint_to_individual(ja, &sizes)
    }
    fn individual_to_joint_actions(&self, actions: &[Index]) -> Result<Index> {
        let sizes = (0..self.nr_agents()).map(|i| self.nr_actions(i)).collect::<Vec<_>>();
        individual_to_joint(actions, &sizes)
    }
    fn joint_to_individual_observations(&self, jo: Index) -> Result<Vec<Index>> {
        let sizes = (0..self.nr_agents())
            .map(|i| self.nr_observations(i))
            .collect::<Vec<_>>();
        joint_to_individual(jo, &sizes)
    }
    fn individual_to_joint_observations(&self, observations: &[Index]) -> Result<Index> {
        let sizes = (0..self.nr_agents())
            .map(|i| self.nr_observations(i))
            .collect::<Vec<_>>();
        individual_to_joint(observations, &sizes)
    }
}
