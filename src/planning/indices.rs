use super::PlanningUnit;
use crate::Action;
use crate::ActionObservation;
use crate::Agent;
use crate::Index;
use crate::MadpError;
use crate::Observation;
use crate::Problem;
use crate::Result;
use crate::Stage;

/// Counts, offsets, stages and successors of every history category.
impl<P> PlanningUnit<P>
where
    P: Problem,
{
    // observation histories

    pub fn nr_observation_histories(&self, agent: Agent) -> Result<Index> {
        self.books()?.observations.nr(agent)
    }
    pub fn nr_observation_histories_at(&self, agent: Agent, stage: Stage) -> Result<Index> {
        self.books()?.observations.nr_at(agent, stage)
    }
    pub fn first_observation_history_index(&self, agent: Agent, stage: Stage) -> Result<Index> {
        self.books()?.observations.first(agent, stage)
    }
    pub fn time_step_for_ohi(&self, agent: Agent, ohi: Index) -> Result<Stage> {
        self.books()?.observations.stage(agent, ohi)
    }
    pub fn successor_ohi(&self, agent: Agent, ohi: Index, o: Index) -> Result<Index> {
        self.books()?.observations.successor(agent, ohi, Observation(o))
    }
    pub fn nr_joint_observation_histories(&self) -> Result<Index> {
        Ok(self.books()?.observations.nr_joint())
    }
    pub fn nr_joint_observation_histories_at(&self, stage: Stage) -> Result<Index> {
        self.books()?.observations.nr_joint_at(stage)
    }
    pub fn first_joint_observation_history_index(&self, stage: Stage) -> Result<Index> {
        self.books()?.observations.first_joint(stage)
    }
    pub fn time_step_for_johi(&self, johi: Index) -> Result<Stage> {
        self.books()?.observations.joint_stage(johi)
    }
    pub fn successor_johi(&self, johi: Index, jo: Index) -> Result<Index> {
        self.books()?.observations.joint_successor(johi, Observation(jo))
    }
    pub fn joint_to_individual_observation_history_indices(&self, johi: Index) -> Result<Vec<Index>> {
        self.books()?.observations.joint_to_individual(johi)
    }
    /// Borrowed from the joint record; `NotCached` when joint histories are lazy.
    pub fn joint_to_individual_observation_history_indices_ref(&self, johi: Index) -> Result<&[Index]> {
        self.books()?.observations.joint_to_individual_ref(johi)
    }
    pub fn individual_to_joint_observation_history_index(&self, stage: Stage, ohis: &[Index]) -> Result<Index> {
        self.books()?.observations.individual_to_joint(stage, ohis)
    }

    // action histories

    pub fn nr_action_histories(&self, agent: Agent) -> Result<Index> {
        self.books()?.actions.nr(agent)
    }
    pub fn nr_action_histories_at(&self, agent: Agent, stage: Stage) -> Result<Index> {
        self.books()?.actions.nr_at(agent, stage)
    }
    pub fn first_action_history_index(&self, agent: Agent, stage: Stage) -> Result<Index> {
        self.books()?.actions.first(agent, stage)
    }
    pub fn time_step_for_ahi(&self, agent: Agent, ahi: Index) -> Result<Stage> {
        self.books()?.actions.stage(agent, ahi)
    }
    pub fn successor_ahi(&self, agent: Agent, ahi: Index, a: Index) -> Result<Index> {
        self.books()?.actions.successor(agent, ahi, Action(a))
    }
    pub fn nr_joint_action_histories(&self) -> Result<Index> {
        Ok(self.books()?.actions.nr_joint())
    }
    pub fn nr_joint_action_histories_at(&self, stage: Stage) -> Result<Index> {
        self.books()?.actions.nr_joint_at(stage)
    }
    pub fn first_joint_action_history_index(&self, stage: Stage) -> Result<Index> {
        self.books()?.actions.first_joint(stage)
    }
    pub fn time_step_for_jahi(&self, jahi: Index) -> Result<Stage> {
        self.books()?.actions.joint_stage(jahi)
    }
    pub fn successor_jahi(&self, jahi: Index, ja: Index) -> Result<Index> {
        self.books()?.actions.joint_successor(jahi, Action(ja))
    }
    pub fn joint_to_individual_action_history_indices(&self, jahi: Index) -> Result<Vec<Index>> {
        self.books()?.actions.joint_to_individual(jahi)
    }
    pub fn joint_to_individual_action_history_indices_ref(&self, jahi: Index) -> Result<&[Index]> {
        self.books()?.actions.joint_to_individual_ref(jahi)
    }
    pub fn individual_to_joint_action_history_index(&self, stage: Stage, ahis: &[Index]) -> Result<Index> {
        self.books()?.actions.individual_to_joint(stage, ahis)
    }

    // action-observation histories

    pub fn nr_action_observation_histories(&self, agent: Agent) -> Result<Index> {
        self.books()?.pairs.nr(agent)
    }
    pub fn nr_action_observation_histories_at(&self, agent: Agent, stage: Stage) -> Result<Index> {
        self.books()?.pairs.nr_at(agent, stage)
    }
    pub fn first_action_observation_history_index(&self, agent: Agent, stage: Stage) -> Result<Index> {
        self.books()?.pairs.first(agent, stage)
    }
    pub fn time_step_for_aohi(&self, agent: Agent, aohi: Index) -> Result<Stage> {
        self.books()?.pairs.stage(agent, aohi)
    }
    pub fn successor_aohi(&self, agent: Agent, aohi: Index, a: Index, o: Index) -> Result<Index> {
        self.books()?
            .pairs
            .successor(agent, aohi, ActionObservation::new(a, o))
    }
    pub fn nr_joint_action_observation_histories(&self) -> Result<Index> {
        Ok(self.books()?.pairs.nr_joint())
    }
    pub fn nr_joint_action_observation_histories_at(&self, stage: Stage) -> Result<Index> {
        self.books()?.pairs.nr_joint_at(stage)
    }
    pub fn first_joint_action_observation_history_index(&self, stage: Stage) -> Result<Index> {
        self.books()?.pairs.first_joint(stage)
    }
    pub fn time_step_for_jaohi(&self, jaohi: Index) -> Result<Stage> {
        self.books()?.pairs.joint_stage(jaohi)
    }
    pub fn successor_jaohi(&self, jaohi: Index, ja: Index, jo: Index) -> Result<Index> {
        self.books()?
            .pairs
            .joint_successor(jaohi, ActionObservation::new(ja, jo))
    }
    pub fn joint_to_individual_action_observation_history_indices(&self, jaohi: Index) -> Result<Vec<Index>> {
        self.books()?.pairs.joint_to_individual(jaohi)
    }
    pub fn joint_to_individual_action_observation_history_indices_ref(&self, jaohi: Index) -> Result<&[Index]> {
        self.books()?.pairs.joint_to_individual_ref(jaohi)
    }
    pub fn individual_to_joint_action_observation_history_index(&self, stage: Stage, aohis: &[Index]) -> Result<Index> {
        self.books()?.pairs.individual_to_joint(stage, aohis)
    }

    // symbols

    pub fn joint_to_individual_action_indices(&self, ja: Index) -> Result<Vec<Index>> {
        self.problem().joint_to_individual_actions(ja)
    }
    pub fn individual_to_joint_action_indices(&self, actions: &[Index]) -> Result<Index> {
        self.problem().individual_to_joint_actions(actions)
    }
    pub fn joint_to_individual_observation_indices(&self, jo: Index) -> Result<Vec<Index>> {
        self.problem().joint_to_individual_observations(jo)
    }
    pub fn individual_to_joint_observation_indices(&self, observations: &[Index]) -> Result<Index> {
        self.problem().individual_to_joint_observations(observations)
    }

    // arrays and encoders

    /// Observations of history `ohi`, oldest first.
    pub fn observation_history_array(&self, agent: Agent, ohi: Index) -> Result<Vec<Index>> {
        Ok(self
            .books()?
            .observations
            .symbols(agent, ohi)?
            .into_iter()
            .map(|o| o.0)
            .collect())
    }
    pub fn observation_history_index(&self, agent: Agent, observations: &[Index]) -> Result<Index> {
        let symbols = observations.iter().map(|&o| Observation(o)).collect::<Vec<_>>();
        self.books()?.observations.index(agent, &symbols)
    }
    /// Joint observations of joint history `johi`, oldest first.
    pub fn joint_observation_history_array(&self, johi: Index) -> Result<Vec<Index>> {
        Ok(self
            .books()?
            .observations
            .joint_symbols(johi)?
            .into_iter()
            .map(|o| o.0)
            .collect())
    }
    /// `arrays[t][i]`: observation of agent `i` at stage `t`.
    pub fn joint_observation_history_arrays(&self, johi: Index) -> Result<Vec<Vec<Index>>> {
        self.joint_observation_history_array(johi)?
            .into_iter()
            .map(|jo| self.joint_to_individual_observation_indices(jo))
            .collect()
    }
    pub fn joint_observation_history_index(&self, joint: &[Index]) -> Result<Index> {
        let symbols = joint.iter().map(|&o| Observation(o)).collect::<Vec<_>>();
        self.books()?.observations.joint_index(&symbols)
    }

    pub fn action_history_array(&self, agent: Agent, ahi: Index) -> Result<Vec<Index>> {
        Ok(self
            .books()?
            .actions
            .symbols(agent, ahi)?
            .into_iter()
            .map(|a| a.0)
            .collect())
    }
    pub fn action_history_index(&self, agent: Agent, actions: &[Index]) -> Result<Index> {
        let symbols = actions.iter().map(|&a| Action(a)).collect::<Vec<_>>();
        self.books()?.actions.index(agent, &symbols)
    }
    pub fn joint_action_history_array(&self, jahi: Index) -> Result<Vec<Index>> {
        Ok(self
            .books()?
            .actions
            .joint_symbols(jahi)?
            .into_iter()
            .map(|a| a.0)
            .collect())
    }
    pub fn joint_action_history_index(&self, joint: &[Index]) -> Result<Index> {
        let symbols = joint.iter().map(|&a| Action(a)).collect::<Vec<_>>();
        self.books()?.actions.joint_index(&symbols)
    }

    /// `(actions, observations)` of history `aohi`, oldest first.
    pub fn action_observation_history_arrays(&self, agent: Agent, aohi: Index) -> Result<(Vec<Index>, Vec<Index>)> {
        Ok(self
            .books()?
            .pairs
            .symbols(agent, aohi)?
            .into_iter()
            .map(|s| (s.action, s.observation))
            .unzip())
    }
    pub fn action_observation_history_index(
        &self,
        agent: Agent,
        actions: &[Index],
        observations: &[Index],
    ) -> Result<Index> {
        let symbols = Self::pairs(actions, observations)?;
        self.books()?.pairs.index(agent, &symbols)
    }
    /// `(joint actions, joint observations)` of joint history `jaohi`, oldest first.
    pub fn joint_action_observation_history_arrays(&self, jaohi: Index) -> Result<(Vec<Index>, Vec<Index>)> {
        Ok(self
            .books()?
            .pairs
            .joint_symbols(jaohi)?
            .into_iter()
            .map(|s| (s.action, s.observation))
            .unzip())
    }
    pub fn joint_action_observation_history_index(&self, actions: &[Index], observations: &[Index]) -> Result<Index> {
        let symbols = Self::pairs(actions, observations)?;
        self.books()?.pairs.joint_index(&symbols)
    }

    /// The action history and observation history that action-observation
    /// history `aohi` interleaves.
    pub fn action_and_observation_history_indices(&self, agent: Agent, aohi: Index) -> Result<(Index, Index)> {
        let (actions, observations) = self.action_observation_history_arrays(agent, aohi)?;
        Ok((
            self.action_history_index(agent, &actions)?,
            self.observation_history_index(agent, &observations)?,
        ))
    }
    /// Per agent, the `(actions, observations)` sequences inside joint history `jaohi`.
    pub fn joint_aoh_to_individual_action_observation_vectors(
        &self,
        jaohi: Index,
    ) -> Result<Vec<(Vec<Index>, Vec<Index>)>> {
        let mut vectors = vec![(Vec::new(), Vec::new()); self.nr_agents()];
        let (actions, observations) = self.joint_action_observation_history_arrays(jaohi)?;
        for (ja, jo) in actions.into_iter().zip(observations) {
            let a = self.joint_to_individual_action_indices(ja)?;
            let o = self.joint_to_individual_observation_indices(jo)?;
            for (agent, (a, o)) in a.into_iter().zip(o).enumerate() {
                vectors[agent].0.push(a);
                vectors[agent].1.push(o);
            }
        }
        Ok(vectors)
    }

    fn pairs(actions: &[Index], observations: &[Index]) -> Result<Vec<ActionObservation>> {
        match actions.len() == observations.len() {
            true => Ok(actions
                .iter()
                .zip(observations)
                .map(|(&a, &o)| ActionObservation::new(a, o))
                .collect()),
            false => Err(MadpError::InvalidIndex(format!(
                "{} actions against {} observations",
                actions.len(),
                observations.len()
            ))),
        }
    }
}
