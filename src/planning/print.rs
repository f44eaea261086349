use super::PlanningUnit;
use crate::Agent;
use crate::Category;
use crate::Index;
use crate::MadpError;
use crate::PolicyDomain;
use crate::Problem;
use crate::Result;

/// Human-readable histories, using the problem's action and observation names.
impl<P> PlanningUnit<P>
where
    P: Problem,
{
    pub fn soft_print_observation_history(&self, agent: Agent, ohi: Index) -> Result<String> {
        let observations = self.observation_history_array(agent, ohi)?;
        Ok(angled(
            observations
                .into_iter()
                .map(|o| self.problem().observation_name(agent, o))
                .collect(),
        ))
    }
    pub fn soft_print_action_history(&self, agent: Agent, ahi: Index) -> Result<String> {
        let actions = self.action_history_array(agent, ahi)?;
        Ok(angled(
            actions
                .into_iter()
                .map(|a| self.problem().action_name(agent, a))
                .collect(),
        ))
    }
    pub fn soft_print_action_observation_history(&self, agent: Agent, aohi: Index) -> Result<String> {
        let (actions, observations) = self.action_observation_history_arrays(agent, aohi)?;
        Ok(angled(
            actions
                .into_iter()
                .zip(observations)
                .map(|(a, o)| {
                    format!(
                        "({}, {})",
                        self.problem().action_name(agent, a),
                        self.problem().observation_name(agent, o)
                    )
                })
                .collect(),
        ))
    }

    pub fn soft_print_joint_observation_history(&self, johi: Index) -> Result<String> {
        let stages = self
            .joint_observation_history_array(johi)?
            .into_iter()
            .map(|jo| self.soft_print_joint_observation(jo))
            .collect::<Result<Vec<_>>>()?;
        Ok(angled(stages))
    }
    pub fn soft_print_joint_action_history(&self, jahi: Index) -> Result<String> {
        let stages = self
            .joint_action_history_array(jahi)?
            .into_iter()
            .map(|ja| self.soft_print_joint_action(ja))
            .collect::<Result<Vec<_>>>()?;
        Ok(angled(stages))
    }
    pub fn soft_print_joint_action_observation_history(&self, jaohi: Index) -> Result<String> {
        let (actions, observations) = self.joint_action_observation_history_arrays(jaohi)?;
        let stages = actions
            .into_iter()
            .zip(observations)
            .map(|(ja, jo)| {
                Ok(format!(
                    "({}, {})",
                    self.soft_print_joint_action(ja)?,
                    self.soft_print_joint_observation(jo)?
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(angled(stages))
    }

    pub fn soft_print_policy_domain_element(
        &self,
        agent: Agent,
        index: Index,
        domain: PolicyDomain,
    ) -> Result<String> {
        match domain.category()? {
            Category::Observation => self.soft_print_observation_history(agent, index),
            Category::ActionObservation => self.soft_print_action_observation_history(agent, index),
            Category::Action => Err(MadpError::Domain(format!(
                "no policies over {} histories",
                Category::Action
            ))),
        }
    }

    fn soft_print_joint_action(&self, ja: Index) -> Result<String> {
        let names = self
            .joint_to_individual_action_indices(ja)?
            .into_iter()
            .enumerate()
            .map(|(i, a)| self.problem().action_name(i, a))
            .collect::<Vec<_>>();
        Ok(format!("<{}>", names.join(" ")))
    }
    fn soft_print_joint_observation(&self, jo: Index) -> Result<String> {
        let names = self
            .joint_to_individual_observation_indices(jo)?
            .into_iter()
            .enumerate()
            .map(|(i, o)| self.problem().observation_name(i, o))
            .collect::<Vec<_>>();
        Ok(format!("<{}>", names.join(" ")))
    }
}

fn angled(stages: Vec<String>) -> String {
    match stages.is_empty() {
        true => String::from("<EMPTY>"),
        false => format!("<{}>", stages.join(", ")),
    }
}
