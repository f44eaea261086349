use super::PlanningUnit;
use crate::Agent;
use crate::Checked;
use crate::Index;
use crate::MadpError;
use crate::PolicyDomain;
use crate::Problem;
use crate::PureJointPolicy;
use crate::PurePolicy;
use crate::Result;
use crate::Stage;
use petgraph::graph::DiGraph;

/// Policy domains, policy counts and policy construction.
impl<P> PlanningUnit<P>
where
    P: Problem,
{
    /// Domain elements of `agent` before stage `depth`, or all of them.
    pub fn nr_policy_domain_elements(
        &self,
        agent: Agent,
        domain: PolicyDomain,
        depth: Option<Stage>,
    ) -> Result<Index> {
        let horizon = self.stages()?;
        let depth = depth.filter(|&d| d < horizon);
        match (domain, depth) {
            (PolicyDomain::ObservationHistory, None) => self.nr_observation_histories(agent),
            (PolicyDomain::ObservationHistory, Some(d)) => self.first_observation_history_index(agent, d),
            (PolicyDomain::ActionObservationHistory, None) => self.nr_action_observation_histories(agent),
            (PolicyDomain::ActionObservationHistory, Some(d)) => {
                self.first_action_observation_history_index(agent, d)
            }
            (PolicyDomain::Type, _) => Err(MadpError::Domain(String::from(
                "type domains are counted by the Bayesian game that defines them",
            ))),
        }
    }

    /// Pure policies of `agent` over observation histories: `|A|^|OH|`.
    pub fn nr_policies(&self, agent: Agent) -> Result<Index> {
        let histories = self.nr_observation_histories(agent)?;
        let exponent = usize::try_from(histories)
            .map_err(|_| MadpError::Overflow(format!("{} observation histories", histories)))?;
        self.nr_actions(agent).power(exponent)
    }
    /// Pure joint policies: the product of every agent's count.
    pub fn nr_joint_policies(&self) -> Result<Index> {
        (0..self.nr_agents()).try_fold(1 as Index, |acc, i| acc.times(self.nr_policies(i)?))
    }

    /// Whether joint-to-individual conversion in `domain` is a cached lookup.
    pub fn are_cached_joint_to_indiv_indices(&self, domain: PolicyDomain) -> Result<bool> {
        let books = self.books()?;
        match domain {
            PolicyDomain::ObservationHistory => Ok(books.observations.is_joint_cached()),
            PolicyDomain::ActionObservationHistory => Ok(books.pairs.is_joint_cached()),
            PolicyDomain::Type => Err(MadpError::Domain(String::from(
                "type domains have no joint history cache",
            ))),
        }
    }
    pub fn joint_to_individual_policy_domain_indices(
        &self,
        joint: Index,
        domain: PolicyDomain,
    ) -> Result<Vec<Index>> {
        match domain {
            PolicyDomain::ObservationHistory => self.joint_to_individual_observation_history_indices(joint),
            PolicyDomain::ActionObservationHistory => {
                self.joint_to_individual_action_observation_history_indices(joint)
            }
            PolicyDomain::Type => Err(MadpError::Domain(String::from(
                "type domains have no joint history index",
            ))),
        }
    }

    /// Flatten per-agent pure policies into one joint action per joint domain element.
    pub fn pure_joint_policy(&self, policies: &[PurePolicy]) -> Result<PureJointPolicy> {
        let domain = policies
            .first()
            .map(|p| p.domain())
            .ok_or_else(|| MadpError::Sanity(String::from("joint policy of no agents")))?;
        if policies.len() != self.nr_agents() {
            return Err(MadpError::Sanity(format!(
                "{} policies for {} agents",
                policies.len(),
                self.nr_agents()
            )));
        }
        for (agent, policy) in policies.iter().enumerate() {
            self.check_policy(agent, policy, domain)?;
        }
        let total = match domain {
            PolicyDomain::ObservationHistory => self.nr_joint_observation_histories()?,
            PolicyDomain::ActionObservationHistory => self.nr_joint_action_observation_histories()?,
            PolicyDomain::Type => 0,
        };
        let joint_actions = (0..total)
            .map(|joint| {
                let actions = self
                    .joint_to_individual_policy_domain_indices(joint, domain)?
                    .into_iter()
                    .zip(policies)
                    .map(|(i, policy)| policy.action(i))
                    .collect::<Result<Vec<_>>>()?;
                self.individual_to_joint_action_indices(&actions)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(PureJointPolicy::new(domain, joint_actions))
    }

    /// Render a pure observation-history policy of `agent` in GraphViz syntax.
    pub fn policy_to_dot(&self, agent: Agent, policy: &PurePolicy, labels: bool) -> Result<String> {
        self.check_policy(agent, policy, PolicyDomain::ObservationHistory)?;
        let horizon = self.stages()?;
        let mut graph = DiGraph::<String, String>::new();
        let nodes = policy
            .actions()
            .iter()
            .map(|&a| graph.add_node(self.problem().action_name(agent, a)))
            .collect::<Vec<_>>();
        for (ohi, &node) in nodes.iter().enumerate() {
            let ohi = ohi as Index;
            if self.time_step_for_ohi(agent, ohi)? + 1 >= horizon {
                continue;
            }
            for o in 0..self.nr_observations(agent) {
                let next = self.successor_ohi(agent, ohi, o)?.slot()?;
                graph.add_edge(node, nodes[next], self.problem().observation_name(agent, o));
            }
        }
        Ok(crate::dot_graph(agent, &graph, labels))
    }

    /// Write [`Self::policy_to_dot`] to `path`.
    pub fn export_dot(
        &self,
        agent: Agent,
        policy: &PurePolicy,
        labels: bool,
        path: &std::path::Path,
    ) -> anyhow::Result<()> {
        let text = self.policy_to_dot(agent, policy, labels)?;
        std::fs::write(path, text)?;
        log::info!("wrote policy of agent {} to {}", agent, path.display());
        Ok(())
    }

    fn check_policy(&self, agent: Agent, policy: &PurePolicy, domain: PolicyDomain) -> Result<()> {
        if policy.domain() != domain {
            return Err(MadpError::Domain(format!(
                "agent {} policy over {} where {} is expected",
                agent,
                policy.domain(),
                domain
            )));
        }
        let elements = self.nr_policy_domain_elements(agent, domain, None)?;
        if policy.len() as Index != elements {
            return Err(MadpError::Sanity(format!(
                "agent {} policy covers {} of {} {} elements",
                agent,
                policy.len(),
                elements,
                domain
            )));
        }
        match policy.actions().iter().find(|&&a| a >= self.nr_actions(agent)) {
            Some(a) => Err(MadpError::InvalidIndex(format!(
                "agent {} has no action {}",
                agent, a
            ))),
            None => Ok(()),
        }
    }
}
