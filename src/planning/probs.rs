use super::PlanningUnit;
use crate::Belief;
use crate::Index;
use crate::JointBelief;
use crate::JointPolicy;
use crate::MadpError;
use crate::PolicyDomain;
use crate::Probability;
use crate::Problem;
use crate::Result;

/// Joint beliefs and realization probabilities of joint action-observation histories.
impl<P> PlanningUnit<P>
where
    P: Problem,
{
    /// The joint belief reached by `jaohi` from the initial state distribution.
    /// Always an owned copy, never the cached value itself.
    pub fn joint_belief(&self, jaohi: Index) -> Result<JointBelief> {
        match self.cached_belief(jaohi)? {
            Some((belief, _)) => Ok(belief.clone()),
            None => Ok(self.jaoh_probs(jaohi, 0, None, None)?.0),
        }
    }

    /// Probability of `jaohi` together with the joint belief it reaches.
    ///
    /// With `predecessor == 0` and no `start` belief the walk begins at the
    /// initial state distribution. Given a nonzero `predecessor` the result
    /// is the probability of `jaohi` conditioned on it; without a `start`
    /// belief for the predecessor, its belief is replayed from stage 0.
    /// With a `policy`, every step is also weighted by the probability the
    /// policy puts on the joint action actually taken.
    ///
    /// A predecessor that is not a prefix of `jaohi` yields probability zero.
    pub fn jaoh_probs(
        &self,
        jaohi: Index,
        predecessor: Index,
        start: Option<&JointBelief>,
        policy: Option<&dyn JointPolicy>,
    ) -> Result<(JointBelief, Probability)> {
        if predecessor == 0 && start.is_none() && policy.is_none() {
            if let Some((belief, p)) = self.cached_belief(jaohi)? {
                return Ok((belief.clone(), p));
            }
        }
        let event = self.parameters().event_observability;
        let t = self.time_step_for_jaohi(jaohi)?;
        let t_p = self.time_step_for_jaohi(predecessor)?;
        let (actions, observations) = self.joint_action_observation_history_arrays(jaohi)?;
        let mut belief = self.new_joint_belief(None);
        if predecessor != 0 {
            if t_p >= t {
                return Ok((belief, 0.));
            }
            let (p_actions, p_observations) = self.joint_action_observation_history_arrays(predecessor)?;
            if p_actions[..] != actions[..t_p] || p_observations[..] != observations[..t_p] {
                log::warn!(
                    "joint history {} does not extend predecessor {}",
                    jaohi,
                    predecessor
                );
                return Ok((belief, 0.));
            }
        }
        match (predecessor, start) {
            (0, None) => belief.set_from_isd(self.problem()),
            (_, Some(start)) => belief = start.clone(),
            (_, None) => {
                if let Some((cached, p)) = self.cached_belief(jaohi)? {
                    let p_p = self
                        .realizations()
                        .and_then(|r| r.unconditional.get(usize::try_from(predecessor).ok()?))
                        .copied()
                        .unwrap_or(0.);
                    let conditional = if p_p > 0. { p / p_p } else { 0. };
                    return Ok((cached.clone(), conditional));
                }
                belief.set_from_isd(self.problem());
                for (&ja, &jo) in actions.iter().zip(&observations).take(t_p) {
                    belief.update(self.problem(), ja, jo, event);
                }
            }
        }
        let mut probability = 1.;
        let mut current = predecessor;
        for k in t_p..t {
            let (ja, jo) = (actions[k], observations[k]);
            let conditional = belief.update(self.problem(), ja, jo, event);
            let weight = match policy {
                None => 1.,
                Some(policy) => {
                    let joint = match policy.domain() {
                        PolicyDomain::ObservationHistory => {
                            self.joint_observation_history_index(&observations[..k])?
                        }
                        PolicyDomain::ActionObservationHistory => current,
                        PolicyDomain::Type => {
                            return Err(MadpError::Domain(String::from(
                                "realization probabilities need a history-indexed policy",
                            )));
                        }
                    };
                    policy.joint_action_probability(joint, ja)?
                }
            };
            probability *= conditional * weight;
            current = self.successor_jaohi(current, ja, jo)?;
        }
        Ok((belief, probability))
    }

    /// [`Self::jaoh_probs`] without the belief.
    pub fn jaoh_prob(
        &self,
        jaohi: Index,
        predecessor: Index,
        start: Option<&JointBelief>,
        policy: Option<&dyn JointPolicy>,
    ) -> Result<Probability> {
        Ok(self.jaoh_probs(jaohi, predecessor, start, policy)?.1)
    }

    /// `P(jaohi | its immediate predecessor)`. One for the empty history.
    pub fn jaoh_prob_given_pred(&self, jaohi: Index) -> Result<Probability> {
        if let Some(realizations) = self.realizations() {
            let slot = usize::try_from(jaohi).ok();
            return slot
                .and_then(|i| realizations.conditional.get(i))
                .copied()
                .ok_or_else(|| MadpError::InvalidIndex(format!("joint action-observation history {}", jaohi)));
        }
        let (actions, observations) = self.joint_action_observation_history_arrays(jaohi)?;
        match actions.len() {
            0 => Ok(1.),
            t => {
                let predecessor =
                    self.joint_action_observation_history_index(&actions[..t - 1], &observations[..t - 1])?;
                self.jaoh_prob(jaohi, predecessor, None, None)
            }
        }
    }

    /// Cached `(belief, unconditional probability)` when beliefs are cached.
    fn cached_belief(&self, jaohi: Index) -> Result<Option<(&JointBelief, Probability)>> {
        match self.realizations() {
            Some(r) if !r.beliefs.is_empty() => {
                let i = usize::try_from(jaohi).ok().filter(|&i| i < r.beliefs.len()).ok_or_else(|| {
                    MadpError::InvalidIndex(format!(
                        "joint action-observation history {} of {}",
                        jaohi,
                        r.beliefs.len()
                    ))
                })?;
                Ok(Some((&r.beliefs[i], r.unconditional[i])))
            }
            _ => Ok(None),
        }
    }
}
