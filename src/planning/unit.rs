use super::Horizon;
use super::Parameters;
use crate::Action;
use crate::ActionObservation;
use crate::Agent;
use crate::Belief;
use crate::Index;
use crate::JointBelief;
use crate::Ledger;
use crate::Observation;
use crate::Probability;
use crate::Problem;
use crate::Result;
use crate::Stage;
use crate::Symbol;

/// History bookkeeping and belief propagation for one
/// `(problem, horizon, parameters)` triple.
///
/// Owns the observation, action and action-observation [`Ledger`]s and,
/// when joint action-observation histories are eager, the realization
/// probability of every joint action-observation history. Changing any of
/// the three inputs tears everything down and rebuilds it.
#[derive(Debug, Clone)]
pub struct PlanningUnit<P> {
    problem: P,
    horizon: Horizon,
    parameters: Parameters,
    books: Option<Books>,
}

/// Everything derived from a finite horizon.
#[derive(Debug, Clone)]
pub(super) struct Books {
    pub(super) observations: Ledger<Observation>,
    pub(super) actions: Ledger<Action>,
    pub(super) pairs: Ledger<ActionObservation>,
    pub(super) realizations: Option<Realizations>,
}

/// Per joint action-observation history, in index order.
#[derive(Debug, Clone, Default)]
pub(super) struct Realizations {
    pub(super) beliefs: Vec<JointBelief>,
    pub(super) conditional: Vec<Probability>,
    pub(super) unconditional: Vec<Probability>,
}

impl<P> PlanningUnit<P>
where
    P: Problem,
{
    pub fn new(problem: P, horizon: Horizon, parameters: Parameters) -> Result<Self> {
        let mut unit = Self {
            problem,
            horizon,
            parameters,
            books: None,
        };
        unit.rebuild()?;
        Ok(unit)
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn set_problem(&mut self, problem: P) -> Result<()> {
        self.problem = problem;
        self.rebuild()
    }
    pub fn set_horizon(&mut self, horizon: Horizon) -> Result<()> {
        self.horizon = horizon;
        self.rebuild()
    }
    /// Rejected parameters leave the unit as it was.
    pub fn set_parameters(&mut self, parameters: Parameters) -> Result<()> {
        parameters.sanity_check()?;
        self.parameters = parameters;
        self.rebuild()
    }

    /// Drop every cache and derive them again from the current inputs.
    fn rebuild(&mut self) -> Result<()> {
        self.books = None;
        self.parameters.sanity_check()?;
        let horizon = match self.horizon {
            Horizon::Infinite => {
                log::info!("infinite horizon, no history bookkeeping");
                return Ok(());
            }
            Horizon::Finite(0) => {
                return Err(crate::MadpError::Sanity(String::from(
                    "horizon must be positive",
                )));
            }
            Horizon::Finite(h) => h,
        };
        let alphabets = self.problem.alphabets();
        let p = &self.parameters;
        let observations = Ledger::new(
            alphabets.clone(),
            horizon,
            p.individual_observation_histories,
            p.joint_observation_histories,
        )?;
        let actions = Ledger::new(
            alphabets.clone(),
            horizon,
            p.individual_action_histories,
            p.joint_action_histories,
        )?;
        let pairs = Ledger::new(
            alphabets,
            horizon,
            p.individual_action_observation_histories,
            p.joint_action_observation_histories,
        )?;
        let realizations = match p.joint_action_observation_histories {
            true => Some(self.realize(&pairs)?),
            false => None,
        };
        self.books = Some(Books {
            observations,
            actions,
            pairs,
            realizations,
        });
        Ok(())
    }

    /// Propagate beliefs stage by stage through every joint
    /// action-observation history. Children of stage `t` are contiguous and
    /// in parent order, so each stage's beliefs line up with its indices.
    fn realize(&self, pairs: &Ledger<ActionObservation>) -> Result<Realizations> {
        let keep = self.parameters.joint_beliefs;
        let event = self.parameters.event_observability;
        let team = pairs.team();
        let alphabet = *team.alphabet();
        let mut root = self.new_joint_belief(None);
        root.set_from_isd(&self.problem);
        let mut realizations = Realizations {
            conditional: vec![1.],
            unconditional: vec![1.],
            ..Realizations::default()
        };
        let mut stage = vec![root];
        for _ in 1..team.stages().horizon() {
            let mut next = Vec::with_capacity(stage.len() * team.base() as usize);
            let parents = realizations.unconditional.len() - stage.len();
            for (i, belief) in stage.iter().enumerate() {
                let prior = realizations.unconditional[parents + i];
                for digit in 0..team.base() {
                    let symbol = ActionObservation::from_digit(digit, &alphabet);
                    let mut child = belief.clone();
                    let p = child.update(&self.problem, symbol.action, symbol.observation, event);
                    realizations.conditional.push(p);
                    realizations.unconditional.push(prior * p);
                    next.push(child);
                }
            }
            if keep {
                realizations.beliefs.append(&mut stage);
            }
            stage = next;
        }
        if keep {
            realizations.beliefs.append(&mut stage);
        }
        log::info!(
            "{:<24}{:>12} realizations {}",
            "joint beliefs",
            realizations.unconditional.len(),
            if keep { "cached" } else { "not cached" }
        );
        Ok(realizations)
    }

    pub(super) fn books(&self) -> Result<&Books> {
        match &self.books {
            Some(books) => Ok(books),
            None => Err(crate::MadpError::Domain(format!(
                "no history bookkeeping for horizon {}",
                self.horizon
            ))),
        }
    }
    pub(super) fn realizations(&self) -> Option<&Realizations> {
        self.books.as_ref().and_then(|b| b.realizations.as_ref())
    }

    /// Number of stages; a domain error for infinite horizons.
    pub fn stages(&self) -> Result<Stage> {
        self.horizon.finite()
    }
    pub fn nr_agents(&self) -> usize {
        self.problem.nr_agents()
    }
    pub fn nr_states(&self) -> usize {
        self.problem.nr_states()
    }
    pub fn nr_actions(&self, agent: Agent) -> Index {
        self.problem.nr_actions(agent)
    }
    pub fn nr_observations(&self, agent: Agent) -> Index {
        self.problem.nr_observations(agent)
    }
    pub fn nr_joint_actions(&self) -> Result<Index> {
        self.problem.nr_joint_actions()
    }
    pub fn nr_joint_observations(&self) -> Result<Index> {
        self.problem.nr_joint_observations()
    }

    pub fn observation_ledger(&self) -> Result<&Ledger<Observation>> {
        Ok(&self.books()?.observations)
    }
    pub fn action_ledger(&self) -> Result<&Ledger<Action>> {
        Ok(&self.books()?.actions)
    }
    pub fn action_observation_ledger(&self) -> Result<&Ledger<ActionObservation>> {
        Ok(&self.books()?.pairs)
    }

    /// Lazily materialize joint action-observation history `jaohi`.
    pub fn grow_jaoh(&mut self, jaohi: Index) -> Result<&crate::JointHistory<ActionObservation>> {
        let horizon = self.horizon;
        match self.books.as_mut() {
            Some(books) => books.pairs.grow_joint(jaohi),
            None => Err(crate::MadpError::Domain(format!(
                "no history bookkeeping for horizon {}",
                horizon
            ))),
        }
    }

    /// A fresh, all-zero joint belief over `size` states, or over every state.
    pub fn new_joint_belief(&self, size: Option<usize>) -> JointBelief {
        JointBelief::new(
            size.unwrap_or_else(|| self.problem.nr_states()),
            self.parameters.sparse_beliefs,
        )
    }
}

impl<P> std::fmt::Display for PlanningUnit<P>
where
    P: Problem,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "horizon {} agents {}", self.horizon, self.nr_agents())?;
        writeln!(f, "{}", self.parameters)?;
        match &self.books {
            None => write!(f, "no history bookkeeping"),
            Some(books) => {
                let individual = |counts: Vec<Index>| format!("{:?}", counts);
                writeln!(
                    f,
                    "observation histories        {} joint {}",
                    individual(
                        (0..self.nr_agents())
                            .map(|i| books.observations.nr(i).unwrap_or_default())
                            .collect()
                    ),
                    books.observations.nr_joint()
                )?;
                writeln!(
                    f,
                    "action histories             {} joint {}",
                    individual(
                        (0..self.nr_agents())
                            .map(|i| books.actions.nr(i).unwrap_or_default())
                            .collect()
                    ),
                    books.actions.nr_joint()
                )?;
                write!(
                    f,
                    "action-observation histories {} joint {}",
                    individual(
                        (0..self.nr_agents())
                            .map(|i| books.pairs.nr(i).unwrap_or_default())
                            .collect()
                    ),
                    books.pairs.nr_joint()
                )
            }
        }
    }
}
