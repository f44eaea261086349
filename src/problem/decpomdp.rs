use super::Problem;
use super::Storage;
use super::Table;
use crate::Agent;
use crate::Alphabet;
use crate::Checked;
use crate::Index;
use crate::MadpError;
use crate::PROB_PRECISION;
use crate::Probability;
use crate::Result;
use crate::product;
use crate::State;
use rand::Rng;

/// A discrete Dec-POMDP held in probability tables.
///
/// Transition rows are keyed by `(ja, s)` with one column per successor
/// state. Observation rows are keyed by `(ja, s')` with one column per joint
/// observation. Event-driven models additionally key observation rows by
/// the predecessor state `(s, ja, s')`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecPomdp {
    states: usize,
    alphabets: Vec<Alphabet>,
    joint: (usize, usize),
    transitions: Table,
    observations: Table,
    events: Option<Table>,
    initial: Vec<Probability>,
}

impl DecPomdp {
    /// All-zero tables and a uniform initial distribution.
    pub fn new(states: usize, alphabets: Vec<Alphabet>, storage: Storage) -> Result<Self> {
        if states == 0 || alphabets.is_empty() {
            return Err(MadpError::Sanity(format!(
                "{} states and {} agents",
                states,
                alphabets.len()
            )));
        }
        let joint = Alphabet::joint(&alphabets)?;
        let ja = joint.actions.slot()?;
        let jo = joint.observations.slot()?;
        let rows = Self::rows(&[ja, states])?;
        Ok(Self {
            states,
            alphabets,
            joint: (ja, jo),
            transitions: Table::new(storage, rows, states)?,
            observations: Table::new(storage, rows, jo)?,
            events: None,
            initial: vec![1. / states as Probability; states],
        })
    }

    /// A random model: every row is a random distribution.
    pub fn random<R>(
        states: usize,
        alphabets: Vec<Alphabet>,
        storage: Storage,
        rng: &mut R,
    ) -> Result<Self>
    where
        R: Rng,
    {
        let mut problem = Self::new(states, alphabets, storage)?;
        let (ja, jo) = problem.joint;
        for a in 0..ja {
            for s in 0..states {
                for (next, p) in Self::distribution(states, rng).into_iter().enumerate() {
                    problem.transitions.set(a * states + s, next, p)?;
                }
                for (o, p) in Self::distribution(jo, rng).into_iter().enumerate() {
                    problem.observations.set(a * states + s, o, p)?;
                }
            }
        }
        problem.initial = Self::distribution(states, rng);
        Ok(problem)
    }

    pub fn storage(&self) -> Storage {
        self.transitions.storage()
    }
    pub fn is_event_driven(&self) -> bool {
        self.events.is_some()
    }

    pub fn set_transition(&mut self, s: State, ja: Index, next: State, p: Probability) -> Result<()> {
        let row = self.row(ja, s)?;
        self.transitions.set(row, next, p)
    }
    pub fn set_observation(&mut self, ja: Index, next: State, jo: Index, p: Probability) -> Result<()> {
        let row = self.row(ja, next)?;
        self.observations.set(row, jo.slot()?, p)
    }
    /// Switch to an event-driven observation model on first use.
    pub fn set_event_observation(
        &mut self,
        s: State,
        ja: Index,
        next: State,
        jo: Index,
        p: Probability,
    ) -> Result<()> {
        let rows = Self::rows(&[self.states, self.joint.0, self.states])?;
        let row = self.event_row(s, ja, next)?;
        let jo = jo.slot()?;
        let events = match self.events.take() {
            Some(events) => events,
            None => Table::new(self.storage(), rows, self.joint.1)?,
        };
        self.events.insert(events).set(row, jo, p)
    }
    pub fn set_initial(&mut self, distribution: Vec<Probability>) -> Result<()> {
        if distribution.len() != self.states {
            return Err(MadpError::Sanity(format!(
                "initial distribution over {} of {} states",
                distribution.len(),
                self.states
            )));
        }
        self.initial = distribution;
        Ok(())
    }

    /// Every row of every table, and the initial distribution, sums to one.
    pub fn sanity_check(&self) -> Result<()> {
        self.transitions.sanity_check()?;
        match &self.events {
            Some(events) => events.sanity_check()?,
            None => self.observations.sanity_check()?,
        }
        let sum = self.initial.iter().sum::<Probability>();
        if (sum - 1.).abs() > PROB_PRECISION || self.initial.iter().any(|p| *p < 0.) {
            return Err(MadpError::Sanity(format!(
                "initial distribution sums to {}",
                sum
            )));
        }
        Ok(())
    }

    fn row(&self, ja: Index, s: State) -> Result<usize> {
        let a = ja.slot()?;
        match a < self.joint.0 && s < self.states {
            true => Ok(a * self.states + s),
            false => Err(MadpError::InvalidIndex(format!(
                "joint action {} in state {}",
                ja, s
            ))),
        }
    }
    fn event_row(&self, s: State, ja: Index, next: State) -> Result<usize> {
        match s < self.states {
            true => Ok(s * self.joint.0 * self.states + self.row(ja, next)?),
            false => Err(MadpError::InvalidIndex(format!("state {}", s))),
        }
    }
    /// Row count of a table keyed by `factors`.
    fn rows(factors: &[usize]) -> Result<usize> {
        product(factors.iter().map(|&f| f as Index))?.slot()
    }
    fn distribution<R: Rng>(n: usize, rng: &mut R) -> Vec<Probability> {
        let weights = (0..n).map(|_| rng.random::<Probability>() + 0.1).collect::<Vec<_>>();
        let total = weights.iter().sum::<Probability>();
        weights.into_iter().map(|w| w / total).collect()
    }
}

impl Problem for DecPomdp {
    fn nr_agents(&self) -> usize {
        self.alphabets.len()
    }
    fn nr_states(&self) -> usize {
        self.states
    }
    fn nr_actions(&self, agent: Agent) -> Index {
        self.alphabets.get(agent).map(|a| a.actions).unwrap_or(0)
    }
    fn nr_observations(&self, agent: Agent) -> Index {
        self.alphabets.get(agent).map(|a| a.observations).unwrap_or(0)
    }
    fn transition(&self, s: State, ja: Index, next: State) -> Probability {
        self.row(ja, s)
            .map(|row| self.transitions.get(row, next))
            .unwrap_or(0.)
    }
    fn observation(&self, ja: Index, next: State, jo: Index) -> Probability {
        match (self.row(ja, next), jo.slot()) {
            (Ok(row), Ok(jo)) => self.observations.get(row, jo),
            _ => 0.,
        }
    }
    fn event_observation(&self, s: State, ja: Index, next: State, jo: Index) -> Probability {
        match &self.events {
            None => self.observation(ja, next, jo),
            Some(events) => match (self.event_row(s, ja, next), jo.slot()) {
                (Ok(row), Ok(jo)) => events.get(row, jo),
                _ => 0.,
            },
        }
    }
    fn successors(&self, s: State, ja: Index) -> Vec<(State, Probability)> {
        self.row(ja, s)
            .map(|row| self.transitions.row(row))
            .unwrap_or_default()
    }
    fn initial(&self, s: State) -> Probability {
        self.initial.get(s).copied().unwrap_or(0.)
    }
    fn alphabets(&self) -> Vec<Alphabet> {
        self.alphabets.clone()
    }
}
