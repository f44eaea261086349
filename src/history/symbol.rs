use crate::Checked;
use crate::Index;
use crate::MadpError;
use crate::Result;
use crate::Step;
use crate::individual_to_joint;
use crate::joint_to_individual;
use serde::Deserialize;
use serde::Serialize;

/// The three kinds of histories kept for every agent and for the team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Observation,
    Action,
    ActionObservation,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Observation => write!(f, "observation"),
            Self::Action => write!(f, "action"),
            Self::ActionObservation => write!(f, "action-observation"),
        }
    }
}

/// Action and observation alphabet sizes of one agent, or of the team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alphabet {
    pub actions: Index,
    pub observations: Index,
}

impl Alphabet {
    pub fn new(actions: Index, observations: Index) -> Self {
        Self {
            actions,
            observations,
        }
    }
    /// The joint alphabet: products of the per-agent sizes.
    pub fn joint(agents: &[Alphabet]) -> Result<Self> {
        Ok(Self {
            actions: crate::product(agents.iter().map(|a| a.actions))?,
            observations: crate::product(agents.iter().map(|a| a.observations))?,
        })
    }
    fn actions_of(agents: &[Alphabet]) -> Vec<Index> {
        agents.iter().map(|a| a.actions).collect()
    }
    fn observations_of(agents: &[Alphabet]) -> Vec<Index> {
        agents.iter().map(|a| a.observations).collect()
    }
}

/// What one stage appends to a history.
///
/// A symbol is a digit in the mixed-radix numbering of its category. The
/// same type serves individual and joint histories; a joint symbol splits
/// into one individual symbol per agent.
pub trait Symbol: Copy + Eq + std::fmt::Debug + std::fmt::Display {
    const CATEGORY: Category;
    /// Number of distinct symbols over `alphabet`.
    fn base(alphabet: &Alphabet) -> Result<Index>;
    fn digit(&self, alphabet: &Alphabet) -> Index;
    fn from_digit(digit: Index, alphabet: &Alphabet) -> Self;
    /// Whether every part of the symbol lies inside `alphabet`.
    fn fits(&self, alphabet: &Alphabet) -> bool;
    /// Tree transition for this symbol.
    fn step(&self) -> Step;
    /// Joint symbol to one symbol per agent.
    fn split(&self, agents: &[Alphabet]) -> Result<Vec<Self>>;
    /// One symbol per agent to the joint symbol.
    fn join(parts: &[Self], agents: &[Alphabet]) -> Result<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Observation(pub Index);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Action(pub Index);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionObservation {
    pub action: Index,
    pub observation: Index,
}

impl ActionObservation {
    pub fn new(action: Index, observation: Index) -> Self {
        Self {
            action,
            observation,
        }
    }
}

impl Symbol for Observation {
    const CATEGORY: Category = Category::Observation;
    fn base(alphabet: &Alphabet) -> Result<Index> {
        Ok(alphabet.observations)
    }
    fn digit(&self, _: &Alphabet) -> Index {
        self.0
    }
    fn from_digit(digit: Index, _: &Alphabet) -> Self {
        Self(digit)
    }
    fn fits(&self, alphabet: &Alphabet) -> bool {
        self.0 < alphabet.observations
    }
    fn step(&self) -> Step {
        Step::One(self.0)
    }
    fn split(&self, agents: &[Alphabet]) -> Result<Vec<Self>> {
        let sizes = Alphabet::observations_of(agents);
        Ok(joint_to_individual(self.0, &sizes)?
            .into_iter()
            .map(Self)
            .collect())
    }
    fn join(parts: &[Self], agents: &[Alphabet]) -> Result<Self> {
        let sizes = Alphabet::observations_of(agents);
        let parts = parts.iter().map(|o| o.0).collect::<Vec<_>>();
        individual_to_joint(&parts, &sizes).map(Self)
    }
}

impl Symbol for Action {
    const CATEGORY: Category = Category::Action;
    fn base(alphabet: &Alphabet) -> Result<Index> {
        Ok(alphabet.actions)
    }
    fn digit(&self, _: &Alphabet) -> Index {
        self.0
    }
    fn from_digit(digit: Index, _: &Alphabet) -> Self {
        Self(digit)
    }
    fn fits(&self, alphabet: &Alphabet) -> bool {
        self.0 < alphabet.actions
    }
    fn step(&self) -> Step {
        Step::One(self.0)
    }
    fn split(&self, agents: &[Alphabet]) -> Result<Vec<Self>> {
        let sizes = Alphabet::actions_of(agents);
        Ok(joint_to_individual(self.0, &sizes)?
            .into_iter()
            .map(Self)
            .collect())
    }
    fn join(parts: &[Self], agents: &[Alphabet]) -> Result<Self> {
        let sizes = Alphabet::actions_of(agents);
        let parts = parts.iter().map(|a| a.0).collect::<Vec<_>>();
        individual_to_joint(&parts, &sizes).map(Self)
    }
}

impl Symbol for ActionObservation {
    const CATEGORY: Category = Category::ActionObservation;
    fn base(alphabet: &Alphabet) -> Result<Index> {
        alphabet.actions.times(alphabet.observations)
    }
    fn digit(&self, alphabet: &Alphabet) -> Index {
        self.action * alphabet.observations + self.observation
    }
    fn from_digit(digit: Index, alphabet: &Alphabet) -> Self {
        Self {
            action: digit / alphabet.observations,
            observation: digit % alphabet.observations,
        }
    }
    fn fits(&self, alphabet: &Alphabet) -> bool {
        self.action < alphabet.actions && self.observation < alphabet.observations
    }
    fn step(&self) -> Step {
        Step::Pair(self.action, self.observation)
    }
    fn split(&self, agents: &[Alphabet]) -> Result<Vec<Self>> {
        let actions = joint_to_individual(self.action, &Alphabet::actions_of(agents))?;
        let observations =
            joint_to_individual(self.observation, &Alphabet::observations_of(agents))?;
        Ok(actions
            .into_iter()
            .zip(observations)
            .map(|(a, o)| Self::new(a, o))
            .collect())
    }
    fn join(parts: &[Self], agents: &[Alphabet]) -> Result<Self> {
        let actions = parts.iter().map(|p| p.action).collect::<Vec<_>>();
        let observations = parts.iter().map(|p| p.observation).collect::<Vec<_>>();
        Ok(Self::new(
            individual_to_joint(&actions, &Alphabet::actions_of(agents))?,
            individual_to_joint(&observations, &Alphabet::observations_of(agents))?,
        ))
    }
}

/// Reject symbols outside `alphabet` before they reach index arithmetic.
pub fn checked_digit<S: Symbol>(symbol: &S, alphabet: &Alphabet) -> Result<Index> {
    match symbol.fits(alphabet) {
        true => Ok(symbol.digit(alphabet)),
        false => Err(MadpError::InvalidIndex(format!(
            "{} symbol {} outside {} actions x {} observations",
            S::CATEGORY,
            symbol,
            alphabet.actions,
            alphabet.observations
        ))),
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "o{}", self.0)
    }
}
impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a{}", self.0)
    }
}
impl std::fmt::Display for ActionObservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(a{}, o{})", self.action, self.observation)
    }
}
