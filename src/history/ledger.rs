use crate::Agent;
use crate::Alphabet;
use crate::Histories;
use crate::History;
use crate::HistoryTree;
use crate::Index;
use crate::JointHistory;
use crate::MadpError;
use crate::Result;
use crate::Stage;
use crate::Symbol;

/// All histories of one category: one [`Histories`] per agent plus the team's.
///
/// Individual and joint histories are toggled between eager and lazy
/// independently. Joint records cache the flat index of each agent's own
/// history, so joint-to-individual conversion is a lookup when the joint
/// histories are eager and a decode/split/encode round otherwise.
#[derive(Debug, Clone)]
pub struct Ledger<S>
where
    S: Symbol,
{
    alphabets: Vec<Alphabet>,
    agents: Vec<Histories<S, History<S>>>,
    team: Histories<S, JointHistory<S>>,
}

impl<S> Ledger<S>
where
    S: Symbol,
{
    pub fn new(
        alphabets: Vec<Alphabet>,
        horizon: Stage,
        eager_individual: bool,
        eager_joint: bool,
    ) -> Result<Self> {
        let agents = alphabets
            .iter()
            .map(|&alphabet| match eager_individual {
                true => Histories::<S, History<S>>::materialize(
                    alphabet,
                    horizon,
                    History::empty(),
                    |h, i, s| Ok(h.extend(i, s)),
                ),
                false => Histories::<S, History<S>>::arithmetic(alphabet, horizon, History::empty()),
            })
            .collect::<Result<Vec<_>>>()?;
        let joint = Alphabet::joint(&alphabets)?;
        let root = JointHistory::<S>::empty(alphabets.len());
        let team = match eager_joint {
            true => Histories::materialize(joint, horizon, root, |h, i, s| {
                Self::extend(&agents, &alphabets, h, i, s)
            })?,
            false => Histories::arithmetic(joint, horizon, root)?,
        };
        log::info!(
            "{:<24}{:>12} joint {:<6}{:?} individual {}",
            format!("{} histories", S::CATEGORY),
            team.total(),
            if eager_joint { "eager" } else { "lazy" },
            agents.iter().map(|a| a.total()).collect::<Vec<_>>(),
            if eager_individual { "eager" } else { "lazy" },
        );
        Ok(Self {
            alphabets,
            agents,
            team,
        })
    }

    pub fn nr_agents(&self) -> usize {
        self.agents.len()
    }
    pub fn agent(&self, agent: Agent) -> Result<&Histories<S, History<S>>> {
        self.agents.get(agent).ok_or_else(|| {
            MadpError::InvalidIndex(format!(
                "agent {} of {}",
                agent,
                self.agents.len()
            ))
        })
    }
    pub fn team(&self) -> &Histories<S, JointHistory<S>> {
        &self.team
    }
    pub fn is_cached(&self) -> bool {
        self.agents.iter().all(|a| a.is_cached())
    }
    pub fn is_joint_cached(&self) -> bool {
        self.team.is_cached()
    }

    pub fn nr(&self, agent: Agent) -> Result<Index> {
        Ok(self.agent(agent)?.total())
    }
    pub fn nr_at(&self, agent: Agent, stage: Stage) -> Result<Index> {
        self.agent(agent)?.stages().count(stage)
    }
    pub fn first(&self, agent: Agent, stage: Stage) -> Result<Index> {
        self.agent(agent)?.stages().offset(stage)
    }
    pub fn nr_joint(&self) -> Index {
        self.team.total()
    }
    pub fn nr_joint_at(&self, stage: Stage) -> Result<Index> {
        self.team.stages().count(stage)
    }
    pub fn first_joint(&self, stage: Stage) -> Result<Index> {
        self.team.stages().offset(stage)
    }

    pub fn stage(&self, agent: Agent, index: Index) -> Result<Stage> {
        self.agent(agent)?.stage(index)
    }
    pub fn joint_stage(&self, index: Index) -> Result<Stage> {
        self.team.stage(index)
    }
    pub fn successor(&self, agent: Agent, index: Index, symbol: S) -> Result<Index> {
        self.agent(agent)?.successor(index, symbol)
    }
    pub fn joint_successor(&self, index: Index, symbol: S) -> Result<Index> {
        self.team.successor(index, symbol)
    }
    pub fn symbols(&self, agent: Agent, index: Index) -> Result<Vec<S>> {
        self.agent(agent)?.symbols(index)
    }
    pub fn joint_symbols(&self, index: Index) -> Result<Vec<S>> {
        self.team.symbols(index)
    }
    pub fn index(&self, agent: Agent, symbols: &[S]) -> Result<Index> {
        self.agent(agent)?.index(symbols)
    }
    pub fn joint_index(&self, symbols: &[S]) -> Result<Index> {
        self.team.index(symbols)
    }
    pub fn history(&self, agent: Agent, index: Index) -> Result<&History<S>> {
        self.agent(agent)?.record(index)
    }
    pub fn joint_history(&self, index: Index) -> Result<&JointHistory<S>> {
        self.team.record(index)
    }
    pub fn tree(&self, agent: Agent) -> Result<&HistoryTree<History<S>>> {
        Ok(self.agent(agent)?.tree())
    }
    pub fn joint_tree(&self) -> &HistoryTree<JointHistory<S>> {
        self.team.tree()
    }

    /// Per-agent history indices of joint history `index`.
    pub fn joint_to_individual(&self, index: Index) -> Result<Vec<Index>> {
        match self.team.record(index) {
            Ok(record) => Ok(record.individual().to_vec()),
            Err(MadpError::NotCached(_)) => {
                let mut sequences = vec![Vec::new(); self.agents.len()];
                for symbol in self.team.symbols(index)? {
                    for (sequence, part) in sequences.iter_mut().zip(symbol.split(&self.alphabets)?) {
                        sequence.push(part);
                    }
                }
                self.agents
                    .iter()
                    .zip(sequences)
                    .map(|(agent, sequence)| agent.index(&sequence))
                    .collect()
            }
            Err(e) => Err(e),
        }
    }
    /// Like `joint_to_individual`, borrowing the cached vector.
    pub fn joint_to_individual_ref(&self, index: Index) -> Result<&[Index]> {
        self.team.record(index).map(|r| r.individual())
    }
    /// Joint history index of the per-agent histories `individual`, all of stage `stage`.
    pub fn individual_to_joint(&self, stage: Stage, individual: &[Index]) -> Result<Index> {
        if individual.len() != self.agents.len() {
            return Err(MadpError::InvalidIndex(format!(
                "{} history indices for {} agents",
                individual.len(),
                self.agents.len()
            )));
        }
        let sequences = self
            .agents
            .iter()
            .zip(individual)
            .enumerate()
            .map(|(agent, (histories, &index))| {
                let symbols = histories.symbols(index)?;
                match symbols.len() == stage {
                    true => Ok(symbols),
                    false => Err(MadpError::InvalidIndex(format!(
                        "{} history {} of agent {} has stage {}, expected {}",
                        S::CATEGORY,
                        index,
                        agent,
                        symbols.len(),
                        stage
                    ))),
                }
            })
            .collect::<Result<Vec<_>>>()?;
        let joint = (0..stage)
            .map(|t| {
                let parts = sequences.iter().map(|s| s[t]).collect::<Vec<_>>();
                S::join(&parts, &self.alphabets)
            })
            .collect::<Result<Vec<_>>>()?;
        self.team.index(&joint)
    }
    /// Materialize joint history `index` on demand. Idempotent; a lookup when eager.
    pub fn grow_joint(&mut self, index: Index) -> Result<&JointHistory<S>> {
        let agents = &self.agents;
        let alphabets = &self.alphabets;
        self.team
            .grow(index, |h, i, s| Self::extend(agents, alphabets, h, i, s))
    }

    fn extend(
        agents: &[Histories<S, History<S>>],
        alphabets: &[Alphabet],
        history: &JointHistory<S>,
        index: Index,
        symbol: S,
    ) -> Result<JointHistory<S>> {
        let individual = agents
            .iter()
            .zip(history.individual())
            .zip(symbol.split(alphabets)?)
            .map(|((agent, &i), part)| agent.successor(i, part))
            .collect::<Result<Vec<_>>>()?;
        Ok(history.extend(index, symbol, individual))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;
    use crate::ActionObservation;
    use crate::Observation;

    fn alphabets() -> Vec<Alphabet> {
        vec![Alphabet::new(2, 2), Alphabet::new(2, 2)]
    }

    #[test]
    fn joint_observation_counts() {
        let ledger = Ledger::<Observation>::new(alphabets(), 2, true, true).unwrap();
        assert_eq!(ledger.nr(0), Ok(3));
        assert_eq!(ledger.nr_joint(), 5);
        assert_eq!(ledger.nr_joint_at(1), Ok(4));
        assert_eq!(ledger.first_joint(1), Ok(1));
    }

    #[test]
    fn joint_individual_roundtrip_all_modes() {
        for (ei, ej) in [(true, true), (true, false), (false, true), (false, false)] {
            let ledger = Ledger::<ActionObservation>::new(alphabets(), 3, ei, ej).unwrap();
            for index in 0..ledger.nr_joint() {
                let stage = ledger.joint_stage(index).unwrap();
                let individual = ledger.joint_to_individual(index).unwrap();
                assert_eq!(ledger.individual_to_joint(stage, &individual), Ok(index));
            }
        }
    }

    #[test]
    fn joint_to_individual_ref_needs_cache() {
        let ledger = Ledger::<Action>::new(alphabets(), 3, true, false).unwrap();
        assert!(matches!(
            ledger.joint_to_individual_ref(3),
            Err(MadpError::NotCached(_))
        ));
        let ledger = Ledger::<Action>::new(alphabets(), 3, false, true).unwrap();
        // joint action 3 splits into <a1> and <a1>, index 2 for each agent
        assert_eq!(ledger.joint_to_individual_ref(4), Ok(&[2, 2][..]));
    }

    #[test]
    fn individual_to_joint_checks_stage() {
        let ledger = Ledger::<Observation>::new(alphabets(), 3, false, false).unwrap();
        assert!(ledger.individual_to_joint(1, &[1, 3]).is_err());
        assert!(ledger.individual_to_joint(1, &[1]).is_err());
        assert_eq!(ledger.individual_to_joint(1, &[2, 1]), Ok(3));
    }

    #[test]
    fn grow_joint_matches_eager() {
        let eager = Ledger::<ActionObservation>::new(alphabets(), 3, false, true).unwrap();
        let mut lazy = Ledger::<ActionObservation>::new(alphabets(), 3, false, false).unwrap();
        for index in [0, 7, 16, 17, 200, 272] {
            let grown = lazy.grow_joint(index).unwrap().clone();
            assert_eq!(&grown, eager.joint_history(index).unwrap());
        }
        assert_eq!(
            lazy.joint_to_individual_ref(200),
            eager.joint_to_individual_ref(200)
        );
        assert!(lazy.grow_joint(273).is_err());
    }
}
