use crate::Alphabet;
use crate::Catalog;
use crate::Checked;
use crate::HistoryTree;
use crate::Index;
use crate::MadpError;
use crate::Record;
use crate::Result;
use crate::Stage;
use crate::Stages;
use crate::Symbol;
use crate::checked_digit;
use crate::decode;
use crate::encode;
use crate::series;
use std::collections::VecDeque;
use std::marker::PhantomData;

/// Every history of one category for one agent, or for the team.
///
/// Eager histories are materialized breadth-first into a [`Catalog`] and
/// answer queries from the tree. Lazy histories answer the same queries
/// with offset-plus-encoding arithmetic. Both number histories the same:
/// `offset[t] + encode(symbols, base)`, oldest symbol most significant.
#[derive(Debug, Clone)]
pub struct Histories<S, T> {
    alphabet: Alphabet,
    base: Index,
    stages: Stages,
    catalog: Catalog<T>,
    eager: bool,
    danny: PhantomData<S>,
}

impl<S, T> Histories<S, T>
where
    S: Symbol,
    T: Record<S>,
{
    /// Build every history of length `< horizon` breadth-first.
    ///
    /// `extend(parent, parent_index, symbol)` makes the record of a
    /// successor. The breadth-first tally must agree with the closed-form
    /// counts, otherwise construction fails.
    pub fn materialize<F>(alphabet: Alphabet, horizon: Stage, root: T, mut extend: F) -> Result<Self>
    where
        F: FnMut(&T, Index, S) -> Result<T>,
    {
        let base = S::base(&alphabet)?;
        let expected = Stages::lazy(base, horizon)?;
        let mut tree = HistoryTree::new(root);
        let mut nodes = Vec::new();
        let mut stages = Stages::default();
        let mut queue = VecDeque::from([tree.root()]);
        while let Some(node) = queue.pop_front() {
            let index = nodes.len() as Index;
            tree.set_index(node, index)?;
            nodes.push(node);
            let length = tree.history(node)?.length();
            stages.record(length, index);
            if length + 1 < horizon {
                for digit in 0..base {
                    let symbol = S::from_digit(digit, &alphabet);
                    let child = extend(tree.history(node)?, index, symbol)?;
                    queue.push_back(tree.set_successor(node, symbol.step(), child)?);
                }
            }
        }
        stages.close(nodes.len() as Index);
        if stages != expected || nodes.len() as Index != series(base, horizon)? {
            log::warn!(
                "{} histories tallied {:?}, expected {:?}",
                S::CATEGORY,
                stages.counts(),
                expected.counts()
            );
            return Err(MadpError::Consistency(format!(
                "{} histories: breadth-first tally differs from closed form",
                S::CATEGORY
            )));
        }
        Ok(Self {
            alphabet,
            base,
            stages,
            catalog: Catalog::dense(tree, nodes),
            eager: true,
            danny: PhantomData,
        })
    }

    /// Describe every history of length `< horizon` by counts and offsets only.
    pub fn arithmetic(alphabet: Alphabet, horizon: Stage, root: T) -> Result<Self> {
        let base = S::base(&alphabet)?;
        Ok(Self {
            alphabet,
            base,
            stages: Stages::lazy(base, horizon)?,
            catalog: Catalog::sparse(root)?,
            eager: false,
            danny: PhantomData,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
    /// Number of distinct symbols per stage.
    pub fn base(&self) -> Index {
        self.base
    }
    pub fn stages(&self) -> &Stages {
        &self.stages
    }
    pub fn is_cached(&self) -> bool {
        self.eager
    }
    pub fn total(&self) -> Index {
        self.stages.total()
    }
    pub fn tree(&self) -> &HistoryTree<T> {
        self.catalog.tree()
    }
    /// Records held in memory: all of them when eager, those grown so far otherwise.
    pub fn held(&self) -> usize {
        self.catalog.len()
    }

    /// The materialized record of history `index`.
    pub fn record(&self, index: Index) -> Result<&T> {
        match self.catalog.get(index) {
            Some(record) => Ok(record),
            None if self.eager || index >= self.total() => Err(MadpError::InvalidIndex(format!(
                "no {} history {} among {}",
                S::CATEGORY,
                index,
                self.total()
            ))),
            None => Err(MadpError::NotCached(format!(
                "{} history {} is not materialized",
                S::CATEGORY,
                index
            ))),
        }
    }

    pub fn stage(&self, index: Index) -> Result<Stage> {
        match self.eager {
            true => self.record(index).map(|r| r.length()),
            false => self.stages.stage(index),
        }
    }

    /// Index of the history reached by appending `symbol` to history `index`.
    pub fn successor(&self, index: Index, symbol: S) -> Result<Index> {
        let digit = checked_digit(&symbol, &self.alphabet)?;
        let stage = self.stage(index)?;
        if stage + 1 >= self.stages.horizon() {
            return Err(MadpError::InvalidIndex(format!(
                "{} history {} is at the last stage {}",
                S::CATEGORY,
                index,
                stage
            )));
        }
        match self.eager {
            true => {
                let tree = self.catalog.tree();
                let node = self.node(index)?;
                tree.index(tree.successor(node, symbol.step())?)
            }
            false => self.arithmetic_successor(index, stage, digit),
        }
    }

    /// Symbols of history `index`, oldest first.
    pub fn symbols(&self, index: Index) -> Result<Vec<S>> {
        match self.eager {
            true => {
                let mut symbols = Vec::new();
                let mut record = self.record(index)?;
                while let (Some(symbol), Some(predecessor)) = (record.last(), record.predecessor()) {
                    symbols.push(symbol);
                    record = self.record(predecessor)?;
                }
                symbols.reverse();
                Ok(symbols)
            }
            false => self.symbols_arithmetic(index),
        }
    }

    /// Index of the history made of `symbols`, oldest first.
    pub fn index(&self, symbols: &[S]) -> Result<Index> {
        let digits = symbols
            .iter()
            .map(|s| checked_digit(s, &self.alphabet))
            .collect::<Result<Vec<_>>>()?;
        match self.eager {
            true => {
                let tree = self.catalog.tree();
                let mut node = tree.root();
                for symbol in symbols {
                    node = tree.successor(node, symbol.step())?;
                }
                tree.index(node)
            }
            false => self.stages.offset(symbols.len())?.plus(encode(&digits, self.base)?),
        }
    }

    /// Materialize the path to history `index`, creating missing records
    /// with `extend` and numbering them arithmetically. Idempotent.
    pub fn grow<F>(&mut self, index: Index, mut extend: F) -> Result<&T>
    where
        F: FnMut(&T, Index, S) -> Result<T>,
    {
        if self.catalog.get(index).is_some() {
            return self.record(index);
        }
        let symbols = self.symbols_arithmetic(index)?;
        let mut node = self.catalog.tree().root();
        let mut current = 0 as Index;
        for (stage, symbol) in symbols.into_iter().enumerate() {
            let digit = symbol.digit(&self.alphabet);
            let next = self.arithmetic_successor(current, stage, digit)?;
            let parent = current;
            node = self.catalog.tree_mut().successor_or_insert_with(node, symbol.step(), |h| {
                Ok((extend(h, parent, symbol)?, next))
            })?;
            self.catalog.register(next, node);
            current = next;
        }
        self.record(index)
    }

    fn node(&self, index: Index) -> Result<petgraph::stable_graph::NodeIndex> {
        self.catalog.node(index).ok_or_else(|| {
            MadpError::InvalidIndex(format!("no {} history {}", S::CATEGORY, index))
        })
    }
    fn arithmetic_successor(&self, index: Index, stage: Stage, digit: Index) -> Result<Index> {
        let here = self.stages.offset(stage)?;
        let next = self.stages.offset(stage + 1)?;
        (index - here).times(self.base)?.plus(digit)?.plus(next)
    }
    fn symbols_arithmetic(&self, index: Index) -> Result<Vec<S>> {
        let stage = self.stages.stage(index)?;
        let offset = self.stages.offset(stage)?;
        Ok(decode(index - offset, stage, self.base)?
            .into_iter()
            .map(|digit| S::from_digit(digit, &self.alphabet))
            .collect())
    }
}
