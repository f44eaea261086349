use crate::Index;
use crate::Stage;
use crate::Symbol;

/// One history: the history it extends plus the symbol it appends.
///
/// The empty history has neither, and its length is zero. Every other
/// history knows the flat index of its predecessor, so whole sequences are
/// recovered by walking back, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<S> {
    predecessor: Option<Index>,
    last: Option<S>,
    length: Stage,
}

impl<S> History<S>
where
    S: Symbol,
{
    pub fn empty() -> Self {
        Self {
            predecessor: None,
            last: None,
            length: 0,
        }
    }
    /// The history reached by appending `symbol` to this one, which has
    /// flat index `index`.
    pub fn extend(&self, index: Index, symbol: S) -> Self {
        Self {
            predecessor: Some(index),
            last: Some(symbol),
            length: self.length + 1,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }
    pub fn length(&self) -> Stage {
        self.length
    }
    pub fn last(&self) -> Option<S> {
        self.last
    }
    pub fn predecessor(&self) -> Option<Index> {
        self.predecessor
    }
}

impl<S> std::fmt::Display for History<S>
where
    S: Symbol,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.last, self.predecessor) {
            (Some(s), Some(p)) => write!(f, "#{} + {}", p, s),
            _ => write!(f, "<EMPTY>"),
        }
    }
}

/// A joint history, caching the flat index of every agent's own history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JointHistory<S> {
    history: History<S>,
    individual: Vec<Index>,
}

impl<S> JointHistory<S>
where
    S: Symbol,
{
    /// The empty joint history of `agents` agents.
    pub fn empty(agents: usize) -> Self {
        Self {
            history: History::empty(),
            individual: vec![0; agents],
        }
    }
    /// Append `symbol`; `individual` are the agents' successor indices.
    pub fn extend(&self, index: Index, symbol: S, individual: Vec<Index>) -> Self {
        Self {
            history: self.history.extend(index, symbol),
            individual,
        }
    }
    pub fn history(&self) -> &History<S> {
        &self.history
    }
    pub fn individual(&self) -> &[Index] {
        &self.individual
    }
    pub fn length(&self) -> Stage {
        self.history.length()
    }
    pub fn last(&self) -> Option<S> {
        self.history.last()
    }
    pub fn predecessor(&self) -> Option<Index> {
        self.history.predecessor()
    }
}

impl<S> std::fmt::Display for JointHistory<S>
where
    S: Symbol,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.history, self.individual)
    }
}

/// Read access shared by individual and joint records.
pub trait Record<S> {
    fn length(&self) -> Stage;
    fn predecessor(&self) -> Option<Index>;
    fn last(&self) -> Option<S>;
}

impl<S: Symbol> Record<S> for History<S> {
    fn length(&self) -> Stage {
        self.length
    }
    fn predecessor(&self) -> Option<Index> {
        self.predecessor
    }
    fn last(&self) -> Option<S> {
        self.last
    }
}

impl<S: Symbol> Record<S> for JointHistory<S> {
    fn length(&self) -> Stage {
        self.history.length
    }
    fn predecessor(&self) -> Option<Index> {
        self.history.predecessor
    }
    fn last(&self) -> Option<S> {
        self.history.last
    }
}
