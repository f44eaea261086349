use crate::Index;

/// One vertex of a [`crate::HistoryTree`].
#[derive(Debug, Clone, PartialEq)]
pub enum Vertex<T> {
    /// Holds a history and, once assigned, its flat index.
    History { index: Option<Index>, history: T },
    /// Intermediate action-successor vertex. Carries no history and no index.
    Fanout,
}

impl<T> Vertex<T> {
    pub fn new(history: T) -> Self {
        Self::History {
            index: None,
            history,
        }
    }
    pub fn is_fanout(&self) -> bool {
        matches!(self, Self::Fanout)
    }
    pub fn history(&self) -> Option<&T> {
        match self {
            Self::History { history, .. } => Some(history),
            Self::Fanout => None,
        }
    }
    pub fn index(&self) -> Option<Index> {
        match self {
            Self::History { index, .. } => *index,
            Self::Fanout => None,
        }
    }
}
