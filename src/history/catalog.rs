use crate::HistoryTree;
use crate::Index;
use crate::Result;
use petgraph::stable_graph::NodeIndex;
use std::collections::BTreeMap;

/// A history tree plus the flat-index lookup into it.
///
/// Fully materialized catalogs number their vertices densely, so the lookup
/// is a vector. Catalogs grown on demand only hold the paths asked for, so
/// the lookup is a map.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    tree: HistoryTree<T>,
    nodes: Lookup,
}

#[derive(Debug, Clone)]
enum Lookup {
    Dense(Vec<NodeIndex>),
    Sparse(BTreeMap<Index, NodeIndex>),
}

impl<T> Catalog<T> {
    /// A catalog holding only the empty history, at index 0.
    pub fn sparse(root: T) -> Result<Self> {
        let mut tree = HistoryTree::new(root);
        let root = tree.root();
        tree.set_index(root, 0)?;
        Ok(Self {
            tree,
            nodes: Lookup::Sparse(BTreeMap::from([(0, root)])),
        })
    }
    /// A catalog whose `nodes[i]` holds history `i`.
    pub fn dense(tree: HistoryTree<T>, nodes: Vec<NodeIndex>) -> Self {
        Self {
            tree,
            nodes: Lookup::Dense(nodes),
        }
    }
    pub fn tree(&self) -> &HistoryTree<T> {
        &self.tree
    }
    pub fn tree_mut(&mut self) -> &mut HistoryTree<T> {
        &mut self.tree
    }
    /// Number of histories held.
    pub fn len(&self) -> usize {
        match &self.nodes {
            Lookup::Dense(v) => v.len(),
            Lookup::Sparse(m) => m.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn node(&self, index: Index) -> Option<NodeIndex> {
        match &self.nodes {
            Lookup::Dense(v) => usize::try_from(index).ok().and_then(|i| v.get(i)).copied(),
            Lookup::Sparse(m) => m.get(&index).copied(),
        }
    }
    pub fn get(&self, index: Index) -> Option<&T> {
        self.node(index).and_then(|n| self.tree.history(n).ok())
    }
    /// Remember that history `index` lives at `node`.
    pub fn register(&mut self, index: Index, node: NodeIndex) {
        match &mut self.nodes {
            Lookup::Sparse(m) => {
                m.insert(index, node);
            }
            Lookup::Dense(v) => debug_assert!(v.get(index as usize) == Some(&node)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_catalog_holds_the_root() {
        let catalog = Catalog::sparse("empty").unwrap();
        let root = catalog.node(0).unwrap();
        assert_eq!(root, catalog.tree().root());
        assert_eq!(catalog.tree().index(root), Ok(0));
        assert_eq!(catalog.get(0), Some(&"empty"));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.node(1).is_none());
    }
}
