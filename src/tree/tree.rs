use crate::Index;
use crate::MadpError;
use crate::Result;
use crate::Step;
use crate::Vertex;
use petgraph::Direction::Incoming;
use petgraph::Direction::Outgoing;
use petgraph::stable_graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;

/// A persistent tree of histories.
///
/// Vertices live in a `petgraph` stable arena, so handles stay valid when a
/// subtree is pruned. Edges are labeled with the symbol appended when moving
/// from a history to its successor.
///
/// # Contract
///
/// - `set_index` assigns a flat index once. Assigning the same value again
///   is a no-op, assigning a different one fails.
/// - `set_successor` never overwrites. `replace_successor` is the explicit
///   escape hatch; it logs and drops the old subtree.
/// - Fan-out vertices have neither history nor index, and every query that
///   needs one fails on them.
#[derive(Debug, Clone)]
pub struct HistoryTree<T> {
    graph: StableDiGraph<Vertex<T>, Index>,
    root: NodeIndex,
}

impl<T> HistoryTree<T> {
    /// Start a tree from the empty history.
    pub fn new(root: T) -> Self {
        let mut graph = StableDiGraph::default();
        let root = graph.add_node(Vertex::new(root));
        Self { graph, root }
    }
    pub fn root(&self) -> NodeIndex {
        self.root
    }
    /// Number of vertices, fan-out vertices included.
    pub fn n(&self) -> usize {
        self.graph.node_count()
    }
    pub fn vertex(&self, node: NodeIndex) -> Result<&Vertex<T>> {
        self.graph
            .node_weight(node)
            .ok_or_else(|| MadpError::InvalidIndex(format!("no vertex {}", node.index())))
    }
    pub fn history(&self, node: NodeIndex) -> Result<&T> {
        self.vertex(node)?
            .history()
            .ok_or_else(|| Self::intermediate(node))
    }
    pub fn index(&self, node: NodeIndex) -> Result<Index> {
        match self.vertex(node)? {
            Vertex::Fanout => Err(Self::intermediate(node)),
            Vertex::History { index: None, .. } => Err(MadpError::InvalidIndex(format!(
                "index of vertex {} not set",
                node.index()
            ))),
            Vertex::History {
                index: Some(i), ..
            } => Ok(*i),
        }
    }
    pub fn set_index(&mut self, node: NodeIndex, i: Index) -> Result<()> {
        match self.graph.node_weight_mut(node) {
            None => Err(MadpError::InvalidIndex(format!("no vertex {}", node.index()))),
            Some(Vertex::Fanout) => Err(Self::intermediate(node)),
            Some(Vertex::History { index: Some(j), .. }) if *j != i => {
                Err(MadpError::InvalidIndex(format!(
                    "vertex {} already has index {}, refusing {}",
                    node.index(),
                    j,
                    i
                )))
            }
            Some(Vertex::History { index, .. }) => {
                *index = Some(i);
                Ok(())
            }
        }
    }

    /// Install `history` as the successor of `node` reached by `step`.
    pub fn set_successor(&mut self, node: NodeIndex, step: Step, history: T) -> Result<NodeIndex> {
        if self.vertex(node)?.is_fanout() {
            return Err(Self::intermediate(node));
        }
        match step {
            Step::One(s) => self.link(node, s, Vertex::new(history)),
            Step::Pair(a, o) => {
                let fanout = self.fanout(node, a)?;
                self.link(fanout, o, Vertex::new(history))
            }
        }
    }
    /// Like `set_successor`, but drops whatever subtree `step` led to before.
    pub fn replace_successor(
        &mut self,
        node: NodeIndex,
        step: Step,
        history: T,
    ) -> Result<NodeIndex> {
        if let Ok(old) = self.successor(node, step) {
            log::warn!("replacing successor {} of vertex {}", step, node.index());
            self.prune(old)?;
        }
        self.set_successor(node, step, history)
    }
    pub fn successor(&self, node: NodeIndex, step: Step) -> Result<NodeIndex> {
        if self.vertex(node)?.is_fanout() {
            return Err(Self::intermediate(node));
        }
        let missing = || {
            MadpError::InvalidIndex(format!("vertex {} has no successor {}", node.index(), step))
        };
        match step {
            Step::One(s) => self.child(node, s).ok_or_else(missing),
            Step::Pair(a, o) => self
                .child(node, a)
                .filter(|&x| self.graph[x].is_fanout())
                .and_then(|x| self.child(x, o))
                .ok_or_else(missing),
        }
    }
    /// The successor of `node` reached by `step`, created on first access.
    ///
    /// `grow` receives the history of `node` and returns the successor
    /// history with its flat index. Repeated calls return the same vertex
    /// without calling `grow` again.
    pub fn successor_or_insert_with<F>(
        &mut self,
        node: NodeIndex,
        step: Step,
        grow: F,
    ) -> Result<NodeIndex>
    where
        F: FnOnce(&T) -> Result<(T, Index)>,
    {
        if let Ok(child) = self.successor(node, step) {
            return Ok(child);
        }
        let (history, index) = grow(self.history(node)?)?;
        log::trace!("growing vertex {} by {} into #{}", node.index(), step, index);
        let child = self.set_successor(node, step, history)?;
        self.set_index(child, index)?;
        Ok(child)
    }
    /// The history vertex this one extends, skipping any fan-out vertex.
    pub fn predecessor(&self, node: NodeIndex) -> Result<NodeIndex> {
        if self.vertex(node)?.is_fanout() {
            return Err(Self::intermediate(node));
        }
        let parent = self
            .parent(node)
            .ok_or_else(|| MadpError::InvalidIndex(String::from("root has no predecessor")))?;
        match self.graph[parent] {
            Vertex::History { .. } => Ok(parent),
            Vertex::Fanout => self.parent(parent).ok_or_else(|| {
                MadpError::InvalidIndex(format!("fan-out vertex {} is detached", parent.index()))
            }),
        }
    }
    /// History successors of `node` ordered by step.
    pub fn successors(&self, node: NodeIndex) -> Vec<(Step, NodeIndex)> {
        let mut steps = self
            .graph
            .edges_directed(node, Outgoing)
            .flat_map(|e| match self.graph[e.target()] {
                Vertex::History { .. } => vec![(Step::One(*e.weight()), e.target())],
                Vertex::Fanout => self
                    .graph
                    .edges_directed(e.target(), Outgoing)
                    .map(|o| (Step::Pair(*e.weight(), *o.weight()), o.target()))
                    .collect(),
            })
            .collect::<Vec<_>>();
        steps.sort();
        steps
    }
    /// Drop `node` and its whole subtree. Returns the number of vertices removed.
    pub fn prune(&mut self, node: NodeIndex) -> Result<usize> {
        if node == self.root {
            return Err(MadpError::InvalidIndex(String::from("cannot prune the root")));
        }
        self.vertex(node)?;
        let parent = self.parent(node);
        let mut stack = vec![node];
        let mut doomed = Vec::new();
        while let Some(x) = stack.pop() {
            stack.extend(self.graph.neighbors_directed(x, Outgoing));
            doomed.push(x);
        }
        let n = doomed.len();
        for x in doomed {
            self.graph.remove_node(x);
        }
        // an emptied fan-out vertex goes too
        if let Some(fanout) = parent.filter(|&p| self.graph[p].is_fanout()) {
            if self.graph.neighbors_directed(fanout, Outgoing).next().is_none() {
                self.graph.remove_node(fanout);
            }
        }
        Ok(n)
    }

    fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.graph.neighbors_directed(node, Incoming).next()
    }
    fn child(&self, node: NodeIndex, symbol: Index) -> Option<NodeIndex> {
        self.graph
            .edges_directed(node, Outgoing)
            .find(|e| *e.weight() == symbol)
            .map(|e| e.target())
    }
    fn link(&mut self, node: NodeIndex, symbol: Index, vertex: Vertex<T>) -> Result<NodeIndex> {
        match self.child(node, symbol) {
            Some(_) => Err(MadpError::InvalidIndex(format!(
                "vertex {} already has successor {}",
                node.index(),
                symbol
            ))),
            None => {
                let child = self.graph.add_node(vertex);
                self.graph.add_edge(node, child, symbol);
                Ok(child)
            }
        }
    }
    fn fanout(&mut self, node: NodeIndex, action: Index) -> Result<NodeIndex> {
        match self.child(node, action) {
            Some(x) if self.graph[x].is_fanout() => Ok(x),
            Some(_) => Err(MadpError::InvalidIndex(format!(
                "successor {} of vertex {} is not an action fan-out",
                action,
                node.index()
            ))),
            None => self.link(node, action, Vertex::Fanout),
        }
    }
    fn intermediate(node: NodeIndex) -> MadpError {
        MadpError::InvalidIndex(format!(
            "vertex {} is an intermediate action vertex",
            node.index()
        ))
    }
}

impl<T> HistoryTree<T>
where
    T: std::fmt::Display,
{
    /// display the Tree in a human-readable format
    /// be careful because it's exponential in the horizon
    fn show(&self, f: &mut std::fmt::Formatter, x: NodeIndex, prefix: &str) -> std::fmt::Result {
        let children = self.successors(x);
        let n = children.len();
        for (i, (step, child)) in children.into_iter().enumerate() {
            let last = i == n - 1;
            let gaps = if last { "    " } else { "│   " };
            let stem = if last { "└" } else { "├" };
            let index = self.graph[child].index().map(|i| i.to_string());
            let history = self.graph[child].history().map(|h| h.to_string());
            writeln!(
                f,
                "{}{}──{} → #{} {}",
                prefix,
                stem,
                step,
                index.unwrap_or_default(),
                history.unwrap_or_default()
            )?;
            self.show(f, child, &format!("{}{}", prefix, gaps))?;
        }
        Ok(())
    }
}

impl<T> std::fmt::Display for HistoryTree<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let root = &self.graph[self.root];
        writeln!(
            f,
            "ROOT   #{} {}",
            root.index().map(|i| i.to_string()).unwrap_or_default(),
            root.history().map(|h| h.to_string()).unwrap_or_default()
        )?;
        self.show(f, self.root, "")
    }
}
