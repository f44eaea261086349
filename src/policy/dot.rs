use petgraph::dot::Config;
use petgraph::dot::Dot;
use petgraph::graph::DiGraph;

/// Render a policy graph for `agent` in GraphViz syntax.
///
/// Vertices are labeled with the action taken, edges with the observation
/// that leads from one history to the next. Edges are undirected in the
/// drawing since the layout already reads top-down.
pub fn dot_graph(agent: usize, graph: &DiGraph<String, String>, labels: bool) -> String {
    let config = match labels {
        true => vec![Config::GraphContentOnly],
        false => vec![Config::GraphContentOnly, Config::EdgeNoLabel],
    };
    format!(
        "digraph policyAgent{} {{\n    edge [dir=none];\n{}}}\n",
        agent,
        Dot::with_config(graph, &config)
    )
}
