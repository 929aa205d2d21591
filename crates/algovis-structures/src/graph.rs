//! Directed graph with fixed layout coordinates.

/// Identifier of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

/// A labeled node with canvas coordinates.
///
/// Coordinates are input data supplied alongside the node set; the engine
/// never moves nodes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphNode {
    /// Identifier, unique within the graph
    pub id: NodeId,
    /// Display label
    pub label: String,
    /// Horizontal canvas position
    pub x: f64,
    /// Vertical canvas position
    pub y: f64,
}

/// A directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Source node
    pub from: NodeId,
    /// Target node
    pub to: NodeId,
}

/// Fixed node and edge sets.
///
/// Adjacency is derived on demand by filtering the edge list in its supplied
/// order, so discovery order in a traversal is the edge insertion order.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Create a graph from explicit node and edge lists.
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// The six-node demo graph (A through F) with its canonical edge list.
    pub fn sample() -> Self {
        let labels = ["A", "B", "C", "D", "E", "F"];
        let positions = [
            (200.0, 100.0),
            (350.0, 100.0),
            (500.0, 100.0),
            (200.0, 250.0),
            (350.0, 250.0),
            (500.0, 250.0),
        ];
        let nodes = labels
            .iter()
            .zip(positions)
            .enumerate()
            .map(|(i, (label, (x, y)))| GraphNode {
                id: NodeId(i),
                label: (*label).to_string(),
                x,
                y,
            })
            .collect();

        let edge = |from, to| Edge {
            from: NodeId(from),
            to: NodeId(to),
        };
        let edges = vec![
            edge(0, 1),
            edge(0, 3),
            edge(1, 2),
            edge(1, 4),
            edge(3, 4),
            edge(4, 5),
            edge(2, 5),
        ];

        Self::new(nodes, edges)
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Whether the graph holds a node with this id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Outgoing neighbors of `id`, in edge-list order.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().filter(move |e| e.from == id).map(|e| e.to)
    }

    /// Move a node to new canvas coordinates. Returns `false` for an
    /// unknown id.
    pub fn set_position(&mut self, id: NodeId, x: f64, y: f64) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                node.x = x;
                node.y = y;
                true
            }
            None => false,
        }
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_follow_edge_list_order() {
        let graph = Graph::sample();

        let from_b: Vec<NodeId> = graph.neighbors(NodeId(1)).collect();
        assert_eq!(from_b, vec![NodeId(2), NodeId(4)]);

        // E has no edge back to D; direction matters
        let from_e: Vec<NodeId> = graph.neighbors(NodeId(4)).collect();
        assert_eq!(from_e, vec![NodeId(5)]);
    }

    #[test]
    fn lookup_and_membership() {
        let graph = Graph::sample();
        assert_eq!(graph.node(NodeId(2)).unwrap().label, "C");
        assert!(graph.contains(NodeId(5)));
        assert!(!graph.contains(NodeId(6)));
    }

    #[test]
    fn set_position_moves_known_nodes_only() {
        let mut graph = Graph::sample();
        assert!(graph.set_position(NodeId(0), 10.0, 20.0));
        let node = graph.node(NodeId(0)).unwrap();
        assert_eq!((node.x, node.y), (10.0, 20.0));

        assert!(!graph.set_position(NodeId(42), 0.0, 0.0));
    }
}
