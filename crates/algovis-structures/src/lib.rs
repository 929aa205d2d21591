//! Data structures for the algovis visualizer.
//!
//! Pure, synchronous model types: the containers (stack, queue), the binary
//! search tree, and the labeled graph the animated engine operates on.
//! Nothing here knows about timing or rendering - layout is computed on
//! demand from the authoritative structures and never stored in them.

mod container;
mod error;
mod graph;
mod layout;
mod tree;

pub use container::{Item, ItemId, Queue, Stack};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, GraphNode, NodeId};
pub use layout::{layout_tree, PlacedNode, ROW_HEIGHT};
pub use tree::{BinarySearchTree, Node};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_and_queue_disagree_on_removal_order() {
        let mut stack = Stack::new();
        let mut queue = Queue::new();
        for v in [1, 2, 3] {
            stack.push(v);
            queue.enqueue(v);
        }

        assert_eq!(stack.pop().unwrap().value, 3);
        assert_eq!(queue.dequeue().unwrap().value, 1);
    }

    #[test]
    fn layout_covers_every_tree_node() {
        let tree = BinarySearchTree::from_values(&[50, 30, 70, 20, 40]);
        let placed = layout_tree(&tree, 400.0, 50.0, 100.0);

        assert_eq!(placed.len(), tree.len());
        let mut values: Vec<i64> = placed.iter().map(|p| p.value).collect();
        values.sort_unstable();
        assert_eq!(values, tree.inorder());
    }

    #[test]
    fn sample_graph_matches_demo_shape() {
        let graph = Graph::sample();
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 7);

        let from_a: Vec<NodeId> = graph.neighbors(NodeId(0)).collect();
        assert_eq!(from_a, vec![NodeId(1), NodeId(3)]);
    }
}
