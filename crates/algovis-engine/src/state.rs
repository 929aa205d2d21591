//! Externally observable run state.

use std::collections::HashSet;

use algovis_structures::NodeId;
use serde::{Deserialize, Serialize};

/// Presentation color of one array bar, re-derived every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderColor {
    /// Not involved in the current step
    Neutral,
    /// Member of the pair or cell under comparison
    Comparing,
    /// Just swapped
    Swapping,
    /// Settled in its final position
    Sorted,
    /// Current quicksort pivot
    Pivot,
}

/// One element of the sortable array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// The value being sorted
    pub value: i64,
    /// Presentation state for this step
    pub color: RenderColor,
}

impl Bar {
    /// A neutral bar holding `value`.
    pub fn new(value: i64) -> Self {
        Self {
            value,
            color: RenderColor::Neutral,
        }
    }
}

/// Snapshot of everything a renderer draws between two steps.
///
/// The engine replaces whole collections on every mutation, so a clone
/// taken at any step boundary is self-consistent - observers never see a
/// torn update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualState {
    /// Sortable array contents
    pub bars: Vec<Bar>,
    /// Visited graph nodes
    pub visited: HashSet<NodeId>,
    /// Node a graph traversal is standing on
    pub current: Option<NodeId>,
    /// Highlighted tree value, at most one at a time
    pub highlighted: Option<i64>,
}

impl VisualState {
    /// Bar values in array order.
    pub fn values(&self) -> Vec<i64> {
        self.bars.iter().map(|bar| bar.value).collect()
    }
}

/// Lifecycle of the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// No run has started yet, or the engine was reset
    Idle,
    /// A run is advancing
    Running,
    /// The last run finished every step
    Completed,
    /// The last run observed cancellation and stopped early
    Cancelled,
}

impl RunStatus {
    /// Whether a run in this state can still emit steps.
    pub fn is_active(&self) -> bool {
        matches!(self, RunStatus::Running)
    }
}

/// Per-step payload delivered to subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepUpdate {
    /// Self-consistent snapshot after the step's mutation
    pub snapshot: VisualState,
    /// Newest journal line as of this step
    pub log_line: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_update_round_trips_through_json() {
        let update = StepUpdate {
            snapshot: VisualState {
                bars: vec![Bar::new(5), Bar { value: 3, color: RenderColor::Comparing }],
                visited: [NodeId(0), NodeId(1)].into_iter().collect(),
                current: Some(NodeId(1)),
                highlighted: None,
            },
            log_line: "[00:00:00] Visiting node B".to_string(),
        };

        let json = serde_json::to_string(&update).unwrap();
        let parsed: StepUpdate = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.snapshot.values(), vec![5, 3]);
        assert_eq!(parsed.snapshot.current, Some(NodeId(1)));
        assert_eq!(parsed.log_line, update.log_line);
    }

    #[test]
    fn only_running_counts_as_active() {
        assert!(RunStatus::Running.is_active());
        assert!(!RunStatus::Idle.is_active());
        assert!(!RunStatus::Completed.is_active());
        assert!(!RunStatus::Cancelled.is_active());
    }
}
