//! The algorithm runner: one in-flight run, superseded on restart.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use algovis_structures::{BinarySearchTree, Graph, NodeId};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::algorithms;
use crate::clock::{CancelToken, StepClock, WaitOutcome};
use crate::error::{Error, Result};
use crate::journal::LogSink;
use crate::state::{RunStatus, StepUpdate, VisualState};

/// Smallest accepted per-step delay, in milliseconds.
pub const MIN_SPEED_MS: u64 = 10;

/// Largest accepted per-step delay, in milliseconds.
pub const MAX_SPEED_MS: u64 = 2000;

/// Buffered step updates per subscriber before the oldest are dropped.
const STEP_CHANNEL_CAPACITY: usize = 1024;

/// Tuning for one run.
#[derive(Debug, Clone, Copy)]
pub struct RunParams {
    speed: Duration,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            speed: Duration::from_millis(100),
        }
    }
}

impl RunParams {
    /// Set the per-step delay, clamped to the supported range.
    #[must_use]
    pub fn with_speed_ms(mut self, ms: u64) -> Self {
        self.speed = Duration::from_millis(ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS));
        self
    }

    /// The primary per-step delay.
    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// The shorter delay used after secondary actions (e.g. BFS enqueues).
    pub fn half_speed(&self) -> Duration {
        self.speed / 2
    }
}

/// Visit order for a binary tree traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalOrder {
    /// Self, left, right
    Preorder,
    /// Left, self, right
    Inorder,
    /// Left, right, self
    Postorder,
}

impl TraversalOrder {
    /// Uppercase name used in journal lines.
    pub fn label(&self) -> &'static str {
        match self {
            TraversalOrder::Preorder => "PREORDER",
            TraversalOrder::Inorder => "INORDER",
            TraversalOrder::Postorder => "POSTORDER",
        }
    }
}

/// An algorithm plus the input it runs over.
#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Breadth-first traversal of a graph from a start node
    Bfs {
        /// The graph to walk
        graph: Graph,
        /// Seed of the frontier
        start: NodeId,
    },
    /// Recursive binary-tree traversal
    TreeTraversal {
        /// The tree to walk; read-only for the whole run
        tree: BinarySearchTree,
        /// Visit order
        order: TraversalOrder,
    },
    /// Adjacent-pair bubble sort
    BubbleSort {
        /// Values to sort
        values: Vec<i64>,
    },
    /// Lomuto-partition quicksort
    Quicksort {
        /// Values to sort
        values: Vec<i64>,
    },
}

impl Algorithm {
    /// Short name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs { .. } => "bfs",
            Algorithm::TreeTraversal { .. } => "tree-traversal",
            Algorithm::BubbleSort { .. } => "bubble-sort",
            Algorithm::Quicksort { .. } => "quicksort",
        }
    }

    /// Reject malformed input before any state is touched.
    fn validate(&self) -> Result<()> {
        match self {
            Algorithm::Bfs { graph, start } => {
                if graph.node_count() == 0 {
                    return Err(Error::InvalidInput("graph has no nodes".to_string()));
                }
                if !graph.contains(*start) {
                    return Err(Error::InvalidInput(format!(
                        "start node {} is not in the graph",
                        start.0
                    )));
                }
                Ok(())
            }
            Algorithm::TreeTraversal { tree, .. } => {
                if tree.is_empty() {
                    return Err(Error::InvalidInput("tree is empty".to_string()));
                }
                Ok(())
            }
            Algorithm::BubbleSort { values } | Algorithm::Quicksort { values } => {
                if values.is_empty() {
                    return Err(Error::InvalidInput("array is empty".to_string()));
                }
                Ok(())
            }
        }
    }
}

/// Identifier of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(u64);

/// Handle to a started run, used to request cooperative cancellation.
#[derive(Debug, Clone)]
pub struct RunHandle {
    id: RunId,
    token: CancelToken,
}

impl RunHandle {
    /// The run this handle controls.
    pub fn id(&self) -> RunId {
        self.id
    }
}

/// State shared between the runner, the run task and observers.
struct Shared {
    state: Mutex<VisualState>,
    journal: LogSink,
    status: watch::Sender<RunStatus>,
    owner: Mutex<Option<RunId>>,
    step_tx: broadcast::Sender<StepUpdate>,
}

/// Marker for a run that observed cancellation at a wait boundary.
pub(crate) struct Interrupted;

/// Outcome of one driver step; `Err` abandons the run where it stands.
pub(crate) type StepResult = std::result::Result<(), Interrupted>;

/// Everything a driver needs to advance: shared state, journal, clock.
pub(crate) struct StepCtx {
    shared: Arc<Shared>,
    clock: StepClock,
    params: RunParams,
}

impl StepCtx {
    /// Wait the primary delay; abandon the run if cancellation lands
    /// first.
    pub(crate) async fn pause(&self) -> StepResult {
        self.pause_for(self.params.speed()).await
    }

    /// Wait the shorter secondary delay.
    pub(crate) async fn pause_half(&self) -> StepResult {
        self.pause_for(self.params.half_speed()).await
    }

    async fn pause_for(&self, duration: Duration) -> StepResult {
        match self.clock.wait(duration).await {
            WaitOutcome::Completed => Ok(()),
            WaitOutcome::Cancelled => Err(Interrupted),
        }
    }

    /// Apply a whole-collection mutation, journal a line, publish both.
    pub(crate) fn step(&self, message: &str, mutate: impl FnOnce(&mut VisualState)) {
        let snapshot = self.mutate(mutate);
        let log_line = self.shared.journal.append(message);
        let _ = self.shared.step_tx.send(StepUpdate { snapshot, log_line });
    }

    /// Apply a pure visual mutation; the newest journal line rides along.
    pub(crate) fn touch(&self, mutate: impl FnOnce(&mut VisualState)) {
        let snapshot = self.mutate(mutate);
        let log_line = self.shared.journal.newest().unwrap_or_default();
        let _ = self.shared.step_tx.send(StepUpdate { snapshot, log_line });
    }

    /// Journal a line without touching the visual state.
    pub(crate) fn note(&self, message: &str) {
        let snapshot = self.shared.state.lock().unwrap().clone();
        let log_line = self.shared.journal.append(message);
        let _ = self.shared.step_tx.send(StepUpdate { snapshot, log_line });
    }

    fn mutate(&self, mutate: impl FnOnce(&mut VisualState)) -> VisualState {
        let mut state = self.shared.state.lock().unwrap();
        mutate(&mut state);
        state.clone()
    }
}

/// Owns the one in-flight run and the observable state it mutates.
///
/// Starting a new run supersedes the previous one: the old run's token is
/// cancelled and the new run's task waits for the old task to unwind
/// before touching shared state, so observers never see writes from two
/// runs interleaved.
pub struct Runner {
    shared: Arc<Shared>,
    active: Mutex<Option<ActiveRun>>,
    next_run_id: AtomicU64,
}

struct ActiveRun {
    token: CancelToken,
    task: JoinHandle<()>,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    /// Create an idle runner with empty state and journal.
    pub fn new() -> Self {
        let (step_tx, _) = broadcast::channel(STEP_CHANNEL_CAPACITY);
        let (status, _) = watch::channel(RunStatus::Idle);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(VisualState::default()),
                journal: LogSink::new(),
                status,
                owner: Mutex::new(None),
                step_tx,
            }),
            active: Mutex::new(None),
            next_run_id: AtomicU64::new(0),
        }
    }

    /// Subscribe to per-step updates.
    pub fn subscribe(&self) -> broadcast::Receiver<StepUpdate> {
        self.shared.step_tx.subscribe()
    }

    /// Current lifecycle state.
    pub fn status(&self) -> RunStatus {
        *self.shared.status.borrow()
    }

    /// Clone of the current visual state.
    pub fn visual_state(&self) -> VisualState {
        self.shared.state.lock().unwrap().clone()
    }

    /// Journal entries, most recent first.
    pub fn journal(&self) -> Vec<String> {
        self.shared.journal.snapshot()
    }

    /// Begin a run. Returns immediately; steps land on subscribers.
    ///
    /// Malformed input fails with [`Error::InvalidInput`] before any
    /// visual state is touched (the rejection is journaled for the user).
    /// A run already in flight is cancelled and fully unwound before the
    /// new one mutates anything.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self, algorithm: Algorithm, params: RunParams) -> Result<RunHandle> {
        if let Err(err) = algorithm.validate() {
            let snapshot = self.shared.state.lock().unwrap().clone();
            let log_line = self.shared.journal.append(&format!("ERROR: {err}"));
            let _ = self.shared.step_tx.send(StepUpdate { snapshot, log_line });
            return Err(err);
        }

        let id = RunId(self.next_run_id.fetch_add(1, Ordering::Relaxed));
        let token = CancelToken::new();
        let handle = RunHandle {
            id,
            token: token.clone(),
        };

        let mut active = self.active.lock().unwrap();
        let prior = active.take();
        if let Some(prior) = &prior {
            prior.token.cancel();
            debug!(run = id.0, "superseding active run");
        }

        *self.shared.owner.lock().unwrap() = Some(id);
        let _ = self.shared.status.send_replace(RunStatus::Running);
        info!(run = id.0, algorithm = algorithm.name(), "run started");

        let shared = Arc::clone(&self.shared);
        let run_token = token.clone();
        let task = tokio::spawn(async move {
            if let Some(prior) = prior {
                // The superseded run observes its token at the next wait
                // boundary; nothing below runs until it has fully unwound.
                let _ = prior.task.await;
            }
            drive(shared, id, run_token, algorithm, params).await;
        });

        *active = Some(ActiveRun { token, task });
        Ok(handle)
    }

    /// Request cooperative cancellation of the given run. No-op if that
    /// run already terminated or was superseded.
    pub fn cancel(&self, handle: &RunHandle) {
        debug!(run = handle.id.0, "cancellation requested");
        handle.token.cancel();
    }

    /// Cancel any active run, wait for it to unwind, and clear all
    /// observable state back to initial.
    pub async fn reset(&self) {
        let prior = self.active.lock().unwrap().take();
        if let Some(prior) = prior {
            prior.token.cancel();
            let _ = prior.task.await;
        }

        *self.shared.owner.lock().unwrap() = None;
        *self.shared.state.lock().unwrap() = VisualState::default();
        self.shared.journal.clear();
        self.shared.journal.append("Visualizer reset. Ready for new operations.");
        let _ = self.shared.status.send_replace(RunStatus::Idle);
        info!("engine reset");
    }

    /// Wait until no run is advancing, returning the settled status.
    /// Resolves immediately when the engine is already settled.
    pub async fn wait_settled(&self) -> RunStatus {
        let mut rx = self.shared.status.subscribe();
        let settled = match rx.wait_for(|status| !status.is_active()).await {
            Ok(status) => *status,
            Err(_) => RunStatus::Idle,
        };
        settled
    }
}

/// Run one algorithm to completion or cancellation.
async fn drive(
    shared: Arc<Shared>,
    id: RunId,
    token: CancelToken,
    algorithm: Algorithm,
    params: RunParams,
) {
    let ctx = StepCtx {
        shared: Arc::clone(&shared),
        clock: StepClock::new(token),
        params,
    };

    let outcome = match algorithm {
        Algorithm::Bfs { graph, start } => algorithms::bfs(&ctx, &graph, start).await,
        Algorithm::TreeTraversal { tree, order } => {
            algorithms::traverse(&ctx, &tree, order).await
        }
        Algorithm::BubbleSort { values } => algorithms::bubble_sort(&ctx, values).await,
        Algorithm::Quicksort { values } => algorithms::quicksort(&ctx, values).await,
    };

    let settled = match outcome {
        Ok(()) => RunStatus::Completed,
        Err(Interrupted) => RunStatus::Cancelled,
    };

    // A superseding run or a reset may already own the status; only the
    // current owner writes its terminal state.
    let owner = shared.owner.lock().unwrap();
    if *owner == Some(id) {
        let _ = shared.status.send_replace(settled);
    }
    info!(run = id.0, status = ?settled, "run finished");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_is_clamped_to_supported_range() {
        let params = RunParams::default().with_speed_ms(1);
        assert_eq!(params.speed(), Duration::from_millis(MIN_SPEED_MS));

        let params = RunParams::default().with_speed_ms(100_000);
        assert_eq!(params.speed(), Duration::from_millis(MAX_SPEED_MS));

        let params = RunParams::default().with_speed_ms(800);
        assert_eq!(params.speed(), Duration::from_millis(800));
        assert_eq!(params.half_speed(), Duration::from_millis(400));
    }

    #[test]
    fn validation_catches_malformed_input() {
        let missing_start = Algorithm::Bfs {
            graph: Graph::sample(),
            start: NodeId(99),
        };
        assert!(missing_start.validate().is_err());

        let empty_tree = Algorithm::TreeTraversal {
            tree: BinarySearchTree::new(),
            order: TraversalOrder::Inorder,
        };
        assert!(empty_tree.validate().is_err());

        let empty_array = Algorithm::Quicksort { values: vec![] };
        assert!(empty_array.validate().is_err());

        let ok = Algorithm::BubbleSort { values: vec![1] };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn traversal_orders_have_journal_labels() {
        assert_eq!(TraversalOrder::Preorder.label(), "PREORDER");
        assert_eq!(TraversalOrder::Inorder.label(), "INORDER");
        assert_eq!(TraversalOrder::Postorder.label(), "POSTORDER");
    }
}
