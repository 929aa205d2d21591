//! Animated algorithm execution engine.
//!
//! Drives a declarative algorithm (BFS traversal, binary-tree traversal,
//! bubble sort, quicksort) one observable step at a time: each step
//! mutates the shared [`VisualState`], appends a journal line, and pauses
//! on the [`StepClock`] before the next. Cancellation is cooperative,
//! observed at wait boundaries, and starting a new run supersedes the
//! previous one before any shared state is touched.
//!
//! # Architecture
//!
//! - **StepClock**: cancellable pacing between steps
//! - **LogSink**: bounded, timestamped journal, newest first
//! - **Runner**: one-in-flight run state machine with supersession
//! - **Drivers**: per-algorithm step generators over a shared context
//!
//! # Usage
//!
//! ```ignore
//! let runner = Runner::new();
//! let mut steps = runner.subscribe();
//! runner.start(
//!     Algorithm::Bfs { graph: Graph::sample(), start: NodeId(0) },
//!     RunParams::default().with_speed_ms(100),
//! )?;
//! while let Ok(update) = steps.recv().await {
//!     println!("{}", update.log_line);
//! }
//! ```

mod algorithms;
mod clock;
mod error;
mod journal;
mod runner;
mod state;

pub use clock::{CancelToken, StepClock, WaitOutcome};
pub use error::{Error, Result};
pub use journal::{LogSink, JOURNAL_CAP};
pub use runner::{
    Algorithm, RunHandle, RunId, RunParams, Runner, TraversalOrder, MAX_SPEED_MS, MIN_SPEED_MS,
};
pub use state::{Bar, RenderColor, RunStatus, StepUpdate, VisualState};
