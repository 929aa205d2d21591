//! Algovis terminal demo.
//!
//! Runs one algorithm over built-in demo inputs and prints each journal
//! line as the engine emits it.

use std::env;

use algovis_engine::{Algorithm, RunParams, Runner, TraversalOrder};
use algovis_structures::{BinarySearchTree, Graph, NodeId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Parse command line args
    let args: Vec<String> = env::args().collect();

    let which = args.get(1).map(String::as_str).unwrap_or("bfs");
    let speed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(50);

    let algorithm = match which {
        "bfs" => Algorithm::Bfs {
            graph: Graph::sample(),
            start: NodeId(0),
        },
        "tree" => Algorithm::TreeTraversal {
            tree: BinarySearchTree::from_values(&[50, 30, 70, 20, 40, 60, 80]),
            order: TraversalOrder::Inorder,
        },
        "bubble" => Algorithm::BubbleSort {
            values: vec![5, 3, 8, 1, 9, 2, 7, 4],
        },
        "quick" => Algorithm::Quicksort {
            values: vec![9, 2, 7, 4, 5, 3, 8, 1],
        },
        other => {
            eprintln!("unknown algorithm: {other}");
            eprintln!("usage: algovis [bfs|tree|bubble|quick] [speed-ms]");
            std::process::exit(2);
        }
    };

    println!("Algovis Demo");
    println!("============");
    println!();
    println!("Running {which} at {speed}ms per step...");
    println!();

    let runner = Runner::new();
    let mut steps = runner.subscribe();
    runner.start(algorithm, RunParams::default().with_speed_ms(speed))?;

    let printer = tokio::spawn(async move {
        while let Ok(update) = steps.recv().await {
            println!("> {}", update.log_line);
        }
    });

    let status = runner.wait_settled().await;

    // Dropping the runner closes the step channel; the printer drains
    // whatever is buffered and exits.
    drop(runner);
    let _ = printer.await;

    println!();
    println!("Run finished: {status:?}");

    Ok(())
}
