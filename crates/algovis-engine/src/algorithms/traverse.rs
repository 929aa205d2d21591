//! Recursive binary-tree traversal.

use std::future::Future;
use std::pin::Pin;

use algovis_structures::{BinarySearchTree, Node};

use crate::runner::{StepCtx, StepResult, TraversalOrder};

/// Walk the tree in the given order, holding the highlight on each node
/// for one beat. The tree itself is never mutated.
pub(crate) async fn traverse(
    ctx: &StepCtx,
    tree: &BinarySearchTree,
    order: TraversalOrder,
) -> StepResult {
    ctx.step(&format!("Starting {} traversal...", order.label()), |state| {
        state.highlighted = None;
    });

    if let Some(root) = tree.root() {
        visit(ctx, root, order).await?;
    }

    ctx.step("Traversal complete", |state| state.highlighted = None);
    Ok(())
}

/// Highlight exactly this node, journal the visit, hold for one beat.
async fn show(ctx: &StepCtx, value: i64) -> StepResult {
    ctx.step(&format!("VISIT: Node {value}"), |state| {
        state.highlighted = Some(value);
    });
    ctx.pause().await
}

fn visit<'a>(
    ctx: &'a StepCtx,
    node: &'a Node,
    order: TraversalOrder,
) -> Pin<Box<dyn Future<Output = StepResult> + Send + 'a>> {
    Box::pin(async move {
        match order {
            TraversalOrder::Preorder => {
                show(ctx, node.value).await?;
                if let Some(left) = node.left.as_deref() {
                    visit(ctx, left, order).await?;
                }
                if let Some(right) = node.right.as_deref() {
                    visit(ctx, right, order).await?;
                }
            }
            TraversalOrder::Inorder => {
                if let Some(left) = node.left.as_deref() {
                    visit(ctx, left, order).await?;
                }
                show(ctx, node.value).await?;
                if let Some(right) = node.right.as_deref() {
                    visit(ctx, right, order).await?;
                }
            }
            TraversalOrder::Postorder => {
                if let Some(left) = node.left.as_deref() {
                    visit(ctx, left, order).await?;
                }
                if let Some(right) = node.right.as_deref() {
                    visit(ctx, right, order).await?;
                }
                show(ctx, node.value).await?;
            }
        }
        Ok(())
    })
}
