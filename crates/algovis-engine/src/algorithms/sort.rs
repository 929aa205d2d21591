//! Bubble sort and quicksort drivers.
//!
//! Both keep a private working copy of the values plus the set of settled
//! positions, and re-derive the full bar array on every repaint so
//! observers always get a whole-collection replacement.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use crate::runner::{Interrupted, StepCtx, StepResult};
use crate::state::{Bar, RenderColor};

/// Build the full bar array: `marked` positions get `color`, settled
/// positions stay sorted, the rest fall back to neutral.
fn paint(
    values: &[i64],
    sorted: &HashSet<usize>,
    marked: &[usize],
    color: RenderColor,
) -> Vec<Bar> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let color = if marked.contains(&i) {
                color
            } else if sorted.contains(&i) {
                RenderColor::Sorted
            } else {
                RenderColor::Neutral
            };
            Bar { value, color }
        })
        .collect()
}

/// Publish a pure repaint with no journal line.
fn recolor(
    ctx: &StepCtx,
    values: &[i64],
    sorted: &HashSet<usize>,
    marked: &[usize],
    color: RenderColor,
) {
    let bars = paint(values, sorted, marked, color);
    ctx.touch(|state| state.bars = bars);
}

/// Adjacent-pair bubble sort. Swap criterion is strict `>`, so ties never
/// swap and the sort is stable.
pub(crate) async fn bubble_sort(ctx: &StepCtx, mut values: Vec<i64>) -> StepResult {
    let n = values.len();
    let mut sorted: HashSet<usize> = HashSet::new();

    let bars = paint(&values, &sorted, &[], RenderColor::Neutral);
    ctx.step("Starting Bubble Sort...", |state| state.bars = bars);

    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            recolor(ctx, &values, &sorted, &[j, j + 1], RenderColor::Comparing);
            ctx.pause().await?;

            if values[j] > values[j + 1] {
                let (a, b) = (values[j], values[j + 1]);
                values.swap(j, j + 1);
                let bars = paint(&values, &sorted, &[j, j + 1], RenderColor::Swapping);
                ctx.step(&format!("Swapped {a} and {b}"), |state| state.bars = bars);
                ctx.pause().await?;
            }

            recolor(ctx, &values, &sorted, &[], RenderColor::Neutral);
        }

        // The largest unsettled value has bubbled to the end of the pass
        sorted.insert(n - i - 1);
        recolor(ctx, &values, &sorted, &[], RenderColor::Neutral);
    }

    // The remaining front element settles by elimination
    sorted.insert(0);
    let bars = paint(&values, &sorted, &[], RenderColor::Neutral);
    ctx.step("Bubble Sort complete!", |state| state.bars = bars);
    Ok(())
}

/// Lomuto-partition quicksort; the pivot is the final element of each
/// range.
pub(crate) async fn quicksort(ctx: &StepCtx, mut values: Vec<i64>) -> StepResult {
    let n = values.len();
    let mut sorted: HashSet<usize> = HashSet::new();

    let bars = paint(&values, &sorted, &[], RenderColor::Neutral);
    ctx.step("Starting Quick Sort...", |state| state.bars = bars);

    sort_range(ctx, &mut values, &mut sorted, 0, n as isize - 1).await?;

    // Every position has settled by now
    sorted.extend(0..n);
    let bars = paint(&values, &sorted, &[], RenderColor::Neutral);
    ctx.step("Quick Sort complete!", |state| state.bars = bars);
    Ok(())
}

fn sort_range<'a>(
    ctx: &'a StepCtx,
    values: &'a mut Vec<i64>,
    sorted: &'a mut HashSet<usize>,
    low: isize,
    high: isize,
) -> Pin<Box<dyn Future<Output = StepResult> + Send + 'a>> {
    Box::pin(async move {
        if low < high {
            let pi = partition(ctx, values, sorted, low as usize, high as usize).await? as isize;
            sort_range(ctx, values, sorted, low, pi - 1).await?;
            sort_range(ctx, values, sorted, pi + 1, high).await?;
        } else if low == high {
            // Single-element range settles directly
            sorted.insert(low as usize);
            recolor(ctx, values, sorted, &[], RenderColor::Neutral);
        }
        Ok(())
    })
}

/// One Lomuto partition pass over `[low, high]`; returns the pivot's
/// final index.
async fn partition(
    ctx: &StepCtx,
    values: &mut Vec<i64>,
    sorted: &mut HashSet<usize>,
    low: usize,
    high: usize,
) -> std::result::Result<usize, Interrupted> {
    let pivot = values[high];
    recolor(ctx, values, sorted, &[high], RenderColor::Pivot);
    ctx.pause().await?;

    // Next slot for a value below the pivot
    let mut boundary = low;
    for j in low..high {
        recolor(ctx, values, sorted, &[j], RenderColor::Comparing);
        ctx.pause().await?;

        if values[j] < pivot {
            let (a, b) = (values[boundary], values[j]);
            values.swap(boundary, j);
            let bars = paint(values, sorted, &[boundary, j], RenderColor::Swapping);
            ctx.step(&format!("Swapped {a} and {b}"), |state| state.bars = bars);
            ctx.pause().await?;
            boundary += 1;
        }

        recolor(ctx, values, sorted, &[], RenderColor::Neutral);
    }

    values.swap(boundary, high);
    sorted.insert(boundary);
    recolor(ctx, values, sorted, &[], RenderColor::Neutral);
    ctx.pause().await?;
    Ok(boundary)
}
