//! Exact-cardinality allocation: distribute a fixed total number of child
//! rows across parent groups under per-group inclusive bounds.

use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::errors::GenerationError;
use crate::rng::RandomContext;

/// Inclusive per-group count bounds.
#[derive(Debug, Clone, Copy)]
pub struct CountBounds {
    pub lo: u32,
    pub hi: u32,
}

impl CountBounds {
    pub const fn new(lo: u32, hi: u32) -> Self {
        Self { lo, hi }
    }
}

// Initial per-group draw: 2..=6 children with 4 as the mode (E[n] = 4).
const INITIAL_COUNTS: [u32; 5] = [2, 3, 4, 5, 6];
const INITIAL_WEIGHTS: [f64; 5] = [0.10, 0.20, 0.40, 0.20, 0.10];

/// Produce `groups` counts, each within `bounds`, summing to exactly
/// `target`.
///
/// Each count starts from a categorical draw favoring the central value;
/// the difference to `target` is then settled by a bounded redistribution
/// proportional to each group's remaining slack. The correction never
/// resamples, it only nudges the initial draw. Fails with
/// [`GenerationError::AllocationInfeasible`] before returning anything
/// when the target cannot be reached within the bounds.
pub fn allocate_counts(
    groups: usize,
    bounds: CountBounds,
    target: u64,
    ctx: &mut RandomContext,
) -> Result<Vec<u32>, GenerationError> {
    if groups == 0 || bounds.lo > bounds.hi {
        return Err(GenerationError::AllocationInfeasible {
            target,
            groups,
            lo: bounds.lo,
            hi: bounds.hi,
        });
    }

    let index = WeightedIndex::new(INITIAL_WEIGHTS)
        .map_err(|err| GenerationError::Distribution(err.to_string()))?;
    let mut counts: Vec<u32> = (0..groups)
        .map(|_| INITIAL_COUNTS[index.sample(ctx.rng())].clamp(bounds.lo, bounds.hi))
        .collect();

    let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    if target > total {
        settle(&mut counts, target - total, bounds, Direction::Grow).map_err(|_| {
            GenerationError::AllocationInfeasible {
                target,
                groups,
                lo: bounds.lo,
                hi: bounds.hi,
            }
        })?;
    } else if target < total {
        settle(&mut counts, total - target, bounds, Direction::Shrink).map_err(|_| {
            GenerationError::AllocationInfeasible {
                target,
                groups,
                lo: bounds.lo,
                hi: bounds.hi,
            }
        })?;
    }

    Ok(counts)
}

enum Direction {
    Grow,
    Shrink,
}

struct Infeasible;

// Settle `diff` against the counts in two bounded passes: first give each
// group a share proportional to its slack, then sweep once for the
// remainder. The proportional share floors below each group's slack
// whenever it has a fractional part, so every group the remainder could
// need still has room and a single sweep always terminates.
fn settle(
    counts: &mut [u32],
    diff: u64,
    bounds: CountBounds,
    direction: Direction,
) -> Result<(), Infeasible> {
    let mut slack: Vec<u64> = counts
        .iter()
        .map(|&c| match direction {
            Direction::Grow => u64::from(bounds.hi - c),
            Direction::Shrink => u64::from(c - bounds.lo),
        })
        .collect();
    let total_slack: u64 = slack.iter().sum();
    if total_slack < diff {
        return Err(Infeasible);
    }

    let mut remaining = diff;
    for (count, slack) in counts.iter_mut().zip(slack.iter_mut()) {
        let share = ((diff as u128 * *slack as u128) / total_slack as u128) as u64;
        apply(count, share, &direction);
        *slack -= share;
        remaining -= share;
    }

    for (count, slack) in counts.iter_mut().zip(slack.iter()) {
        if remaining == 0 {
            break;
        }
        if *slack > 0 {
            apply(count, 1, &direction);
            remaining -= 1;
        }
    }

    debug_assert_eq!(remaining, 0);
    Ok(())
}

fn apply(count: &mut u32, amount: u64, direction: &Direction) {
    match direction {
        Direction::Grow => *count += amount as u32,
        Direction::Shrink => *count -= amount as u32,
    }
}
