//! Package-weight distribution: split a trip's carried weight across its
//! deliveries with a bounded heavy-tailed profile.

use rand_distr::{Distribution, LogNormal};

use crate::errors::GenerationError;
use crate::rng::RandomContext;

// Lognormal shape of individual package weights, in kg.
const SHAPE_MU: f64 = 2.5;
const SHAPE_SIGMA: f64 = 0.6;
/// Pre-scaling floor for a single package draw.
pub const MIN_PACKAGE_KG: f64 = 0.5;
/// Share of the trip weight handed out to packages; the rest is slack.
pub const ALLOCATED_SHARE: f64 = 0.95;

/// Split `total_kg` across `packages` positive weights summing to
/// `0.95 × total_kg`.
///
/// Draws are lognormal, floor-clamped at [`MIN_PACKAGE_KG`], then rescaled
/// proportionally. Return order is draw order and carries no meaning.
/// Non-positive totals and empty batches are rejected rather than left
/// undefined.
pub fn distribute_package_weights(
    total_kg: f64,
    packages: usize,
    ctx: &mut RandomContext,
) -> Result<Vec<f64>, GenerationError> {
    if packages == 0 {
        return Err(GenerationError::EmptyBatch);
    }
    if total_kg <= 0.0 {
        return Err(GenerationError::NonPositiveWeight(total_kg));
    }

    let shape = LogNormal::new(SHAPE_MU, SHAPE_SIGMA)
        .map_err(|err| GenerationError::Distribution(err.to_string()))?;

    let mut weights: Vec<f64> = (0..packages)
        .map(|_| shape.sample(ctx.rng()).max(MIN_PACKAGE_KG))
        .collect();

    let drawn: f64 = weights.iter().sum();
    let scale = total_kg * ALLOCATED_SHARE / drawn;
    for weight in &mut weights {
        *weight *= scale;
    }

    Ok(weights)
}
