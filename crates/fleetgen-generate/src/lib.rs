//! Deterministic fleet-logistics dataset generation engine.
//!
//! This crate turns a [`fleetgen_core::GenerationTargets`] into six
//! referentially-consistent CSV tables (vehicles, drivers, routes, trips,
//! deliveries, maintenance), every table hitting its exact row target,
//! fully determined by a single seed.

pub mod alloc;
pub mod engine;
pub mod errors;
pub mod maintenance;
pub mod model;
pub mod output;
pub mod rng;
pub mod stages;
pub mod temporal;
pub mod validate;
pub mod weights;

pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use model::{Dataset, GenerateOptions, RunReport, TableReport};
pub use rng::RandomContext;
