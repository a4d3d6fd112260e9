use thiserror::Error;

/// Errors emitted by the generation engine.
///
/// Everything here is fatal to the run: generation either hits every
/// exact target or aborts before dependent tables are written. Validator
/// findings are not errors; they are aggregated into the run report.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(
        "cardinality target {target} is unreachable for {groups} groups \
         bounded by [{lo}, {hi}]"
    )]
    AllocationInfeasible {
        target: u64,
        groups: usize,
        lo: u32,
        hi: u32,
    },
    #[error("missing prerequisite data: {0}")]
    MissingPrerequisites(String),
    #[error("package weight total must be positive (got {0})")]
    NonPositiveWeight(f64),
    #[error("cannot distribute weight across zero packages")]
    EmptyBatch,
    #[error("invalid distribution: {0}")]
    Distribution(String),
    #[error("invalid targets: {0}")]
    Targets(#[from] fleetgen_core::TargetsError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
