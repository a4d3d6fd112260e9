use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum deliveries assigned to a single trip.
pub const MIN_DELIVERIES_PER_TRIP: u64 = 2;
/// Maximum deliveries assigned to a single trip.
pub const MAX_DELIVERIES_PER_TRIP: u64 = 6;

/// Errors raised by target validation.
#[derive(Debug, Error)]
pub enum TargetsError {
    #[error("target '{0}' must be greater than zero")]
    ZeroTarget(&'static str),
    #[error("delivery target {deliveries} is outside [{min}, {max}] for {trips} trips")]
    DeliveriesInfeasible {
        deliveries: u64,
        trips: u64,
        min: u64,
        max: u64,
    },
}

/// Exact per-table row targets for one generation run.
///
/// Every count is hit precisely, except `maintenance` which is a cap:
/// the walker may emit fewer records when the vehicles' distance
/// histories are exhausted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationTargets {
    pub vehicles: u64,
    pub drivers: u64,
    pub routes: u64,
    pub trips: u64,
    pub deliveries: u64,
    pub maintenance: u64,
}

impl Default for GenerationTargets {
    fn default() -> Self {
        Self {
            vehicles: 200,
            drivers: 400,
            routes: 50,
            trips: 100_000,
            deliveries: 400_000,
            maintenance: 5_000,
        }
    }
}

impl GenerationTargets {
    /// Fail fast on targets no run could satisfy. The delivery check is a
    /// coarse screen; the cardinality allocator owns the authoritative
    /// feasibility check against the actual counts drawn.
    pub fn validate(&self) -> Result<(), TargetsError> {
        for (name, value) in [
            ("vehicles", self.vehicles),
            ("drivers", self.drivers),
            ("routes", self.routes),
            ("trips", self.trips),
            ("deliveries", self.deliveries),
        ] {
            if value == 0 {
                return Err(TargetsError::ZeroTarget(name));
            }
        }

        let min = self.trips * MIN_DELIVERIES_PER_TRIP;
        let max = self.trips * MAX_DELIVERIES_PER_TRIP;
        if self.deliveries < min || self.deliveries > max {
            return Err(TargetsError::DeliveriesInfeasible {
                deliveries: self.deliveries,
                trips: self.trips,
                min,
                max,
            });
        }

        Ok(())
    }

    /// Total rows across all tables when every target is hit.
    pub fn total_rows(&self) -> u64 {
        self.vehicles + self.drivers + self.routes + self.trips + self.deliveries + self.maintenance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_run() {
        let targets = GenerationTargets::default();
        assert_eq!(targets.vehicles, 200);
        assert_eq!(targets.trips, 100_000);
        assert_eq!(targets.deliveries, 400_000);
        assert!(targets.validate().is_ok());
    }

    #[test]
    fn zero_targets_are_rejected() {
        let targets = GenerationTargets {
            routes: 0,
            ..GenerationTargets::default()
        };
        assert!(matches!(
            targets.validate(),
            Err(TargetsError::ZeroTarget("routes"))
        ));
    }

    #[test]
    fn delivery_target_must_fit_per_trip_bounds() {
        let targets = GenerationTargets {
            trips: 10,
            deliveries: 61,
            ..GenerationTargets::default()
        };
        assert!(matches!(
            targets.validate(),
            Err(TargetsError::DeliveriesInfeasible { .. })
        ));

        let targets = GenerationTargets {
            trips: 10,
            deliveries: 19,
            ..GenerationTargets::default()
        };
        assert!(targets.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let targets: GenerationTargets = serde_json::from_str(r#"{"trips": 12}"#).unwrap();
        assert_eq!(targets.trips, 12);
        assert_eq!(targets.vehicles, 200);
    }
}
