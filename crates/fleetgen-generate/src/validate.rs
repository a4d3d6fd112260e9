//! Post-generation consistency checks. Read-only and non-fatal: findings
//! are logged as warnings and aggregated into the run report, never
//! rolled back.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::Dataset;

/// One consistency check's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub check: String,
    pub violations: u64,
}

impl ValidationFinding {
    pub fn passed(&self) -> bool {
        self.violations == 0
    }
}

/// Run all consistency checks over the materialized dataset.
///
/// Every check is reported, passing or not; callers decide how to surface
/// the summary. Violations are also logged at warn level as they are
/// found.
pub fn validate_dataset(data: &Dataset) -> Vec<ValidationFinding> {
    let vehicle_ids: HashSet<u32> = data.vehicles.iter().map(|v| v.id).collect();
    let driver_ids: HashSet<u32> = data.drivers.iter().map(|d| d.id).collect();
    let route_ids: HashSet<u32> = data.routes.iter().map(|r| r.id).collect();
    let trip_ids: HashSet<u32> = data.trips.iter().map(|t| t.id).collect();
    let capacity_by_vehicle: HashMap<u32, u32> =
        data.vehicles.iter().map(|v| (v.id, v.capacity_kg)).collect();
    let expiry_by_driver: HashMap<u32, chrono::NaiveDate> = data
        .drivers
        .iter()
        .map(|d| (d.id, d.license_expiry))
        .collect();

    let mut findings = Vec::with_capacity(6);

    findings.push(finding(
        "trips_with_unknown_reference",
        data.trips
            .iter()
            .filter(|t| {
                !vehicle_ids.contains(&t.vehicle_id)
                    || !driver_ids.contains(&t.driver_id)
                    || !route_ids.contains(&t.route_id)
            })
            .count() as u64,
    ));

    findings.push(finding(
        "deliveries_with_unknown_trip",
        data.deliveries
            .iter()
            .filter(|d| !trip_ids.contains(&d.trip_id))
            .count() as u64,
    ));

    findings.push(finding(
        "trips_arriving_before_departure",
        data.trips
            .iter()
            .filter(|t| t.arrival.is_some_and(|arrival| arrival <= t.departure))
            .count() as u64,
    ));

    findings.push(finding(
        "trips_over_vehicle_capacity",
        data.trips
            .iter()
            .filter(|t| {
                capacity_by_vehicle
                    .get(&t.vehicle_id)
                    .is_some_and(|&cap| t.total_weight_kg > f64::from(cap))
            })
            .count() as u64,
    ));

    findings.push(finding(
        "trips_after_license_expiry",
        data.trips
            .iter()
            .filter(|t| {
                expiry_by_driver
                    .get(&t.driver_id)
                    .is_some_and(|&expiry| t.departure.date() > expiry)
            })
            .count() as u64,
    ));

    findings.push(finding(
        "deliveries_without_tracking_number",
        data.deliveries
            .iter()
            .filter(|d| d.tracking_number.is_empty())
            .count() as u64,
    ));

    findings
}

fn finding(check: &str, violations: u64) -> ValidationFinding {
    if violations > 0 {
        warn!(check, violations, "consistency check failed");
    }
    ValidationFinding {
        check: check.to_string(),
        violations,
    }
}
