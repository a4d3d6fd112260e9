//! Maintenance threshold walk: advance a per-vehicle cumulative odometer
//! and emit a service record each time a jittered distance threshold is
//! crossed.

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDateTime};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};

use fleetgen_core::records::{MaintenanceRecord, Route, Trip};
use fleetgen_core::{MAINTENANCE_CATALOG, MaintenanceKind};

use crate::rng::RandomContext;

/// Target distance between consecutive services.
pub const SERVICE_INTERVAL_KM: f64 = 10_000.0;
/// Uniform jitter applied to each threshold.
pub const INTERVAL_JITTER_KM: f64 = 300.0;

const COST_JITTER: (f64, f64) = (0.85, 1.20);

/// Per-vehicle usage summary, the walker's only input besides the cap.
///
/// Derived in memory from the trips and routes already generated; the
/// walker never re-reads persisted tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleUsage {
    pub vehicle_id: u32,
    pub first_trip: NaiveDateTime,
    pub last_trip: NaiveDateTime,
    pub total_km: f64,
}

/// Aggregate trips into per-vehicle usage, ascending by vehicle id.
///
/// A trip's distance comes from its route; an in-progress trip counts its
/// departure as the latest observation. Vehicles without trips are absent
/// from the result and therefore produce no maintenance.
pub fn vehicle_usage(trips: &[Trip], routes: &[Route]) -> Vec<VehicleUsage> {
    let distance_by_route: HashMap<u32, f64> = routes
        .iter()
        .map(|route| (route.id, route.distance_km))
        .collect();

    let mut by_vehicle: BTreeMap<u32, VehicleUsage> = BTreeMap::new();
    for trip in trips {
        let km = distance_by_route.get(&trip.route_id).copied().unwrap_or(0.0);
        let observed_end = trip.arrival.unwrap_or(trip.departure);
        by_vehicle
            .entry(trip.vehicle_id)
            .and_modify(|usage| {
                usage.first_trip = usage.first_trip.min(trip.departure);
                usage.last_trip = usage.last_trip.max(observed_end);
                usage.total_km += km;
            })
            .or_insert(VehicleUsage {
                vehicle_id: trip.vehicle_id,
                first_trip: trip.departure,
                last_trip: observed_end,
                total_km: km,
            });
    }

    by_vehicle.into_values().collect()
}

/// Walk each vehicle's cumulative distance and emit maintenance records
/// until the distance history runs out or the shared `cap` binds.
///
/// The cap is global across vehicles and the walk order is ascending
/// vehicle id, so low ids are exhausted first when the cap binds. That
/// bias is an intentional tie-break, not an accident. Event dates are
/// interpolated over `[first_trip, last_trip]` by the distance fraction
/// already driven.
pub fn walk_maintenance(
    usage: &[VehicleUsage],
    cap: u64,
    ctx: &mut RandomContext,
) -> Vec<MaintenanceRecord> {
    let mut records = Vec::new();

    for vehicle in usage {
        if vehicle.total_km <= 0.0 {
            continue;
        }

        let span_days = (vehicle.last_trip - vehicle.first_trip).num_days().max(1);
        let mut km_cursor = 0.0;
        let mut next_threshold = draw_threshold(ctx);

        while km_cursor + next_threshold <= vehicle.total_km && (records.len() as u64) < cap {
            km_cursor += next_threshold;
            next_threshold = draw_threshold(ctx);

            let fraction = km_cursor / vehicle.total_km;
            let day_offset = (fraction * span_days as f64) as i64;
            let date = (vehicle.first_trip + Duration::days(day_offset)).date();

            let kind: &MaintenanceKind = ctx.pick(&MAINTENANCE_CATALOG);
            let cost = round2(kind.base_cost * ctx.uniform(COST_JITTER.0, COST_JITTER.1));
            let performed_by = format!(
                "{} {}",
                FirstName().fake_with_rng::<String, _>(ctx.rng()),
                LastName().fake_with_rng::<String, _>(ctx.rng()),
            );

            records.push(MaintenanceRecord {
                id: records.len() as u32 + 1,
                vehicle_id: vehicle.vehicle_id,
                date,
                kind: kind.name.to_string(),
                description: format!("{} programado", kind.name),
                cost,
                next_due: date + Duration::days(kind.days_until_next),
                performed_by,
            });
        }

        if records.len() as u64 >= cap {
            break;
        }
    }

    records
}

fn draw_threshold(ctx: &mut RandomContext) -> f64 {
    SERVICE_INTERVAL_KM + ctx.uniform(-INTERVAL_JITTER_KM, INTERVAL_JITTER_KM)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn usage(vehicle_id: u32, total_km: f64) -> VehicleUsage {
        VehicleUsage {
            vehicle_id,
            first_trip: dt(2023, 1, 1),
            last_trip: dt(2024, 1, 1),
            total_km,
        }
    }

    #[test]
    fn record_count_matches_the_service_interval() {
        let mut ctx = RandomContext::new(41);
        let records = walk_maintenance(&[usage(1, 120_000.0)], u64::MAX, &mut ctx);
        // 120,000 km fits 11 or 12 intervals of 10,000 ± 300 km.
        assert!((11..=12).contains(&records.len()));
    }

    #[test]
    fn every_service_interval_stays_within_the_jitter_band() {
        // The walker advances the cursor by exactly one drawn threshold
        // per record, so the spacing contract is the draw itself.
        let mut ctx = RandomContext::new(46);
        for _ in 0..1_000 {
            let step = draw_threshold(&mut ctx);
            assert!(step >= SERVICE_INTERVAL_KM - INTERVAL_JITTER_KM);
            assert!(step <= SERVICE_INTERVAL_KM + INTERVAL_JITTER_KM);
        }
    }

    #[test]
    fn dates_stay_inside_the_trip_span() {
        let mut ctx = RandomContext::new(42);
        let vehicle = usage(1, 250_000.0);
        let records = walk_maintenance(&[vehicle], u64::MAX, &mut ctx);
        for record in records {
            assert!(record.date >= vehicle.first_trip.date());
            assert!(record.date <= vehicle.last_trip.date());
            assert!(record.next_due > record.date);
            assert!(record.cost > 0.0);
        }
    }

    #[test]
    fn zero_distance_vehicles_emit_nothing() {
        let mut ctx = RandomContext::new(43);
        let records = walk_maintenance(&[usage(1, 0.0)], u64::MAX, &mut ctx);
        assert!(records.is_empty());
    }

    #[test]
    fn short_history_emits_nothing() {
        let mut ctx = RandomContext::new(44);
        let records = walk_maintenance(&[usage(1, 5_000.0)], u64::MAX, &mut ctx);
        assert!(records.is_empty());
    }

    #[test]
    fn global_cap_favors_low_vehicle_ids() {
        let mut ctx = RandomContext::new(45);
        let fleet = [usage(1, 100_000.0), usage(2, 100_000.0)];
        let records = walk_maintenance(&fleet, 5, &mut ctx);
        assert_eq!(records.len(), 5);
        assert!(records.iter().all(|record| record.vehicle_id == 1));
    }

    #[test]
    fn usage_aggregates_ascending_by_vehicle() {
        let route = Route {
            id: 1,
            code: "R001".to_string(),
            origin: "Bogotá".to_string(),
            destination: "Medellín".to_string(),
            distance_km: 443.0,
            estimated_duration_hours: 7.0,
            toll_cost: 60_000,
        };
        let trip = |id: u32, vehicle_id: u32| Trip {
            id,
            vehicle_id,
            driver_id: 1,
            route_id: 1,
            departure: dt(2023, 6, 1),
            arrival: Some(dt(2023, 6, 2)),
            fuel_consumed_liters: 120.0,
            total_weight_kg: 900.0,
            status: fleetgen_core::TripStatus::Completed,
        };
        let trips = [trip(1, 9), trip(2, 3), trip(3, 9)];
        let usage = vehicle_usage(&trips, std::slice::from_ref(&route));
        assert_eq!(usage.len(), 2);
        assert_eq!(usage[0].vehicle_id, 3);
        assert_eq!(usage[1].vehicle_id, 9);
        assert_eq!(usage[1].total_km, 886.0);
    }
}
