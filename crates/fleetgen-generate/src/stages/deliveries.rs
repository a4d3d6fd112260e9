use std::collections::HashMap;

use chrono::{Datelike, NaiveDateTime};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, StreetName};
use fake::faker::name::en::{FirstName, LastName};

use fleetgen_core::records::{Delivery, DeliveryStatus, Route, Trip, TripStatus};
use fleetgen_core::targets::{MAX_DELIVERIES_PER_TRIP, MIN_DELIVERIES_PER_TRIP};

use crate::alloc::{CountBounds, allocate_counts};
use crate::errors::GenerationError;
use crate::rng::RandomContext;
use crate::temporal::{DeliveryOutcome, delivery_gap_hours, resolve_outcome, slot_timestamp};
use crate::weights::distribute_package_weights;

/// Generate exactly `target` deliveries across all trips.
///
/// Per-trip counts come from the cardinality allocator (2-6 per trip,
/// mode 4), package weights from the lognormal distributor (summing to
/// 95% of each trip's carried weight), and schedule/outcome from the
/// temporal scheduler. Delivery addresses end with the route's
/// destination city.
pub fn generate(
    target: u64,
    trips: &[Trip],
    routes: &[Route],
    reference: NaiveDateTime,
    ctx: &mut RandomContext,
) -> Result<Vec<Delivery>, GenerationError> {
    if trips.is_empty() {
        return Err(GenerationError::MissingPrerequisites(
            "no trips to attach deliveries to".to_string(),
        ));
    }

    let destination_by_route: HashMap<u32, &str> = routes
        .iter()
        .map(|route| (route.id, route.destination.as_str()))
        .collect();

    let bounds = CountBounds::new(
        MIN_DELIVERIES_PER_TRIP as u32,
        MAX_DELIVERIES_PER_TRIP as u32,
    );
    let counts = allocate_counts(trips.len(), bounds, target, ctx)?;

    let year = reference.year();
    let mut deliveries = Vec::with_capacity(target as usize);

    for (trip, &count) in trips.iter().zip(counts.iter()) {
        let weights = distribute_package_weights(trip.total_weight_kg, count as usize, ctx)?;
        let gap = delivery_gap_hours(trip.departure, trip.arrival, count);
        let completed = trip.status == TripStatus::Completed;
        let destination = destination_by_route
            .get(&trip.route_id)
            .copied()
            .unwrap_or("");

        for slot in 0..count {
            let id = deliveries.len() as u32 + 1;
            let scheduled = slot_timestamp(trip.departure, gap, slot);
            let (delivered, status, signature) = match resolve_outcome(scheduled, completed, ctx) {
                DeliveryOutcome::Delivered { at, signature } => {
                    (Some(at), DeliveryStatus::Delivered, signature)
                }
                DeliveryOutcome::Pending => (None, DeliveryStatus::Pending, false),
            };

            let customer_name = format!(
                "{} {}",
                FirstName().fake_with_rng::<String, _>(ctx.rng()),
                LastName().fake_with_rng::<String, _>(ctx.rng()),
            );
            let delivery_address = format!(
                "{} {}, {}",
                BuildingNumber().fake_with_rng::<String, _>(ctx.rng()),
                StreetName().fake_with_rng::<String, _>(ctx.rng()),
                destination,
            );

            deliveries.push(Delivery {
                id,
                trip_id: trip.id,
                tracking_number: format!("FL{year}{id:08}"),
                customer_name,
                delivery_address,
                package_weight_kg: round2(weights[slot as usize]),
                scheduled,
                delivered,
                status,
                recipient_signature: signature,
            });
        }
    }

    Ok(deliveries)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn route() -> Route {
        Route {
            id: 1,
            code: "R001".to_string(),
            origin: "Bogotá".to_string(),
            destination: "Medellín".to_string(),
            distance_km: 443.0,
            estimated_duration_hours: 7.33,
            toll_cost: 60_000,
        }
    }

    fn trip(id: u32, completed: bool) -> Trip {
        let departure = reference() - Duration::days(i64::from(id));
        Trip {
            id,
            vehicle_id: 1,
            driver_id: 1,
            route_id: 1,
            departure,
            arrival: completed.then(|| departure + Duration::hours(8)),
            fuel_consumed_liters: 130.0,
            total_weight_kg: 1000.0,
            status: if completed {
                TripStatus::Completed
            } else {
                TripStatus::InProgress
            },
        }
    }

    #[test]
    fn exact_target_and_weight_budget_per_trip() {
        let mut ctx = RandomContext::new(91);
        let trips: Vec<Trip> = (1..=3).map(|id| trip(id, true)).collect();
        let routes = vec![route()];

        let deliveries =
            generate(12, &trips, &routes, reference(), &mut ctx).expect("feasible target");
        assert_eq!(deliveries.len(), 12);

        for t in &trips {
            let total: f64 = deliveries
                .iter()
                .filter(|d| d.trip_id == t.id)
                .map(|d| d.package_weight_kg)
                .sum();
            // 0.95 × 1000, with per-package rounding to 2 decimals
            assert!((total - 950.0).abs() < 0.1, "trip {} sum {total}", t.id);
        }
        for d in &deliveries {
            assert!(d.package_weight_kg > 0.0);
        }
    }

    #[test]
    fn schedule_stays_inside_the_trip_window() {
        let mut ctx = RandomContext::new(92);
        let trips = vec![trip(1, true), trip(2, true)];
        let routes = vec![route()];

        let deliveries =
            generate(8, &trips, &routes, reference(), &mut ctx).expect("feasible target");
        for d in &deliveries {
            let t = &trips[(d.trip_id - 1) as usize];
            assert!(d.scheduled > t.departure);
            assert!(d.scheduled < t.arrival.unwrap());
            let delivered = d.delivered.expect("completed trips deliver");
            assert!(delivered >= d.scheduled - Duration::minutes(30));
            assert!(delivered <= d.scheduled + Duration::minutes(180));
            assert_eq!(d.status, DeliveryStatus::Delivered);
        }
    }

    #[test]
    fn in_progress_trips_leave_pending_rows() {
        let mut ctx = RandomContext::new(93);
        let trips = vec![trip(1, false)];
        let routes = vec![route()];

        let deliveries =
            generate(4, &trips, &routes, reference(), &mut ctx).expect("feasible target");
        for (slot, d) in deliveries.iter().enumerate() {
            assert_eq!(d.status, DeliveryStatus::Pending);
            assert!(d.delivered.is_none());
            assert!(!d.recipient_signature);
            // Unknown arrival falls back to a fixed half-hour gap, so the
            // slot-centered schedule sits at departure + 15, 45, 75, ... min.
            assert_eq!(
                d.scheduled,
                trips[0].departure + Duration::minutes(15 + 30 * slot as i64)
            );
        }
    }

    #[test]
    fn tracking_numbers_are_unique_and_prefixed() {
        let mut ctx = RandomContext::new(94);
        let trips: Vec<Trip> = (1..=5).map(|id| trip(id, true)).collect();
        let routes = vec![route()];

        let deliveries =
            generate(20, &trips, &routes, reference(), &mut ctx).expect("feasible target");
        let mut seen = std::collections::HashSet::new();
        for d in &deliveries {
            assert!(d.tracking_number.starts_with("FL2024"));
            assert!(seen.insert(d.tracking_number.clone()));
            assert!(d.delivery_address.ends_with(", Medellín"));
        }
    }

    #[test]
    fn infeasible_target_aborts_without_rows() {
        let mut ctx = RandomContext::new(95);
        let trips = vec![trip(1, true)];
        let routes = vec![route()];

        let result = generate(40, &trips, &routes, reference(), &mut ctx);
        assert!(matches!(
            result,
            Err(GenerationError::AllocationInfeasible { .. })
        ));
    }

    #[test]
    fn no_trips_is_a_missing_prerequisite() {
        let mut ctx = RandomContext::new(96);
        let result = generate(4, &[], &[route()], reference(), &mut ctx);
        assert!(matches!(
            result,
            Err(GenerationError::MissingPrerequisites(_))
        ));
    }
}
