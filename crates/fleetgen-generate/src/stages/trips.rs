use chrono::{Duration, NaiveDateTime, NaiveTime};

use fleetgen_core::class_spec;
use fleetgen_core::records::{Driver, DriverStatus, Route, Trip, TripStatus, Vehicle, VehicleStatus};

use crate::errors::GenerationError;
use crate::rng::RandomContext;
use crate::temporal::DepartureHours;

/// Days of history the trips span, ending at the reference datetime.
pub const HISTORY_DAYS: i64 = 730;

const DURATION_NOISE: (f64, f64) = (0.85, 1.15);
const FUEL_NOISE: (f64, f64) = (0.95, 1.05);
const LOAD_FACTOR: (f64, f64) = (0.4, 0.9);
const BASE_SPEED_KMH: f64 = 70.0;

/// Generate exactly `count` trips spread evenly over the history window.
///
/// Departure hours follow the peaked working-hours distribution; fuel use
/// follows the vehicle class's consumption range; carried weight is
/// 40-90% of the vehicle's capacity. Trips whose computed arrival lies
/// beyond `reference` stay in progress with a null arrival. Fails when no
/// active vehicles, active drivers, or routes exist.
pub fn generate(
    count: u64,
    vehicles: &[Vehicle],
    drivers: &[Driver],
    routes: &[Route],
    reference: NaiveDateTime,
    ctx: &mut RandomContext,
) -> Result<Vec<Trip>, GenerationError> {
    let active_vehicles: Vec<&Vehicle> = vehicles
        .iter()
        .filter(|vehicle| vehicle.status == VehicleStatus::Active)
        .collect();
    let active_drivers: Vec<&Driver> = drivers
        .iter()
        .filter(|driver| driver.status == DriverStatus::Active)
        .collect();

    if active_vehicles.is_empty() {
        return Err(GenerationError::MissingPrerequisites(
            "no active vehicles to assign trips to".to_string(),
        ));
    }
    if active_drivers.is_empty() {
        return Err(GenerationError::MissingPrerequisites(
            "no active drivers to assign trips to".to_string(),
        ));
    }
    if routes.is_empty() {
        return Err(GenerationError::MissingPrerequisites(
            "no routes to assign trips to".to_string(),
        ));
    }

    let departure_hours = DepartureHours::new()?;
    let window_start = reference - Duration::days(HISTORY_DAYS);
    let minutes_step = (HISTORY_DAYS * 24 * 60 / count as i64).max(1);
    let mut cursor = window_start;

    let mut trips = Vec::with_capacity(count as usize);
    for id in 1..=count {
        let vehicle = *ctx.pick(&active_vehicles);
        let driver = *ctx.pick(&active_drivers);
        let route = ctx.pick(routes);

        let hour = departure_hours.draw(ctx);
        let minute = ctx.int_between(0, 59) as u32;
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
        let departure = NaiveDateTime::new(cursor.date(), time);

        let base_hours = route.distance_km / BASE_SPEED_KMH + 1.0;
        let actual_hours = route.estimated_duration_hours.max(base_hours)
            * ctx.uniform(DURATION_NOISE.0, DURATION_NOISE.1);
        let arrival = departure + Duration::seconds((actual_hours * 3600.0) as i64);

        let consumption = class_spec(vehicle.class).consumption_l_per_100km;
        let l_per_100km = ctx.uniform(consumption.0, consumption.1);
        let fuel = route.distance_km * (l_per_100km / 100.0) * ctx.uniform(FUEL_NOISE.0, FUEL_NOISE.1);

        let total_weight = f64::from(vehicle.capacity_kg) * ctx.uniform(LOAD_FACTOR.0, LOAD_FACTOR.1);

        let status = if arrival < reference {
            TripStatus::Completed
        } else {
            TripStatus::InProgress
        };

        trips.push(Trip {
            id: id as u32,
            vehicle_id: vehicle.id,
            driver_id: driver.id,
            route_id: route.id,
            departure,
            arrival: (status == TripStatus::Completed).then_some(arrival),
            fuel_consumed_liters: round2(fuel),
            total_weight_kg: round2(total_weight),
            status,
        });

        cursor += Duration::minutes(minutes_step);
    }

    Ok(trips)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::{drivers, routes, vehicles};
    use crate::temporal::{FIRST_DEPARTURE_HOUR, LAST_DEPARTURE_HOUR};
    use chrono::{NaiveDate, Timelike};
    use std::collections::HashMap;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn fixtures(ctx: &mut RandomContext) -> (Vec<Vehicle>, Vec<Driver>, Vec<Route>) {
        let vehicles = vehicles::generate(20, reference().date(), ctx);
        let drivers = drivers::generate(30, reference().date(), ctx);
        let routes = routes::generate(10, ctx);
        (vehicles, drivers, routes)
    }

    #[test]
    fn trips_respect_time_and_capacity_invariants() {
        let mut ctx = RandomContext::new(81);
        let (vehicles, drivers, routes) = fixtures(&mut ctx);
        let capacity: HashMap<u32, u32> = vehicles.iter().map(|v| (v.id, v.capacity_kg)).collect();

        let trips = generate(500, &vehicles, &drivers, &routes, reference(), &mut ctx)
            .expect("prerequisites exist");
        assert_eq!(trips.len(), 500);

        for trip in &trips {
            let hour = trip.departure.time().hour();
            assert!((FIRST_DEPARTURE_HOUR..=LAST_DEPARTURE_HOUR).contains(&hour));
            if let Some(arrival) = trip.arrival {
                assert!(arrival > trip.departure);
                assert_eq!(trip.status, TripStatus::Completed);
            } else {
                assert_eq!(trip.status, TripStatus::InProgress);
            }
            let cap = capacity[&trip.vehicle_id];
            assert!(trip.total_weight_kg <= 0.9 * f64::from(cap) + 1e-6);
            assert!(trip.total_weight_kg >= 0.4 * f64::from(cap) - 1e-6);
            assert!(trip.fuel_consumed_liters > 0.0);
        }
    }

    #[test]
    fn fails_without_active_vehicles() {
        let mut ctx = RandomContext::new(82);
        let (mut vehicles, drivers, routes) = fixtures(&mut ctx);
        for vehicle in &mut vehicles {
            vehicle.status = VehicleStatus::Maintenance;
        }
        let result = generate(10, &vehicles, &drivers, &routes, reference(), &mut ctx);
        assert!(matches!(
            result,
            Err(GenerationError::MissingPrerequisites(_))
        ));
    }

    #[test]
    fn fails_without_routes() {
        let mut ctx = RandomContext::new(83);
        let (vehicles, drivers, _) = fixtures(&mut ctx);
        let result = generate(10, &vehicles, &drivers, &[], reference(), &mut ctx);
        assert!(matches!(
            result,
            Err(GenerationError::MissingPrerequisites(_))
        ));
    }
}
