use chrono::{Duration, NaiveDate};

use fleetgen_core::records::{Vehicle, VehicleStatus};
use fleetgen_core::vehicle_classes;

use crate::rng::RandomContext;

const ACTIVE_PROBABILITY: f64 = 0.90;

/// Generate exactly `count` vehicles with class-appropriate capacities.
///
/// Acquisition dates fall in the five years before `reference`, never
/// closer than a month; roughly one in ten vehicles sits in maintenance.
pub fn generate(count: u64, reference: NaiveDate, ctx: &mut RandomContext) -> Vec<Vehicle> {
    let classes = vehicle_classes();
    let mut vehicles = Vec::with_capacity(count as usize);

    for id in 1..=count {
        let spec = ctx.pick(classes);
        let capacity_kg =
            ctx.int_between(i64::from(spec.capacity_kg.0), i64::from(spec.capacity_kg.1)) as u32;
        let acquisition_date = reference - Duration::days(ctx.int_between(30, 5 * 365));
        let status = if ctx.chance(ACTIVE_PROBABILITY) {
            VehicleStatus::Active
        } else {
            VehicleStatus::Maintenance
        };

        vehicles.push(Vehicle {
            id: id as u32,
            license_plate: license_plate(ctx),
            class: spec.class,
            capacity_kg,
            fuel: spec.fuel,
            acquisition_date,
            status,
        });
    }

    vehicles
}

// Colombian-style plate: three uppercase letters, three digits.
fn license_plate(ctx: &mut RandomContext) -> String {
    let mut plate = String::with_capacity(6);
    for _ in 0..3 {
        plate.push((b'A' + ctx.int_between(0, 25) as u8) as char);
    }
    plate.push_str(&ctx.int_between(100, 999).to_string());
    plate
}
