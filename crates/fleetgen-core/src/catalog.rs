//! Static reference catalogs: cities and road distances, vehicle classes,
//! and the maintenance-type table.

use crate::records::{FuelKind, VehicleClass};

/// Cities served by the fleet.
pub const CITIES: [&str; 5] = [
    "Bogotá",
    "Medellín",
    "Villavicencio",
    "Barranquilla",
    "Bucaramanga",
];

/// Approximate road distance when a city pair is not in the table.
pub const FALLBACK_DISTANCE_KM: f64 = 500.0;

// Bidirectional road distances in km, keyed by the alphabetically sorted
// city pair.
const DISTANCES_KM: [(&str, &str, f64); 10] = [
    ("Bogotá", "Medellín", 443.0),
    ("Bogotá", "Villavicencio", 123.0),
    ("Barranquilla", "Bogotá", 1001.0),
    ("Bogotá", "Bucaramanga", 409.0),
    ("Bucaramanga", "Medellín", 388.0),
    ("Barranquilla", "Medellín", 703.0),
    ("Medellín", "Villavicencio", 518.0),
    ("Barranquilla", "Villavicencio", 1116.0),
    ("Barranquilla", "Bucaramanga", 584.0),
    ("Bucaramanga", "Villavicencio", 518.0),
];

/// Road distance between two cities, in either direction.
///
/// Returns 0 for a same-city pair and [`FALLBACK_DISTANCE_KM`] when the
/// pair is not in the table.
pub fn road_distance_km(a: &str, b: &str) -> f64 {
    if a == b {
        return 0.0;
    }
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    DISTANCES_KM
        .iter()
        .find(|(x, y, _)| *x == lo && *y == hi)
        .map(|(_, _, km)| *km)
        .unwrap_or(FALLBACK_DISTANCE_KM)
}

/// Toll cost in pesos: 15,000 per started-and-completed 100 km block.
pub fn toll_cost(km: f64) -> u32 {
    (km / 100.0) as u32 * 15_000
}

/// Per-class capacity and fuel-consumption ranges.
#[derive(Debug, Clone, Copy)]
pub struct VehicleClassSpec {
    pub class: VehicleClass,
    pub capacity_kg: (u32, u32),
    pub fuel: FuelKind,
    /// Liters per 100 km, inclusive range.
    pub consumption_l_per_100km: (f64, f64),
}

const VEHICLE_CLASSES: [VehicleClassSpec; 4] = [
    VehicleClassSpec {
        class: VehicleClass::LargeTruck,
        capacity_kg: (12_000, 18_000),
        fuel: FuelKind::Diesel,
        consumption_l_per_100km: (25.0, 35.0),
    },
    VehicleClassSpec {
        class: VehicleClass::MediumTruck,
        capacity_kg: (6_000, 9_000),
        fuel: FuelKind::Diesel,
        consumption_l_per_100km: (18.0, 26.0),
    },
    VehicleClassSpec {
        class: VehicleClass::Van,
        capacity_kg: (1_000, 1_500),
        fuel: FuelKind::Gasoline,
        consumption_l_per_100km: (9.0, 15.0),
    },
    VehicleClassSpec {
        class: VehicleClass::Motorcycle,
        capacity_kg: (50, 150),
        fuel: FuelKind::Gasoline,
        consumption_l_per_100km: (2.0, 4.0),
    },
];

pub fn vehicle_classes() -> &'static [VehicleClassSpec] {
    &VEHICLE_CLASSES
}

/// Spec of a vehicle class by its enum value.
pub fn class_spec(class: VehicleClass) -> &'static VehicleClassSpec {
    VEHICLE_CLASSES
        .iter()
        .find(|spec| spec.class == class)
        .unwrap_or(&VEHICLE_CLASSES[0])
}

/// Maintenance type: name, base cost in pesos, and days until the next
/// service of the same kind is due.
#[derive(Debug, Clone, Copy)]
pub struct MaintenanceKind {
    pub name: &'static str,
    pub base_cost: f64,
    pub days_until_next: i64,
}

pub const MAINTENANCE_CATALOG: [MaintenanceKind; 6] = [
    MaintenanceKind {
        name: "Cambio de aceite",
        base_cost: 150_000.0,
        days_until_next: 30,
    },
    MaintenanceKind {
        name: "Revisión de frenos",
        base_cost: 250_000.0,
        days_until_next: 60,
    },
    MaintenanceKind {
        name: "Cambio de llantas",
        base_cost: 450_000.0,
        days_until_next: 90,
    },
    MaintenanceKind {
        name: "Mantenimiento general",
        base_cost: 350_000.0,
        days_until_next: 45,
    },
    MaintenanceKind {
        name: "Revisión de motor",
        base_cost: 500_000.0,
        days_until_next: 60,
    },
    MaintenanceKind {
        name: "Alineación y balanceo",
        base_cost: 180_000.0,
        days_until_next: 30,
    },
];
