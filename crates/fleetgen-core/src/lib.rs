//! Domain model for the FleetGen synthetic fleet dataset.
//!
//! This crate holds the record types shared by the generation engine and
//! the CLI, the static reference catalogs (cities, vehicle classes,
//! maintenance types), and the per-table row targets of a generation run.

pub mod catalog;
pub mod records;
pub mod targets;

pub use catalog::{
    CITIES, MAINTENANCE_CATALOG, MaintenanceKind, VehicleClassSpec, class_spec, road_distance_km,
    toll_cost, vehicle_classes,
};
pub use records::{
    Delivery, DeliveryStatus, Driver, DriverStatus, FuelKind, MaintenanceRecord, Route, Trip,
    TripStatus, Vehicle, VehicleClass, VehicleStatus,
};
pub use targets::{GenerationTargets, TargetsError};
