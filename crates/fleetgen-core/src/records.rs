use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Vehicle class, which fixes the capacity and fuel-consumption ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    LargeTruck,
    MediumTruck,
    Van,
    Motorcycle,
}

impl VehicleClass {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleClass::LargeTruck => "Camión Grande",
            VehicleClass::MediumTruck => "Camión Mediano",
            VehicleClass::Van => "Van",
            VehicleClass::Motorcycle => "Motocicleta",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelKind {
    Diesel,
    Gasoline,
}

impl FuelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FuelKind::Diesel => "diesel",
            FuelKind::Gasoline => "gasolina",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Maintenance => "maintenance",
        }
    }
}

/// Fleet vehicle. Immutable reference data once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u32,
    pub license_plate: String,
    pub class: VehicleClass,
    pub capacity_kg: u32,
    pub fuel: FuelKind,
    pub acquisition_date: NaiveDate,
    pub status: VehicleStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Active,
    Inactive,
}

impl DriverStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DriverStatus::Active => "active",
            DriverStatus::Inactive => "inactive",
        }
    }
}

/// Driver, consumed by trips as a foreign-key source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: u32,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub phone: String,
    pub hire_date: NaiveDate,
    pub status: DriverStatus,
}

/// City-pair route with road distance and an estimated duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: u32,
    pub code: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub estimated_duration_hours: f64,
    pub toll_cost: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Completed,
    InProgress,
}

impl TripStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TripStatus::Completed => "completed",
            TripStatus::InProgress => "in_progress",
        }
    }
}

/// A single vehicle+driver run over a route.
///
/// `arrival` is `None` while the trip is still in progress; when present
/// it is strictly after `departure`. `total_weight_kg` never exceeds 90%
/// of the vehicle's capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: u32,
    pub vehicle_id: u32,
    pub driver_id: u32,
    pub route_id: u32,
    pub departure: NaiveDateTime,
    pub arrival: Option<NaiveDateTime>,
    pub fuel_consumed_liters: f64,
    pub total_weight_kg: f64,
    pub status: TripStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Delivered,
    Pending,
}

impl DeliveryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Pending => "pending",
        }
    }
}

/// Package delivery scheduled inside its parent trip's time window.
///
/// Package weights of one trip sum to at most 95% of the trip's carried
/// weight; the remaining 5% is deliberate slack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: u32,
    pub trip_id: u32,
    pub tracking_number: String,
    pub customer_name: String,
    pub delivery_address: String,
    pub package_weight_kg: f64,
    pub scheduled: NaiveDateTime,
    pub delivered: Option<NaiveDateTime>,
    pub status: DeliveryStatus,
    pub recipient_signature: bool,
}

/// Maintenance event emitted roughly every 10,000 km of cumulative
/// distance, dated inside the vehicle's observed trip span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: u32,
    pub vehicle_id: u32,
    pub date: NaiveDate,
    pub kind: String,
    pub description: String,
    pub cost: f64,
    pub next_due: NaiveDate,
    pub performed_by: String,
}
