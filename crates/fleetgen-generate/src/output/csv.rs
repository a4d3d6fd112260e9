//! Batched CSV persistence with deterministic column order and stable
//! value formatting. This is the run's write-side collaborator: rows are
//! flushed in fixed-size batches, mirroring a paged bulk insert.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use fleetgen_core::records::{Delivery, Driver, MaintenanceRecord, Route, Trip, Vehicle};

use crate::errors::GenerationError;

/// A record type that knows its CSV header and field rendering.
pub trait CsvRecord {
    const TABLE: &'static str;
    const HEADER: &'static [&'static str];

    fn fields(&self) -> Vec<String>;
}

/// Write one table, header first, flushing every `batch_rows` rows.
/// Returns the number of bytes written.
pub fn write_table<R: CsvRecord>(
    path: &Path,
    rows: &[R],
    batch_rows: usize,
) -> Result<u64, GenerationError> {
    let writer = BufWriter::new(File::create(path)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(R::HEADER)?;

    for (index, row) in rows.iter().enumerate() {
        writer.write_record(row.fields())?;
        if batch_rows > 0 && (index + 1) % batch_rows == 0 {
            writer.flush()?;
        }
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}

fn fmt_date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

fn fmt_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn fmt_opt_datetime(value: Option<NaiveDateTime>) -> String {
    value.map(fmt_datetime).unwrap_or_default()
}

fn fmt2(value: f64) -> String {
    format!("{value:.2}")
}

impl CsvRecord for Vehicle {
    const TABLE: &'static str = "vehicles";
    const HEADER: &'static [&'static str] = &[
        "vehicle_id",
        "license_plate",
        "vehicle_type",
        "capacity_kg",
        "fuel_type",
        "acquisition_date",
        "status",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.license_plate.clone(),
            self.class.as_str().to_string(),
            self.capacity_kg.to_string(),
            self.fuel.as_str().to_string(),
            fmt_date(self.acquisition_date),
            self.status.as_str().to_string(),
        ]
    }
}

impl CsvRecord for Driver {
    const TABLE: &'static str = "drivers";
    const HEADER: &'static [&'static str] = &[
        "driver_id",
        "employee_code",
        "first_name",
        "last_name",
        "license_number",
        "license_expiry",
        "phone",
        "hire_date",
        "status",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.employee_code.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.license_number.clone(),
            fmt_date(self.license_expiry),
            self.phone.clone(),
            fmt_date(self.hire_date),
            self.status.as_str().to_string(),
        ]
    }
}

impl CsvRecord for Route {
    const TABLE: &'static str = "routes";
    const HEADER: &'static [&'static str] = &[
        "route_id",
        "route_code",
        "origin_city",
        "destination_city",
        "distance_km",
        "estimated_duration_hours",
        "toll_cost",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.code.clone(),
            self.origin.clone(),
            self.destination.clone(),
            fmt2(self.distance_km),
            fmt2(self.estimated_duration_hours),
            self.toll_cost.to_string(),
        ]
    }
}

impl CsvRecord for Trip {
    const TABLE: &'static str = "trips";
    const HEADER: &'static [&'static str] = &[
        "trip_id",
        "vehicle_id",
        "driver_id",
        "route_id",
        "departure_datetime",
        "arrival_datetime",
        "fuel_consumed_liters",
        "total_weight_kg",
        "status",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.vehicle_id.to_string(),
            self.driver_id.to_string(),
            self.route_id.to_string(),
            fmt_datetime(self.departure),
            fmt_opt_datetime(self.arrival),
            fmt2(self.fuel_consumed_liters),
            fmt2(self.total_weight_kg),
            self.status.as_str().to_string(),
        ]
    }
}

impl CsvRecord for Delivery {
    const TABLE: &'static str = "deliveries";
    const HEADER: &'static [&'static str] = &[
        "delivery_id",
        "trip_id",
        "tracking_number",
        "customer_name",
        "delivery_address",
        "package_weight_kg",
        "scheduled_datetime",
        "delivered_datetime",
        "delivery_status",
        "recipient_signature",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.trip_id.to_string(),
            self.tracking_number.clone(),
            self.customer_name.clone(),
            self.delivery_address.clone(),
            fmt2(self.package_weight_kg),
            fmt_datetime(self.scheduled),
            fmt_opt_datetime(self.delivered),
            self.status.as_str().to_string(),
            self.recipient_signature.to_string(),
        ]
    }
}

impl CsvRecord for MaintenanceRecord {
    const TABLE: &'static str = "maintenance";
    const HEADER: &'static [&'static str] = &[
        "maintenance_id",
        "vehicle_id",
        "maintenance_date",
        "maintenance_type",
        "description",
        "cost",
        "next_maintenance_date",
        "performed_by",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.vehicle_id.to_string(),
            fmt_date(self.date),
            self.kind.clone(),
            self.description.clone(),
            fmt2(self.cost),
            fmt_date(self.next_due),
            self.performed_by.clone(),
        ]
    }
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
