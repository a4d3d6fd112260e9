use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use fleetgen_core::records::{Delivery, Driver, MaintenanceRecord, Route, Trip, Vehicle};

use crate::validate::ValidationFinding;

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory where run artifacts are written.
    pub out_dir: PathBuf,
    /// Seed of the run's random context; fully determines the output.
    pub seed: u64,
    /// The run's notion of "now": trips end their history window here and
    /// completion status is judged against it. Fixed rather than wall
    /// clock so identical seeds give byte-identical tables.
    pub reference: NaiveDateTime,
    /// Rows per flushed CSV batch.
    pub batch_rows: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("out"),
            seed: 42,
            reference: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap_or_default()
                .and_hms_opt(12, 0, 0)
                .unwrap_or_default(),
            batch_rows: 2_000,
        }
    }
}

/// All generated tables of one run, immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub routes: Vec<Route>,
    pub trips: Vec<Trip>,
    pub deliveries: Vec<Delivery>,
    pub maintenance: Vec<MaintenanceRecord>,
}

/// Summary of one generated table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub rows_requested: u64,
    pub rows_generated: u64,
}

/// Report for a generation run, written alongside the CSVs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub seed: u64,
    pub tables: Vec<TableReport>,
    pub total_rows: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
    pub validations_passed: bool,
    pub findings: Vec<ValidationFinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunReport {
    pub fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            seed,
            tables: Vec::new(),
            total_rows: 0,
            bytes_written: 0,
            duration_ms: 0,
            validations_passed: false,
            findings: Vec::new(),
            error: None,
        }
    }

    pub fn record_table(&mut self, table: &str, rows_requested: u64, rows_generated: u64) {
        self.tables.push(TableReport {
            table: table.to_string(),
            rows_requested,
            rows_generated,
        });
        self.total_rows += rows_generated;
    }
}
