use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use fleetgen_core::GenerationTargets;

use crate::errors::GenerationError;
use crate::maintenance::{vehicle_usage, walk_maintenance};
use crate::model::{Dataset, GenerateOptions, RunReport};
use crate::output::csv::{CsvRecord, write_table};
use crate::rng::RandomContext;
use crate::stages::{deliveries, drivers, routes, trips, vehicles};
use crate::validate::validate_dataset;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub run_dir: PathBuf,
    pub report: RunReport,
    pub dataset: Dataset,
}

/// Entry point: generates every table to its exact target, in dependency
/// order, against one seeded random context.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Run the full pipeline: reference tables, trips, deliveries,
    /// maintenance, then validation. Each table's CSV is written as soon
    /// as the table is complete, so a fatal error leaves no dependent
    /// table on disk. The run report is written on success and failure
    /// alike.
    pub fn run(&self, targets: &GenerationTargets) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        targets.validate()?;

        let run_id = uuid::Uuid::new_v4().to_string();
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%SZ").to_string();
        let run_dir = self.options.out_dir.join(format!("{timestamp}__run_{run_id}"));
        std::fs::create_dir_all(&run_dir)?;

        let mut report = RunReport::new(run_id.clone(), self.options.seed);

        info!(
            run_id = %run_id,
            seed = self.options.seed,
            reference = %self.options.reference,
            total_target = targets.total_rows(),
            "generation started"
        );

        let outcome = self.generate_all(targets, &run_dir, &mut report);

        report.duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(dataset) => {
                let findings = validate_dataset(&dataset);
                report.validations_passed = findings.iter().all(|finding| finding.passed());
                report.findings = findings;

                self.write_report(&run_dir, &report)?;
                info!(
                    run_id = %run_id,
                    total_rows = report.total_rows,
                    bytes_written = report.bytes_written,
                    duration_ms = report.duration_ms,
                    validations_passed = report.validations_passed,
                    "generation completed"
                );
                Ok(GenerationResult {
                    run_dir,
                    report,
                    dataset,
                })
            }
            Err(err) => {
                report.error = Some(err.to_string());
                self.write_report(&run_dir, &report)?;
                warn!(run_id = %run_id, error = %err, "generation aborted");
                Err(err)
            }
        }
    }

    fn generate_all(
        &self,
        targets: &GenerationTargets,
        run_dir: &Path,
        report: &mut RunReport,
    ) -> Result<Dataset, GenerationError> {
        let mut ctx = RandomContext::new(self.options.seed);
        let reference = self.options.reference;
        let mut data = Dataset::default();

        data.vehicles = vehicles::generate(targets.vehicles, reference.date(), &mut ctx);
        self.persist(run_dir, report, targets.vehicles, &data.vehicles)?;

        data.drivers = drivers::generate(targets.drivers, reference.date(), &mut ctx);
        self.persist(run_dir, report, targets.drivers, &data.drivers)?;

        data.routes = routes::generate(targets.routes, &mut ctx);
        self.persist(run_dir, report, targets.routes, &data.routes)?;

        data.trips = trips::generate(
            targets.trips,
            &data.vehicles,
            &data.drivers,
            &data.routes,
            reference,
            &mut ctx,
        )?;
        self.persist(run_dir, report, targets.trips, &data.trips)?;

        data.deliveries = deliveries::generate(
            targets.deliveries,
            &data.trips,
            &data.routes,
            reference,
            &mut ctx,
        )?;
        self.persist(run_dir, report, targets.deliveries, &data.deliveries)?;

        let usage = vehicle_usage(&data.trips, &data.routes);
        data.maintenance = walk_maintenance(&usage, targets.maintenance, &mut ctx);
        self.persist(run_dir, report, targets.maintenance, &data.maintenance)?;

        Ok(data)
    }

    fn persist<R: CsvRecord>(
        &self,
        run_dir: &Path,
        report: &mut RunReport,
        requested: u64,
        rows: &[R],
    ) -> Result<(), GenerationError> {
        let table_start = Instant::now();
        let path = run_dir.join(format!("{}.csv", R::TABLE));
        let bytes = write_table(&path, rows, self.options.batch_rows)?;
        report.bytes_written += bytes;
        report.record_table(R::TABLE, requested, rows.len() as u64);

        info!(
            table = R::TABLE,
            rows_requested = requested,
            rows_generated = rows.len() as u64,
            bytes,
            duration_ms = table_start.elapsed().as_millis() as u64,
            "table generated"
        );
        Ok(())
    }

    fn write_report(&self, run_dir: &Path, report: &RunReport) -> Result<(), GenerationError> {
        let path = run_dir.join("run_report.json");
        std::fs::write(&path, serde_json::to_vec_pretty(report)?)?;
        Ok(())
    }
}
