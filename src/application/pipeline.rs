//! Row Pipeline
//!
//! Drives the generation chain over every row, persists each artifact and
//! its summary record, and collects one `RowResult` per row:
//! 1. Resolve, validate, assemble and compose (pure, `generate_row`)
//! 2. Save the artifact through the `DocumentStore`
//! 3. Upsert the summary record through the `SummarySink`
//!
//! Row failures never abort the batch. The stop flag is checked between
//! rows only, so an interrupted run never leaves a partial artifact.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Local, NaiveDateTime};

use crate::domain::entities::{PayloadSet, Row, RowResult, RunReport};
use crate::domain::ports::{artifact_name, DocumentStore, SummaryRecord, SummarySink};
use crate::domain::services::{generate_row, GeneratedRow, ServiceCatalog};
use crate::error::FailureKind;

/// Locator scheme reported for artifacts that were not persisted
pub const DRY_RUN_SCHEME: &str = "dry-run://";

/// Options for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Artifact name prefix
    pub naming_template: String,
    /// Generate without persisting anything
    pub dry_run: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            naming_template: "Gemini_Apps_ID_Data_Port".to_string(),
            dry_run: false,
        }
    }
}

/// Row pipeline with injected store and summary sink
pub struct RowPipeline<'a, D, S>
where
    D: DocumentStore,
    S: SummarySink,
{
    catalog: &'a ServiceCatalog,
    payloads: &'a PayloadSet,
    store: D,
    summary: S,
    options: PipelineOptions,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<'a, D, S> RowPipeline<'a, D, S>
where
    D: DocumentStore,
    S: SummarySink,
{
    pub fn new(
        catalog: &'a ServiceCatalog,
        payloads: &'a PayloadSet,
        store: D,
        summary: S,
        options: PipelineOptions,
    ) -> Self {
        Self {
            catalog,
            payloads,
            store,
            summary,
            options,
            clock: local_now,
        }
    }

    /// Replace the refresh timestamp source
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &D {
        &self.store
    }

    pub fn summary(&self) -> &S {
        &self.summary
    }

    /// Process every row in order
    pub fn run(&mut self, rows: &[Row], stop: &AtomicBool) -> RunReport {
        let mut report = RunReport::default();

        tracing::info!(
            rows = rows.len(),
            store = %self.store.describe(),
            summary = %self.summary.describe(),
            dry_run = self.options.dry_run,
            "starting run"
        );

        for row in rows {
            if stop.load(Ordering::SeqCst) {
                tracing::warn!(
                    processed = report.results.len(),
                    remaining = rows.len() - report.results.len(),
                    "interrupted; stopping before next row"
                );
                report.interrupted = true;
                break;
            }
            report.results.push(self.process(row));
        }

        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "run finished"
        );
        report
    }

    /// Process a single row
    pub fn process(&mut self, row: &Row) -> RowResult {
        let generated = match generate_row(row, self.catalog, self.payloads) {
            Ok(generated) => generated,
            Err(e) => {
                tracing::warn!(row = row.index(), task_id = row.task_id(), kind = %e.kind(), "{}", e);
                return RowResult::from_generation_error(row.index(), row.task_id(), &e);
            }
        };

        let name = artifact_name(&self.options.naming_template, row.task_id());
        let hash = match generated.artifact.content_hash() {
            Ok(hash) => hash,
            Err(e) => return self.persistence_failure(row, format!("failed to render {}: {}", name, e)),
        };

        if self.options.dry_run {
            let locator = format!("{}{}", DRY_RUN_SCHEME, name);
            tracing::info!(task_id = row.task_id(), %locator, "generated (dry run)");
            return RowResult::success(row.index(), row.task_id(), name, locator, &hash);
        }

        let locator = match self.store.save(&name, &generated.artifact) {
            Ok(locator) => locator,
            Err(e) => return self.persistence_failure(row, e.to_string()),
        };

        let record = self.summary_record(row, &generated, &locator);
        if let Err(e) = self.summary.upsert(record) {
            return self.persistence_failure(
                row,
                format!("notebook saved to {} but summary update failed: {}", locator, e),
            );
        }

        tracing::info!(
            task_id = row.task_id(),
            services = %generated.services.display(),
            %locator,
            "generated notebook"
        );
        RowResult::success(row.index(), row.task_id(), name, locator, &hash)
    }

    fn summary_record(&self, row: &Row, generated: &GeneratedRow, locator: &str) -> SummaryRecord {
        let now = (self.clock)();
        SummaryRecord {
            task_id: row.task_id().to_string(),
            fields: row.fields().to_vec(),
            services_required: generated.services.display(),
            initial_db_fields_used: generated.fields_display(),
            locator: locator.to_string(),
            refresh_date: now.format("%Y-%m-%d").to_string(),
            refresh_time: now.format("%H:%M:%S").to_string(),
        }
    }

    fn persistence_failure(&self, row: &Row, message: String) -> RowResult {
        tracing::error!(row = row.index(), task_id = row.task_id(), "{}", message);
        RowResult::failure(row.index(), row.task_id(), FailureKind::Persistence, message)
    }
}
