//! Statement import jobs.
//!
//! Jobs only track status; parsing the uploaded statements is left to the
//! caller, which reports the outcome through `complete_import_job`.

use barrkeh_shared::types::ImportJobId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::state::FinanceState;

/// Statement format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportType {
    /// Bank CSV export.
    BankCsv,
    /// Etsy orders CSV.
    EtsyCsv,
    /// Stripe payouts CSV.
    StripeCsv,
}

/// Job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    /// Waiting for the caller to process it.
    Pending,
    /// Completed without errors.
    Processed,
    /// Completed with errors.
    Failed,
}

/// An import job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportJob {
    /// Unique identifier.
    pub id: ImportJobId,
    /// Statement format.
    #[serde(rename = "type")]
    pub job_type: ImportType,
    /// Status.
    pub status: ImportStatus,
    /// When it was created.
    pub created_at: DateTime<Utc>,
    /// When it completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
    /// Problems found while processing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Human-readable outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl FinanceState {
    /// Creates a pending job.
    pub fn add_import_job(
        &mut self,
        job_type: ImportType,
        summary: Option<String>,
        now: DateTime<Utc>,
    ) -> ImportJob {
        let job = ImportJob {
            id: ImportJobId::new(),
            job_type,
            status: ImportStatus::Pending,
            created_at: now,
            processed_at: None,
            errors: None,
            summary,
        };
        self.import_jobs.push(job.clone());
        job
    }

    /// Completes a pending job: `Failed` when `errors` is non-empty,
    /// `Processed` otherwise.
    pub fn complete_import_job(
        &mut self,
        id: ImportJobId,
        summary: Option<String>,
        errors: Vec<String>,
        now: DateTime<Utc>,
    ) -> FinanceResult<ImportJob> {
        let job = self
            .import_jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| FinanceError::not_found("import job", id))?;
        if job.status != ImportStatus::Pending {
            return Err(FinanceError::InvalidTransition {
                entity: "import job",
                from: format!("{:?}", job.status).to_lowercase(),
                to: "completed".to_string(),
            });
        }

        job.status = if errors.is_empty() {
            ImportStatus::Processed
        } else {
            ImportStatus::Failed
        };
        job.processed_at = Some(now);
        if summary.is_some() {
            job.summary = summary;
        }
        job.errors = (!errors.is_empty()).then_some(errors);
        Ok(job.clone())
    }
}
