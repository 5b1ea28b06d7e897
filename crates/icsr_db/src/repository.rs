use icsr_core::CaseRecord;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::Result;

/// The slice of a submitted case that goes into the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCaseEntry {
    pub patient: String,
    pub drug: String,
    pub reaction: String,
}

impl NewCaseEntry {
    pub fn from_record(record: &CaseRecord) -> Self {
        Self {
            patient: record.patient.identifier.trim().to_string(),
            drug: record.suspected_drug.name.trim().to_string(),
            reaction: record.adverse_event.verbatim_text.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CaseLogRow {
    pub id: i64,
    pub patient: String,
    pub drug: String,
    pub reaction: String,
}

/// Append-only log of submitted cases.
pub struct CaseRepository {
    pool: SqlitePool,
}

impl CaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Appends one case and returns its row id.
    pub async fn record_case(&self, entry: &NewCaseEntry) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO cases (patient, drug, reaction)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&entry.patient)
        .bind(&entry.drug)
        .bind(&entry.reaction)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, "case logged");
        Ok(id)
    }

    /// All logged cases, oldest first.
    pub async fn list_cases(&self) -> Result<Vec<CaseLogRow>> {
        let rows = sqlx::query_as::<_, CaseLogRow>("SELECT id, patient, drug, reaction FROM cases ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cases")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
