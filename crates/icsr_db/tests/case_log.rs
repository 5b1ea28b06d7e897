use icsr_core::CaseRecord;
use icsr_db::{rebuild_database, CaseRepository, NewCaseEntry};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

async fn memory_pool() -> SqlitePool {
    // One connection: every in-memory connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    rebuild_database(&pool).await.unwrap();
    pool
}

fn entry(patient: &str, drug: &str, reaction: &str) -> NewCaseEntry {
    NewCaseEntry { patient: patient.into(), drug: drug.into(), reaction: reaction.into() }
}

#[tokio::test]
async fn cases_are_appended_in_order() {
    let repo = CaseRepository::new(memory_pool().await);

    let first = repo.record_case(&entry("P-001", "DrugX", "Nausea")).await.unwrap();
    let second = repo.record_case(&entry("P-002", "DrugY", "Rash")).await.unwrap();
    assert!(second > first);

    let rows = repo.list_cases().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, first);
    assert_eq!(rows[0].patient, "P-001");
    assert_eq!(rows[1].reaction, "Rash");
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn rebuild_is_idempotent_and_keeps_rows() {
    let pool = memory_pool().await;
    let repo = CaseRepository::new(pool.clone());
    repo.record_case(&entry("P-001", "DrugX", "Nausea")).await.unwrap();

    rebuild_database(&pool).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn entry_is_taken_from_the_record() {
    let mut record = CaseRecord::default();
    record.patient.identifier = " P-007 ".into();
    record.suspected_drug.name = "DrugX".into();
    record.adverse_event.verbatim_text = "Headache".into();

    let repo = CaseRepository::new(memory_pool().await);
    repo.record_case(&NewCaseEntry::from_record(&record)).await.unwrap();

    let rows = repo.list_cases().await.unwrap();
    assert_eq!(rows[0].patient, "P-007");
    assert_eq!(rows[0].drug, "DrugX");
    assert_eq!(rows[0].reaction, "Headache");
}
