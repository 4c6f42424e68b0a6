use casefile::testing::sample_case;
use casefile::CaseEnvelope;
use casestore::{CaseStore, InMemoryCaseStore, SqliteCaseStore, StoreError};

fn sealed(id: &str) -> CaseEnvelope {
    CaseEnvelope::seal(sample_case(id)).unwrap()
}

async fn exercise_round_trip(store: &dyn CaseStore) {
    let env = sealed("CASE-aaaa0001");
    store.put("CASE-aaaa0001", &env).await.unwrap();

    let back = store.get("CASE-aaaa0001").await.unwrap().expect("case present");
    assert_eq!(back, env);
    assert_eq!(
        serde_json::to_value(&back.case).unwrap(),
        serde_json::to_value(&env.case).unwrap()
    );
}

async fn exercise_delete(store: &dyn CaseStore) {
    let env = sealed("CASE-aaaa0002");
    store.put("CASE-aaaa0002", &env).await.unwrap();

    assert!(store.delete("CASE-aaaa0002").await.unwrap());
    assert!(store.get("CASE-aaaa0002").await.unwrap().is_none());

    // second delete is a no-op, not an error
    assert!(!store.delete("CASE-aaaa0002").await.unwrap());
}

async fn exercise_list_order(store: &dyn CaseStore) {
    for id in ["CASE-0000000a", "CASE-0000000b", "CASE-0000000c"] {
        store.put(id, &sealed(id)).await.unwrap();
    }
    let ids: Vec<String> = store
        .list()
        .await
        .unwrap()
        .iter()
        .map(|c| c.case_id().to_string())
        .collect();
    assert_eq!(ids, vec!["CASE-0000000c", "CASE-0000000b", "CASE-0000000a"]);

    // overwrite moves a case to the front
    let mut case = sample_case("CASE-0000000a");
    case.executive_summary = "Updated after re-analysis.".to_string();
    store
        .put("CASE-0000000a", &CaseEnvelope::seal(case).unwrap())
        .await
        .unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].case_id(), "CASE-0000000a");
    assert_eq!(listed[0].envelope.memory.summary, "Updated after re-analysis.");
}

async fn exercise_id_mismatch(store: &dyn CaseStore) {
    let env = sealed("CASE-bbbb0001");
    let err = store.put("CASE-other", &env).await.unwrap_err();
    assert!(matches!(err, StoreError::IdMismatch { .. }));
}

#[tokio::test]
async fn test_sqlite_round_trip() {
    let store = SqliteCaseStore::in_memory().await.unwrap();
    exercise_round_trip(&store).await;
}

#[tokio::test]
async fn test_sqlite_delete_then_get() {
    let store = SqliteCaseStore::in_memory().await.unwrap();
    exercise_delete(&store).await;
}

#[tokio::test]
async fn test_sqlite_list_most_recent_first() {
    let store = SqliteCaseStore::in_memory().await.unwrap();
    exercise_list_order(&store).await;
}

#[tokio::test]
async fn test_sqlite_rejects_id_mismatch() {
    let store = SqliteCaseStore::in_memory().await.unwrap();
    exercise_id_mismatch(&store).await;
}

#[tokio::test]
async fn test_sqlite_missing_case_is_none() {
    let store = SqliteCaseStore::in_memory().await.unwrap();
    store.ping().await.unwrap();
    assert!(store.get("CASE-nope").await.unwrap().is_none());
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sqlite_corrupt_row_skipped() {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SqliteCaseStore::from_pool(pool.clone()).await.unwrap();
    store.put("CASE-good", &sealed("CASE-good")).await.unwrap();

    sqlx::query("INSERT INTO cases (case_id, schema_version, state, updated_at) VALUES ('CASE-bad', 1, '{oops', 0)")
        .execute(&pool)
        .await
        .unwrap();

    let listed: Vec<String> = store
        .list()
        .await
        .unwrap()
        .iter()
        .map(|c| c.case_id().to_string())
        .collect();
    assert_eq!(listed, vec!["CASE-good"]);

    let err = store.get("CASE-bad").await.unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { ref case_id, .. } if case_id == "CASE-bad"));
}

#[tokio::test]
async fn test_sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("cases.db").display());

    let env = sealed("CASE-cccc0001");
    {
        let store = SqliteCaseStore::connect(&url).await.unwrap();
        store.put("CASE-cccc0001", &env).await.unwrap();
        store.close().await;
    }

    let reopened = SqliteCaseStore::connect(&url).await.unwrap();
    assert_eq!(reopened.get("CASE-cccc0001").await.unwrap(), Some(env));
}

#[tokio::test]
async fn test_in_memory_round_trip() {
    exercise_round_trip(&InMemoryCaseStore::new()).await;
}

#[tokio::test]
async fn test_in_memory_delete_then_get() {
    exercise_delete(&InMemoryCaseStore::new()).await;
}

#[tokio::test]
async fn test_in_memory_list_most_recent_first() {
    let store = InMemoryCaseStore::new();
    exercise_list_order(&store).await;
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_in_memory_rejects_id_mismatch() {
    exercise_id_mismatch(&InMemoryCaseStore::new()).await;
}
