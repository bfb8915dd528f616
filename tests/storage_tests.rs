//! SeaOrmStorage tests over a temporary SQLite database

use std::sync::Arc;
use std::time::Duration;

use geoabbr::errors::AbbrError;
use geoabbr::services::resolve;
use geoabbr::storage::backend::SeaOrmStorage;
use geoabbr::storage::{EntryDraft, EntryStore};
use tempfile::TempDir;

// =============================================================================
// Test Setup
// =============================================================================

async fn create_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("storage_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");
    (storage, temp_dir)
}

/// created_at 精度有限，需要确定顺序时稍作等待
async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_insert_normalizes_and_assigns_id() {
    let (storage, _dir) = create_storage().await;

    let entry = storage
        .insert(EntryDraft::new(" gsdj ", " 公示地价 "))
        .await
        .unwrap();
    assert_eq!(entry.abbreviation, "GSDJ");
    assert_eq!(entry.full_name, "公示地价");
    assert_eq!(entry.copy_count, 0);
    assert_eq!(entry.id.len(), 36);
    assert_eq!(entry.created_at, entry.updated_at);

    let fetched = storage.get(&entry.id).await.unwrap().unwrap();
    assert_eq!(fetched.abbreviation, "GSDJ");
}

#[tokio::test]
async fn test_search_case_insensitive() {
    let (storage, _dir) = create_storage().await;
    storage.insert(EntryDraft::new("gsdj", "X")).await.unwrap();

    let hits = storage.search("GSDJ", None).await.unwrap();
    assert_eq!(hits.len(), 1);
    let hits = storage.search("sd", None).await.unwrap();
    assert_eq!(hits.len(), 1);
    let hits = storage.search("x", None).await.unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn test_search_case_insensitive_non_ascii() {
    let (storage, _dir) = create_storage().await;
    let entry = storage
        .insert(EntryDraft::new("gsdé", "Émile Zone"))
        .await
        .unwrap();
    assert_eq!(entry.abbreviation, "GSDÉ");

    for keyword in ["gsdé", "GSDÉ", "émile", "ÉMILE ZONE"] {
        let hits = storage.search(keyword, None).await.unwrap();
        assert_eq!(hits.len(), 1, "keyword {:?}", keyword);
    }

    storage
        .insert(EntryDraft::new("зем", "Земельный участок"))
        .await
        .unwrap();
    assert_eq!(storage.search("ЗЕМЕЛЬНЫЙ", None).await.unwrap().len(), 1);
    assert_eq!(storage.search("участок", None).await.unwrap().len(), 1);

    let res = resolve(&storage, "gsdé,земельный").await.unwrap();
    assert_eq!(res.matches.len(), 2);
    assert!(res.unmatched.is_empty());
}

#[tokio::test]
async fn test_search_columns_follow_update() {
    let (storage, _dir) = create_storage().await;
    let entry = storage
        .insert(EntryDraft::new("OLD", "旧名称"))
        .await
        .unwrap();

    storage
        .update(&entry.id, EntryDraft::new("ñandú", "Ñandú Área"))
        .await
        .unwrap();

    assert!(storage.search("old", None).await.unwrap().is_empty());
    assert_eq!(storage.search("ÑANDÚ", None).await.unwrap().len(), 1);
    assert_eq!(storage.search("área", None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_full_name_and_order() {
    let (storage, _dir) = create_storage().await;
    let first = storage
        .insert(EntryDraft::new("GSDJ", "公示地价"))
        .await
        .unwrap();
    tick().await;
    let second = storage
        .insert(EntryDraft::new("JZDJ", "基准地价"))
        .await
        .unwrap();

    let hits = storage.search("地价", None).await.unwrap();
    let ids: Vec<_> = hits.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);

    let limited = storage.search("地价", Some(1)).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, second.id);
}

#[tokio::test]
async fn test_search_like_wildcards_are_literal() {
    let (storage, _dir) = create_storage().await;
    storage
        .insert(EntryDraft::new("A_B", "百分之100%"))
        .await
        .unwrap();
    storage.insert(EntryDraft::new("AXB", "百分之1000")).await.unwrap();

    let hits = storage.search("a_b", None).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].abbreviation, "A_B");

    let hits = storage.search("100%", None).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].abbreviation, "A_B");

    assert!(storage.search("%", None).await.unwrap().len() == 1);
}

#[tokio::test]
async fn test_update_and_not_found() {
    let (storage, _dir) = create_storage().await;
    let entry = storage
        .insert(EntryDraft::new("GHGH", "规划规划"))
        .await
        .unwrap();
    tick().await;

    let updated = storage
        .update(&entry.id, EntryDraft::new("ghgh2", "规划"))
        .await
        .unwrap();
    assert_eq!(updated.abbreviation, "GHGH2");
    assert_eq!(updated.full_name, "规划");
    assert_eq!(updated.created_at, entry.created_at);
    assert!(updated.updated_at >= entry.updated_at);

    storage.delete(&entry.id).await.unwrap();
    let err = storage
        .update(&entry.id, EntryDraft::new("X", "Y"))
        .await
        .unwrap_err();
    assert!(matches!(err, AbbrError::NotFound(_)));

    let err = storage.delete(&entry.id).await.unwrap_err();
    assert!(matches!(err, AbbrError::NotFound(_)));
    assert!(storage.get(&entry.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_increments() {
    let (storage, _dir) = create_storage().await;
    let storage = Arc::new(storage);
    let entry = storage
        .insert(EntryDraft::new("ZRZY", "自然资源"))
        .await
        .unwrap();

    let a = {
        let storage = storage.clone();
        let id = entry.id.clone();
        tokio::spawn(async move { storage.increment_copy_count(&id).await })
    };
    let b = {
        let storage = storage.clone();
        let id = entry.id.clone();
        tokio::spawn(async move { storage.increment_copy_count(&id).await })
    };
    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    let fetched = storage.get(&entry.id).await.unwrap().unwrap();
    assert_eq!(fetched.copy_count, 2);
}

#[tokio::test]
async fn test_increment_unknown_id() {
    let (storage, _dir) = create_storage().await;
    let err = storage.increment_copy_count("missing").await.unwrap_err();
    assert!(matches!(err, AbbrError::NotFound(_)));
}

#[tokio::test]
async fn test_top_by_copy_count_ordering() {
    let (storage, _dir) = create_storage().await;
    let old = storage.insert(EntryDraft::new("OLD", "旧")).await.unwrap();
    tick().await;
    let new = storage.insert(EntryDraft::new("NEW", "新")).await.unwrap();
    tick().await;
    let hot = storage.insert(EntryDraft::new("HOT", "热")).await.unwrap();

    for _ in 0..3 {
        storage.increment_copy_count(&hot.id).await.unwrap();
    }
    storage.increment_copy_count(&old.id).await.unwrap();
    storage.increment_copy_count(&new.id).await.unwrap();

    let top = storage.top_by_copy_count(10).await.unwrap();
    let abbrs: Vec<_> = top.iter().map(|e| e.abbreviation.as_str()).collect();
    // 计数相同时较新的在前
    assert_eq!(abbrs, vec!["HOT", "NEW", "OLD"]);

    assert_eq!(storage.top_by_copy_count(1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_page_filtered_total() {
    let (storage, _dir) = create_storage().await;
    for i in 0..7 {
        storage
            .insert(EntryDraft::new(format!("TD{}", i), format!("土地{}", i)))
            .await
            .unwrap();
        tick().await;
    }
    for i in 0..5 {
        storage
            .insert(EntryDraft::new(format!("GH{}", i), format!("规划{}", i)))
            .await
            .unwrap();
    }

    let page = storage.page(1, 3, Some("土地")).await.unwrap();
    assert_eq!(page.total, 7);
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.items[0].abbreviation, "TD6");

    let last = storage.page(3, 3, Some("土地")).await.unwrap();
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].abbreviation, "TD0");

    let all = storage.page(1, 100, None).await.unwrap();
    assert_eq!(all.total, 12);
    assert_eq!(all.items.len(), 12);

    assert!(matches!(
        storage.page(0, 10, None).await,
        Err(AbbrError::Validation(_))
    ));
}

#[tokio::test]
async fn test_page_total_refreshes_after_insert() {
    let (storage, _dir) = create_storage().await;
    storage.insert(EntryDraft::new("A", "一")).await.unwrap();
    assert_eq!(storage.page(1, 10, None).await.unwrap().total, 1);

    storage.insert(EntryDraft::new("B", "二")).await.unwrap();
    assert_eq!(storage.page(1, 10, None).await.unwrap().total, 2);
}

#[tokio::test]
async fn test_recent_and_count() {
    let (storage, _dir) = create_storage().await;
    for i in 0..12 {
        storage
            .insert(EntryDraft::new(format!("R{}", i), "x"))
            .await
            .unwrap();
        tick().await;
    }

    assert_eq!(storage.count().await.unwrap(), 12);
    let recent = storage.recent(10).await.unwrap();
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].abbreviation, "R11");
    assert_eq!(storage.backend_config().storage_type, "sqlite");
}
