//! Task service tests over a temp-dir SQLite store: validation,
//! normalization, timestamps, and the not-found paths.

use std::sync::Arc;
use std::time::Duration;

use taskd::storage::Storage;
use taskd::tasks::{CreateTask, TaskError, TaskService, UpdateTask};
use tempfile::TempDir;

async fn make_service(dir: &TempDir) -> TaskService {
    let storage = Arc::new(Storage::new(dir.path()).await.unwrap());
    TaskService::new(storage)
}

fn create_input(title: &str) -> CreateTask {
    CreateTask {
        title: Some(title.to_string()),
        description: None,
    }
}

#[tokio::test]
async fn create_defaults_description_and_completed() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let task = service
        .create(create_input("Task with only title"))
        .await
        .unwrap();

    assert_eq!(task.title, "Task with only title");
    assert_eq!(task.description, "");
    assert!(!task.completed);
    assert_eq!(task.created_at, task.updated_at);
}

#[tokio::test]
async fn create_trims_title_and_description() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let task = service
        .create(CreateTask {
            title: Some("  Trimmed Title  ".to_string()),
            description: Some("  some details  ".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(task.title, "Trimmed Title");
    assert_eq!(task.description, "some details");
}

#[tokio::test]
async fn create_rejects_blank_title_and_persists_nothing() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    for input in [
        CreateTask::default(),
        create_input(""),
        create_input("   "),
    ] {
        let err = service.create(input).await.unwrap_err();
        assert!(matches!(err, TaskError::Validation(ref m) if m == "Title is required"));
    }
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_overwrites_fields_and_refreshes_updated_at() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let task = service.create(create_input("Original")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let updated = service
        .update(
            &task.id,
            UpdateTask {
                title: Some("  Renamed  ".to_string()),
                description: Some("details".to_string()),
                completed: Some(true),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.description, "details");
    assert!(updated.completed);
    assert_eq!(updated.created_at, task.created_at);

    let before = chrono::DateTime::parse_from_rfc3339(&task.updated_at).unwrap();
    let after = chrono::DateTime::parse_from_rfc3339(&updated.updated_at).unwrap();
    assert!(after > before);
}

#[tokio::test]
async fn update_retains_completed_when_field_omitted() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let task = service.create(create_input("Keep me done")).await.unwrap();
    let task = service.toggle(&task.id).await.unwrap();
    assert!(task.completed);

    // Omitting `completed` must not reset it.
    let updated = service
        .update(
            &task.id,
            UpdateTask {
                title: Some("Still done".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.completed);

    // Supplying it explicitly overwrites.
    let updated = service
        .update(
            &task.id,
            UpdateTask {
                title: Some("Reopened".to_string()),
                completed: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!updated.completed);
}

#[tokio::test]
async fn update_requires_title() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let task = service.create(create_input("Has a title")).await.unwrap();
    let err = service
        .update(&task.id, UpdateTask::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TaskError::Validation(ref m) if m == "Title is required"));
}

#[tokio::test]
async fn toggle_is_an_involution() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let task = service.create(create_input("Flip me")).await.unwrap();
    let once = service.toggle(&task.id).await.unwrap();
    assert!(once.completed);
    let twice = service.toggle(&task.id).await.unwrap();
    assert!(!twice.completed);
}

#[tokio::test]
async fn toggle_refreshes_updated_at() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let task = service.create(create_input("Flip me")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let toggled = service.toggle(&task.id).await.unwrap();

    let before = chrono::DateTime::parse_from_rfc3339(&task.updated_at).unwrap();
    let after = chrono::DateTime::parse_from_rfc3339(&toggled.updated_at).unwrap();
    assert!(after > before);
}

#[tokio::test]
async fn unknown_id_is_not_found_on_all_four_operations() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;
    let missing = uuid::Uuid::new_v4().to_string();

    assert!(matches!(
        service.get(&missing).await.unwrap_err(),
        TaskError::NotFound
    ));
    assert!(matches!(
        service
            .update(&missing, UpdateTask { title: Some("x".into()), ..Default::default() })
            .await
            .unwrap_err(),
        TaskError::NotFound
    ));
    assert!(matches!(
        service.toggle(&missing).await.unwrap_err(),
        TaskError::NotFound
    ));
    assert!(matches!(
        service.delete(&missing).await.unwrap_err(),
        TaskError::NotFound
    ));
}

#[tokio::test]
async fn update_reports_not_found_before_validating_title() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;
    let missing = uuid::Uuid::new_v4().to_string();

    let err = service
        .update(&missing, UpdateTask::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TaskError::NotFound));
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let task = service.create(create_input("Short-lived")).await.unwrap();
    service.delete(&task.id).await.unwrap();

    assert!(matches!(
        service.get(&task.id).await.unwrap_err(),
        TaskError::NotFound
    ));
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_empty_then_ordered_newest_first() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    assert!(service.list().await.unwrap().is_empty());

    let mut ids = Vec::new();
    for title in ["first", "second", "third"] {
        ids.push(service.create(create_input(title)).await.unwrap().id);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let listed = service.list().await.unwrap();
    assert_eq!(listed.len(), 3);
    let listed_ids: Vec<_> = listed.iter().map(|t| t.id.clone()).collect();
    ids.reverse();
    assert_eq!(listed_ids, ids);
}

#[tokio::test]
async fn malformed_id_is_a_store_error_not_a_miss() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    assert!(matches!(
        service.get("invalid-id").await.unwrap_err(),
        TaskError::Store(_)
    ));
    assert!(matches!(
        service.toggle("invalid-id").await.unwrap_err(),
        TaskError::Store(_)
    ));
}
