//! Exercises `HttpRemoteSync` against a live instance of the ingest routes.

use api_lib::adapters::HttpRemoteSync;
use api_lib::web::{api_router, state::AppState};
use axum::Router;
use emotion_assessment_core::{
    AssessmentEngine, InMemoryStore, InputType, RemoteSync, StorageRouter, SyncError,
};
use pretty_assertions::assert_eq;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Starts the API backed by a fresh in-memory store and returns the store and base URL.
async fn remote() -> (Arc<InMemoryStore>, String) {
    let store = Arc::new(InMemoryStore::default());
    let sync = Arc::new(
        HttpRemoteSync::new("http://127.0.0.1:9".to_string(), Duration::from_secs(1)).unwrap(),
    );
    let app_state = Arc::new(AppState {
        engine: Arc::new(AssessmentEngine::default()),
        router: StorageRouter::new(store.clone(), sync),
        users: store.clone(),
        archive: store.clone(),
    });
    let addr = serve(api_router(app_state)).await;
    (store, format!("http://{}", addr))
}

#[tokio::test]
async fn test_full_upload_reaches_the_remote_archive() {
    let (store, base_url) = remote().await;
    let sync = HttpRemoteSync::new(base_url, Duration::from_secs(5)).unwrap();
    let assessment =
        AssessmentEngine::default().assess("I feel stressed", InputType::Voice, Uuid::new_v4());

    sync.upload_full(&assessment).await.unwrap();

    let received = store.received_records().await;
    assert_eq!(received, vec![assessment]);
}

#[tokio::test]
async fn test_anonymized_upload_reaches_the_remote_archive() {
    let (store, base_url) = remote().await;
    let sync = HttpRemoteSync::new(base_url, Duration::from_secs(5)).unwrap();
    let assessment =
        AssessmentEngine::default().assess("so worried", InputType::Text, Uuid::new_v4());

    sync.upload_anonymized(&assessment.anonymize()).await.unwrap();

    assert_eq!(store.anonymous_records().await, vec![assessment.anonymize()]);
    assert!(store.received_records().await.is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let addr = serve(Router::new()).await;
    let sync = HttpRemoteSync::new(format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    let assessment = AssessmentEngine::default().assess("fine", InputType::Text, Uuid::new_v4());

    let err = sync.upload_full(&assessment).await.unwrap_err();
    assert_eq!(err, SyncError::Status(404));
}

#[tokio::test]
async fn test_unreachable_remote_is_a_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sync = HttpRemoteSync::new(format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let assessment = AssessmentEngine::default().assess("fine", InputType::Text, Uuid::new_v4());

    let err = sync
        .upload_anonymized(&assessment.anonymize())
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Transport(_)), "got {:?}", err);
}
