//! WASM-target tests for nova-platform (Node.js runtime).
//!
//! Tests MemoryStorage, backend selection and URL building under
//! wasm32-unknown-unknown via `wasm-pack test --node`.
//!
//! localStorage and location hash need a browser and are not covered here.

use wasm_bindgen_test::*;

use nova_core::ports::{HttpRequest, StoragePort};
use nova_platform::http::GlooHttp;
use nova_platform::storage::{auto_detect_storage, MemoryStorage};
use nova_types::config::{ApiConfig, StorageBackendType, StorageConfig};
use serde_json::json;

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn memory_storage_backend_name() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.backend_name(), "memory");
    assert!(storage.is_empty());
}

#[wasm_bindgen_test]
async fn memory_storage_get_missing() {
    let storage = MemoryStorage::new();
    let result = storage.get("nonexistent").await.unwrap();
    assert!(result.is_none());
}

#[wasm_bindgen_test]
async fn memory_storage_set_and_get() {
    let storage = MemoryStorage::new();
    storage.set("token", b"abc").await.unwrap();
    let result = storage.get("token").await.unwrap();
    assert_eq!(result, Some(b"abc".to_vec()));
    assert_eq!(storage.len(), 1);
}

#[wasm_bindgen_test]
async fn memory_storage_overwrite() {
    let storage = MemoryStorage::new();
    storage.set_text("user", "{\"id\":1}").await.unwrap();
    storage.set_text("user", "{\"id\":2}").await.unwrap();
    let result = storage.get_text("user").await.unwrap();
    assert_eq!(result.as_deref(), Some("{\"id\":2}"));
}

#[wasm_bindgen_test]
async fn memory_storage_delete() {
    let storage = MemoryStorage::new();
    storage.set("token", b"abc").await.unwrap();
    storage.delete("token").await.unwrap();
    assert!(!storage.exists("token").await.unwrap());
}

#[wasm_bindgen_test]
async fn memory_storage_delete_nonexistent() {
    let storage = MemoryStorage::new();
    storage.delete("nonexistent").await.unwrap();
}

// ─── Backend selection Tests ─────────────────────────────

#[wasm_bindgen_test]
fn configured_memory_backend() {
    let config = StorageConfig {
        backend: StorageBackendType::Memory,
    };
    assert_eq!(auto_detect_storage(&config).backend_name(), "memory");
}

#[wasm_bindgen_test]
fn auto_falls_back_to_memory_without_window() {
    let storage = auto_detect_storage(&StorageConfig::default());
    assert_eq!(storage.backend_name(), "memory");
}

// ─── GlooHttp Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn endpoint_joins_base_url() {
    let http = GlooHttp::new(ApiConfig {
        base_url: "http://localhost:8080/api/".to_string(),
    });
    let req = HttpRequest::post("/login", json!({}));
    assert_eq!(http.endpoint(&req), "http://localhost:8080/api/login");
}

#[wasm_bindgen_test]
fn endpoint_encodes_query() {
    let http = GlooHttp::new(ApiConfig::default());
    let req = HttpRequest::get("/goals")
        .with_query("userId", 7)
        .with_query("q", "a b&c");
    assert_eq!(
        http.endpoint(&req),
        "http://localhost:8080/api/goals?userId=7&q=a%20b%26c"
    );
}
