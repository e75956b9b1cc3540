//! WASM-target tests for nova-core.
//!
//! Runs EventBus, normalization, AchievementEvaluator and SessionManager
//! tests under wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use nova_core::achievements::AchievementEvaluator;
use nova_core::event_bus::EventBus;
use nova_core::normalize::*;
use nova_core::ports::*;
use nova_core::session::{SessionManager, TOKEN_KEY, USER_KEY};
use nova_types::event::{Route, SyncEvent};
use nova_types::goal::*;

use async_trait::async_trait;
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// ─── EventBus Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_new_is_empty() {
    let bus = EventBus::new();
    assert!(!bus.has_pending());
    assert!(bus.drain().is_empty());
}

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(SyncEvent::GoalsReplaced { count: 3 });
    bus.emit(SyncEvent::SessionExpired);
    assert_eq!(bus.drain().len(), 2);
    assert!(!bus.has_pending());
}

// ─── Normalization Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn credential_shapes() {
    assert_eq!(
        extract_credential(&json!({ "token": { "token": "abc" } })),
        CredentialLookup::Found("abc".to_string())
    );
    assert_eq!(
        extract_credential(&json!({ "accessToken": "at" })),
        CredentialLookup::Found("at".to_string())
    );
    assert_eq!(extract_credential(&json!({})), CredentialLookup::NotFound);
}

#[wasm_bindgen_test]
fn goal_envelopes() {
    let records = json!([{ "id": 4, "title": "Ship it", "status": "done" }]);
    let bare = goals_from_response(&records).unwrap();
    let paged = goals_from_response(&json!({ "content": records.clone() })).unwrap();
    let hal = goals_from_response(&json!({ "_embedded": { "goalList": records } })).unwrap();
    assert_eq!(bare, paged);
    assert_eq!(bare, hal);
    assert_eq!(bare[0].status, GoalStatus::Completed);
    assert_eq!(bare[0].category, GoalCategory::Career);
}

// ─── AchievementEvaluator Tests ──────────────────────────

#[wasm_bindgen_test]
fn milestone_expire_only_matching_seq() {
    let evaluator = AchievementEvaluator::new(EventBus::new());
    let goal = goals_from_response(&json!([{ "id": 1, "status": "completed" }]))
        .unwrap()
        .remove(0);
    let first = evaluator.goal_completed(&goal);
    let second = evaluator.goal_completed(&goal);
    assert!(!evaluator.expire(first));
    assert!(evaluator.expire(second));
    assert!(evaluator.active().is_none());
}

// ─── SessionManager Tests ────────────────────────────────

struct MockHttp;

#[async_trait(?Send)]
impl HttpPort for MockHttp {
    async fn send(&self, req: HttpRequest) -> nova_types::Result<HttpResponse> {
        match req.path.as_str() {
            "/login" => Ok(HttpResponse::json_body(
                200,
                &json!({ "token": { "token": "abc" }, "id": 7, "name": "Ana" }),
            )),
            _ => Ok(HttpResponse::new(401, "")),
        }
    }
}

struct MockStorage {
    data: RefCell<HashMap<String, Vec<u8>>>,
}

#[async_trait(?Send)]
impl StoragePort for MockStorage {
    async fn get(&self, key: &str) -> nova_types::Result<Option<Vec<u8>>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> nova_types::Result<()> {
        self.data.borrow_mut().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> nova_types::Result<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct MockNavigator {
    route: RefCell<Route>,
}

impl NavigatorPort for MockNavigator {
    fn navigate(&self, route: Route) {
        *self.route.borrow_mut() = route;
    }

    fn current(&self) -> Route {
        *self.route.borrow()
    }
}

fn session() -> (SessionManager, Rc<MockStorage>) {
    let storage = Rc::new(MockStorage {
        data: RefCell::new(HashMap::new()),
    });
    let navigator = Rc::new(MockNavigator {
        route: RefCell::new(Route::Dashboard),
    });
    let manager = SessionManager::new(Rc::new(MockHttp), storage.clone(), navigator, EventBus::new());
    (manager, storage)
}

#[wasm_bindgen_test]
async fn session_login_persists_credential() {
    let (manager, storage) = session();
    manager.login("a@x.com", "pw").await.unwrap();
    assert_eq!(manager.user_id(), Some(7));
    assert_eq!(storage.get_text(TOKEN_KEY).await.unwrap().as_deref(), Some("abc"));
    assert!(storage.exists(USER_KEY).await.unwrap());
}

#[wasm_bindgen_test]
async fn session_logout_clears_storage() {
    let (manager, storage) = session();
    manager.login("a@x.com", "pw").await.unwrap();
    manager.logout().await;
    assert!(!storage.exists(TOKEN_KEY).await.unwrap());
    assert!(!storage.exists(USER_KEY).await.unwrap());
    assert!(!manager.is_authenticated());
}

#[wasm_bindgen_test]
async fn session_initialize_wipes_bad_snapshot() {
    let (manager, storage) = session();
    storage.set_text(TOKEN_KEY, "abc").await.unwrap();
    storage.set_text(USER_KEY, "{\"id\":0}").await.unwrap();
    manager.initialize().await;
    assert!(!manager.is_loading());
    assert!(!storage.exists(TOKEN_KEY).await.unwrap());
}
