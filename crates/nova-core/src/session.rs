//! Session manager: the single writer of the signed-in user.
//!
//! Owns the in-memory profile and bearer credential and keeps them in step
//! with the persisted copy. Storage is always written before memory, so a
//! failed write never leaves the two disagreeing.

use std::cell::RefCell;
use std::rc::Rc;
use futures::future::join_all;
use serde_json::json;
use nova_types::{
    NovaError, Result,
    event::{Route, SyncEvent},
    user::{ProfileUpdate, Skill, UserProfile},
};
use crate::api::send_with_bearer;
use crate::event_bus::EventBus;
use crate::normalize::{self, CredentialLookup};
use crate::ports::{HttpPort, HttpRequest, NavigatorPort, StoragePort};

/// Storage key of the bearer credential
pub const TOKEN_KEY: &str = "token";
/// Storage key of the JSON profile snapshot
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone)]
struct SessionState {
    user: Option<UserProfile>,
    token: Option<String>,
    loading: bool,
}

pub struct SessionManager {
    http: Rc<dyn HttpPort>,
    storage: Rc<dyn StoragePort>,
    navigator: Rc<dyn NavigatorPort>,
    event_bus: EventBus,
    state: RefCell<SessionState>,
}

impl SessionManager {
    pub fn new(
        http: Rc<dyn HttpPort>,
        storage: Rc<dyn StoragePort>,
        navigator: Rc<dyn NavigatorPort>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            http,
            storage,
            navigator,
            event_bus,
            state: RefCell::new(SessionState {
                user: None,
                token: None,
                loading: true,
            }),
        }
    }

    // ─── Reads ───────────────────────────────────────────────

    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.borrow().user.clone()
    }

    pub fn user_id(&self) -> Option<u64> {
        self.state.borrow().user.as_ref().map(|u| u.id)
    }

    pub fn bearer(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        let state = self.state.borrow();
        state.user.is_some() && state.token.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    // ─── Lifecycle ───────────────────────────────────────────

    /// Restore the persisted session, or wipe it if it is not well-formed.
    pub async fn initialize(&self) {
        let restored = match self.read_persisted().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Could not read persisted session: {}", e);
                None
            }
        };

        match restored {
            Some((token, user)) => {
                log::info!("Session restored for user {}", user.id);
                let mut state = self.state.borrow_mut();
                state.token = Some(token);
                state.user = Some(user);
            }
            None => self.clear_persisted().await,
        }

        self.state.borrow_mut().loading = false;
        self.event_bus.emit(SyncEvent::SessionChanged {
            user: self.current_user(),
        });
    }

    async fn read_persisted(&self) -> Result<Option<(String, UserProfile)>> {
        let token = self.storage.get_text(TOKEN_KEY).await?;
        let user = self.storage.get_text(USER_KEY).await?;
        Ok(validate_snapshot(token, user))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let body = json!({ "email": email, "password": password });
        let response = self.http.send(HttpRequest::post("/login", body)).await?;
        if !response.ok() {
            return Err(NovaError::Auth(
                normalize::backend_message(&response.body)
                    .unwrap_or_else(|| "Invalid credentials".to_string()),
            ));
        }

        let data = response
            .json()
            .map_err(|_| NovaError::Auth("Malformed auth response".to_string()))?;
        let token = match normalize::extract_credential(&data) {
            CredentialLookup::Found(token) => token,
            CredentialLookup::NotFound => {
                return Err(NovaError::Auth("Auth response carried no credential".to_string()))
            }
        };
        let user = normalize::profile_from_auth(&data)
            .ok_or_else(|| NovaError::Auth("Auth response carried no user id".to_string()))?;

        self.commit(token, user).await?;
        log::info!("Signed in as {}", email);
        Ok(())
    }

    /// Create the account, then sign in with the same credentials.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        career_objective: &str,
    ) -> Result<()> {
        let body = json!({
            "name": name,
            "email": email,
            "password": password,
            "professionalGoal": career_objective,
        });
        let response = self.http.send(HttpRequest::post("/users", body)).await?;
        if !response.ok() {
            return Err(normalize::validation_error(response.status, &response.body));
        }
        log::info!("Account created for {}", email);
        self.login(email, password).await
    }

    pub async fn logout(&self) {
        self.clear().await;
        log::info!("Signed out");
    }

    /// Shared unauthorized handler: drop the session and send the user to login.
    pub async fn expire(&self) {
        log::warn!("Session expired, redirecting to login");
        self.clear().await;
        self.event_bus.emit(SyncEvent::SessionExpired);
        self.navigator.navigate(Route::Login);
    }

    /// Merge `update` into the profile and push it to the backend.
    ///
    /// Skills are created one call each, concurrently and best-effort. The
    /// local profile only changes after the profile update is accepted.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<()> {
        let (current, token) = match (self.current_user(), self.bearer()) {
            (Some(user), Some(token)) => (user, token),
            _ => return Err(NovaError::Auth("Not signed in".to_string())),
        };
        let merged = update.apply_to(&current);

        if let Some(ref skills) = update.skills {
            if let Err(e) = self.create_skills(current.id, &token, skills).await {
                self.expire().await;
                return Err(e);
            }
        }

        let body = json!({
            "name": merged.name,
            "professionalGoal": merged.career_objective,
        });
        let req = HttpRequest::put(format!("/users/{}", current.id), body);
        match send_with_bearer(self.http.as_ref(), Some(token.clone()), req).await {
            Ok(response) if response.ok() => {}
            Ok(response) => return Err(response.into_error()),
            Err(NovaError::SessionExpired) => {
                self.expire().await;
                return Err(NovaError::SessionExpired);
            }
            Err(e) => return Err(e),
        }

        if self.user_id() != Some(current.id) {
            return Err(NovaError::Auth("Session changed during profile update".to_string()));
        }
        self.commit(token, merged).await
    }

    /// Failures are logged and skipped, except a rejected credential which
    /// fails the whole update with `SessionExpired`.
    async fn create_skills(&self, user_id: u64, token: &str, skills: &[String]) -> Result<()> {
        let calls = skills.iter().map(|encoded| {
            let skill = Skill::parse(encoded);
            let req = HttpRequest::post(
                "/skills",
                json!({ "name": skill.name, "type": skill.kind.as_str() }),
            )
            .with_query("userId", user_id);
            async move {
                match send_with_bearer(self.http.as_ref(), Some(token.to_string()), req).await {
                    Ok(response) if response.ok() => Ok(()),
                    Ok(response) => {
                        log::warn!("Skill '{}' not saved: HTTP {}", skill.name, response.status);
                        Ok(())
                    }
                    Err(NovaError::SessionExpired) => Err(NovaError::SessionExpired),
                    Err(e) => {
                        log::warn!("Skill '{}' not saved: {}", skill.name, e);
                        Ok(())
                    }
                }
            }
        });
        join_all(calls).await.into_iter().collect()
    }

    // ─── Persistence ─────────────────────────────────────────

    /// Persist credential and profile, then publish them in memory.
    async fn commit(&self, token: String, user: UserProfile) -> Result<()> {
        let snapshot = serde_json::to_string(&user)?;
        let persisted = async {
            self.storage.set_text(TOKEN_KEY, &token).await?;
            self.storage.set_text(USER_KEY, &snapshot).await
        };
        if let Err(e) = persisted.await {
            log::error!("Could not persist session: {}", e);
            self.restore_persisted().await;
            return Err(e);
        }

        {
            let mut state = self.state.borrow_mut();
            state.token = Some(token);
            state.user = Some(user.clone());
        }
        self.event_bus.emit(SyncEvent::SessionChanged { user: Some(user) });
        Ok(())
    }

    /// Put storage back in line with memory after a failed write.
    async fn restore_persisted(&self) {
        let (token, user) = {
            let state = self.state.borrow();
            (state.token.clone(), state.user.clone())
        };
        match (token, user) {
            (Some(token), Some(user)) => {
                let restored = async {
                    let snapshot = serde_json::to_string(&user)?;
                    self.storage.set_text(TOKEN_KEY, &token).await?;
                    self.storage.set_text(USER_KEY, &snapshot).await
                };
                if let Err(e) = restored.await {
                    log::warn!("Could not restore persisted session: {}", e);
                }
            }
            _ => self.clear_persisted().await,
        }
    }

    async fn clear(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.user = None;
            state.token = None;
        }
        self.clear_persisted().await;
        self.event_bus.emit(SyncEvent::SessionChanged { user: None });
    }

    async fn clear_persisted(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.delete(key).await {
                log::warn!("Could not remove '{}' from {}: {}", key, self.storage.backend_name(), e);
            }
        }
    }
}

/// A persisted pair is usable only as a whole: a non-empty credential and a
/// profile that parses with a non-zero id.
pub fn validate_snapshot(
    token: Option<String>,
    user: Option<String>,
) -> Option<(String, UserProfile)> {
    let token = token.filter(|t| !t.trim().is_empty())?;
    let user: UserProfile = serde_json::from_str(&user?).ok()?;
    user.has_valid_id().then_some((token, user))
}
