//! Chat transcript sync: history fetch and question/answer exchange.
//!
//! Stateless apart from the API client; the calling view owns the visible
//! transcript and appends turns in send-then-receive order. No retries.
//! A reply that comes back after the signed-in user changed is dropped and
//! reported as `Ok(None)`.

use std::rc::Rc;
use serde_json::{json, Value};
use nova_types::{NovaError, Result, chat::ChatMessage};
use crate::api::ApiClient;
use crate::normalize;
use crate::ports::HttpRequest;

pub struct ChatSync {
    api: Rc<ApiClient>,
}

impl ChatSync {
    pub fn new(api: Rc<ApiClient>) -> Self {
        Self { api }
    }

    /// Prior turns for the signed-in user; empty without one (no call made).
    pub async fn get_history(&self) -> Result<Option<Vec<ChatMessage>>> {
        let Some(user_id) = self.api.session().user_id() else {
            return Ok(Some(Vec::new()));
        };
        let req = HttpRequest::get("/chatbot/history").with_query("userId", user_id);
        let data = self.api.send_json(req).await;
        if !self.is_current(user_id) {
            log::debug!("Dropping chat history fetched for user {}", user_id);
            return Ok(None);
        }
        Ok(Some(normalize::chat_history(&data?)))
    }

    /// Ask the assistant and return its reply text.
    pub async fn ask_chatbot(&self, text: &str) -> Result<Option<String>> {
        let Some(user_id) = self.api.session().user_id() else {
            return Err(NovaError::Chat("Not signed in or session expired".to_string()));
        };
        let answer = self.exchange(user_id, text).await;
        match answer {
            Err(NovaError::SessionExpired) => Err(NovaError::SessionExpired),
            _ if !self.is_current(user_id) => {
                log::debug!("Dropping chat reply for user {}", user_id);
                Ok(None)
            }
            other => other.map(Some),
        }
    }

    async fn exchange(&self, user_id: u64, text: &str) -> Result<String> {
        let req = HttpRequest::post("/chatbot/ask", json!({ "userId": user_id, "message": text }));
        let response = self.api.send(req).await?;
        if !response.ok() {
            let message = normalize::backend_message(&response.body)
                .unwrap_or_else(|| format!("Assistant unavailable (HTTP {})", response.status));
            return Err(NovaError::Chat(message));
        }

        let data = response.json()?;
        data.get("answer")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| NovaError::Chat("Reply carried no answer".to_string()))
    }

    fn is_current(&self, user_id: u64) -> bool {
        self.api.session().user_id() == Some(user_id)
    }
}
