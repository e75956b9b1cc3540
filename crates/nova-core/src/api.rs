//! Authenticated backend access for the sync components.
//!
//! Attaches the current bearer credential to each call and turns a 401 into
//! a forced session expiry, so callers never handle it themselves.

use std::rc::Rc;
use serde_json::Value;
use nova_types::{NovaError, Result};
use crate::ports::{HttpPort, HttpRequest, HttpResponse};
use crate::session::SessionManager;

/// Send `req` with `bearer` attached. A 401 comes back as `SessionExpired`;
/// the caller decides who runs the unauthorized handler.
pub(crate) async fn send_with_bearer(
    http: &dyn HttpPort,
    bearer: Option<String>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let req = match bearer {
        Some(token) => req.with_bearer(token),
        None => req,
    };
    let method = req.method;
    let path = req.path.clone();

    let response = http.send(req).await?;
    if response.is_unauthorized() {
        log::warn!("{} {} rejected with 401", method.as_str(), path);
        return Err(NovaError::SessionExpired);
    }
    Ok(response)
}

pub struct ApiClient {
    http: Rc<dyn HttpPort>,
    session: Rc<SessionManager>,
}

impl ApiClient {
    pub fn new(http: Rc<dyn HttpPort>, session: Rc<SessionManager>) -> Self {
        Self { http, session }
    }

    pub fn session(&self) -> &Rc<SessionManager> {
        &self.session
    }

    /// Send with the session's credential. On 401 the session is expired
    /// (storage cleared, login route requested) before `SessionExpired` returns.
    pub async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        match send_with_bearer(self.http.as_ref(), self.session.bearer(), req).await {
            Err(NovaError::SessionExpired) => {
                self.session.expire().await;
                Err(NovaError::SessionExpired)
            }
            other => other,
        }
    }

    /// Send and require a 2xx status
    pub async fn send_ok(&self, req: HttpRequest) -> Result<HttpResponse> {
        let response = self.send(req).await?;
        if !response.ok() {
            return Err(response.into_error());
        }
        Ok(response)
    }

    /// Send, require a 2xx status and parse the body as JSON
    pub async fn send_json(&self, req: HttpRequest) -> Result<Value> {
        self.send_ok(req).await?.json()
    }
}
