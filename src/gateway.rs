//! Request gateway: one logical API call.
//!
//! Attaches the session credential, dispatches through the transport
//! collaborator with a bounded timeout, and classifies the outcome. A
//! session-invalid response clears the session and hard-redirects to the login
//! screen before the caller ever sees the rejection, so caller-side recovery
//! never races the redirect.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::envelope::{classify, Envelope, Outcome};
use crate::error::{GatewayError, GatewayResult};
use crate::nav::Navigator;
use crate::notify::{MessageSink, Notice};
use crate::routes::RouteTable;
use crate::session::SessionStore;
use crate::storage::{KvStorage, BASE_URL_KEY};
use crate::transport::{Method, Transport, TransportRequest};

/// Default request timeout (the admin console's fixed 5 s axios timeout).
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000/api/v1".to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// A persisted `BASE_URL` override takes precedence over the built-in
    /// default, so a device can be pointed at another deployment without a
    /// rebuild.
    pub fn resolve(storage: &dyn KvStorage) -> Self {
        let mut cfg = Self::default();
        if let Some(url) = storage.get(BASE_URL_KEY) {
            if !url.is_empty() {
                cfg.base_url = url;
            }
        }
        cfg
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
}

/// Persist a base-URL override for subsequent runs.
pub fn set_base_url(storage: &dyn KvStorage, url: &str) {
    storage.set(BASE_URL_KEY, url);
}

pub struct RequestGateway {
    config: GatewayConfig,
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
    table: Arc<RouteTable>,
    navigator: Arc<dyn Navigator>,
    sink: Arc<dyn MessageSink>,
}

impl RequestGateway {
    pub fn new(
        config: GatewayConfig,
        transport: Arc<dyn Transport>,
        session: Arc<SessionStore>,
        table: Arc<RouteTable>,
        navigator: Arc<dyn Navigator>,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self { config, transport, session, table, navigator, sink }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Issue one logical API call and classify the result.
    ///
    /// Success resolves with the envelope stripped to its payload. A business
    /// failure surfaces a user-visible notice and rejects with the server's
    /// code and message. A 401 by either encoding clears the session,
    /// redirects to login (unless the login screen is already active) and then
    /// rejects. Transport failures reject without touching any state.
    pub async fn call(
        &self,
        endpoint: &str,
        method: Method,
        payload: Option<Value>,
        headers: &[(&str, &str)],
    ) -> GatewayResult<Value> {
        let request_id = Uuid::new_v4();
        let mut hdrs: Vec<(String, String)> =
            headers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();

        // Injected credential wins over a colliding caller header; everything
        // else passes through untouched.
        let token = self.session.token();
        if !token.is_empty() {
            hdrs.retain(|(k, _)| !k.eq_ignore_ascii_case("authorization"));
            hdrs.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let url = format!("{}{}", self.config.base_url, endpoint);
        debug!(target: "gateway", %request_id, method = method.as_str(), endpoint, "dispatch");

        let resp = match self
            .transport
            .send(TransportRequest {
                url,
                method,
                headers: hdrs,
                body: payload,
                timeout: self.config.timeout,
            })
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!(target: "gateway", %request_id, error = %e, "transport failure");
                return Err(GatewayError::transport(e.to_string()));
            }
        };

        let envelope = Envelope::from_value(resp.body);
        match classify(resp.status, &envelope) {
            Outcome::Unauthorized => {
                warn!(target: "gateway", %request_id, "session invalid");
                // Side effects complete before the caller sees the rejection
                self.handle_unauthorized().await;
                Err(GatewayError::unauthorized(envelope.msg_or_default()))
            }
            Outcome::Success(data) => Ok(data),
            Outcome::Business { code, msg } => {
                debug!(target: "gateway", %request_id, code, msg = %msg, "business failure");
                self.sink.notify(Notice::error(msg.clone()));
                Err(GatewayError::business(code, msg))
            }
        }
    }

    /// Clear the session and force the login screen. Both steps are
    /// individually idempotent, so concurrent 401s are harmless.
    async fn handle_unauthorized(&self) {
        self.session.clear();
        let login = self.table.login_path();
        if self.navigator.current_path() != login {
            if let Err(e) = self.navigator.relaunch(&login).await {
                warn!(target: "gateway", error = %e, "login redirect failed");
            }
        }
    }
}
