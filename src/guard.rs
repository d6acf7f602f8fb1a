//! Pre-commit route guard and the login/logout flow.
//!
//! The guard runs before every committed transition on the web front-end: it
//! lazily hydrates the profile cache once per session and redirects based on
//! authentication state and destination. Login additionally performs the
//! one-time authorization check — school admins and club managers only — and
//! rolls the session back when it fails, even though the credential exchange
//! itself succeeded.

use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::RequestGateway;
use crate::notify::{MessageSink, Notice};
use crate::routes::RouteTable;
use crate::session::{SessionStore, UserInfo};
use crate::transport::Method;

const LOGIN_ENDPOINT: &str = "/public/login";
const USER_INFO_ENDPOINT: &str = "/student/me";

/// Authorization-failure notice shown when a valid credential has no seat in
/// the admin console.
pub const NO_PERMISSION_MSG: &str =
    "Admin console access is limited to school admins and club managers";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
}

pub struct RouteGuard {
    table: Arc<RouteTable>,
    session: Arc<SessionStore>,
    gateway: Arc<RequestGateway>,
    sink: Arc<dyn MessageSink>,
}

impl RouteGuard {
    pub fn new(
        table: Arc<RouteTable>,
        session: Arc<SessionStore>,
        gateway: Arc<RequestGateway>,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self { table, session, gateway, sink }
    }

    /// Decide one transition before it commits.
    pub async fn before_each(&self, to_path: &str) -> GuardDecision {
        let login = self.table.login_path();
        if !self.session.is_authenticated() {
            if to_path == login {
                return GuardDecision::Proceed;
            }
            return GuardDecision::Redirect(login);
        }

        // An authenticated session never re-enters the login screen
        if to_path == login {
            return GuardDecision::Redirect(self.table.home_path());
        }

        if self.session.user_info().is_some() {
            return GuardDecision::Proceed;
        }
        match self.hydrate_user_info().await {
            Ok(_) => GuardDecision::Proceed,
            Err(e) => {
                // A session that cannot hydrate its profile is treated as invalid
                debug!(target: "guard", error = %e, "hydration failed");
                self.session.clear();
                GuardDecision::Redirect(login)
            }
        }
    }

    /// Exchange credentials, hydrate the profile, then authorize. Any failure
    /// leaves the session cleared and reports `false`; a failed authorization
    /// rolls back a credential exchange that the server itself accepted.
    pub async fn login(&self, account: &str, password: &str) -> bool {
        let payload = json!({ "account": account, "password": password });
        let data = match self
            .gateway
            .call(LOGIN_ENDPOINT, Method::Post, Some(payload), &[])
            .await
        {
            Ok(data) => data,
            Err(e) => {
                debug!(target: "guard", error = %e, "credential exchange failed");
                self.session.clear();
                return false;
            }
        };

        let Some(token) = data.get("token").and_then(|v| v.as_str()).filter(|t| !t.is_empty())
        else {
            self.session.clear();
            return false;
        };
        self.session.set_token(token);

        let info = match self.hydrate_user_info().await {
            Ok(info) => info,
            Err(e) => {
                debug!(target: "guard", error = %e, "profile fetch after login failed");
                self.session.clear();
                return false;
            }
        };

        let authorized = info.is_admin() || self.manages_any_club(info.id).await;
        if !authorized {
            self.sink.notify(Notice::error(NO_PERMISSION_MSG));
            self.session.clear();
            return false;
        }
        true
    }

    pub fn logout(&self) {
        self.session.clear();
    }

    /// Fetch and cache the profile via the same session-info endpoint used
    /// after login.
    async fn hydrate_user_info(&self) -> GatewayResult<UserInfo> {
        let data = self
            .gateway
            .call(USER_INFO_ENDPOINT, Method::Get, None, &[])
            .await?;
        let info: UserInfo = serde_json::from_value(data)
            .map_err(|e| GatewayError::business(-1, format!("malformed user info: {}", e)))?;
        self.session.cache_user_info(info.clone());
        Ok(info)
    }

    /// A lookup failure counts as "manages no clubs", not as an error.
    async fn manages_any_club(&self, user_id: i64) -> bool {
        let endpoint = format!("/leader/users/{}/clubs", user_id);
        match self.gateway.call(&endpoint, Method::Get, None, &[]).await {
            Ok(data) => data
                .get("list")
                .and_then(|v| v.as_array())
                .map(|l| !l.is_empty())
                .unwrap_or(false),
            Err(e) => {
                debug!(target: "guard", error = %e, "managed-clubs lookup failed");
                false
            }
        }
    }
}
