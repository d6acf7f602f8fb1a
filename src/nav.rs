//! Navigation coordinator.
//!
//! Serializes screen transitions behind a one-navigation-at-a-time lock,
//! enforces the authentication gate, and picks the platform transition
//! primitive (push / replace / relaunch / tab-switch). The platform stack
//! itself sits behind the `Navigator` trait; each primitive resolves when the
//! platform's completion callback fires.

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::routes::{build_url, RouteTable};
use crate::session::SessionStore;

/// Delay between a transition's completion callback and the lock release,
/// absorbing the platform's transition animation/settle time.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

#[async_trait]
pub trait Navigator: Send + Sync {
    async fn push(&self, url: &str) -> Result<()>;
    async fn replace(&self, url: &str) -> Result<()>;
    async fn relaunch(&self, url: &str) -> Result<()>;
    async fn switch_tab(&self, url: &str) -> Result<()>;
    async fn back(&self, delta: u32) -> Result<()>;
    /// Path of the screen currently on top of the stack.
    fn current_path(&self) -> String;
}

/// One-navigation-at-a-time gate. At most one transition is in flight; a
/// second attempt while held is dropped, never queued.
#[derive(Default)]
pub struct NavLock {
    in_flight: AtomicBool,
}

impl NavLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when a transition is already in flight.
    pub fn try_acquire(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn release(&self) {
        self.in_flight.store(false, Ordering::Release);
    }

    pub fn is_locked(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NavOptions {
    pub replace: bool,
    pub relaunch: bool,
}

pub struct NavigationController {
    table: Arc<RouteTable>,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    lock: Arc<NavLock>,
    settle: Duration,
}

impl NavigationController {
    pub fn new(
        table: Arc<RouteTable>,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::with_settle(table, session, navigator, SETTLE_DELAY)
    }

    /// `settle` is the post-completion delay before the lock releases.
    pub fn with_settle(
        table: Arc<RouteTable>,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        settle: Duration,
    ) -> Self {
        Self {
            table,
            session,
            navigator,
            lock: Arc::new(NavLock::new()),
            settle,
        }
    }

    pub fn lock(&self) -> &NavLock {
        &self.lock
    }

    /// Resolve, gate and dispatch one transition. Fire-and-forget by host
    /// convention: a call while a transition is in flight is a complete no-op.
    pub async fn navigate(&self, destination: &str, params: &[(&str, &str)], options: NavOptions) {
        if !self.lock.try_acquire() {
            return;
        }
        let route = self.table.resolve(destination);
        let url = build_url(&route.path, params);

        // Gated destination with no session: the requested transition is
        // abandoned, not queued for replay after login.
        if route.auth && !self.session.is_authenticated() {
            let login = self.table.login_path();
            debug!(target: "nav", destination, "unauthenticated, relaunching to login");
            let _ = self.navigator.relaunch(&login).await;
            self.schedule_release();
            return;
        }

        // Primitive priority: explicit relaunch > tab root > explicit replace > push
        let result = if options.relaunch {
            debug!(target: "nav", %url, "relaunch");
            self.navigator.relaunch(&url).await
        } else if self.table.is_tab_path(&route.path) {
            debug!(target: "nav", %url, "switch_tab");
            self.navigator.switch_tab(&url).await
        } else if options.replace {
            debug!(target: "nav", %url, "replace");
            self.navigator.replace(&url).await
        } else {
            debug!(target: "nav", %url, "push");
            self.navigator.push(&url).await
        };

        if let Err(e) = result {
            // A failed primitive falls back to a hard relaunch of the same URL
            debug!(target: "nav", %url, error = %e, "primitive failed, falling back to relaunch");
            let _ = self.navigator.relaunch(&url).await;
        }
        self.schedule_release();
    }

    /// Same lock discipline as `navigate`, no authentication gate: the screen
    /// revealed by going back is responsible for its own checks.
    pub async fn back(&self, delta: u32) {
        if !self.lock.try_acquire() {
            return;
        }
        if let Err(e) = self.navigator.back(delta).await {
            debug!(target: "nav", delta, error = %e, "back failed");
        }
        self.schedule_release();
    }

    pub async fn relaunch_to(&self, destination: &str, params: &[(&str, &str)]) {
        self.navigate(destination, params, NavOptions { relaunch: true, replace: false })
            .await;
    }

    pub async fn switch_to(&self, destination: &str) {
        self.navigate(destination, &[], NavOptions::default()).await;
    }

    fn schedule_release(&self) {
        let lock = Arc::clone(&self.lock);
        let settle = self.settle;
        tokio::spawn(async move {
            tokio::time::sleep(settle).await;
            lock.release();
        });
    }
}

/// Logs transitions instead of driving a screen stack; for headless hosts.
pub struct TraceNavigator {
    current: RwLock<String>,
}

impl TraceNavigator {
    pub fn new(initial_path: &str) -> Self {
        Self { current: RwLock::new(initial_path.to_string()) }
    }

    fn land(&self, kind: &str, url: &str) {
        tracing::info!(target: "nav", kind, %url, "transition");
        let path = url.split('?').next().unwrap_or(url);
        *self.current.write() = path.to_string();
    }
}

#[async_trait]
impl Navigator for TraceNavigator {
    async fn push(&self, url: &str) -> Result<()> {
        self.land("push", url);
        Ok(())
    }
    async fn replace(&self, url: &str) -> Result<()> {
        self.land("replace", url);
        Ok(())
    }
    async fn relaunch(&self, url: &str) -> Result<()> {
        self.land("relaunch", url);
        Ok(())
    }
    async fn switch_tab(&self, url: &str) -> Result<()> {
        self.land("switch_tab", url);
        Ok(())
    }
    async fn back(&self, delta: u32) -> Result<()> {
        tracing::info!(target: "nav", delta, "back");
        Ok(())
    }
    fn current_path(&self) -> String {
        self.current.read().clone()
    }
}
