#![allow(dead_code)]

//! Shared fixtures: a recording navigator/sink pair and a gateway wired to an
//! in-memory session, used across the integration suites.

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use clubgate::gateway::{GatewayConfig, RequestGateway};
use clubgate::nav::Navigator;
use clubgate::notify::{MessageSink, Notice};
use clubgate::routes::RouteTable;
use clubgate::session::SessionStore;
use clubgate::storage::MemoryStorage;
use clubgate::transport::HttpTransport;

/// Records every transition; primitives can be told to fail by kind.
#[derive(Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<(String, String)>>,
    fail_kind: Mutex<Option<String>>,
    current: Mutex<String>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, String)> {
        self.events.lock().clone()
    }

    pub fn set_current_path(&self, path: &str) {
        *self.current.lock() = path.to_string();
    }

    pub fn fail_on(&self, kind: &str) {
        *self.fail_kind.lock() = Some(kind.to_string());
    }

    fn dispatch(&self, kind: &str, url: &str) -> Result<()> {
        if self.fail_kind.lock().as_deref() == Some(kind) {
            anyhow::bail!("{} refused by platform", kind);
        }
        self.events.lock().push((kind.to_string(), url.to_string()));
        let path = url.split('?').next().unwrap_or(url);
        *self.current.lock() = path.to_string();
        Ok(())
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn push(&self, url: &str) -> Result<()> {
        self.dispatch("push", url)
    }
    async fn replace(&self, url: &str) -> Result<()> {
        self.dispatch("replace", url)
    }
    async fn relaunch(&self, url: &str) -> Result<()> {
        self.dispatch("relaunch", url)
    }
    async fn switch_tab(&self, url: &str) -> Result<()> {
        self.dispatch("switch_tab", url)
    }
    async fn back(&self, delta: u32) -> Result<()> {
        self.dispatch("back", &format!("back:{}", delta))
    }
    fn current_path(&self) -> String {
        self.current.lock().clone()
    }
}

#[derive(Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }
}

impl MessageSink for RecordingSink {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

pub struct Core {
    pub table: Arc<RouteTable>,
    pub session: Arc<SessionStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub sink: Arc<RecordingSink>,
    pub gateway: Arc<RequestGateway>,
}

/// Wire a gateway against `base_url` with fresh in-memory state.
pub fn core_at(base_url: &str) -> Core {
    let table = Arc::new(RouteTable::club_default());
    let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
    let navigator = Arc::new(RecordingNavigator::new());
    let sink = Arc::new(RecordingSink::new());
    let transport = Arc::new(HttpTransport::new().expect("client"));
    let gateway = Arc::new(RequestGateway::new(
        GatewayConfig::default().with_base_url(base_url),
        transport,
        session.clone(),
        table.clone(),
        navigator.clone(),
        sink.clone(),
    ));
    Core { table, session, navigator, sink, gateway }
}

/// Serve an axum app on an ephemeral port, returning its base URL.
pub async fn spawn_app(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}", addr)
}
