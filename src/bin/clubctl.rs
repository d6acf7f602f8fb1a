//! Headless smoke client: logs into the club backend with env-supplied
//! credentials, prints the profile and the managed-clubs listing.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use clubgate::gateway::{set_base_url, GatewayConfig, RequestGateway};
use clubgate::guard::RouteGuard;
use clubgate::nav::TraceNavigator;
use clubgate::notify::TraceSink;
use clubgate::routes::RouteTable;
use clubgate::session::SessionStore;
use clubgate::storage::MemoryStorage;
use clubgate::transport::{HttpTransport, Method};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    let base_url = std::env::var("CLUB_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:9000/api/v1".to_string());
    let account = std::env::var("CLUB_ACCOUNT").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("CLUB_PASSWORD").unwrap_or_default();
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "clubctl",
        "clubctl starting: RUST_LOG='{}', base_url='{}', account='{}'",
        rust_log, base_url, account
    );

    let storage = Arc::new(MemoryStorage::new());
    set_base_url(storage.as_ref(), &base_url);

    let table = Arc::new(RouteTable::club_default());
    let session = Arc::new(SessionStore::new(storage.clone()));
    let navigator = Arc::new(TraceNavigator::new(&table.login_path()));
    let sink = Arc::new(TraceSink);
    let transport = Arc::new(HttpTransport::new()?);

    let gateway = Arc::new(RequestGateway::new(
        GatewayConfig::resolve(storage.as_ref()),
        transport,
        session.clone(),
        table.clone(),
        navigator,
        sink.clone(),
    ));
    let guard = RouteGuard::new(table, session.clone(), gateway.clone(), sink);

    if !guard.login(&account, &password).await {
        anyhow::bail!("login failed or account not authorized for the admin console");
    }

    let me = session.user_info().unwrap_or_default();
    println!("{}", serde_json::to_string_pretty(&me)?);

    match gateway
        .call(&format!("/leader/users/{}/clubs", me.id), Method::Get, None, &[])
        .await
    {
        Ok(clubs) => println!("{}", serde_json::to_string_pretty(&clubs)?),
        Err(e) => info!(target: "clubctl", "managed clubs listing unavailable: {}", e),
    }

    guard.logout();
    Ok(())
}
