pub mod envelope;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod nav;
pub mod notify;
pub mod routes;
pub mod session;
pub mod storage;
pub mod transport;

pub use envelope::{classify, Envelope, Outcome};
pub use error::{GatewayError, GatewayResult};
pub use gateway::{GatewayConfig, RequestGateway};
pub use guard::{GuardDecision, RouteGuard};
pub use nav::{NavLock, NavOptions, NavigationController, Navigator};
pub use notify::{MessageSink, Notice, Severity};
pub use routes::{RouteDescriptor, RouteTable};
pub use session::{SessionStore, UserInfo};
pub use storage::KvStorage;
pub use transport::{Method, Transport, TransportRequest, TransportResponse};
