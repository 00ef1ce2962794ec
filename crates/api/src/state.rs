use std::sync::Arc;

use crate::auth::service::AuthService;
use crate::config::ServerConfig;

/// Shared application state available to all axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (all fields are behind `Arc`). The state holds
/// no mutable data; the signing secret inside the auth service is read-only
/// after startup, so concurrent requests need no synchronization here.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator for the register/refresh/identify flows.
    pub auth: Arc<AuthService>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
