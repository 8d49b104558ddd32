//! Server dependencies (using traits for testability)
//!
//! Central dependency container handed to every route and activity.
//! All external services sit behind trait objects so tests can swap them.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::JwtService;
use crate::kernel::{
    BaseAI, BaseAdvertiserStore, BaseContentStore, BaseMessenger, BaseNotificationStore,
    BasePreviewStore, LogOnlyMessenger, PostgresStore,
};

#[derive(Clone)]
pub struct ServerDeps {
    pub advertisers: Arc<dyn BaseAdvertiserStore>,
    pub contents: Arc<dyn BaseContentStore>,
    pub notifications: Arc<dyn BaseNotificationStore>,
    /// Token-keyed access for the unauthenticated preview routes.
    pub preview: Arc<dyn BasePreviewStore>,
    pub ai: Arc<dyn BaseAI>,
    pub messenger: Arc<dyn BaseMessenger>,
    pub jwt_service: Arc<JwtService>,
    /// Base of shareable preview links, without trailing slash.
    pub preview_base_url: String,
}

impl ServerDeps {
    /// Wire every store to one Postgres pool.
    pub fn postgres(
        pool: PgPool,
        ai: Arc<dyn BaseAI>,
        jwt_service: Arc<JwtService>,
        preview_base_url: String,
    ) -> Self {
        let store = Arc::new(PostgresStore::new(pool));
        Self {
            advertisers: store.clone(),
            contents: store.clone(),
            notifications: store.clone(),
            preview: store,
            ai,
            messenger: Arc::new(LogOnlyMessenger),
            jwt_service,
            preview_base_url: preview_base_url.trim_end_matches('/').to_string(),
        }
    }
}
