//! Test harness with testcontainers for integration testing.
//!
//! Uses a shared Postgres container across all tests. The container and
//! migrations are initialized once on first use, then reused.

use anyhow::{Context, Result};
use axum::Router;
use server_core::common::OperatorId;
use server_core::domains::auth::JwtService;
use server_core::kernel::test_dependencies::{
    MockAI, TEST_JWT_ISSUER, TEST_JWT_SECRET, TEST_PREVIEW_BASE_URL,
};
use server_core::kernel::ServerDeps;
use server_core::server::build_app;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use super::ApiClient;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness backed by a real Postgres.
///
/// Every test works under its own random operator id, so tests sharing the
/// database never see each other's rows.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let response = ctx.operator_client().get("/contents").await;
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    pub operator_id: OperatorId,
    pub jwt_service: Arc<JwtService>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self {
            db_pool,
            operator_id: OperatorId::new(),
            jwt_service: Arc::new(JwtService::new(
                TEST_JWT_SECRET,
                TEST_JWT_ISSUER.to_string(),
            )),
        })
    }

    pub fn deps(&self) -> ServerDeps {
        ServerDeps::postgres(
            self.db_pool.clone(),
            Arc::new(MockAI::new()),
            self.jwt_service.clone(),
            TEST_PREVIEW_BASE_URL.to_string(),
        )
    }

    pub fn router(&self) -> Router {
        build_app(self.deps(), Vec::new())
    }

    /// Client without a session, as the advertiser's browser would be.
    pub fn anonymous_client(&self) -> ApiClient {
        ApiClient::new(self.router())
    }

    /// Client authenticated as this test's operator.
    pub fn operator_client(&self) -> ApiClient {
        self.client_for(self.operator_id)
    }

    pub fn client_for(&self, operator_id: OperatorId) -> ApiClient {
        let token = self
            .jwt_service
            .create_token(operator_id, "operator@example.com".to_string())
            .expect("test token");
        ApiClient::new(self.router()).with_token(token)
    }
}
