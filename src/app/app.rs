use axum::Router;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::app_conf::AppConfig;
use crate::config::{DatabaseConfig, EmailConfig, RateLimitConfig};
use crate::repository::bid_request_repo::SqliteBidRequestRepository;
use crate::repository::db;
use crate::repository::rate_limit_repo::SqliteRateLimitRepository;
use crate::router::bid_request_router::bid_request_router;
use crate::service::bid_service::BidServiceImpl;
use crate::service::rate_limiter::RateLimiter;
use crate::util::email::SmtpEmailService;

pub struct App {
    config: AppConfig,
    pool: SqlitePool,
    router: Router,
    pub bid_service: Arc<BidServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();

        let database_config = DatabaseConfig::from_env().expect("Database config error");
        let email_config = EmailConfig::from_env().expect("Email config error");
        let rate_limit_config = RateLimitConfig::from_env().expect("Rate limit config error");

        let pool = db::create_pool(&database_config)
            .await
            .expect("Failed to connect to database");

        let bid_repo = Arc::new(SqliteBidRequestRepository::new(pool.clone()));
        let rate_limit_repo = Arc::new(SqliteRateLimitRepository::new(pool.clone()));
        let rate_limiter = RateLimiter::new(rate_limit_repo, rate_limit_config);
        let notifier = Arc::new(SmtpEmailService::new(email_config).expect("Email service error"));

        let bid_service = Arc::new(BidServiceImpl {
            repo: bid_repo,
            rate_limiter,
            notifier,
        });

        let router = bid_request_router(bid_service.clone());

        App {
            config,
            pool,
            router,
            bid_service,
        }
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(self.config.host.parse().expect("Invalid host"), self.config.port);
        info!("🚀 Server running at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind address");
        axum::serve(
            listener,
            self.router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

        info!("🛑 Shutting down, closing database connection");
        self.pool.close().await;
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.expect("Failed to listen for ctrl-c");
}
