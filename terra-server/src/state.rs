//! Application state shared by every handler

use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use aws_sdk_sesv2::Client as SesClient;
use shared::error::AppError;
use sqlx::SqlitePool;

use crate::auth::{IdentityVerifier, RateLimiter};
use crate::config::{Config, MailBackend, StorageBackend};
use crate::db::DbService;
use crate::services::{LocalStore, LogMailer, Mailer, ObjectStore, S3Store, SesMailer};

/// Process-wide handles, built once at startup
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    /// Identity provider token verifier
    pub identity: Arc<IdentityVerifier>,
    pub mailer: Arc<dyn Mailer>,
    /// Image storage (S3 or local directory)
    pub storage: Arc<dyn ObjectStore>,
    /// Rate limiter for booking and submission routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Open the database and build the configured backends
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;

        let needs_aws = config.mail_backend == MailBackend::Ses
            || matches!(config.storage, StorageBackend::S3 { .. });
        let aws_config = if needs_aws {
            Some(aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await)
        } else {
            None
        };

        let mailer: Arc<dyn Mailer> = match (&config.mail_backend, &aws_config) {
            (MailBackend::Ses, Some(aws)) => {
                tracing::info!(from = %config.mail_from, "Mail backend: SES");
                Arc::new(SesMailer::new(SesClient::new(aws), config.mail_from.clone()))
            }
            _ => {
                tracing::info!("Mail backend: log");
                Arc::new(LogMailer)
            }
        };

        let storage: Arc<dyn ObjectStore> = match (&config.storage, &aws_config) {
            (
                StorageBackend::S3 {
                    bucket,
                    public_base_url,
                },
                Some(aws),
            ) => {
                tracing::info!(bucket = %bucket, "Storage backend: S3");
                Arc::new(S3Store::new(S3Client::new(aws), bucket, public_base_url))
            }
            (StorageBackend::S3 { .. }, None) => {
                return Err(AppError::internal("S3 storage configured without AWS config"));
            }
            (
                StorageBackend::Local {
                    dir,
                    public_base_url,
                },
                _,
            ) => {
                tokio::fs::create_dir_all(dir)
                    .await
                    .map_err(|e| AppError::storage(format!("Failed to create {dir}: {e}")))?;
                tracing::info!(dir = %dir, "Storage backend: local");
                Arc::new(LocalStore::new(dir, public_base_url))
            }
        };

        Ok(Self::from_parts(config, db.pool, mailer, storage))
    }

    /// Assemble state from prebuilt parts (tests, alternative backends)
    pub fn from_parts(
        config: Config,
        pool: SqlitePool,
        mailer: Arc<dyn Mailer>,
        storage: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            identity: Arc::new(IdentityVerifier::new(&config.auth)),
            config: Arc::new(config),
            pool,
            mailer,
            storage,
            rate_limiter: RateLimiter::new(),
        }
    }
}
