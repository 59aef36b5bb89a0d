//! Server configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | `ENVIRONMENT` | development | development / staging / production |
//! | `HTTP_PORT` | 8080 | listen port |
//! | `DATABASE_PATH` | ./terrabook.db | SQLite file |
//! | `AUTH_JWT_SECRET` | dev value | identity token HMAC secret (required outside development) |
//! | `AUTH_ISSUER` | - | expected `iss` claim |
//! | `AUTH_AUDIENCE` | - | expected `aud` claim |
//! | `ADMIN_USER_IDS` | - | comma-separated user ids provisioned as admin |
//! | `ADMIN_NOTIFY_EMAIL` | - | recipient of submission notices |
//! | `MAIL_FROM` | noreply@terrabook.co.za | sender address |
//! | `MAIL_BACKEND` | log | `ses` or `log` |
//! | `STORAGE_BACKEND` | local | `s3` or `local` |
//! | `S3_BUCKET` | - | required for the s3 backend |
//! | `S3_PUBLIC_BASE_URL` | https://{bucket}.s3.amazonaws.com | URL prefix for stored objects |
//! | `UPLOAD_DIR` | ./uploads | local backend root |
//! | `UPLOAD_PUBLIC_BASE_URL` | /uploads | URL prefix for local objects |
//! | `TRUST_PROXY_HEADERS` | false | take the client IP from `X-Forwarded-For` (set only behind a proxy) |
//! | `LOG_LEVEL` | info | default filter level |
//! | `LOG_JSON` | false | JSON log lines |
//! | `LOG_DIR` | - | daily rolling log files |

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in {1} environment")]
    MissingSecret(String, String),

    #[error("{0} must be set when {1}")]
    Missing(&'static str, &'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailBackend {
    /// Amazon SES v2
    Ses,
    /// Write messages to the log only
    Log,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    S3 {
        bucket: String,
        public_base_url: String,
    },
    Local {
        dir: String,
        public_base_url: String,
    },
}

/// Identity provider token settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub http_port: u16,
    pub database_path: String,
    pub auth: AuthConfig,
    pub admin_user_ids: Vec<String>,
    pub admin_notify_email: Option<String>,
    pub mail_from: String,
    pub mail_backend: MailBackend,
    pub storage: StorageBackend,
    /// Rate limiting keys on `X-Forwarded-For` instead of the peer address
    pub trust_proxy_headers: bool,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());

        let http_port = match var("HTTP_PORT") {
            Some(p) => p.parse().map_err(|_| ConfigError::Invalid {
                name: "HTTP_PORT",
                value: p,
            })?,
            None => 8080,
        };

        let mail_backend = match var("MAIL_BACKEND").as_deref() {
            None | Some("log") => MailBackend::Log,
            Some("ses") => MailBackend::Ses,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "MAIL_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        let storage = match var("STORAGE_BACKEND").as_deref() {
            None | Some("local") => StorageBackend::Local {
                dir: var("UPLOAD_DIR").unwrap_or_else(|| "./uploads".into()),
                public_base_url: var("UPLOAD_PUBLIC_BASE_URL")
                    .unwrap_or_else(|| "/uploads".into()),
            },
            Some("s3") => {
                let bucket = var("S3_BUCKET")
                    .ok_or(ConfigError::Missing("S3_BUCKET", "STORAGE_BACKEND=s3"))?;
                let public_base_url = var("S3_PUBLIC_BASE_URL")
                    .unwrap_or_else(|| format!("https://{bucket}.s3.amazonaws.com"));
                StorageBackend::S3 {
                    bucket,
                    public_base_url,
                }
            }
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORAGE_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        let log_json = flag(var("LOG_JSON"), "LOG_JSON")?;
        let trust_proxy_headers = flag(var("TRUST_PROXY_HEADERS"), "TRUST_PROXY_HEADERS")?;

        Ok(Self {
            http_port,
            database_path: var("DATABASE_PATH").unwrap_or_else(|| "./terrabook.db".into()),
            auth: AuthConfig {
                jwt_secret: require_secret(var("AUTH_JWT_SECRET"), "AUTH_JWT_SECRET", &environment)?,
                issuer: var("AUTH_ISSUER"),
                audience: var("AUTH_AUDIENCE"),
            },
            admin_user_ids: var("ADMIN_USER_IDS")
                .map(|ids| {
                    ids.split(',')
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            admin_notify_email: var("ADMIN_NOTIFY_EMAIL"),
            mail_from: var("MAIL_FROM").unwrap_or_else(|| "noreply@terrabook.co.za".into()),
            mail_backend,
            storage,
            trust_proxy_headers,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json,
            log_dir: var("LOG_DIR"),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// Boolean variable, false when unset
fn flag(value: Option<String>, name: &'static str) -> Result<bool, ConfigError> {
    match value.as_deref() {
        None => Ok(false),
        Some("1" | "true" | "TRUE" | "yes") => Ok(true),
        Some("0" | "false" | "FALSE" | "no") => Ok(false),
        Some(other) => Err(ConfigError::Invalid {
            name,
            value: other.to_string(),
        }),
    }
}

/// Secrets must be set outside development; development gets a fixed
/// placeholder that is useless anywhere else.
fn require_secret(
    value: Option<String>,
    name: &str,
    environment: &str,
) -> Result<String, ConfigError> {
    match value {
        Some(v) => Ok(v),
        None if environment == "development" => Ok(format!("dev-{name}-not-for-production")),
        None => Err(ConfigError::MissingSecret(
            name.to_string(),
            environment.to_string(),
        )),
    }
}
