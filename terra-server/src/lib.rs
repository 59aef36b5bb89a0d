//! TerraBook server - eco-travel marketplace backend
//!
//! # Architecture
//!
//! - **Booking** (`booking`): availability checks and race-free booking creation
//! - **Database** (`db`): SQLite pool, migrations, free-function repositories
//! - **Auth** (`auth`): identity-provider token verification and role gates
//! - **Events** (`events`): event submission classification and review
//! - **Services** (`services`): email delivery and object storage
//! - **HTTP API** (`api`): REST routes and handlers
//!
//! ```text
//! terra-server/src/
//! ├── api/        # HTTP routes and handlers
//! ├── auth/       # identity verification, gates, rate limiting
//! ├── booking/    # stay math and the booking workflow
//! ├── db/         # SQLite pool and repositories
//! ├── events/     # priority classification and review
//! ├── services/   # mailer and object store
//! ├── utils/      # logger, input validation
//! ├── config.rs
//! └── state.rs
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod config;
pub mod db;
pub mod events;
pub mod services;
pub mod state;
pub mod utils;

pub use auth::{CurrentUser, IdentityVerifier, RoleGate};
pub use config::Config;
pub use state::AppState;

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - routes auth decisions to the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
