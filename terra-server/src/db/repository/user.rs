//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{Role, User};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, email, name, role, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<User>> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Insert the user on first sight, refresh profile claims afterwards.
///
/// `force_admin` comes from `ADMIN_USER_IDS` and wins over the stored role;
/// otherwise the stored role is kept.
pub async fn provision(
    pool: &SqlitePool,
    id: &str,
    email: Option<&str>,
    name: Option<&str>,
    force_admin: bool,
) -> RepoResult<User> {
    let initial_role = if force_admin { Role::Admin } else { Role::User };
    let sql = format!(
        "INSERT INTO users (id, email, name, role, created_at) VALUES (?1, ?2, ?3, ?4, ?5) \
         ON CONFLICT(id) DO UPDATE SET \
             email = COALESCE(excluded.email, users.email), \
             name = COALESCE(excluded.name, users.name), \
             role = CASE WHEN ?6 THEN 'admin' ELSE users.role END \
         RETURNING {COLUMNS}"
    );
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .bind(email)
        .bind(name)
        .bind(initial_role)
        .bind(now_millis())
        .bind(force_admin)
        .fetch_one(pool)
        .await?;
    Ok(user)
}

/// Set a user's role (admin operation)
pub async fn set_role(pool: &SqlitePool, id: &str, role: Role) -> RepoResult<User> {
    if role == Role::Guest {
        return Err(RepoError::Validation("guest is not an assignable role".into()));
    }
    let sql = format!("UPDATE users SET role = ? WHERE id = ? RETURNING {COLUMNS}");
    sqlx::query_as::<_, User>(&sql)
        .bind(role)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}
