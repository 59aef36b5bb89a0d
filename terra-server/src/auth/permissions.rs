//! Role gates
//!
//! Every protected route group declares one [`RoleGate`]. Admins manage the
//! marketplace but do not own a listing, so they do not pass the owner gate.

use shared::error::{AppError, ErrorCode};
use shared::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGate {
    /// Any signed-in user
    Authenticated,
    /// Accommodation owners
    Owner,
    /// Marketplace administrators
    Admin,
}

impl RoleGate {
    /// `Ok` when `role` passes the gate; 401 for guests, 403 otherwise
    pub fn check(self, role: Role) -> Result<(), AppError> {
        match (self, role) {
            (_, Role::Guest) => Err(AppError::not_authenticated()),
            (RoleGate::Authenticated, Role::User | Role::Owner | Role::Admin) => Ok(()),
            (RoleGate::Owner, Role::Owner) => Ok(()),
            (RoleGate::Owner, Role::User | Role::Admin) => Err(AppError::new(ErrorCode::OwnerRequired)),
            (RoleGate::Admin, Role::Admin) => Ok(()),
            (RoleGate::Admin, Role::User | Role::Owner) => Err(AppError::new(ErrorCode::AdminRequired)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleGate::Authenticated => "authenticated",
            RoleGate::Owner => "owner",
            RoleGate::Admin => "admin",
        }
    }
}
