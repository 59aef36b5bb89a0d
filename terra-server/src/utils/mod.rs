//! Utility helpers

pub mod logger;
pub mod validation;
