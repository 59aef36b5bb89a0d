//! Vegan Business Directory Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum VeganCategory {
    Restaurant,
    Cafe,
    Grocery,
    Bakery,
    Market,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct VeganBusiness {
    pub id: i64,
    pub submitted_by: String,
    pub name: String,
    pub category: VeganCategory,
    pub description: Option<String>,
    pub city: String,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub image: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeganBusinessCreate {
    pub name: String,
    pub category: VeganCategory,
    pub description: Option<String>,
    pub city: String,
    pub website: Option<String>,
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VeganBusinessFilter {
    pub category: Option<VeganCategory>,
    pub city: Option<String>,
}
