//! Accommodation Model

use serde::{Deserialize, Serialize};

/// Property type of a listing.
///
/// Lodging types take rooms, dining types take menu items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PropertyType {
    // lodging
    Hotel,
    GuestHouse,
    Lodge,
    BedAndBreakfast,
    EcoCabin,
    Campsite,
    // dining
    Restaurant,
    Cafe,
    VeganRestaurant,
    FarmStall,
}

impl PropertyType {
    pub fn is_lodging(&self) -> bool {
        matches!(
            self,
            PropertyType::Hotel
                | PropertyType::GuestHouse
                | PropertyType::Lodge
                | PropertyType::BedAndBreakfast
                | PropertyType::EcoCabin
                | PropertyType::Campsite
        )
    }

    pub fn is_dining(&self) -> bool {
        !self.is_lodging()
    }
}

/// Accommodation entity (one per owner)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Accommodation {
    pub id: i64,
    pub owner_id: String,
    pub property_type: PropertyType,
    pub name: String,
    pub description: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    /// JSON array of amenity labels
    #[cfg_attr(feature = "db", sqlx(json))]
    pub amenities: Vec<String>,
    /// JSON array of sustainability certifications
    #[cfg_attr(feature = "db", sqlx(json))]
    pub certifications: Vec<String>,
    pub accepts_terms: bool,
    pub marketing_consent: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationCreate {
    pub property_type: PropertyType,
    pub name: String,
    pub description: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub accepts_terms: bool,
    #[serde(default)]
    pub marketing_consent: bool,
}

/// Update payload (property type is fixed after registration)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub marketing_consent: Option<bool>,
}

/// Public listing filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationFilter {
    #[serde(alias = "property_type")]
    pub property_type: Option<PropertyType>,
    pub city: Option<String>,
}
