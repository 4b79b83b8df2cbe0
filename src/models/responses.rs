use serde::{Deserialize, Serialize};

use crate::models::domain::{Category, ElementKind, Facility};

/// Echo of the search origin
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchCenter {
    pub lat: f64,
    pub lon: f64,
}

/// Per-category result counts, computed after truncation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub healthcare: usize,
    pub organizations: usize,
}

/// Response for the facility search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "searchCenter")]
    pub search_center: SearchCenter,
    #[serde(rename = "radiusMeters")]
    pub radius_meters: u32,
    pub locality: String,
    pub total: usize,
    pub breakdown: CategoryBreakdown,
    pub facilities: Vec<Facility>,
    pub healthcare: Vec<Facility>,
    pub organizations: Vec<Facility>,
}

/// Contact details of a single facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
}

/// Healthcare-specific details of a single facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareInfo {
    pub emergency: Option<bool>,
    pub beds: Option<u32>,
    pub operator: Option<String>,
}

/// Opening hours of a single facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursInfo {
    #[serde(rename = "openingHours")]
    pub opening_hours: Option<String>,
}

/// Source metadata of a single facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityMetadata {
    pub kind: String,
    pub address: Option<String>,
    pub city: String,
    pub description: Option<String>,
}

/// Response for the facility details endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityDetailsResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "hasName")]
    pub has_name: bool,
    pub category: Category,
    #[serde(rename = "type")]
    pub facility_type: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub contact: ContactInfo,
    pub healthcare: HealthcareInfo,
    pub hours: HoursInfo,
    pub metadata: FacilityMetadata,
}

impl FacilityDetailsResponse {
    /// Expand a normalized facility into the grouped detail shape.
    pub fn from_facility(facility: Facility, kind: ElementKind) -> Self {
        Self {
            id: facility.id,
            name: facility.name,
            has_name: facility.has_name,
            category: facility.category,
            facility_type: facility.facility_type,
            lat: facility.lat,
            lon: facility.lon,
            contact: ContactInfo {
                phone: facility.phone,
                website: facility.website,
                email: facility.email,
            },
            healthcare: HealthcareInfo {
                emergency: facility.emergency,
                beds: facility.beds,
                operator: facility.operator,
            },
            hours: HoursInfo {
                opening_hours: facility.opening_hours,
            },
            metadata: FacilityMetadata {
                kind: kind.as_str().to_string(),
                address: facility.address,
                city: facility.city,
                description: facility.description,
            },
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
