use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::models::domain::SearchCategory;

/// Raw facility search parameters, as received from the router.
///
/// Everything arrives as an optional string; parsing and defaulting happen
/// in [`SearchRequest::from_query`] so the rules are testable without HTTP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub category: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub radius: Option<String>,
    pub limit: Option<String>,
}

/// Errors raised while turning raw parameters into a search request
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),
}

impl RequestError {
    /// Stable machine-readable code for the error envelope
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCoordinates(_) => "invalid_coordinates",
            Self::InvalidCategory(_) => "invalid_category",
        }
    }
}

/// Parsed and validated facility search request
#[derive(Debug, Clone, Validate)]
pub struct SearchRequest {
    pub category: SearchCategory,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 1))]
    pub radius_meters: u32,
    pub limit: usize,
}

impl SearchRequest {
    /// Parse raw query parameters, applying the configured defaults.
    ///
    /// Latitude and longitude are required and must parse as finite
    /// numbers; this check runs before any query is built, so a bad
    /// coordinate never reaches the network. Radius and limit fall back
    /// to their defaults when absent or unparseable; a limit of zero
    /// disables truncation downstream.
    pub fn from_query(
        query: &SearchQuery,
        default_radius_m: u32,
        default_limit: usize,
    ) -> Result<Self, RequestError> {
        let category_value = query.category.as_deref().unwrap_or("all");
        let category = SearchCategory::parse(category_value)
            .ok_or_else(|| RequestError::InvalidCategory(category_value.to_string()))?;

        let latitude = parse_coordinate(query.lat.as_deref(), "lat")?;
        let longitude = parse_coordinate(query.lon.as_deref(), "lon")?;

        let radius_meters = query
            .radius
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or(default_radius_m);

        let limit = query
            .limit
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or(default_limit);

        Ok(Self {
            category,
            latitude,
            longitude,
            radius_meters,
            limit,
        })
    }
}

fn parse_coordinate(value: Option<&str>, field: &str) -> Result<f64, RequestError> {
    let raw = value
        .ok_or_else(|| RequestError::InvalidCoordinates(format!("{} is required", field)))?;

    raw.parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| {
            RequestError::InvalidCoordinates(format!("{} must be a finite number, got '{}'", field, raw))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(lat: &str, lon: &str) -> SearchQuery {
        SearchQuery {
            lat: Some(lat.to_string()),
            lon: Some(lon.to_string()),
            ..SearchQuery::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let request = SearchRequest::from_query(&query("26.7288", "85.9244"), 2000, 50).unwrap();

        assert_eq!(request.category, SearchCategory::All);
        assert_eq!(request.radius_meters, 2000);
        assert_eq!(request.limit, 50);
        assert!((request.latitude - 26.7288).abs() < 1e-9);
    }

    #[test]
    fn test_non_numeric_latitude_rejected() {
        let result = SearchRequest::from_query(&query("abc", "85.9244"), 2000, 50);

        assert!(matches!(result, Err(RequestError::InvalidCoordinates(_))));
    }

    #[test]
    fn test_missing_longitude_rejected() {
        let raw = SearchQuery {
            lat: Some("26.7288".to_string()),
            ..SearchQuery::default()
        };

        let result = SearchRequest::from_query(&raw, 2000, 50);

        assert!(matches!(result, Err(RequestError::InvalidCoordinates(_))));
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let result = SearchRequest::from_query(&query("NaN", "85.9244"), 2000, 50);
        assert!(matches!(result, Err(RequestError::InvalidCoordinates(_))));

        let result = SearchRequest::from_query(&query("26.7", "inf"), 2000, 50);
        assert!(matches!(result, Err(RequestError::InvalidCoordinates(_))));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let mut raw = query("26.7288", "85.9244");
        raw.category = Some("restaurants".to_string());

        let result = SearchRequest::from_query(&raw, 2000, 50);

        assert!(matches!(result, Err(RequestError::InvalidCategory(_))));
    }

    #[test]
    fn test_unparseable_radius_and_limit_fall_back() {
        let mut raw = query("26.7288", "85.9244");
        raw.radius = Some("wide".to_string());
        raw.limit = Some("many".to_string());

        let request = SearchRequest::from_query(&raw, 2000, 50).unwrap();

        assert_eq!(request.radius_meters, 2000);
        assert_eq!(request.limit, 50);
    }

    #[test]
    fn test_explicit_zero_limit_kept() {
        let mut raw = query("26.7288", "85.9244");
        raw.limit = Some("0".to_string());

        let request = SearchRequest::from_query(&raw, 2000, 50).unwrap();

        assert_eq!(request.limit, 0);
    }

    #[test]
    fn test_out_of_range_latitude_fails_validation() {
        let request = SearchRequest::from_query(&query("95.0", "85.9244"), 2000, 50).unwrap();

        assert!(request.validate().is_err());
    }
}
