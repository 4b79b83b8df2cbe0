use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category filter accepted by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCategory {
    All,
    Healthcare,
    Organizations,
}

impl SearchCategory {
    /// Parse a request parameter value; anything outside the enum is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "healthcare" => Some(Self::Healthcare),
            "organizations" => Some(Self::Organizations),
            _ => None,
        }
    }
}

/// Resolved facility category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Healthcare,
    Organization,
    Other,
}

/// Geometry kind of an upstream element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
        }
    }
}

/// Computed center of a way or relation
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

/// One raw element as returned by the Overpass API.
///
/// Nodes carry a direct coordinate pair; ways and relations expose a
/// computed `center` instead. Tags are an open-ended string map and any
/// of them may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct RawElement {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl RawElement {
    /// Resolved coordinate: the direct pair if present, else the center.
    pub fn coordinate(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => self.center.map(|c| (c.lat, c.lon)),
        }
    }
}

/// Normalized facility record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: i64,
    pub name: String,
    #[serde(rename = "hasName")]
    pub has_name: bool,
    pub category: Category,
    #[serde(rename = "type")]
    pub facility_type: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub address: Option<String>,
    pub city: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub emergency: Option<bool>,
    pub beds: Option<u32>,
    pub operator: Option<String>,
    #[serde(rename = "openingHours")]
    pub opening_hours: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

impl Facility {
    /// Whether the facility has a resolvable coordinate and can take part
    /// in distance-dependent ranking.
    pub fn has_coordinate(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_category_parse() {
        assert_eq!(SearchCategory::parse("all"), Some(SearchCategory::All));
        assert_eq!(SearchCategory::parse("healthcare"), Some(SearchCategory::Healthcare));
        assert_eq!(SearchCategory::parse("organizations"), Some(SearchCategory::Organizations));
        assert_eq!(SearchCategory::parse("restaurants"), None);
        assert_eq!(SearchCategory::parse("Healthcare"), None);
    }

    #[test]
    fn test_raw_element_coordinate_prefers_direct_pair() {
        let element: RawElement = serde_json::from_str(
            r#"{"id": 1, "type": "node", "lat": 26.7, "lon": 85.9,
                "center": {"lat": 0.0, "lon": 0.0}}"#,
        )
        .unwrap();

        assert_eq!(element.coordinate(), Some((26.7, 85.9)));
    }

    #[test]
    fn test_raw_element_falls_back_to_center() {
        let element: RawElement = serde_json::from_str(
            r#"{"id": 2, "type": "way", "center": {"lat": 26.73, "lon": 85.92},
                "tags": {"amenity": "hospital"}}"#,
        )
        .unwrap();

        assert_eq!(element.coordinate(), Some((26.73, 85.92)));
        assert_eq!(element.kind, ElementKind::Way);
    }

    #[test]
    fn test_raw_element_tolerates_missing_fields() {
        let element: RawElement = serde_json::from_str(r#"{"id": 3, "type": "relation"}"#).unwrap();

        assert_eq!(element.coordinate(), None);
        assert!(element.tags.is_empty());
    }
}
