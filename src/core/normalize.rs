use std::collections::HashMap;

use crate::models::{Category, Facility, RawElement};

/// Tag classes that determine a facility's category, in priority order.
/// The first class present on a record wins, so an element carrying both
/// an amenity and an office tag resolves to healthcare.
const CATEGORY_RULES: &[(&str, Category)] = &[
    ("amenity", Category::Healthcare),
    ("office", Category::Organization),
];

// Candidate tag keys per optional field, in fallback order.
const NAME_KEYS: &[&str] = &["name"];
const ADDRESS_KEYS: &[&str] = &["addr:street", "addr:full"];
const CITY_KEYS: &[&str] = &["addr:city"];
const PHONE_KEYS: &[&str] = &["phone", "contact:phone"];
const WEBSITE_KEYS: &[&str] = &["website", "contact:website"];
const EMAIL_KEYS: &[&str] = &["email", "contact:email"];
const EMERGENCY_KEYS: &[&str] = &["emergency"];
const BEDS_KEYS: &[&str] = &["beds"];
const OPERATOR_KEYS: &[&str] = &["operator"];
const OPENING_HOURS_KEYS: &[&str] = &["opening_hours"];
const DESCRIPTION_KEYS: &[&str] = &["description"];

/// First non-empty value among the candidate keys.
#[inline]
fn first_tag(tags: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| tags.get(*key))
        .find(|value| !value.is_empty())
        .cloned()
}

/// Resolve the category/type pair from the rule table.
#[inline]
fn resolve_category(tags: &HashMap<String, String>) -> (Category, String) {
    for (tag_class, category) in CATEGORY_RULES {
        if let Some(value) = tags.get(*tag_class).filter(|value| !value.is_empty()) {
            return (*category, value.clone());
        }
    }
    (Category::Other, "unknown".to_string())
}

/// Map one raw element into a canonical facility record.
///
/// Total function: absent tags default rather than error. `locality` is
/// the configured fallback for the city field. The distance field is left
/// unset; the distance engine fills it in after normalization.
pub fn normalize(raw: &RawElement, locality: &str) -> Facility {
    let (category, facility_type) = resolve_category(&raw.tags);

    let raw_name = first_tag(&raw.tags, NAME_KEYS);
    let has_name = raw_name.is_some();
    let name = raw_name.unwrap_or_else(|| format!("Unnamed {}", facility_type));

    let (lat, lon) = match raw.coordinate() {
        Some((lat, lon)) => (Some(lat), Some(lon)),
        None => (None, None),
    };

    Facility {
        id: raw.id,
        name,
        has_name,
        category,
        facility_type,
        lat,
        lon,
        address: first_tag(&raw.tags, ADDRESS_KEYS),
        city: first_tag(&raw.tags, CITY_KEYS).unwrap_or_else(|| locality.to_string()),
        phone: first_tag(&raw.tags, PHONE_KEYS),
        website: first_tag(&raw.tags, WEBSITE_KEYS),
        email: first_tag(&raw.tags, EMAIL_KEYS),
        emergency: first_tag(&raw.tags, EMERGENCY_KEYS).map(|value| value == "yes"),
        beds: first_tag(&raw.tags, BEDS_KEYS).and_then(|value| value.parse().ok()),
        operator: first_tag(&raw.tags, OPERATOR_KEYS),
        opening_hours: first_tag(&raw.tags, OPENING_HOURS_KEYS),
        description: first_tag(&raw.tags, DESCRIPTION_KEYS),
        distance_km: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tags: &[(&str, &str)]) -> RawElement {
        let tags: HashMap<String, String> = tags
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        serde_json::from_value(serde_json::json!({
            "id": 42,
            "type": "node",
            "lat": 26.7288,
            "lon": 85.9244,
            "tags": tags,
        }))
        .unwrap()
    }

    #[test]
    fn test_amenity_resolves_to_healthcare() {
        let facility = normalize(
            &element(&[("amenity", "hospital"), ("name", "City Hospital")]),
            "Janakpur",
        );

        assert_eq!(facility.category, Category::Healthcare);
        assert_eq!(facility.facility_type, "hospital");
        assert_eq!(facility.name, "City Hospital");
        assert!(facility.has_name);
    }

    #[test]
    fn test_office_resolves_to_organization() {
        let facility = normalize(&element(&[("office", "ngo")]), "Janakpur");

        assert_eq!(facility.category, Category::Organization);
        assert_eq!(facility.facility_type, "ngo");
    }

    #[test]
    fn test_amenity_wins_over_office() {
        let facility = normalize(
            &element(&[("amenity", "clinic"), ("office", "company")]),
            "Janakpur",
        );

        assert_eq!(facility.category, Category::Healthcare);
        assert_eq!(facility.facility_type, "clinic");
    }

    #[test]
    fn test_no_tags_degrades_gracefully() {
        let facility = normalize(&element(&[]), "Janakpur");

        assert_eq!(facility.category, Category::Other);
        assert_eq!(facility.facility_type, "unknown");
        assert!(!facility.has_name);
        assert_eq!(facility.name, "Unnamed unknown");
        assert_eq!(facility.city, "Janakpur");
        assert!(facility.address.is_none());
        assert!(facility.phone.is_none());
        assert!(facility.website.is_none());
        assert!(facility.email.is_none());
        assert!(facility.emergency.is_none());
        assert!(facility.beds.is_none());
        assert!(facility.operator.is_none());
        assert!(facility.opening_hours.is_none());
        assert!(facility.description.is_none());
        assert!(facility.distance_km.is_none());
    }

    #[test]
    fn test_empty_name_synthesizes_placeholder() {
        let facility = normalize(&element(&[("amenity", "pharmacy"), ("name", "")]), "Janakpur");

        assert!(!facility.has_name);
        assert_eq!(facility.name, "Unnamed pharmacy");
    }

    #[test]
    fn test_contact_fallback_chain() {
        let facility = normalize(
            &element(&[
                ("amenity", "hospital"),
                ("contact:phone", "+977-41-520133"),
                ("website", "https://example.org"),
                ("contact:email", "info@example.org"),
            ]),
            "Janakpur",
        );

        assert_eq!(facility.phone.as_deref(), Some("+977-41-520133"));
        assert_eq!(facility.website.as_deref(), Some("https://example.org"));
        assert_eq!(facility.email.as_deref(), Some("info@example.org"));
    }

    #[test]
    fn test_primary_key_wins_over_fallback() {
        let facility = normalize(
            &element(&[("phone", "111"), ("contact:phone", "222")]),
            "Janakpur",
        );

        assert_eq!(facility.phone.as_deref(), Some("111"));
    }

    #[test]
    fn test_city_tag_overrides_locality_default() {
        let facility = normalize(&element(&[("addr:city", "Dhanusha")]), "Janakpur");

        assert_eq!(facility.city, "Dhanusha");
    }

    #[test]
    fn test_emergency_and_beds_parsing() {
        let facility = normalize(
            &element(&[("amenity", "hospital"), ("emergency", "yes"), ("beds", "120")]),
            "Janakpur",
        );
        assert_eq!(facility.emergency, Some(true));
        assert_eq!(facility.beds, Some(120));

        let facility = normalize(
            &element(&[("emergency", "no"), ("beds", "plenty")]),
            "Janakpur",
        );
        assert_eq!(facility.emergency, Some(false));
        assert!(facility.beds.is_none());
    }

    #[test]
    fn test_missing_coordinate_left_unset() {
        let raw: RawElement =
            serde_json::from_str(r#"{"id": 7, "type": "relation", "tags": {"office": "ngo"}}"#)
                .unwrap();

        let facility = normalize(&raw, "Janakpur");

        assert!(!facility.has_coordinate());
        assert_eq!(facility.category, Category::Organization);
    }
}
