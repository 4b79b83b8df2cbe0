use std::cmp::Ordering;

use crate::models::{Category, Facility};

/// Result of ranking and grouping a set of facilities
#[derive(Debug, Default)]
pub struct RankedFacilities {
    pub all: Vec<Facility>,
    pub healthcare: Vec<Facility>,
    pub organizations: Vec<Facility>,
    pub total: usize,
}

/// Order facilities named-first then nearest-first, truncate, and bucket
/// by category.
///
/// The sort is stable: facilities equal on both keys keep their input
/// order. A limit of zero disables truncation. Grouping runs on the
/// already truncated sequence, so bucket counts near the limit boundary
/// reflect what is returned, not the full upstream population.
pub fn rank_facilities(mut facilities: Vec<Facility>, limit: usize) -> RankedFacilities {
    facilities.sort_by(|a, b| {
        b.has_name.cmp(&a.has_name).then_with(|| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(Ordering::Equal)
        })
    });

    if limit > 0 {
        facilities.truncate(limit);
    }

    let healthcare: Vec<Facility> = facilities
        .iter()
        .filter(|f| f.category == Category::Healthcare)
        .cloned()
        .collect();
    let organizations: Vec<Facility> = facilities
        .iter()
        .filter(|f| f.category == Category::Organization)
        .cloned()
        .collect();

    RankedFacilities {
        total: facilities.len(),
        healthcare,
        organizations,
        all: facilities,
    }
}
