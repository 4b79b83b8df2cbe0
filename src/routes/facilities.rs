use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::SearchSettings;
use crate::core::{annotate_distance, normalize, rank_facilities};
use crate::models::{
    CategoryBreakdown, ErrorResponse, Facility, FacilityDetailsResponse, HealthResponse,
    SearchCenter, SearchQuery, SearchRequest, SearchResponse,
};
use crate::services::{build_search_query, OverpassClient, OverpassError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub overpass: Arc<OverpassClient>,
    pub search: SearchSettings,
}

/// Configure all facility-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/facilities/search", web::get().to(search_facilities))
        .route("/facilities/{id}", web::get().to(get_facility_details));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Facility search endpoint
///
/// GET /api/v1/facilities/search?lat=26.7288&lon=85.9244&radius=2000&category=healthcare&limit=50
///
/// Fetches candidate elements around the point, normalizes them, annotates
/// distances, and returns the ranked and grouped result.
async fn search_facilities(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let request = match SearchRequest::from_query(
        &query,
        state.search.default_radius_m,
        state.search.default_limit,
    ) {
        Ok(request) => request,
        Err(e) => {
            tracing::info!("Rejected facility search: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: e.code().to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    if let Err(errors) = request.validate() {
        tracing::info!("Validation failed for facility search: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!(
        "Searching {:?} facilities within {}m of ({}, {})",
        request.category,
        request.radius_meters,
        request.latitude,
        request.longitude
    );

    let query_text = build_search_query(
        request.category,
        request.latitude,
        request.longitude,
        request.radius_meters,
    );

    let elements = match state.overpass.fetch_elements(&query_text).await {
        Ok(elements) => elements,
        Err(e) => return upstream_error_response(e),
    };

    tracing::debug!("Normalizing {} raw elements", elements.len());

    let origin = (request.latitude, request.longitude);
    let facilities: Vec<Facility> = elements
        .iter()
        .map(|element| normalize(element, &state.search.locality))
        .filter(|facility| {
            if facility.has_coordinate() {
                true
            } else {
                tracing::debug!("Skipping facility {} without a resolvable coordinate", facility.id);
                false
            }
        })
        .map(|facility| annotate_distance(origin, facility))
        .collect();

    let ranked = rank_facilities(facilities, request.limit);

    tracing::info!(
        "Returning {} facilities ({} healthcare, {} organizations)",
        ranked.total,
        ranked.healthcare.len(),
        ranked.organizations.len()
    );

    HttpResponse::Ok().json(SearchResponse {
        search_center: SearchCenter {
            lat: request.latitude,
            lon: request.longitude,
        },
        radius_meters: request.radius_meters,
        locality: state.search.locality.clone(),
        total: ranked.total,
        breakdown: CategoryBreakdown {
            healthcare: ranked.healthcare.len(),
            organizations: ranked.organizations.len(),
        },
        facilities: ranked.all,
        healthcare: ranked.healthcare,
        organizations: ranked.organizations,
    })
}

/// Facility details endpoint
///
/// GET /api/v1/facilities/{id}
///
/// Looks up a single element by identifier and returns the normalized
/// facility expanded with contact, healthcare, hours, and metadata groups.
async fn get_facility_details(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();

    tracing::info!("Fetching facility details for {}", id);

    match state.overpass.fetch_element(id).await {
        Ok(Some(element)) => {
            let facility = normalize(&element, &state.search.locality);
            HttpResponse::Ok().json(FacilityDetailsResponse::from_facility(facility, element.kind))
        }
        Ok(None) => {
            tracing::info!("No facility found with id {}", id);
            HttpResponse::NotFound().json(ErrorResponse {
                error: "facility_not_found".to_string(),
                message: format!("No facility found with id {}", id),
                status_code: 404,
            })
        }
        Err(e) => upstream_error_response(e),
    }
}

/// Translate an upstream failure into the error envelope.
fn upstream_error_response(err: OverpassError) -> HttpResponse {
    tracing::error!("Overpass request failed: {}", err);

    let code = match &err {
        OverpassError::MalformedResponse(_) => "upstream_malformed_response",
        OverpassError::Unavailable(_) | OverpassError::Api(_) => "upstream_unavailable",
    };

    HttpResponse::BadGateway().json(ErrorResponse {
        error: code.to_string(),
        message: err.to_string(),
        status_code: 502,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_upstream_error_codes() {
        let malformed = OverpassError::MalformedResponse("missing elements".to_string());
        let response = upstream_error_response(malformed);

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_GATEWAY);
    }
}
