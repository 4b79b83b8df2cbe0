// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Category, Center, ElementKind, Facility, RawElement, SearchCategory};
pub use requests::{RequestError, SearchQuery, SearchRequest};
pub use responses::{
    CategoryBreakdown, ContactInfo, ErrorResponse, FacilityDetailsResponse, FacilityMetadata,
    HealthResponse, HealthcareInfo, HoursInfo, SearchCenter, SearchResponse,
};
