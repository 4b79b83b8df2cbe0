// Service exports
pub mod overpass;

pub use overpass::{build_element_query, build_search_query, OverpassClient, OverpassError};
