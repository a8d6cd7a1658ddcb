// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod aggregator;
pub mod cache;
pub mod enricher;
pub mod google_places_client;
pub mod place_service;
pub mod weather_client;

pub use aggregator::*;
pub use cache::*;
pub use enricher::*;
pub use google_places_client::*;
pub use place_service::*;
pub use weather_client::*;
