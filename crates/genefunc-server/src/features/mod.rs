//! Feature slices
//!
//! Each feature owns its queries and routes. Routers here are mounted under
//! the API prefix by [`crate::api::create_router`].

pub mod gene_functions;
pub mod shared;

use std::sync::Arc;

use axum::Router;

use crate::idmapping::{IdMappingApi, PollPolicy};

/// State shared by feature handlers
#[derive(Clone)]
pub struct FeatureState {
    pub api: Arc<dyn IdMappingApi>,
    pub poll_policy: PollPolicy,
}

impl FeatureState {
    pub fn new(api: Arc<dyn IdMappingApi>, poll_policy: PollPolicy) -> Self {
        Self { api, poll_policy }
    }
}

/// Create the router for all features
pub fn router(state: FeatureState) -> Router {
    Router::new()
        .merge(gene_functions::gene_functions_routes())
        .with_state(state)
}
