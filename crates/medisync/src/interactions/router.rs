use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::reference::{DrugInfo, ReferenceData};
use super::report::views::{CheckResult, PairCheck};
use super::{check_interactions, check_pair};
use super::request::CheckRequest;
use crate::error::AppError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared secret every interaction endpoint expects in the `X-API-Key` header.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Arc::from(key.into()))
    }

    fn accepts(&self, headers: &HeaderMap) -> bool {
        headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|presented| presented == &*self.0)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Clone)]
struct InteractionState {
    reference: Arc<ReferenceData>,
    api_key: ApiKey,
}

impl InteractionState {
    fn authorize(&self, headers: &HeaderMap) -> Result<(), AppError> {
        if self.api_key.accepts(headers) {
            Ok(())
        } else {
            warn!("request rejected: invalid or missing API key");
            Err(AppError::Unauthorized)
        }
    }
}

#[derive(Debug, Deserialize)]
struct PairQuery {
    drug1: String,
    drug2: String,
}

/// Router exposing the interaction check, pair check and drug lookup endpoints.
pub fn interaction_router(reference: Arc<ReferenceData>, api_key: ApiKey) -> Router {
    Router::new()
        .route("/check-interactions", post(check_handler))
        .route("/check-pair", get(pair_handler))
        .route("/drug/:name", get(drug_handler))
        .with_state(InteractionState { reference, api_key })
}

async fn check_handler(
    State(state): State<InteractionState>,
    headers: HeaderMap,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<CheckResult>, AppError> {
    state.authorize(&headers)?;
    let Json(request) =
        payload.map_err(|rejection| AppError::InvalidPayload(rejection.body_text()))?;

    let result = check_interactions(&state.reference, &request).map_err(|error| {
        warn!(%error, "interaction check rejected");
        AppError::from(error)
    })?;

    info!(
        drugs = result.graph_data.nodes.len(),
        overall_risk = result.overall_risk.label(),
        "interaction check served"
    );
    Ok(Json(result))
}

async fn pair_handler(
    State(state): State<InteractionState>,
    headers: HeaderMap,
    query: Result<Query<PairQuery>, QueryRejection>,
) -> Result<Json<PairCheck>, AppError> {
    state.authorize(&headers)?;
    let Query(query) = query.map_err(|rejection| AppError::InvalidPayload(rejection.body_text()))?;

    let pair = check_pair(&state.reference, &query.drug1, &query.drug2).map_err(|error| {
        warn!(%error, "pair check rejected");
        AppError::from(error)
    })?;
    Ok(Json(pair))
}

async fn drug_handler(
    State(state): State<InteractionState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Result<Json<DrugInfo>, AppError> {
    state.authorize(&headers)?;
    state
        .reference
        .drug_info(&name)
        .map(Json)
        .ok_or(AppError::DrugNotFound(name))
}
