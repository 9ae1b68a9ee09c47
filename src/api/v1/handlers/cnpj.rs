/*
 * Responsibility
 * - GET /?cnpj=, /api/v1/cnpj?cnpj=, /api/v1/cnpj/{cnpj}
 * - Extract the raw value and hand it to LookupService (no logic here)
 */
use axum::{
    extract::{Path, Query, State, rejection::QueryRejection},
    response::Response,
};

use crate::{api::v1::dto::cnpj::LookupQuery, error::AppError, state::AppState};

pub async fn lookup_cnpj(
    State(state): State<AppState>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|e| AppError::InvalidQuery {
        detail: e.body_text(),
    })?;

    state.lookup.lookup(query.cnpj.as_deref()).await
}

pub async fn lookup_cnpj_by_path(
    State(state): State<AppState>,
    Path(cnpj): Path<String>,
) -> Result<Response, AppError> {
    state.lookup.lookup(Some(&cnpj)).await
}
