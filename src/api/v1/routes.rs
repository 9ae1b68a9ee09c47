/*
 * Responsibility
 * - v1 URL structure
 * - /health, /cnpj (query), /cnpj/{cnpj} (path)
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{
    cnpj::{lookup_cnpj, lookup_cnpj_by_path},
    health::health,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/cnpj", get(lookup_cnpj))
        .route("/cnpj/{cnpj}", get(lookup_cnpj_by_path))
}
