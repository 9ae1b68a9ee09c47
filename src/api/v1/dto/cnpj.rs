/*
 * Responsibility
 * - Query DTO for the lookup endpoints
 * - Format checks live in services::cnpj, not here
 */
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct LookupQuery {
    pub cnpj: Option<String>,
}
