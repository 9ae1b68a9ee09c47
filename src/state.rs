/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - lookup: LookupService (wraps the injected RegistryClient)
 * - Cheap to Clone (Arc inside)
 */
use std::sync::Arc;

use crate::services::lookup::LookupService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub lookup: Arc<LookupService>,
}

impl AppState {
    pub fn new(lookup: Arc<LookupService>) -> Self {
        Self { lookup }
    }
}
