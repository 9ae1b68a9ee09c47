/*
 * Responsibility
 * - Public interface of the middleware (re-export)
 * - cors::apply(...), http::apply(...)
 */
pub mod cors;
pub mod http;
