// =============================================================================
// API Module
// =============================================================================
//
// HTTP surface of the scanner:
// - REST router (ingest + reads) with permissive CORS
// - Optional webhook token guard

pub mod auth;
pub mod rest;
