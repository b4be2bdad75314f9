// ==========================================
// Safety Operations Platform - API layer
// ==========================================
// Thin handlers over the import pipeline; the web/request boundary
// lives outside this crate.
// ==========================================

pub mod error;
pub mod import_api;

pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportApiResponse};
