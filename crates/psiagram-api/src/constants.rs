//! API constants

/// Versioned prefix for every pipeline route
pub const API_PREFIX: &str = "/api/v1";

/// Where the OpenAPI document is served
pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";

/// Server-wide in-flight request cap, overridable with `HTTP_CONCURRENCY_LIMIT`
pub const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 10_000;
