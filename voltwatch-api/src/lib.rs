pub mod alert;
pub mod models;

/// Header carrying the device API key on every hardware request.
pub const API_KEY_HEADER: &str = "X-API-Key";
