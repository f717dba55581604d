//! Cross-origin policy for the JSON API.

use tower_http::cors::CorsLayer;

/// Allows any origin, method and header. No endpoint reads cookies.
pub fn layer() -> CorsLayer {
    CorsLayer::permissive()
}
