//! API utilities for frontend-backend communication
//!
//! Fallback base address of the reporting backend.

/// Port the reporting backend listens on when served next to the app.
pub const DEFAULT_API_PORT: u16 = 8000;

/// Fallback base URL when none was configured
///
/// Constructs the API base URL from the current window location,
/// using port 8000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:8000" or "https://example.com:8000"
/// - "http://localhost:8000" if window is not available
pub fn origin_api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return format!("http://localhost:{}", DEFAULT_API_PORT),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, DEFAULT_API_PORT)
}
