use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// HTTP header name for the session ID
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// Extension type for storing the session ID in request extensions
///
/// The session ID is the key for the caller's recommendation memory; clients
/// keep sending the value we hand back to stay in the same session.
#[derive(Clone, Debug)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Creates a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the UUID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Middleware that extracts or generates a session ID and adds it to the
/// request extensions. Also echoes the session ID on the response headers.
///
/// If the incoming request has an `x-session-id` header, it will be used.
/// Otherwise, a new UUID v4 will be generated, starting a fresh session.
pub async fn session_id_middleware(mut request: Request, next: Next) -> Response {
    // Try to extract session ID from header, otherwise generate new one
    let session_id = request
        .headers()
        .get(SESSION_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(SessionId)
        .unwrap_or_else(SessionId::new);

    // Store in request extensions for handlers to access
    request.extensions_mut().insert(session_id.clone());

    // Continue processing the request
    let mut response = next.run(request).await;

    // Echo the session ID so clients can carry it forward
    if let Ok(header_value) = HeaderValue::from_str(&session_id.as_str()) {
        response
            .headers_mut()
            .insert(SESSION_ID_HEADER, header_value);
    }

    response
}

/// Helper function to create a tracing span carrying the session ID
pub fn make_span_with_session_id(request: &Request<Body>) -> tracing::Span {
    let session_id = request
        .extensions()
        .get::<SessionId>()
        .map(|id| id.as_str())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        session_id = %session_id,
    )
}
