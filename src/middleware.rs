use axum::{
    extract::Request,
    http::uri::{PathAndQuery, Uri},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info};

/// Collapses repeated slashes and drops a trailing slash, so `//api/movies/`
/// routes like `/api/movies`.
///
/// Route matching happens inside the router, so this has to wrap the finished
/// router rather than be one of its layers.
pub async fn normalize_path(mut req: Request, next: Next) -> Response {
    let uri = req.uri();
    let normalized = normalized_path(uri.path());

    if normalized != uri.path() {
        debug!("Rewriting {} to {}", uri.path(), normalized);
        let path_and_query = match uri.query() {
            Some(query) => format!("{}?{}", normalized, query),
            None => normalized,
        };

        if let Ok(path_and_query) = path_and_query.parse::<PathAndQuery>() {
            let mut parts = uri.clone().into_parts();
            parts.path_and_query = Some(path_and_query);
            if let Ok(new_uri) = Uri::from_parts(parts) {
                *req.uri_mut() = new_uri;
            }
        }
    }

    next.run(req).await
}

fn normalized_path(path: &str) -> String {
    let mut normalized = path.to_string();
    while normalized.contains("//") {
        normalized = normalized.replace("//", "/");
    }
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let content_length = response
        .headers()
        .get(axum::http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);

    info!(
        method = %method,
        path = %path,
        status = status,
        length = content_length,
        "HTTP request"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_path() {
        assert_eq!(normalized_path("/api/movies"), "/api/movies");
        assert_eq!(normalized_path("//api///favorites"), "/api/favorites");
        assert_eq!(normalized_path("/api/favorites/"), "/api/favorites");
        assert_eq!(normalized_path("//"), "/");
        assert_eq!(normalized_path("/"), "/");
    }
}
