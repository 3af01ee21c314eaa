use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Ensure every request carries an `x-request-id`.
///
/// An incoming id is kept; otherwise a fresh UUID is minted. The id is
/// echoed on the response so clients can correlate report pages with
/// server logs.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let request_id = match req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
    {
        Some(id) => id.to_string(),
        None => {
            let id = Uuid::new_v4().to_string();
            // Freshly minted UUIDs are always valid header values.
            if let Ok(value) = HeaderValue::from_str(&id) {
                req.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            id
        }
    };

    let mut response = next.run(req).await;

    if !response.headers().contains_key(REQUEST_ID_HEADER) {
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
    }

    response
}
