//! Response construction helpers and the host default handler.

use axum::body::Body;
use axum::http::{header, HeaderValue, Response, StatusCode};

use crate::plugin::{handler_fn, HttpHandler};

/// Build a plain-text response with the given status.
pub fn plain_text(status: StatusCode, body: impl Into<String>) -> Response<Body> {
    let mut resp = Response::new(Body::from(body.into()));
    *resp.status_mut() = status;
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    resp
}

/// The handler the gateway runs when no plugin has replaced it.
///
/// Plugins receive this as their `next` handler and may wrap or discard it.
pub fn default_handler() -> HttpHandler {
    handler_fn(|_req| async {
        plain_text(StatusCode::NOT_FOUND, "no handler installed\n")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use tower::ServiceExt;

    #[test]
    fn plain_text_sets_status_and_content_type() {
        let resp = plain_text(StatusCode::OK, "hi");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn default_handler_returns_404() {
        let resp = default_handler()
            .oneshot(Request::builder().uri("/anything").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
