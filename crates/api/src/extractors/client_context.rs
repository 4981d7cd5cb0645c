//! Client embedding context extractor.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::HeaderName, request::Parts},
};
use axum_extra::headers::{HeaderMapExt, UserAgent};
use domain::services::ClientContext;
use std::convert::Infallible;

/// Fetch metadata header set by browsers; `iframe` for framed documents.
pub const SEC_FETCH_DEST_HEADER: &str = "sec-fetch-dest";

/// Display mode reported by the PWA shell (`standalone`, `browser`, ...).
pub const DISPLAY_MODE_HEADER: &str = "x-display-mode";

/// How the calling client is embedded, detected from request headers.
#[derive(Debug, Clone, Copy)]
pub struct Client(pub ClientContext);

#[async_trait]
impl<S> FromRequestParts<S> for Client
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts.headers.typed_get::<UserAgent>();
        let header = |name: &'static str| {
            parts
                .headers
                .get(HeaderName::from_static(name))
                .and_then(|v| v.to_str().ok())
        };

        Ok(Client(ClientContext::detect(
            user_agent.as_ref().map(UserAgent::as_str),
            header(SEC_FETCH_DEST_HEADER),
            header(DISPLAY_MODE_HEADER),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use domain::services::EmbeddingContext;

    async fn extract(request: Request<()>) -> ClientContext {
        let (mut parts, _) = request.into_parts();
        Client::from_request_parts(&mut parts, &()).await.unwrap().0
    }

    #[tokio::test]
    async fn test_extracts_webview() {
        let request = Request::builder()
            .header(
                "user-agent",
                "Mozilla/5.0 (Linux; Android 14; Pixel 8; wv) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/120.0.0.0 Mobile Safari/537.36",
            )
            .body(())
            .unwrap();
        let ctx = extract(request).await;
        assert_eq!(ctx.embedding, EmbeddingContext::AndroidWebView);
        assert!(!ctx.is_bot);
    }

    #[tokio::test]
    async fn test_extracts_iframe_and_display_mode() {
        let request = Request::builder()
            .header("user-agent", "Mozilla/5.0 (X11; Linux x86_64) Firefox/126.0")
            .header(SEC_FETCH_DEST_HEADER, "iframe")
            .header(DISPLAY_MODE_HEADER, "standalone")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.embedding, EmbeddingContext::Iframe);
    }

    #[tokio::test]
    async fn test_missing_user_agent_is_bot() {
        let request = Request::builder().body(()).unwrap();
        assert!(extract(request).await.is_bot);
    }
}
