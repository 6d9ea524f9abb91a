//! Content endpoint module
//!
//! Serves the single configured file: existence check, then a full
//! non-blocking read. The file is read fresh on every request and never
//! cached.

use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Route the content endpoint is bound to
pub const CONTENT_ROUTE: &str = "/api/file";

/// Serve the configured content file
///
/// Response contract:
/// - path missing → 404 with a short message, the path goes to the error log
/// - read succeeds → 200 with the file bytes, byte-for-byte
/// - read fails → 500 with a generic message, detail goes to the error log
pub async fn serve_content(ctx: &RequestContext<'_>, file_path: &str) -> Response<Full<Bytes>> {
    if !Path::new(file_path).exists() {
        logger::log_error(&format!("Content file not found: {file_path}"));
        return http::build_404_response();
    }

    match fs::read(file_path).await {
        Ok(content) => http::build_text_response(Bytes::from(content), ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to read content file '{file_path}': {e}"));
            http::build_500_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn test_ctx(is_head: bool) -> RequestContext<'static> {
        RequestContext {
            path: CONTENT_ROUTE,
            is_head,
            access_log: false,
        }
    }

    fn temp_file(name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "fileview-content-{}-{name}.txt",
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    async fn body_bytes(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn existing_file_returns_200_with_exact_bytes() {
        let path = temp_file("ok", b"hello\nworld");
        let response = serve_content(&test_ctx(false), path.to_str().unwrap()).await;
        std::fs::remove_file(&path).unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(
            response
                .headers()
                .get("Content-Type")
                .unwrap()
                .to_str()
                .unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_bytes(response).await.as_ref(), b"hello\nworld");
    }

    #[tokio::test]
    async fn non_utf8_file_is_served_byte_for_byte() {
        let path = temp_file("bin", &[0xff, 0xfe, 0x00, 0x41]);
        let response = serve_content(&test_ctx(false), path.to_str().unwrap()).await;
        std::fs::remove_file(&path).unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(body_bytes(response).await.as_ref(), &[0xff, 0xfe, 0x00, 0x41]);
    }

    #[tokio::test]
    async fn head_request_returns_empty_body() {
        let path = temp_file("head", b"hello");
        let response = serve_content(&test_ctx(true), path.to_str().unwrap()).await;
        std::fs::remove_file(&path).unwrap();

        assert_eq!(response.status(), 200);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn missing_file_returns_404() {
        let path = std::env::temp_dir().join(format!(
            "fileview-content-{}-does-not-exist.txt",
            std::process::id()
        ));
        let response = serve_content(&test_ctx(false), path.to_str().unwrap()).await;

        assert_eq!(response.status(), 404);
        assert_eq!(body_bytes(response).await.as_ref(), b"404 Not Found");
    }

    #[tokio::test]
    async fn unreadable_path_returns_opaque_500() {
        // A directory exists but cannot be read as a file, which stands in
        // for permission and transient I/O failures.
        let dir = std::env::temp_dir().join(format!(
            "fileview-content-{}-dir",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let response = serve_content(&test_ctx(false), dir.to_str().unwrap()).await;
        std::fs::remove_dir(&dir).unwrap();

        assert_eq!(response.status(), 500);
        let body = body_bytes(response).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert_eq!(text, "500 Internal Server Error");
        // The OS error text must not leak into the body
        assert!(!text.contains("directory"));
        assert!(!text.contains("os error"));
    }
}
