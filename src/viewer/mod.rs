//! Viewer module
//!
//! Client-side counterpart of the content endpoint: fetches the served file
//! once on mount and renders either the body or an error description.

mod fetch;

pub use fetch::{fetch_content, FetchError};

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What the viewer currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing fetched yet
    Loading,
    /// Fetched body, rendered verbatim
    Content(String),
    /// Failure description, rendered flagged
    Failed(String),
}

/// One-shot content viewer
///
/// Mounting fetches the content exactly once and applies the result; the
/// result is never cached across mounts. The liveness flag guards against a
/// late result landing after the viewer was torn down.
pub struct Viewer {
    state: ViewState,
    alive: Arc<AtomicBool>,
}

impl Viewer {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Liveness token for the in-flight fetch
    ///
    /// Holders observe `false` once the viewer has been torn down.
    pub fn liveness(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.alive)
    }

    /// Fetch the content and apply the result.
    ///
    /// Rendering never triggers a fetch; calling `mount` again re-fetches,
    /// there is no cache.
    pub async fn mount(&mut self, client: &reqwest::Client, url: &str) {
        let result = fetch_content(client, url).await;
        self.apply(result);
    }

    /// Apply a fetch result to the view state.
    ///
    /// A result arriving after `teardown` is discarded, the state stays
    /// untouched.
    pub fn apply(&mut self, result: Result<String, FetchError>) {
        if !self.alive.load(Ordering::Acquire) {
            return;
        }
        self.state = match result {
            Ok(text) => ViewState::Content(text),
            Err(err) => ViewState::Failed(err.to_string()),
        };
    }

    /// Discard this viewer; late fetch results will no longer be applied.
    pub fn teardown(&mut self) {
        self.alive.store(false, Ordering::Release);
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn failed(&self) -> bool {
        matches!(self.state, ViewState::Failed(_))
    }

    /// Render the current state.
    ///
    /// Content is written verbatim, whitespace and line breaks untouched.
    /// Failures are written as a single flagged line. `Loading` writes
    /// nothing.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.state {
            ViewState::Loading => Ok(()),
            ViewState::Content(text) => out.write_all(text.as_bytes()),
            ViewState::Failed(message) => writeln!(out, "[ERROR] {message}"),
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::server::conn::http1;
    use hyper::service::service_fn;
    use hyper::Response;
    use hyper_util::rt::TokioIo;
    use std::convert::Infallible;
    use std::net::SocketAddr;
    use std::sync::atomic::AtomicUsize;

    /// Spawn a local server answering every request with the given status
    /// and a body produced from the running request counter.
    async fn spawn_server(
        status: u16,
        body_for: fn(usize) -> String,
    ) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let counter = Arc::clone(&counter);
                tokio::spawn(async move {
                    let service = service_fn(move |_req| {
                        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                        async move {
                            Ok::<_, Infallible>(
                                Response::builder()
                                    .status(status)
                                    .header("Content-Type", "text/plain; charset=utf-8")
                                    .body(Full::new(Bytes::from(body_for(n))))
                                    .unwrap(),
                            )
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        addr
    }

    fn rendered(viewer: &Viewer) -> String {
        let mut out = Vec::new();
        viewer.render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn mount_renders_success_body_verbatim() {
        let addr = spawn_server(200, |_| "hello\nworld".to_string()).await;
        let client = reqwest::Client::new();
        let mut viewer = Viewer::new();

        viewer.mount(&client, &format!("http://{addr}/api/file")).await;

        assert!(!viewer.failed());
        // Line break preserved exactly, nothing appended
        assert_eq!(rendered(&viewer), "hello\nworld");
    }

    #[tokio::test]
    async fn non_success_status_renders_error_with_code() {
        let addr = spawn_server(404, |_| "404 Not Found".to_string()).await;
        let client = reqwest::Client::new();
        let mut viewer = Viewer::new();

        viewer.mount(&client, &format!("http://{addr}/api/file")).await;

        assert!(viewer.failed());
        let output = rendered(&viewer);
        assert!(output.starts_with("[ERROR] "));
        assert!(output.contains("404"));
        assert!(output.contains("Not Found"));
    }

    #[tokio::test]
    async fn connection_failure_renders_error_message() {
        // Bind to grab a free port, then drop the listener so the connect
        // attempt is refused.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = reqwest::Client::new();
        let mut viewer = Viewer::new();
        viewer.mount(&client, &format!("http://{addr}/api/file")).await;

        assert!(viewer.failed());
        let output = rendered(&viewer);
        assert!(output.starts_with("[ERROR] "));
        assert!(output.trim_end().len() > "[ERROR]".len());
    }

    #[tokio::test]
    async fn remounting_fetches_again() {
        let addr = spawn_server(200, |n| format!("body-{n}")).await;
        let client = reqwest::Client::new();
        let mut viewer = Viewer::new();
        let url = format!("http://{addr}/api/file");

        viewer.mount(&client, &url).await;
        assert_eq!(*viewer.state(), ViewState::Content("body-1".to_string()));

        viewer.mount(&client, &url).await;
        assert_eq!(*viewer.state(), ViewState::Content("body-2".to_string()));
    }

    #[test]
    fn apply_after_teardown_is_discarded() {
        let mut viewer = Viewer::new();
        viewer.teardown();
        viewer.apply(Ok("late result".to_string()));

        assert_eq!(*viewer.state(), ViewState::Loading);
        assert_eq!(rendered(&viewer), "");
    }

    #[test]
    fn loading_renders_nothing() {
        let viewer = Viewer::new();
        assert_eq!(rendered(&viewer), "");
    }
}
