//! fileview - serve one configured text file over HTTP and view it
//!
//! The server exposes the file at `GET /api/file`; the viewer fetches that
//! endpoint once and renders the body, or a flagged error.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod viewer;
