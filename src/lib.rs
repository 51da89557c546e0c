//! Upload gateway service
//!
//! Issues time-limited presigned S3 PUT URLs so clients can upload files
//! directly to object storage without routing the bytes through this server.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// HTTP route handlers
pub mod routes;

/// Server bootstrap and router assembly
pub mod server;

/// Application state
pub mod state;

/// Presigned upload operations against S3
pub mod storage;

/// Configuration, error handling, and request extractors
pub mod types;
