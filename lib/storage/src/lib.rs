//! # VendX Storage
//!
//! Durable pieces of the qualification pipeline: the filesystem-backed
//! vectorizer store, the CSV catalog loader, and result sinks.
//!
//! Vectorizer blobs are bincode-encoded and written atomically, so a
//! crashed run never leaves a half-written vectorizer behind.
//!
//! Result sinks are library-only: the HTTP server returns results in
//! its responses, while embedders running batch qualifications can
//! export the ranked output through [`JsonlSink`].

pub mod loader;
pub mod sink;
pub mod store;

pub use loader::load_catalog;
pub use sink::{JsonlSink, ResultSink};
pub use store::FsVectorStore;
