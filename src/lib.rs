//! Harmonization engine for training-camp planning spreadsheets.
//!
//! Raw sheets from different units are read ([`ingest`]), their single or
//! grouped headers are resolved onto a fixed 16-field schema ([`schema`]),
//! merged ([`merge`]), optionally decoded ([`decode`]) and rendered back to
//! workbooks ([`render`]). [`pipeline`] wires the stages to files on disk.

pub mod config;
pub mod decode;
pub mod error;
pub mod ingest;
pub mod merge;
pub mod observability;
pub mod pipeline;
pub mod render;
pub mod schema;

pub use error::EngineError;
