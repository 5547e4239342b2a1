//! File input/output: CSV ingest and artifact export.

pub mod export;
pub mod ingest;
