pub mod config;
pub mod consensus;
pub mod ingest;
pub mod service;
