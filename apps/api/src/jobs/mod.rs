pub mod ingest;
pub mod retention;
pub mod store;
