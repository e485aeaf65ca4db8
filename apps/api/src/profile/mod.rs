pub mod store;
pub mod update;
