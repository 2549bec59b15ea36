pub mod catalog;
pub mod snapshot;
