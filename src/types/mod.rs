pub mod assessment;
pub mod config;
pub mod repo;
pub mod report;
pub mod summary;
