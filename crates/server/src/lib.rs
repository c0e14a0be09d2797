pub mod api;
pub mod config;
pub mod error;
pub mod oplog;
pub mod telemetry;
