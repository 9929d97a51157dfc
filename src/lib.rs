pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod telemetry;

pub use config::Config;
pub use pipeline::{PipelineReport, run};
