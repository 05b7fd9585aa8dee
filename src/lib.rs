pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LambdaConfig, LambdaRequest, Settings, StorageBackend, StorageSettings};

pub use adapters::storage::LocalStorage;
#[cfg(feature = "s3")]
pub use adapters::storage::S3Storage;

pub use core::{
    aggregator::summarize, etl::EtlEngine, pipeline::SummaryPipeline, ObjectLocation, RunReport,
    SummaryRecord,
};
pub use utils::error::{EtlError, Result};
