#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod settings;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use lambda::{LambdaConfig, LambdaRequest};
pub use settings::{Settings, StorageBackend, StorageSettings};
