pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{apollo::ApolloClient, sink::ResultSink};
pub use config::{cli::LocalStorage, file_config::ApollonatorConfig, CliConfig, OutputFormat};
pub use core::enricher::Enricher;
pub use domain::credentials::CredentialPool;
pub use utils::error::{ApollonatorError, Result};
