pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::InternalIps;
pub use config::AnalyticsConfig;
pub use core::snippet::TrackingSnippetBuilder;
pub use domain::model::{
    CustomVariable, LineItem, PropertyId, RenderContext, Scope, TrackingMode, Transaction,
};
pub use domain::ports::TrafficClassifier;
pub use utils::error::{Result, SnippetError};
