pub mod commands;
pub mod snippet;

pub use snippet::TrackingSnippetBuilder;
