//! Error types for bundle and hot-update serialization.

use delta_graph::ModuleId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SerializerError>;

#[derive(Debug, Error)]
pub enum SerializerError {
    /// Graph-level failure, most notably reading an id that was never assigned.
    #[error(transparent)]
    Graph(#[from] delta_graph::Error),

    #[error("module {path} has no JavaScript output")]
    MissingJsOutput { path: String },

    #[error("modules {first} and {second} were both assigned id {id}")]
    DuplicateModuleId {
        id: ModuleId,
        first: String,
        second: String,
    },

    #[error("sourceUrl is required when includeAsyncPaths is enabled")]
    MissingSourceUrl,

    #[error("clientUrl is required to build hot updates")]
    MissingClientUrl,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("source map error: {0}")]
    SourceMap(#[from] sourcemap::Error),

    #[error("source map JSON error: {0}")]
    SourceMapJson(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] delta_config::ConfigError),
}
