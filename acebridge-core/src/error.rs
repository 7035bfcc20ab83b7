//! Error types for the editor bridge.

use std::path::PathBuf;

/// Everything that can go wrong between the native side and the embedded editor.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Embedded editor is not initialized yet")]
    NotReady,

    #[error("Bootstrap document failed to load: {0}")]
    LoadFailed(String),

    #[error("Load completion was dropped before it fired")]
    LoadAbandoned,

    #[error("Wrapper script could not be read from {path:?}: {source}")]
    MissingWrapperAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Wrapper API is not installed in the embedded editor")]
    WrapperUnavailable,

    #[error("JavaScript error: {0}")]
    ScriptEvaluation(String),

    #[error("Expected {expected} from script, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: String,
    },

    #[error("Hook {method} called with bad arguments: {reason}")]
    HookSignature { method: String, reason: String },

    #[error("No native hook named {0}")]
    UnknownHook(String),

    #[error("Failed to marshal script value: {0}")]
    Marshal(#[from] serde_json::Error),

    #[error("Asset error: {0}")]
    Asset(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
