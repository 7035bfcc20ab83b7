//! Native bridge to the Ace editor running in an embedded web view.
//!
//! [`Editor`] is the entry point. It drives an implementation of
//! [`ScriptEngine`] (a web view in production, a fake in tests) through the
//! wrapper script bundled in [`assets`], and relays the editor's change
//! notifications back as [`ChangeEvent`]s.

pub mod assets;
pub mod bridge;
pub mod editor;
pub mod engine;
pub mod error;
pub mod host;
pub mod mode;
pub mod protocol;
pub mod relay;
pub mod settings;
pub mod value;

#[cfg(test)]
mod wrapper_js;

pub use editor::Editor;
pub use engine::ScriptEngine;
pub use error::{BridgeError, Result};
pub use mode::{AssetDescriptor, HighlightMode, Theme};
pub use protocol::ChangeEvent;
pub use value::ScriptValue;
