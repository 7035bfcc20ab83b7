use std::sync::Arc;

use crossbeam_channel::Receiver;

use crate::error::{BridgeError, Result};
use crate::relay::HookTable;
use crate::value::ScriptValue;

/// Completion callback for [`ScriptEngine::load`]. Fires exactly once.
pub type LoadCallback = Box<dyn FnOnce(std::result::Result<(), String>) + Send>;

/// An embedded script engine hosting the editor page.
///
/// Implementations own the rendering surface. Everything here is called from
/// the thread that owns the editor.
pub trait ScriptEngine {
    /// Start loading the bootstrap document at `uri`.
    fn load(&self, uri: &str, on_finished: LoadCallback);

    /// Make `hooks` callable from script as methods of the global `name`.
    fn expose_object(&self, name: &str, hooks: Arc<HookTable>) -> Result<()>;

    /// Run `script` and return the value of its last expression.
    fn evaluate(&self, script: &str) -> Result<ScriptValue>;

    /// Block until `pending` yields. Engines whose completions are delivered
    /// on the waiting thread must keep their own event source turning here.
    fn wait<T>(&self, pending: &Receiver<T>) -> Result<T> {
        pending.recv().map_err(|_| BridgeError::LoadAbandoned)
    }
}
