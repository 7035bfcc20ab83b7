use crate::engine::ScriptEngine;
use crate::error::{BridgeError, Result};
use crate::protocol::ScriptCall;
use crate::value::ScriptValue;

/// Synchronous request/response channel into the embedded engine.
pub struct ScriptBridge<E> {
    engine: E,
    ready: bool,
}

impl<E: ScriptEngine> ScriptBridge<E> {
    pub(crate) fn new(engine: E) -> Self {
        ScriptBridge {
            engine,
            ready: false,
        }
    }

    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    pub(crate) fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Evaluate raw script. Fails with [`BridgeError::NotReady`] until the
    /// host has finished loading the page and installing the wrapper.
    pub fn evaluate(&self, snippet: &str) -> Result<ScriptValue> {
        if !self.ready {
            return Err(BridgeError::NotReady);
        }
        log::trace!("evaluate: {}", snippet);
        self.engine.evaluate(snippet)
    }

    /// Invoke a wrapper function with marshalled arguments.
    pub fn call(&self, call: &ScriptCall) -> Result<ScriptValue> {
        let snippet = call.to_snippet()?;
        self.evaluate(&snippet).map_err(|e| {
            log::debug!("{} failed: {}", call.function, e);
            e
        })
    }

    // The typed helpers coerce like JavaScript would. A result of the wrong
    // type is lossy (e.g. a string that isn't a number reads as 0), not an error.

    pub fn call_int(&self, call: &ScriptCall) -> Result<i64> {
        Ok(self.call(call)?.to_int())
    }

    pub fn call_string(&self, call: &ScriptCall) -> Result<String> {
        Ok(self.call(call)?.to_text())
    }

    pub fn call_bool(&self, call: &ScriptCall) -> Result<bool> {
        Ok(self.call(call)?.to_bool())
    }
}
