use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Global the wrapper script defines; every native→Ace call goes through
/// `acebridge.invoke(name, args)`.
pub const WRAPPER_GLOBAL: &str = "acebridge";

/// Name under which the native hook table is exposed to script. The wrapper
/// calls `AceBridge.onLinesChanged(n)` and `AceBridge.onTextChanged()`.
/// Renaming either side breaks the other.
pub const HOST_OBJECT: &str = "AceBridge";

pub const HOOK_LINES_CHANGED: &str = "onLinesChanged";
pub const HOOK_TEXT_CHANGED: &str = "onTextChanged";

// ---------------------------------------------------------------------------
// Calls: Rust → Ace (rendered to a snippet and evaluated)
// ---------------------------------------------------------------------------

/// A structured call into the wrapper layer.
///
/// Arguments are marshalled as JSON literals, never spliced into source as
/// raw text, so user content can't break out of the snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptCall {
    pub function: String,
    pub args: Vec<Value>,
}

impl ScriptCall {
    pub fn new(function: &str, args: Vec<Value>) -> Self {
        ScriptCall {
            function: function.to_string(),
            args,
        }
    }

    /// `property(name)`
    pub fn property(name: &str) -> Self {
        Self::new("property", vec![Value::from(name)])
    }

    /// `property(name, value)`
    pub fn set_property(name: &str, value: Value) -> Self {
        Self::new("property", vec![Value::from(name), value])
    }

    pub fn to_snippet(&self) -> Result<String> {
        Ok(format!(
            "{}.invoke({}, {})",
            WRAPPER_GLOBAL,
            serde_json::to_string(&self.function)?,
            serde_json::to_string(&self.args)?
        ))
    }
}

// ---------------------------------------------------------------------------
// Messages: Ace → Rust (posted by the hook shim)
// ---------------------------------------------------------------------------

/// A hook invocation as it arrives from script: `{"method": .., "args": [..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostMessage {
    pub method: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

/// A relayed notification from the embedded editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChangeEvent {
    TextChanged,
    LinesChanged { count: i64 },
}

/// JavaScript that defines `window[object]` with one forwarding function per
/// hook, each posting a [`HostMessage`] to the named message handler.
pub fn hook_shim(object: &str, handler: &str, methods: &[&str]) -> Result<String> {
    let mut body = String::new();
    for method in methods {
        body.push_str(&format!(
            "{m}: function() {{ window.webkit.messageHandlers[{h}].postMessage(\
             JSON.stringify({{ method: {m}, args: Array.prototype.slice.call(arguments) }})); }},",
            m = serde_json::to_string(method)?,
            h = serde_json::to_string(handler)?,
        ));
    }
    Ok(format!(
        "window[{}] = {{ {} }};",
        serde_json::to_string(object)?,
        body
    ))
}
