use serde_json::Value;

use crate::assets::AssetBundle;
use crate::engine::ScriptEngine;
use crate::error::Result;
use crate::host::EditorHost;
use crate::mode::{AssetDescriptor, HighlightMode, Theme};
use crate::protocol::{ChangeEvent, ScriptCall};
use crate::relay::NotificationRelay;

/// A code editor backed by Ace running inside a script engine.
///
/// Every getter re-queries the embedded editor; nothing is cached here. All
/// methods must be called from the thread that owns the engine.
pub struct Editor<E> {
    host: EditorHost<E>,
    assets: AssetBundle,
}

impl<E: ScriptEngine> Editor<E> {
    /// Bring up the editor page in `engine`. Blocks until it has loaded.
    pub fn new(engine: E, assets: AssetBundle) -> Result<Self> {
        let host = EditorHost::start(engine, &assets, NotificationRelay::new())?;
        Ok(Editor { host, assets })
    }

    fn call(&self, function: &str, args: Vec<Value>) -> Result<()> {
        self.host.bridge().call(&ScriptCall::new(function, args))?;
        Ok(())
    }

    /// Number of lines in the document.
    pub fn lines(&self) -> Result<i64> {
        self.host.bridge().call_int(&ScriptCall::property("lines"))
    }

    /// Move the caret to 1-based `line`. Out-of-range lines are clamped by Ace.
    pub fn goto_line(&self, line: i64) -> Result<()> {
        self.call("gotoLine", vec![Value::from(line)])
    }

    /// 1-based line the caret is on.
    pub fn cursor_line(&self) -> Result<i64> {
        self.host.bridge().call_int(&ScriptCall::property("cursorLine"))
    }

    pub fn text(&self) -> Result<String> {
        self.host.bridge().call_string(&ScriptCall::property("text"))
    }

    /// Replace the whole document and drop the selection Ace leaves behind.
    pub fn set_text(&self, text: &str) -> Result<()> {
        self.call("setText", vec![Value::from(text)])
    }

    pub fn is_read_only(&self) -> Result<bool> {
        self.host.bridge().call_bool(&ScriptCall::property("readonly"))
    }

    /// Sets both the wrapper's `readonly` property and Ace's edit lock.
    pub fn set_read_only(&self, read_only: bool) -> Result<()> {
        self.call("setReadOnly", vec![Value::Bool(read_only)])
    }

    pub fn set_highlight_mode(&self, mode: HighlightMode) -> Result<()> {
        self.apply_mode(&mode.descriptor())
    }

    /// Load an arbitrary Ace mode script and switch to it.
    pub fn apply_mode(&self, mode: &AssetDescriptor) -> Result<()> {
        let url = self.assets.asset_uri(mode)?;
        log::debug!("Switching highlight mode to {}", mode.id);
        self.call("setMode", vec![Value::from(mode.id.as_str()), Value::from(url)])
    }

    /// Ace id of the active mode, e.g. `c_cpp`.
    pub fn highlight_mode_id(&self) -> Result<String> {
        self.host.bridge().call_string(&ScriptCall::property("mode"))
    }

    /// The active mode, or `None` if it isn't one of [`HighlightMode`].
    pub fn highlight_mode(&self) -> Result<Option<HighlightMode>> {
        Ok(HighlightMode::from_id(&self.highlight_mode_id()?))
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.apply_theme(&theme.descriptor())
    }

    /// Load an arbitrary Ace theme script and switch to it.
    pub fn apply_theme(&self, theme: &AssetDescriptor) -> Result<()> {
        let url = self.assets.asset_uri(theme)?;
        log::debug!("Switching theme to {}", theme.id);
        self.call("setTheme", vec![Value::from(theme.id.as_str()), Value::from(url)])
    }

    pub fn theme_id(&self) -> Result<String> {
        self.host.bridge().call_string(&ScriptCall::property("theme"))
    }

    pub fn theme(&self) -> Result<Option<Theme>> {
        Ok(Theme::from_id(&self.theme_id()?))
    }

    /// Observe every relayed notification.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.host.relay().subscribe(observer);
    }

    pub fn connect_text_changed<F>(&self, f: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if let ChangeEvent::TextChanged = event {
                f();
            }
        });
    }

    pub fn connect_lines_changed<F>(&self, f: F)
    where
        F: Fn(i64) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if let ChangeEvent::LinesChanged { count } = event {
                f(*count);
            }
        });
    }
}
