use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::{BridgeError, Result};
use crate::protocol::{ChangeEvent, HostMessage, HOOK_LINES_CHANGED, HOOK_TEXT_CHANGED};

type Observer = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

/// A native function callable from script, with its argument shape spelled
/// out instead of discovered at runtime.
pub enum Hook {
    Unit(Box<dyn Fn() + Send + Sync>),
    Int(Box<dyn Fn(i64) + Send + Sync>),
}

/// Native hooks keyed by method name.
#[derive(Default)]
pub struct HookTable {
    hooks: BTreeMap<String, Hook>,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, method: &str, hook: Hook) {
        self.hooks.insert(method.to_string(), hook);
    }

    pub fn methods(&self) -> Vec<&str> {
        self.hooks.keys().map(String::as_str).collect()
    }

    pub fn invoke(&self, method: &str, args: &[Value]) -> Result<()> {
        let hook = self
            .hooks
            .get(method)
            .ok_or_else(|| BridgeError::UnknownHook(method.to_string()))?;
        let bad = |reason: String| BridgeError::HookSignature {
            method: method.to_string(),
            reason,
        };
        match hook {
            Hook::Unit(f) => {
                if !args.is_empty() {
                    return Err(bad(format!("expected no arguments, got {}", args.len())));
                }
                f();
            }
            Hook::Int(f) => {
                let [arg] = args else {
                    return Err(bad(format!("expected 1 argument, got {}", args.len())));
                };
                let n = arg
                    .as_i64()
                    .or_else(|| arg.as_f64().map(|f| f as i64))
                    .ok_or_else(|| bad(format!("expected an integer, got {}", arg)))?;
                f(n);
            }
        }
        Ok(())
    }

    /// Dispatch a message posted from script.
    pub fn dispatch(&self, message: &HostMessage) -> Result<()> {
        self.invoke(&message.method, &message.args)
    }

    /// Parse and dispatch a raw JSON message. Malformed input is logged and
    /// dropped so a misbehaving page can't take the host down.
    pub fn dispatch_json(&self, json: &str) {
        let message: HostMessage = match serde_json::from_str(json) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("Failed to parse HostMessage: {} (json: {})", e, json);
                return;
            }
        };
        if let Err(e) = self.dispatch(&message) {
            log::warn!("Dropped hook call: {}", e);
        }
    }
}

/// Republishes hook firings from the embedded editor as [`ChangeEvent`]s.
#[derive(Default)]
pub struct NotificationRelay {
    observers: Mutex<Vec<Observer>>,
}

impl NotificationRelay {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.observers.lock().push(Arc::new(observer));
    }

    pub fn on_lines_changed(&self, count: i64) {
        self.publish(ChangeEvent::LinesChanged { count });
    }

    pub fn on_text_changed(&self) {
        self.publish(ChangeEvent::TextChanged);
    }

    fn publish(&self, event: ChangeEvent) {
        log::trace!("relaying {:?}", event);
        // Snapshot so observers may subscribe or call back into the editor.
        let observers: Vec<Observer> = self.observers.lock().clone();
        for observer in observers {
            observer(&event);
        }
    }

    /// The hook table the wrapper layer calls into.
    pub fn hook_table(self: &Arc<Self>) -> HookTable {
        let mut table = HookTable::new();
        let relay = Arc::clone(self);
        table.register(
            HOOK_LINES_CHANGED,
            Hook::Int(Box::new(move |count| relay.on_lines_changed(count))),
        );
        let relay = Arc::clone(self);
        table.register(
            HOOK_TEXT_CHANGED,
            Hook::Unit(Box::new(move || relay.on_text_changed())),
        );
        table
    }
}
