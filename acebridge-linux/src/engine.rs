use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crossbeam_channel::{Receiver, TryRecvError};
use gtk4::glib;
use webkit6::prelude::*;

use acebridge_core::engine::{LoadCallback, ScriptEngine};
use acebridge_core::error::{BridgeError, Result};
use acebridge_core::protocol;
use acebridge_core::relay::HookTable;
use acebridge_core::ScriptValue;

/// Script message handler the hook shim posts to.
const MESSAGE_HANDLER: &str = "acebridge";

/// [`ScriptEngine`] backed by a WebKitGTK web view.
///
/// WebKit delivers load and evaluation results on the GTK main loop, so every
/// blocking operation here turns the default main context until its result
/// arrives.
pub struct WebKitEngine {
    webview: webkit6::WebView,
    content_manager: webkit6::UserContentManager,
}

impl WebKitEngine {
    pub fn new(background: &gtk4::gdk::RGBA) -> Self {
        let content_manager = webkit6::UserContentManager::new();

        let webview = webkit6::WebView::builder()
            .user_content_manager(&content_manager)
            .hexpand(true)
            .vexpand(true)
            .build();

        // Match the theme so there is no white flash while the page loads
        webview.set_background_color(background);

        if let Some(wk_settings) = webkit6::prelude::WebViewExt::settings(&webview) {
            wk_settings.set_enable_javascript(true);
            wk_settings.set_enable_developer_extras(true);
            wk_settings.set_allow_file_access_from_file_urls(true);
            wk_settings.set_allow_universal_access_from_file_urls(true);
        }

        WebKitEngine {
            webview,
            content_manager,
        }
    }

    pub fn widget(&self) -> &webkit6::WebView {
        &self.webview
    }
}

impl ScriptEngine for WebKitEngine {
    fn load(&self, uri: &str, on_finished: LoadCallback) {
        // Load-failed is followed by a Finished event; only the first report counts.
        let pending = Rc::new(RefCell::new(Some(on_finished)));

        let on_changed = pending.clone();
        self.webview.connect_load_changed(move |_, event| {
            if event == webkit6::LoadEvent::Finished {
                if let Some(done) = on_changed.borrow_mut().take() {
                    done(Ok(()));
                }
            }
        });

        let on_failed = pending;
        self.webview
            .connect_load_failed(move |_, _, failing_uri, error| {
                if let Some(done) = on_failed.borrow_mut().take() {
                    done(Err(format!("{}: {}", failing_uri, error)));
                }
                false
            });

        self.webview.load_uri(uri);
    }

    fn expose_object(&self, name: &str, hooks: Arc<HookTable>) -> Result<()> {
        let shim = protocol::hook_shim(name, MESSAGE_HANDLER, &hooks.methods())?;

        self.content_manager
            .register_script_message_handler(MESSAGE_HANDLER, None);
        self.content_manager.connect_script_message_received(
            Some(MESSAGE_HANDLER),
            move |_ucm, value| {
                hooks.dispatch_json(&value.to_str());
            },
        );

        self.evaluate(&shim)?;
        Ok(())
    }

    fn evaluate(&self, script: &str) -> Result<ScriptValue> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.webview.evaluate_javascript(
            script,
            None,
            None,
            None::<&gtk4::gio::Cancellable>,
            move |result| {
                let outcome = match result {
                    Ok(value) => Ok(value.to_json(0).map(|json| json.to_string())),
                    Err(e) => Err(e.message().to_string()),
                };
                let _ = tx.send(outcome);
            },
        );

        match self.wait(&rx)? {
            Ok(Some(json)) => ScriptValue::from_json_str(&json),
            Ok(None) => Ok(ScriptValue::None),
            Err(message) => Err(BridgeError::ScriptEvaluation(message)),
        }
    }

    fn wait<T>(&self, pending: &Receiver<T>) -> Result<T> {
        let context = glib::MainContext::default();
        loop {
            match pending.try_recv() {
                Ok(value) => return Ok(value),
                Err(TryRecvError::Empty) => {
                    context.iteration(true);
                }
                Err(TryRecvError::Disconnected) => return Err(BridgeError::LoadAbandoned),
            }
        }
    }
}
