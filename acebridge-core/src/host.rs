use std::sync::Arc;

use crate::assets::AssetBundle;
use crate::bridge::ScriptBridge;
use crate::engine::ScriptEngine;
use crate::error::{BridgeError, Result};
use crate::protocol::{ScriptCall, HOST_OBJECT};
use crate::relay::NotificationRelay;

/// Owns the engine for one editor and brings it up.
pub struct EditorHost<E> {
    bridge: ScriptBridge<E>,
    relay: Arc<NotificationRelay>,
}

impl<E: ScriptEngine> EditorHost<E> {
    /// Load the bootstrap page, wait for it, expose the native hooks and
    /// install the wrapper layer.
    ///
    /// Blocks until the page has loaded. There is no timeout: assets are local.
    pub fn start(engine: E, assets: &AssetBundle, relay: Arc<NotificationRelay>) -> Result<Self> {
        let mut bridge = ScriptBridge::new(engine);
        let uri = assets.bootstrap_uri()?;

        let (tx, rx) = crossbeam_channel::bounded(1);
        log::debug!("Loading editor page {}", uri);
        bridge.engine().load(
            &uri,
            Box::new(move |result| {
                let _ = tx.send(result);
            }),
        );
        bridge
            .engine()
            .wait(&rx)?
            .map_err(BridgeError::LoadFailed)?;

        bridge
            .engine()
            .expose_object(HOST_OBJECT, Arc::new(relay.hook_table()))?;

        let wrapper = assets.read_wrapper().map_err(|e| {
            log::error!("{}", e);
            e
        })?;
        bridge.engine().evaluate(&wrapper)?;
        bridge.mark_ready();

        // A wrapper that parsed but didn't define the API shows up here
        // rather than on the first real call.
        match bridge.call(&ScriptCall::new("ping", vec![])) {
            Ok(_) => {}
            Err(BridgeError::ScriptEvaluation(e)) => {
                log::error!("Wrapper API check failed: {}", e);
                return Err(BridgeError::WrapperUnavailable);
            }
            Err(e) => return Err(e),
        }

        log::info!("Editor ready ({})", uri);
        Ok(EditorHost { bridge, relay })
    }

    pub fn bridge(&self) -> &ScriptBridge<E> {
        &self.bridge
    }

    pub fn relay(&self) -> &Arc<NotificationRelay> {
        &self.relay
    }
}
