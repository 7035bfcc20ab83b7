use fs2::FileExt;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{BridgeError, Result};
use crate::mode::AssetDescriptor;

pub const BOOTSTRAP_HTML: &str = include_str!("../web/bootstrap.html");
pub const WRAPPER_JS: &str = include_str!("../web/wrapper.js");

pub const BOOTSTRAP_FILE: &str = "bootstrap.html";
pub const WRAPPER_FILE: &str = "wrapper.js";

pub const ASSETS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placeholder in the bootstrap template replaced by the Ace base URL.
const ACE_BASE_MARKER: &str = "%ACE_BASE%";

/// Location of the editor's web assets on disk.
///
/// `root` holds the bootstrap page and the wrapper script; `ace_base` is the
/// directory URL of the Ace distribution (`ace.js`, `mode-*.js`, `theme-*.js`).
#[derive(Debug, Clone)]
pub struct AssetBundle {
    root: PathBuf,
    ace_base: Url,
}

impl AssetBundle {
    /// Address an existing asset directory. `ace_dir` defaults to `<root>/ace`.
    pub fn at(root: impl Into<PathBuf>, ace_dir: Option<&Path>) -> Result<Self> {
        let root = root.into();
        let ace_dir = ace_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.join("ace"));
        let ace_base = Url::from_directory_path(&ace_dir)
            .map_err(|_| BridgeError::Asset(format!("Ace directory {:?} is not absolute", ace_dir)))?;
        Ok(AssetBundle { root, ace_base })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ace_base(&self) -> &Url {
        &self.ace_base
    }

    pub fn bootstrap_uri(&self) -> Result<String> {
        let path = self.root.join(BOOTSTRAP_FILE);
        Url::from_file_path(&path)
            .map(|u| u.to_string())
            .map_err(|_| BridgeError::Asset(format!("Bootstrap path {:?} is not absolute", path)))
    }

    pub fn wrapper_path(&self) -> PathBuf {
        self.root.join(WRAPPER_FILE)
    }

    /// Read the wrapper layer source from disk.
    pub fn read_wrapper(&self) -> Result<String> {
        let path = self.wrapper_path();
        std::fs::read_to_string(&path).map_err(|source| BridgeError::MissingWrapperAsset { path, source })
    }

    /// URL of a mode or theme script inside the Ace distribution.
    pub fn asset_uri(&self, descriptor: &AssetDescriptor) -> Result<String> {
        self.ace_base
            .join(&descriptor.asset)
            .map(|u| u.to_string())
            .map_err(|e| BridgeError::Asset(format!("Bad asset path {:?}: {}", descriptor.asset, e)))
    }
}

/// Ensure the bundled web assets are extracted to the local data directory.
///
/// Extracts to `<data_dir>/acebridge/web/<version>/`
/// (e.g. `~/.local/share/acebridge/web/0.1.0/` on Linux).
pub fn ensure_extracted(ace_dir: Option<&Path>) -> Result<AssetBundle> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| BridgeError::Asset("Cannot determine data home directory".to_string()))?;
    extract_into(&data_dir.join("acebridge").join("web"), ace_dir)
}

/// Write the bootstrap page and wrapper into `<base>/<version>/`.
///
/// The bundled files are rewritten on every call; the Ace base URL baked into
/// the bootstrap page may differ between runs.
pub fn extract_into(base: &Path, ace_dir: Option<&Path>) -> Result<AssetBundle> {
    let io_err = |what: &str, e: std::io::Error| BridgeError::Asset(format!("{}: {}", what, e));

    std::fs::create_dir_all(base).map_err(|e| io_err("Failed to create asset directory", e))?;

    // Exclusive lock so two instances don't interleave writes
    let lock_file = std::fs::File::create(base.join(".extract.lock"))
        .map_err(|e| io_err("Failed to create lock file", e))?;
    lock_file
        .lock_exclusive()
        .map_err(|e| io_err("Failed to acquire extraction lock", e))?;

    let root = base.join(ASSETS_VERSION);
    std::fs::create_dir_all(&root).map_err(|e| io_err("Failed to create asset directory", e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o700));
    }

    let bundle = AssetBundle::at(&root, ace_dir)?;
    let html = BOOTSTRAP_HTML.replace(ACE_BASE_MARKER, bundle.ace_base().as_str());

    std::fs::write(root.join(BOOTSTRAP_FILE), html)
        .map_err(|e| io_err("Failed to write bootstrap.html", e))?;
    std::fs::write(root.join(WRAPPER_FILE), WRAPPER_JS)
        .map_err(|e| io_err("Failed to write wrapper.js", e))?;

    if !bundle.ace_base().to_file_path().map(|p| p.join("ace.js").is_file()).unwrap_or(false) {
        log::warn!(
            "ace.js not found under {}; the editor page will stay blank",
            bundle.ace_base()
        );
    }

    log::info!("Editor assets v{} ready at {:?}", ASSETS_VERSION, root);
    Ok(bundle)
}
