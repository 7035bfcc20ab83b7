//! Highlight modes and colour themes, and the Ace assets behind them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An Ace module identifier plus the script file that provides it, relative
/// to the Ace base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub id: String,
    pub asset: String,
}

impl AssetDescriptor {
    pub fn new(id: &str, asset: &str) -> Self {
        AssetDescriptor {
            id: id.to_string(),
            asset: asset.to_string(),
        }
    }
}

/// `(id, asset)` rows, indexed by the enum discriminant.
type Table = [(&'static str, &'static str)];

static MODE_TABLE: &Table = &[
    ("c_cpp", "mode-c_cpp.js"),
    ("css", "mode-css.js"),
    ("html", "mode-html.js"),
    ("javascript", "mode-javascript.js"),
    ("pascal", "mode-pascal.js"),
    ("php", "mode-php.js"),
    ("python", "mode-python.js"),
    ("ruby", "mode-ruby.js"),
    ("xml", "mode-xml.js"),
];

static THEME_TABLE: &Table = &[
    ("ambiance", "theme-ambiance.js"),
    ("monokai", "theme-monokai.js"),
    ("textmate", "theme-textmate.js"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    Cpp,
    Css,
    Html,
    #[default]
    JavaScript,
    Pascal,
    Php,
    Python,
    Ruby,
    Xml,
}

impl HighlightMode {
    pub const ALL: [HighlightMode; 9] = [
        HighlightMode::Cpp,
        HighlightMode::Css,
        HighlightMode::Html,
        HighlightMode::JavaScript,
        HighlightMode::Pascal,
        HighlightMode::Php,
        HighlightMode::Python,
        HighlightMode::Ruby,
        HighlightMode::Xml,
    ];

    /// Ace mode id, e.g. `c_cpp` (activated as `ace/mode/c_cpp`).
    pub fn id(self) -> &'static str {
        MODE_TABLE[self as usize].0
    }

    pub fn asset(self) -> &'static str {
        MODE_TABLE[self as usize].1
    }

    pub fn descriptor(self) -> AssetDescriptor {
        AssetDescriptor::new(self.id(), self.asset())
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Ambiance,
    #[default]
    Monokai,
    TextMate,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Ambiance, Theme::Monokai, Theme::TextMate];

    /// Ace theme id, e.g. `monokai` (activated as `ace/theme/monokai`).
    pub fn id(self) -> &'static str {
        THEME_TABLE[self as usize].0
    }

    pub fn asset(self) -> &'static str {
        THEME_TABLE[self as usize].1
    }

    pub fn descriptor(self) -> AssetDescriptor {
        AssetDescriptor::new(self.id(), self.asset())
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }
}

impl fmt::Display for HighlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for HighlightMode {
    type Err = String;

    /// Accepts the Ace id (`c_cpp`) or the lowercase variant name (`cpp`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::from_id(&lower)
            .or_else(|| Self::ALL.into_iter().find(|m| format!("{:?}", m).to_lowercase() == lower))
            .ok_or_else(|| format!("Unknown highlight mode '{}'", s))
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(&s.trim().to_lowercase()).ok_or_else(|| format!("Unknown theme '{}'", s))
    }
}
