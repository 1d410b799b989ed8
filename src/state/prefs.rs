/// Session-scoped preferences
///
/// Only one thing is remembered across runs: the display mode. It is
/// written through to a JSON file on every change and read back at
/// startup, independent of authentication. It never goes to the
/// remote service.

use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

/// How the feed is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    List,
    #[default]
    Grid,
    Tile,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [DisplayMode::List, DisplayMode::Grid, DisplayMode::Tile];

    /// The stored key. Lowercase on disk, stable across versions.
    pub fn key(self) -> &'static str {
        match self {
            DisplayMode::List => "list",
            DisplayMode::Grid => "grid",
            DisplayMode::Tile => "tile",
        }
    }

    /// Parse a stored key. Unrecognized text is None; callers fall
    /// back to the default rather than erroring.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "list" => Some(DisplayMode::List),
            "grid" => Some(DisplayMode::Grid),
            "tile" => Some(DisplayMode::Tile),
            _ => None,
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DisplayMode::List => "List",
            DisplayMode::Grid => "Grid",
            DisplayMode::Tile => "Tile",
        };
        f.write_str(label)
    }
}

/// On-disk shape. The display mode is stored as its plain key so an
/// unknown value degrades to the default instead of failing the whole
/// file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    display_mode: String,
}

/// Persisted preferences, write-through.
#[derive(Debug)]
pub struct Prefs {
    path: PathBuf,
    pub display_mode: DisplayMode,
}

impl Prefs {
    /// Load from the default platform location:
    /// - Linux: ~/.local/share/pixel/prefs.json
    /// - macOS: ~/Library/Application Support/pixel/prefs.json
    /// - Windows: %APPDATA%\pixel\prefs.json
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Load from an explicit path. Missing or unreadable files and
    /// unrecognized stored values all fall back to the defaults.
    pub fn load_from(path: PathBuf) -> Self {
        let display_mode = std::fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str::<PrefsFile>(&text).ok())
            .and_then(|file| DisplayMode::from_key(&file.display_mode))
            .unwrap_or_default();

        Prefs { path, display_mode }
    }

    fn default_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("pixel");
        path.push("prefs.json");
        path
    }

    /// Change the display mode and write it through immediately.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
        self.save();
    }

    fn save(&self) {
        let file = PrefsFile {
            display_mode: self.display_mode.key().to_string(),
        };
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let text = serde_json::to_string_pretty(&file)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            std::fs::write(&self.path, text)
        };
        if let Err(error) = write() {
            // A failed save loses nothing but the preference.
            warn!("could not save preferences to {}: {error}", self.path.display());
        }
    }
}
