//! Icon image enumeration for display selection.
//!
//! Purely presentation metadata: file names are offered to the user when
//! mapping labels to icons, nothing here feeds into schedule resolution.

use std::io;
use std::path::{Path, PathBuf};

use ritiro_core::config::InstanceConfig;
use ritiro_core::model::WasteLabel;

/// Fallback icon always offered.
pub const DEFAULT_ICON: &str = "default.png";

#[derive(thiserror::Error, Debug)]
/// Errors raised while enumerating icon assets at setup time.
pub enum AssetError {
    /// The configured icon directory could not be read; activation should
    /// fail rather than continue with a half-configured instance.
    #[error("cannot read icon directory {path}: {source}")]
    ReadDir {
        /// Directory that failed to enumerate.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

/// Enumerate the `.png` files of `dir`, sorted and deduplicated, always
/// including [`DEFAULT_ICON`].
///
/// # Errors
///
/// Returns [`AssetError::ReadDir`] when the directory cannot be read.
pub fn available_icons(dir: &Path) -> Result<Vec<String>, AssetError> {
    let read_dir = std::fs::read_dir(dir).map_err(|source| AssetError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut icons = vec![DEFAULT_ICON.to_owned()];
    for entry in read_dir {
        let entry = entry.map_err(|source| AssetError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.to_lowercase().ends_with(".png") {
            icons.push(name);
        }
    }

    icons.sort();
    icons.dedup();
    Ok(icons)
}

/// Icon file for a label: the configured mapping if present, otherwise a
/// keyword guess, otherwise [`DEFAULT_ICON`].
#[must_use]
pub fn icon_file_for(config: &InstanceConfig, label: &WasteLabel) -> String {
    if let Some(configured) = config.waste_icons.get(label.as_str()) {
        return configured.clone();
    }
    guess_icon(label.as_str()).to_owned()
}

fn guess_icon(label: &str) -> &'static str {
    let lowered = label.to_lowercase();
    if lowered.contains("plastica") {
        "plastica.png"
    } else if lowered.contains("carta") {
        "carta.png"
    } else if lowered.contains("umido") {
        "umido.png"
    } else if lowered.contains("vetro") {
        "vetro.png"
    } else if lowered.contains("secco") || lowered.contains("indifferenziata") {
        "indifferenziata.png"
    } else if lowered.contains("metallo") {
        "metallo.png"
    } else if lowered.contains("verde") || lowered.contains("sfalci") {
        "verde.png"
    } else {
        DEFAULT_ICON
    }
}
