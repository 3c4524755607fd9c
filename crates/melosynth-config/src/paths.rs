//! Preset directories.
//!
//! - **User presets**: `<config_dir>/melosynth/presets/` (`~/.config` on
//!   Linux, `~/Library/Application Support` on macOS, `%APPDATA%` on Windows)
//! - **System presets**: `/usr/share/melosynth/presets/` on Linux, the
//!   platform data directory elsewhere

use std::path::{Path, PathBuf};

use crate::ConfigError;

const APP_NAME: &str = "melosynth";
const PRESETS_SUBDIR: &str = "presets";

/// Directory holding the current user's presets.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Read-only directory for presets shipped with a system install.
pub fn system_presets_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/usr/share").join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(not(target_os = "linux"))]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
}

/// Create the user presets directory if needed and return it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// Locate a preset file.
///
/// `name` is a preset name (with or without `.toml`) looked up in the user
/// directory, then the system one. Failing that, it is tried as a path to an
/// existing file.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &[user_presets_dir(), system_presets_dir()])
}

/// [`find_preset`] over an explicit list of directories, searched in order
/// before `name` is tried as a path.
pub fn find_preset_in(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };

    dirs.iter()
        .map(|dir| dir.join(&filename))
        .find(|candidate| candidate.is_file())
        .or_else(|| Some(PathBuf::from(name)).filter(|path| path.is_file()))
}

/// All `.toml` files in the user and system preset directories.
pub fn list_presets() -> Vec<PathBuf> {
    let mut presets = presets_in_dir(&user_presets_dir());
    presets.extend(presets_in_dir(&system_presets_dir()));
    presets
}

/// `.toml` files directly inside `dir`, sorted. Missing directories yield
/// an empty list.
pub fn presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut found: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    found.sort();
    found
}

/// Preset name (file stem) of a preset path.
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}
