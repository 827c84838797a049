//! Data directory layout for Mimic.

use std::path::{Path, PathBuf};

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `MIMIC_DATA_DIR` environment variable
/// 2. `~/.mimic`
/// 3. `./.mimic` as a last resort
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MIMIC_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".mimic");
    }

    PathBuf::from(".mimic")
}

/// Path of `config.toml` inside the data directory.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Path of the memory file, resolved against the data directory unless absolute.
pub fn memory_path(data_dir: &Path, memory_file: &str) -> PathBuf {
    let path = Path::new(memory_file);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}
