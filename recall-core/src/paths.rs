use directories::BaseDirs;
use std::path::PathBuf;

pub const APP_NAME: &str = "recall";
pub const STORE_FILE_NAME: &str = "learnings.jsonl";

/// Default data root: `{data_dir}/recall`
/// - macOS:   `~/Library/Application Support/recall`
/// - Linux:   `$XDG_DATA_HOME/recall` or `~/.local/share/recall`
/// - Windows: `%APPDATA%\recall`
pub fn default_data_dir() -> PathBuf {
    match BaseDirs::new() {
        Some(base) => base.data_dir().join(APP_NAME),
        None => PathBuf::from(".").join(APP_NAME),
    }
}

pub fn default_store_path() -> PathBuf {
    default_data_dir().join(STORE_FILE_NAME)
}

/// Config file candidates, XDG-style path first, then the platform's native one.
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut v = Vec::new();
    if let Some(b) = BaseDirs::new() {
        v.push(b.home_dir().join(".config").join(APP_NAME).join("config.toml"));
        v.push(b.config_dir().join(APP_NAME).join("config.toml"));
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b.home_dir().join(".config").join("recall").join("config.toml");
            let expected_native = b.config_dir().join("recall").join("config.toml");
            let c = config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn store_lives_in_data_dir() {
        let path = default_store_path();
        assert!(path.ends_with("recall/learnings.jsonl"));
    }
}
