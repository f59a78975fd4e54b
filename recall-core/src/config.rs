use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};
use tracing::debug;

use crate::filter::DEFAULT_PREVIEW_LENGTH;
use crate::keywords::Keywords;
use crate::paths::{config_file_paths, default_store_path};

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON Lines file holding all entries.
    pub store_path: PathBuf,
    /// Preferred editor name/binary (e.g. hx for Helix). Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// `chrono` format used when printing dates. Default is "%a, %d %b %Y".
    pub date_format: String,
    /// Characters of content shown per entry in list output.
    pub preview_length: usize,
    /// `tracing` filter directive (e.g. "warn", "recall_core=debug").
    pub log_level: String,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    store_path: Option<PathBuf>,
    editor: Option<String>,
    date_format: Option<String>,
    preview_length: Option<usize>,
    log_level: Option<String>,
    /// Optional table:
    /// [synonyms]
    /// tomorrow = "1day"
    /// never = "unlimited"
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native), apply defaults,
    /// and extend the global Keywords registry with user-defined interval synonyms if present.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config()?;
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        // Extend global keyword registry once at startup.
        Self::load_synonyms(&file_config.synonyms);

        Self {
            store_path: file_config.store_path.unwrap_or_else(default_store_path),
            editor: file_config.editor,
            date_format: file_config
                .date_format
                .unwrap_or_else(|| "%a, %d %b %Y".to_string()),
            preview_length: file_config
                .preview_length
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_PREVIEW_LENGTH),
            log_level: file_config.log_level.unwrap_or_else(|| "warn".to_string()),
        }
    }

    /// Read the first existing config file and parse it. No file at all means defaults.
    fn read_file_config() -> Result<FileConfig> {
        for path in config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the global Keywords registry.
    /// Omits synonyms that collide with a canonical interval (eg. "5days").
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        match synonyms {
            Some(map) if !map.is_empty() => {
                let pairs: Vec<(String, String)> = map
                    .iter()
                    .filter(|(alias, _)| !Keywords::is_canonical(alias))
                    .map(|(a, t)| (a.clone(), t.clone()))
                    .collect();

                if !pairs.is_empty() {
                    let added = Keywords::extend(&pairs);
                    debug!(added, "registered interval synonyms");
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
pub mod tests {
    use std::path::Path;

    use super::*;
    use crate::review::ReviewInterval;

    /// Test helper to create a default `Config` for testing purposes.
    ///
    /// This is the single source of truth for test configuration.
    /// If you add a field to `Config`, you only need to update it here.
    pub(crate) fn mk_config(store_path: PathBuf) -> Config {
        Config {
            store_path,
            editor: None,
            date_format: "%a, %d %b %Y".to_string(),
            preview_length: DEFAULT_PREVIEW_LENGTH,
            log_level: "warn".to_string(),
        }
    }

    #[test]
    fn parse_file_accepts_store_path_and_editor() {
        let toml = r#"
            store_path = "/tmp/recall/learnings.jsonl"
            editor = "hx"
            preview_length = 40
        "#;
        let fc = Config::parse_file(toml).unwrap();
        assert_eq!(
            fc.store_path.as_deref(),
            Some(Path::new("/tmp/recall/learnings.jsonl"))
        );
        assert_eq!(fc.editor.as_deref(), Some("hx"));
        assert_eq!(fc.preview_length, Some(40));
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_file_config(Config::parse_file("").unwrap());
        assert_eq!(config.store_path, default_store_path());
        assert_eq!(config.date_format, "%a, %d %b %Y");
        assert_eq!(config.preview_length, DEFAULT_PREVIEW_LENGTH);
        assert_eq!(config.log_level, "warn");
        assert!(config.editor.is_none());
    }

    #[test]
    fn zero_preview_length_falls_back_to_default() {
        let config = Config::from_file_config(Config::parse_file("preview_length = 0").unwrap());
        assert_eq!(config.preview_length, DEFAULT_PREVIEW_LENGTH);
    }

    #[test]
    fn parse_file_rejects_wrong_types() {
        assert!(Config::parse_file("preview_length = \"long\"").is_err());
    }

    #[test]
    fn parse_file_accepts_synonyms_and_extends_registry() {
        let toml = r#"
            [synonyms]
            soonish = "5days"
            NEVERMORE = "unlimited"
        "#;

        let fc = Config::parse_file(toml).unwrap();
        assert!(fc.synonyms.is_some());

        Config::load_synonyms(&fc.synonyms);

        assert!(Keywords::matches(ReviewInterval::FiveDays, "soonish"));
        assert!(Keywords::matches(ReviewInterval::Unlimited, "nevermore"));
    }

    #[test]
    fn synonyms_may_point_at_other_synonyms() {
        let toml = r#"
            [synonyms]
            revisit = "weekish"
            weekish = "5days"
            someday-maybe = "revisit"
        "#;

        let fc = Config::parse_file(toml).unwrap();
        Config::load_synonyms(&fc.synonyms);

        assert!(Keywords::matches(ReviewInterval::FiveDays, "weekish"));
        assert!(Keywords::matches(ReviewInterval::FiveDays, "revisit"));
        assert!(Keywords::matches(ReviewInterval::FiveDays, "someday-maybe"));
    }

    #[test]
    fn parse_file_no_accepts_canonical_synonyms() {
        let toml = r#"
            [synonyms]
            1day = "20days"
            later-on = "20days"
        "#;

        let fc = Config::parse_file(toml).unwrap();
        Config::load_synonyms(&fc.synonyms);

        assert!(Keywords::matches(ReviewInterval::OneDay, "1day"));
        assert!(Keywords::matches(ReviewInterval::TwentyDays, "later-on"));
    }
}
