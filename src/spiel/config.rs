use crate::error::{Result, SpielError};
use crate::filter::TagMatch;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE_EXT: &str = ".txt";

/// Configuration for spiel, stored in the catalogue directory as config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpielConfig {
    /// File extension for new script content files (e.g., ".txt", ".md")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Extensions to look for when importing directories
    #[serde(default = "default_import_ext")]
    pub import_extensions: Vec<String>,

    /// Default tag matching policy for listings: all selected tags must be
    /// present, or any one of them
    #[serde(default)]
    pub tag_match: TagMatch,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

fn default_import_ext() -> Vec<String> {
    vec![".txt".to_string(), ".md".to_string(), ".text".to_string()]
}

impl Default for SpielConfig {
    fn default() -> Self {
        Self {
            file_ext: DEFAULT_FILE_EXT.to_string(),
            import_extensions: default_import_ext(),
            tag_match: TagMatch::default(),
        }
    }
}

impl SpielConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(SpielError::Io)?;
        let config: SpielConfig =
            serde_json::from_str(&content).map_err(SpielError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(SpielError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(SpielError::Serialization)?;
        fs::write(config_path, content).map_err(SpielError::Io)?;
        Ok(())
    }

    pub fn get_file_ext(&self) -> &str {
        &self.file_ext
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }

    /// Read a key as its display string. Returns None for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "file-ext" => Some(self.file_ext.clone()),
            "tag-match" => Some(
                match self.tag_match {
                    TagMatch::All => "all",
                    TagMatch::Any => "any",
                }
                .to_string(),
            ),
            _ => None,
        }
    }

    /// Set a key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "file-ext" => {
                self.set_file_ext(value);
                Ok(())
            }
            "tag-match" => match value {
                "all" => {
                    self.tag_match = TagMatch::All;
                    Ok(())
                }
                "any" => {
                    self.tag_match = TagMatch::Any;
                    Ok(())
                }
                other => Err(format!(
                    "Invalid tag-match value '{}': expected all or any",
                    other
                )),
            },
            other => Err(format!("Unknown config key: {}", other)),
        }
    }
}
