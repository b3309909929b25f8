use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_quote")]
    pub quote: char,
    #[serde(default)]
    pub no_header: bool,
    #[serde(default)]
    pub zero_based: bool,
}

fn default_delimiter() -> char {
    ','
}
fn default_quote() -> char {
    '"'
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            quote: default_quote(),
            no_header: false,
            zero_based: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriterConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub float_precision: Option<usize>, // None renders the shortest form
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            float_precision: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default)]
    pub writer: WriterConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("csvfreq")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        let path = if let Ok(env_path) = std::env::var("CSVFREQ_CONFIG") {
            PathBuf::from(env_path) // $CSVFREQ_CONFIG overrides the default config path
        } else {
            Self::config_path()
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let cfg: Self =
            toml::from_str(&content).map_err(|e| crate::CsvFreqError::Config(e.to_string()))?;
        Ok(cfg)
    }

    pub fn save(&self) -> crate::Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::CsvFreqError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}
