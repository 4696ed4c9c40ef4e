use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::spinner::{char_sets, decorator, Spinner, SpinnerOption};
use crate::SpinnerError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub spinner: SpinnerConfig,
}

/// Persisted spinner defaults, overridable from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinnerConfig {
    /// Index into the built-in character sets (default: 9, `| / - \`)
    #[serde(default = "default_char_set")]
    pub char_set: usize,

    /// Delay between frames in milliseconds (default: 100)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Color and attribute names applied to the glyph
    #[serde(default = "default_color")]
    pub color: Vec<String>,

    #[serde(default)]
    pub prefix: String,

    #[serde(default)]
    pub suffix: String,

    /// Message left on screen when the spinner stops
    #[serde(default)]
    pub final_msg: String,
}

fn default_char_set() -> usize {
    9
}

fn default_delay_ms() -> u64 {
    100
}

fn default_color() -> Vec<String> {
    vec!["cyan".to_string()]
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            char_set: default_char_set(),
            delay_ms: default_delay_ms(),
            color: default_color(),
            prefix: String::new(),
            suffix: String::new(),
            final_msg: String::new(),
        }
    }
}

impl SpinnerConfig {
    pub fn glyphs(&self) -> crate::Result<Vec<String>> {
        char_sets::get(self.char_set).ok_or(SpinnerError::UnknownCharSet(self.char_set))
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Build an idle spinner writing to `writer`.
    pub fn build(&self, writer: impl Write + Send + 'static) -> crate::Result<Spinner> {
        let decorator = decorator::from_names(self.color.as_slice())?;
        Spinner::new(
            self.glyphs()?,
            self.delay(),
            [
                SpinnerOption::Writer(Box::new(writer)),
                SpinnerOption::Decorator(decorator),
                SpinnerOption::Prefix(self.prefix.clone()),
                SpinnerOption::Suffix(self.suffix.clone()),
                SpinnerOption::FinalMessage(self.final_msg.clone()),
            ],
        )
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read config file")?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("zoro").join("config.toml"))
    }
}
