use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::easing::EasingType;
use crate::sequencer::{Direction, ResumeMode, SlotOptions, WordOrder};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub words: WordsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Parameters shared by both animators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Flicker run per character in milliseconds
    #[serde(default = "default_duration")]
    pub duration_ms: u64,
    /// Stagger between characters in milliseconds
    #[serde(default = "default_delay")]
    pub delay_ms: u64,
    /// Restart after each pass
    #[serde(default = "default_true", rename = "loop")]
    pub looping: bool,
    /// "forward" or "reverse"
    #[serde(default)]
    pub direction: Direction,
    /// "bounce", "elastic", "smooth", "sharp" or "linear"
    #[serde(default)]
    pub easing: EasingType,
    /// Freeze while the pointer is over the text
    #[serde(default)]
    pub pause_on_hover: bool,
    /// Wait between phases in milliseconds
    #[serde(default = "default_pause_duration")]
    pub pause_duration_ms: u64,
    /// "restart-phase" or "exact"
    #[serde(default)]
    pub resume: ResumeMode,
    /// Fixed RNG seed for reproducible glyphs (random if unset)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration(),
            delay_ms: default_delay(),
            looping: default_true(),
            direction: Direction::default(),
            easing: EasingType::default(),
            pause_on_hover: false,
            pause_duration_ms: default_pause_duration(),
            resume: ResumeMode::default(),
            seed: None,
        }
    }
}

impl AnimationConfig {
    /// Character animator options
    pub fn slot_options(&self) -> SlotOptions {
        SlotOptions {
            duration: Duration::from_millis(self.duration_ms),
            delay: Duration::from_millis(self.delay_ms),
            looping: self.looping,
            direction: self.direction,
            pause_duration: Duration::from_millis(self.pause_duration_ms),
            easing: self.easing,
            pause_on_hover: self.pause_on_hover,
            resume: self.resume,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordsConfig {
    /// Default word list
    #[serde(default = "default_words")]
    pub words: Vec<String>,
    /// "sequential" or "random"
    #[serde(default)]
    pub order: WordOrder,
    /// Flicker run per character in milliseconds (word mode)
    #[serde(default = "default_words_duration")]
    pub duration_ms: u64,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            words: default_words(),
            order: WordOrder::default(),
            duration_ms: default_words_duration(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw rate while animating
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            theme: ThemeConfig::default(),
        }
    }
}

impl UiConfig {
    /// Poll interval derived from `fps`
    pub fn tick_duration(&self) -> Duration {
        if self.fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.fps as u64)
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Custom deserializer to accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => {
                            name = Some(map.next_value()?);
                        }
                        "colors" => {
                            colors = Some(map.next_value()?);
                        }
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Optional color overrides, each a hex string (e.g., "#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Background
    pub bg: Option<String>,
    /// Settled characters
    pub fg: Option<String>,
    /// Flicker glyphs at the start of their run
    pub dim: Option<String>,
    /// Flicker glyphs close to settling
    pub accent: Option<String>,
    /// Status line
    pub status: Option<String>,
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slot-text")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_duration() -> u64 {
    1000
}

fn default_delay() -> u64 {
    100
}

fn default_pause_duration() -> u64 {
    1000
}

fn default_words() -> Vec<String> {
    ["slot", "machine", "text"]
        .iter()
        .map(|w| w.to_string())
        .collect()
}

fn default_words_duration() -> u64 {
    1500
}

fn default_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/slot-text/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("slot-text")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the terminal UI owns the screen
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("slot-text.log")
    }

    /// Word animator options: shared animation settings with the word duration
    pub fn word_options(&self) -> SlotOptions {
        SlotOptions {
            duration: Duration::from_millis(self.words.duration_ms),
            ..self.animation.slot_options()
        }
    }
}
