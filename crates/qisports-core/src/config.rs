use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::anim::{EasingType, Rgba};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (preview logs)
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

/// Virtual viewport the headless engine lays pages out in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_viewport_width")]
    pub width: f64,
    #[serde(default = "default_viewport_height")]
    pub height: f64,
    /// Height of the fixed header
    #[serde(default = "default_header_height")]
    pub header_height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
            header_height: default_header_height(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Auto-advance period in milliseconds
    #[serde(default = "default_carousel_interval")]
    pub interval_ms: u64,
    /// Slide transition duration in milliseconds
    #[serde(default = "default_slide_duration")]
    pub slide_duration_ms: u64,
    /// Slide transition easing, e.g. "power2.inOut"
    #[serde(default = "default_slide_easing")]
    pub easing: EasingType,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_carousel_interval(),
            slide_duration_ms: default_slide_duration(),
            easing: default_slide_easing(),
        }
    }
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn slide_duration(&self) -> Duration {
        Duration::from_millis(self.slide_duration_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Vertical offset sections rise from, in px
    #[serde(default = "default_section_offset")]
    pub section_offset: f64,
    /// Heading trigger start, e.g. "top 85%"
    #[serde(default = "default_heading_start")]
    pub heading_start: String,
    /// Per-word heading animation duration in milliseconds
    #[serde(default = "default_word_duration")]
    pub word_duration_ms: u64,
    /// Delay between consecutive words in milliseconds
    #[serde(default = "default_word_stagger")]
    pub word_stagger_ms: u64,
    /// Card trigger start, e.g. "top 80%"
    #[serde(default = "default_card_start")]
    pub card_start: String,
    /// Delay between consecutive cards in milliseconds
    #[serde(default = "default_card_stagger")]
    pub card_stagger_ms: u64,
    /// Hero parallax travel as a fraction of the strip height
    #[serde(default = "default_parallax_ratio")]
    pub parallax_ratio: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            section_offset: default_section_offset(),
            heading_start: default_heading_start(),
            word_duration_ms: default_word_duration(),
            word_stagger_ms: default_word_stagger(),
            card_start: default_card_start(),
            card_stagger_ms: default_card_stagger(),
            parallax_ratio: default_parallax_ratio(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Scroll distance in px after which the header turns solid
    #[serde(default = "default_header_threshold")]
    pub threshold: f64,
    /// Transition duration in milliseconds
    #[serde(default = "default_header_duration")]
    pub duration_ms: u64,
    #[serde(default = "default_transparent_background")]
    pub transparent_background: Rgba,
    #[serde(default = "default_transparent_text")]
    pub transparent_text: Rgba,
    #[serde(default = "default_solid_background")]
    pub solid_background: Rgba,
    #[serde(default = "default_solid_text")]
    pub solid_text: Rgba,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            threshold: default_header_threshold(),
            duration_ms: default_header_duration(),
            transparent_background: default_transparent_background(),
            transparent_text: default_transparent_text(),
            solid_background: default_solid_background(),
            solid_text: default_solid_text(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Time from a route change until the loader starts hiding, in milliseconds
    #[serde(default = "default_loader_dwell")]
    pub dwell_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            dwell_ms: default_loader_dwell(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Extra space kept between the header and an anchor target, in px
    #[serde(default = "default_anchor_offset")]
    pub anchor_offset: f64,
    /// Smooth scroll duration in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub scroll_duration_ms: u64,
    /// Delay before an anchor scroll starts, in milliseconds
    #[serde(default = "default_scroll_delay")]
    pub scroll_delay_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            anchor_offset: default_anchor_offset(),
            scroll_duration_ms: default_scroll_duration(),
            scroll_delay_ms: default_scroll_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while something is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Document pixels represented by one terminal row
    #[serde(default = "default_px_per_row")]
    pub px_per_row: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            px_per_row: default_px_per_row(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("qisports")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_viewport_width() -> f64 {
    1280.0
}

fn default_viewport_height() -> f64 {
    800.0
}

fn default_header_height() -> f64 {
    80.0
}

fn default_carousel_interval() -> u64 {
    5000
}

fn default_slide_duration() -> u64 {
    800
}

fn default_slide_easing() -> EasingType {
    EasingType::PowerInOut(2)
}

fn default_section_offset() -> f64 {
    50.0
}

fn default_heading_start() -> String {
    "top 85%".to_string()
}

fn default_word_duration() -> u64 {
    500
}

fn default_word_stagger() -> u64 {
    30
}

fn default_card_start() -> String {
    "top 80%".to_string()
}

fn default_card_stagger() -> u64 {
    100
}

fn default_parallax_ratio() -> f64 {
    0.2
}

fn default_header_threshold() -> f64 {
    100.0
}

fn default_header_duration() -> u64 {
    300
}

fn default_transparent_background() -> Rgba {
    Rgba::new(255, 255, 255, 0.0)
}

fn default_transparent_text() -> Rgba {
    Rgba::new(255, 255, 255, 0.8)
}

fn default_solid_background() -> Rgba {
    Rgba::opaque(255, 255, 255)
}

fn default_solid_text() -> Rgba {
    Rgba::opaque(0x4A, 0x4A, 0x5A)
}

fn default_loader_dwell() -> u64 {
    1500
}

fn default_anchor_offset() -> f64 {
    20.0
}

fn default_scroll_duration() -> u64 {
    800
}

fn default_scroll_delay() -> u64 {
    200
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_px_per_row() -> f64 {
    20.0
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
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/qisports/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("qisports")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the terminal preview owns the screen
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("preview.log")
    }
}
