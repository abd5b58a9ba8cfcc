//! Synapse configuration
//!
//! Loaded from a `synapse.toml` file; every field has a default so an empty
//! or partial file is valid.
//!
//! ```toml
//! [timeline]
//! poll_interval_ms = 50
//! autoplay = true
//!
//! [flow]
//! tick_ms = 200
//! base_duration_ms = 4000
//!
//! [display]
//! locale = "en"
//! quality = "auto"
//! ```

use crate::error::{Result, SynapseError};
use crate::i18n::Locale;
use crate::quality::QualityMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE: &str = "synapse.toml";

/// Root configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SynapseConfig {
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub flow: FlowConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Timeline controller and built-in manager settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TimelineConfig {
    /// Controller polling cadence while playing
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Start playing as soon as initialization completes
    #[serde(default = "default_true")]
    pub autoplay: bool,
    /// Initial playback speed multiplier
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Frame cadence of the built-in manager clock
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// Restart from the first phase on completion
    #[serde(default)]
    pub loop_playback: bool,
}

/// Hero transformation flow timer settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FlowConfig {
    /// Interval between progress ticks
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Time spent in each flow state
    #[serde(default = "default_base_duration_ms")]
    pub base_duration_ms: u64,
    /// Duration multiplier of the specification state
    #[serde(default = "default_specification_multiplier")]
    pub specification_multiplier: f64,
}

/// Display widget settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub quality: QualityMode,
    /// Auto-hide delay of the phase explainer in automatic mode
    #[serde(default = "default_explainer_hide_ms")]
    pub explainer_hide_ms: u64,
    /// Minimum dominant-axis travel for a swipe
    #[serde(default = "default_swipe_threshold_px")]
    pub swipe_threshold_px: f32,
    /// Maximum duration of a swipe gesture
    #[serde(default = "default_swipe_window_ms")]
    pub swipe_window_ms: u64,
    /// Maximum gap between the taps of a double tap
    #[serde(default = "default_double_tap_ms")]
    pub double_tap_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_poll_interval_ms() -> u64 {
    50
}

fn default_speed() -> f64 {
    1.0
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_tick_ms() -> u64 {
    200
}

fn default_base_duration_ms() -> u64 {
    4_000
}

fn default_specification_multiplier() -> f64 {
    1.5
}

fn default_explainer_hide_ms() -> u64 {
    8_000
}

fn default_swipe_threshold_px() -> f32 {
    50.0
}

fn default_swipe_window_ms() -> u64 {
    500
}

fn default_double_tap_ms() -> u64 {
    300
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            autoplay: true,
            speed: default_speed(),
            frame_interval_ms: default_frame_interval_ms(),
            loop_playback: false,
        }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            base_duration_ms: default_base_duration_ms(),
            specification_multiplier: default_specification_multiplier(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            quality: QualityMode::default(),
            explainer_hide_ms: default_explainer_hide_ms(),
            swipe_threshold_px: default_swipe_threshold_px(),
            swipe_window_ms: default_swipe_window_ms(),
            double_tap_ms: default_double_tap_ms(),
        }
    }
}

impl SynapseConfig {
    /// Parse and validate configuration from TOML source
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SynapseConfig =
            toml::from_str(source).map_err(|e| SynapseError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .map_err(|e| SynapseError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Load `synapse.toml` from a directory, or defaults if it is absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, dir.display());
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SynapseError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        let zero_field = [
            ("timeline.poll_interval_ms", self.timeline.poll_interval_ms),
            ("timeline.frame_interval_ms", self.timeline.frame_interval_ms),
            ("flow.tick_ms", self.flow.tick_ms),
            ("flow.base_duration_ms", self.flow.base_duration_ms),
            ("display.double_tap_ms", self.display.double_tap_ms),
            ("display.swipe_window_ms", self.display.swipe_window_ms),
        ]
        .into_iter()
        .find(|(_, value)| *value == 0);
        if let Some((name, _)) = zero_field {
            return Err(SynapseError::Config(format!("{} must be greater than 0", name)));
        }
        if !(self.timeline.speed.is_finite() && self.timeline.speed > 0.0) {
            return Err(SynapseError::InvalidSpeed(self.timeline.speed));
        }
        let multiplier = self.flow.specification_multiplier;
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(SynapseError::Config(format!(
                "flow.specification_multiplier must be positive, got {}",
                multiplier
            )));
        }
        let threshold = self.display.swipe_threshold_px;
        if threshold.is_nan() || threshold <= 0.0 {
            return Err(SynapseError::Config(
                "display.swipe_threshold_px must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
