//! Layered slider settings: defaults, TOML file, then environment.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::color::{parse_color, to_hex};
use crate::error::SliderError;
use crate::gradient::{Gradient, GradientStop};
use crate::slider::{RangeSlider, SliderConfig};

/// Prefix for environment overrides, e.g. `GRADIENT_RANGE_SLIDER__MIN_SEPARATION=10`.
pub const ENV_PREFIX: &str = "GRADIENT_RANGE_";

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading/writing file
    Io(std::io::Error),
    /// Layered extraction failed (bad TOML, wrong types, bad env value)
    Extract(Box<figment::Error>),
    /// TOML serialization error
    Serialize(toml::ser::Error),
    /// Settings parsed but describe an unusable slider
    Slider(SliderError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Extract(e) => write!(f, "Config error: {}", e),
            Self::Serialize(e) => write!(f, "TOML serialize error: {}", e),
            Self::Slider(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Extract(Box::new(e))
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e)
    }
}

impl From<SliderError> for ConfigError {
    fn from(e: SliderError) -> Self {
        Self::Slider(e)
    }
}

/// Root settings structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial thumb values, ascending
    pub thumbs: Vec<f64>,
    /// Domain, track scalar and separation
    pub slider: SliderConfig,
    /// Track gradient
    pub gradient: GradientSettings,
}

/// Gradient stop list as written in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientSettings {
    pub stops: Vec<StopSettings>,
}

/// One stop; `color` is any CSS color string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopSettings {
    pub position: f64,
    pub color: String,
}

impl Default for Settings {
    fn default() -> Self {
        let slider = SliderConfig::default();
        Self {
            thumbs: vec![slider.min, slider.max],
            slider,
            gradient: GradientSettings::from(&Gradient::default()),
        }
    }
}

impl From<&Gradient> for GradientSettings {
    fn from(gradient: &Gradient) -> Self {
        Self {
            stops: gradient
                .stops()
                .iter()
                .map(|stop| StopSettings {
                    position: stop.position,
                    color: to_hex(stop.color),
                })
                .collect(),
        }
    }
}

impl Default for GradientSettings {
    fn default() -> Self {
        Self::from(&Gradient::default())
    }
}

impl Settings {
    /// Layer defaults, the optional TOML file and `GRADIENT_RANGE_*` env vars.
    ///
    /// An explicitly given file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file {} not found", path.display()),
                )));
            }
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(&figment)
    }

    /// Extract settings from an already assembled figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// Save settings to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validated gradient from the stop list.
    pub fn gradient(&self) -> Result<Gradient, ConfigError> {
        let stops = self
            .gradient
            .stops
            .iter()
            .map(|s| Ok(GradientStop::new(s.position, parse_color(&s.color)?)))
            .collect::<Result<Vec<_>, SliderError>>()?;
        Ok(Gradient::new(stops)?)
    }

    /// Build the slider these settings describe.
    pub fn build(&self) -> Result<RangeSlider, ConfigError> {
        Ok(RangeSlider::new(
            self.slider,
            self.gradient()?,
            self.thumbs.clone(),
        )?)
    }

    /// Capture a slider's current state, e.g. for `--save-config`.
    pub fn from_slider(slider: &RangeSlider) -> Self {
        Self {
            thumbs: slider.thumbs().to_vec(),
            slider: *slider.config(),
            gradient: GradientSettings::from(slider.gradient()),
        }
    }
}
