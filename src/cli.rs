//! CLI argument parsing.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

use crate::config::{ConfigError, GradientSettings, Settings};
use crate::gradient::Gradient;

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// JSON snapshot of thumbs, colors and background
    Json,
}

/// Scripted drag: move thumb `index` toward `value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragArg {
    pub index: usize,
    pub value: f64,
}

impl FromStr for DragArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected INDEX=VALUE, got '{s}'"))?;
        let index = index
            .trim()
            .parse()
            .map_err(|_| format!("thumb index '{}' is not a number", index.trim()))?;
        let value = value
            .trim()
            .parse()
            .map_err(|_| format!("drag value '{}' is not a number", value.trim()))?;
        Ok(Self { index, value })
    }
}

/// Multi-thumb range slider with a gradient track and color-tinted thumb labels.
#[derive(Parser, Debug)]
#[command(name = "gradient-range")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Gradient stops as POS:COLOR pairs, e.g. "0:#ff0624,50:#ffd306,100:#008209"
    #[arg(
        long,
        value_name = "STOPS",
        allow_hyphen_values = true,
        value_parser = |s: &str| s.parse::<Gradient>().map(|_| s.to_string()).map_err(|e| e.to_string())
    )]
    pub stops: Option<String>,

    /// Initial thumb values, comma separated (default: 0,100)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub thumbs: Option<Vec<f64>>,

    /// Domain minimum (default: first stop position)
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<f64>,

    /// Domain maximum (default: last stop position)
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<f64>,

    /// Minimum gap between adjacent thumbs (default: 5)
    #[arg(long)]
    pub min_separation: Option<f64>,

    /// Linear scalar for measuring gradient brackets (default: 100)
    #[arg(long)]
    pub track_size: Option<f64>,

    /// Drag a thumb before reporting, as INDEX=VALUE (repeatable, applied in order)
    #[arg(long, value_name = "INDEX=VALUE", allow_hyphen_values = true)]
    pub drag: Vec<DragArg>,

    /// Output format for the report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Launch the interactive terminal slider
    #[arg(short, long)]
    pub interactive: bool,

    /// Load settings from TOML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save resulting settings (after drags) to TOML file
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Log file path (default: gradient-range.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (default: info)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Settings from the config file (if any) with command-line overrides applied.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = Settings::load(self.config.as_deref())?;

        if let Some(ref stops) = self.stops {
            let gradient: Gradient = stops.parse()?;
            settings.slider.min = gradient.min();
            settings.slider.max = gradient.max();
            settings.gradient = GradientSettings::from(&gradient);
        }
        if let Some(min) = self.min {
            settings.slider.min = min;
        }
        if let Some(max) = self.max {
            settings.slider.max = max;
        }
        if let Some(sep) = self.min_separation {
            settings.slider.min_separation = sep;
        }
        if let Some(size) = self.track_size {
            settings.slider.track_size = size;
        }
        if let Some(ref thumbs) = self.thumbs {
            settings.thumbs = thumbs.clone();
        } else if self.stops.is_some() || self.min.is_some() || self.max.is_some() {
            // Keep the default "one thumb at each end" shape on a new domain.
            settings.thumbs = vec![settings.slider.min, settings.slider.max];
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_arg_parses_index_and_value() {
        let drag: DragArg = "1=42.5".parse().unwrap();
        assert_eq!(drag, DragArg { index: 1, value: 42.5 });
        assert!("1:42".parse::<DragArg>().is_err());
        assert!("x=1".parse::<DragArg>().is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
