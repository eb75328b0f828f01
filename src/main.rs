//! CLI entry point for gradient-range.

use std::io::Write;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;

use gradient_range::cli::{Cli, OutputFormat};
use gradient_range::config::Settings;
use gradient_range::logging::init_logging;
use gradient_range::tui;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "gradient-range", &mut std::io::stdout());
        return Ok(());
    }

    let _guard = init_logging(cli.log_file.as_deref(), Some(&cli.log_level))
        .wrap_err("Failed to open log file")?;

    let settings = cli.settings().wrap_err("Failed to load settings")?;
    let mut slider = settings
        .build()
        .map_err(|e| eyre!("Invalid slider settings: {}", e))?;
    info!(thumbs = ?slider.thumbs(), "slider created");

    if cli.interactive {
        return tui::run(slider);
    }

    for drag in &cli.drag {
        let value = slider
            .apply_drag(drag.index, drag.value)
            .map_err(|e| eyre!("Drag {}={} failed: {}", drag.index, drag.value, e))?;
        info!(index = drag.index, raw = drag.value, value, "scripted drag applied");
    }

    if let Some(ref path) = cli.save_config {
        Settings::from_slider(&slider)
            .save(path)
            .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;
        eprintln!("Wrote settings to {}", path.display());
    }

    let snapshot = slider.snapshot();
    let output = match cli.format {
        OutputFormat::Text => snapshot.to_string(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&snapshot).wrap_err("Failed to serialize snapshot")? + "\n"
        }
    };
    std::io::stdout().write_all(output.as_bytes())?;

    Ok(())
}
