//! screenfit CLI
//!
//! Inspect the scale factors a design would get on a given screen and scale
//! design values from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use screenfit_core::{
    Configuration, ConfigurationPreset, ScaleEngine, ScaleType, ScalingLimits, Settings, Size,
    MAX_SCALE_CEILING, MIN_SCALE_FLOOR, NAMED_PRESETS,
};
use screenfit_platform::{
    DeviceMetricsSource, FallbackMetricsSource, ScreenDimensions, StaticMetricsSource,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "screenfit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Design-to-device scale factor calculator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the scale factors for a design on a screen
    Factors {
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Scale design values
    Scale {
        /// Values in design points
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,

        /// Which factor to apply (width, height, text, font, radius, min, max, auto)
        #[arg(short = 't', long = "type", default_value = "width")]
        scale_type: ScaleType,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// List the built-in design presets
    Presets,
}

#[derive(Args)]
struct EngineArgs {
    /// Design size, e.g. 390x844
    #[arg(short, long)]
    design: Option<Size>,

    /// Device screen, e.g. 428x926 or 428x926@3 (default: this platform's fallback)
    #[arg(short, long)]
    screen: Option<ScreenDimensions>,

    /// Override the screen's pixel ratio
    #[arg(long)]
    pixel_scale: Option<f64>,

    /// Start from a named preset (see `screenfit presets`)
    #[arg(short, long)]
    preset: Option<ConfigurationPreset>,

    /// Scale text by the width factor instead of min(width, height)
    #[arg(long)]
    no_min_text_adapt: bool,

    /// Clamp bounds as MIN,MAX
    #[arg(short, long, value_parser = parse_limits)]
    limits: Option<ScalingLimits>,

    /// Load settings from a screenfit.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_limits(s: &str) -> std::result::Result<ScalingLimits, String> {
    let (min, max) = s
        .split_once(',')
        .ok_or_else(|| format!("expected MIN,MAX, got '{}'", s))?;
    let number = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid bound '{}': {}", v.trim(), e))
    };
    let limits = ScalingLimits::new(number(min)?, number(max)?);
    if limits.min_scale() > limits.max_scale() {
        return Err(format!(
            "minimum {} is above maximum {} (bounds are limited to [{}, {}])",
            limits.min_scale(),
            limits.max_scale(),
            MIN_SCALE_FLOOR,
            MAX_SCALE_CEILING
        ));
    }
    Ok(limits)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Factors { engine } => cmd_factors(&engine),
        Commands::Scale {
            values,
            scale_type,
            engine,
        } => cmd_scale(&values, scale_type, &engine),
        Commands::Presets => cmd_presets(),
    }
}

/// Settings file, then preset, then explicit flags
fn resolve_settings(args: &EngineArgs) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::from_toml_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let config = &mut settings.configuration;
    if let Some(preset) = args.preset {
        *config = preset.configuration();
    }
    if let Some(design) = args.design {
        config.design_size = design;
    }
    if args.no_min_text_adapt {
        config.min_text_adapt = false;
    }
    if let Some(limits) = args.limits {
        config.scaling_limits = limits;
    }
    config.validate()?;

    Ok(settings)
}

fn build_engine(args: &EngineArgs) -> Result<ScaleEngine> {
    let settings = resolve_settings(args)?;

    let mut screen = match args.screen {
        Some(screen) => screen,
        None => FallbackMetricsSource::new().screen_dimensions(),
    };
    if let Some(pixel_scale) = args.pixel_scale {
        screen = ScreenDimensions::try_new(screen.width, screen.height, pixel_scale)?;
    }
    debug!(?screen, configuration = %settings.configuration, "building engine");

    Ok(ScaleEngine::builder()
        .settings(settings)
        .source(Arc::new(StaticMetricsSource::new(screen)))
        .build())
}

fn cmd_factors(args: &EngineArgs) -> Result<()> {
    let engine = build_engine(args)?;
    let config = engine.configuration();
    let metrics = engine.screen_metrics();
    let factors = engine.factors();

    println!("Design:  {}", config);
    println!(
        "Screen:  {}x{} @{}x ({}x{} px)",
        metrics.width,
        metrics.height,
        metrics.pixel_scale,
        metrics.width * metrics.pixel_scale,
        metrics.height * metrics.pixel_scale
    );
    println!();
    println!("scale_width   {:.4}", factors.scale_width);
    println!("scale_height  {:.4}", factors.scale_height);
    println!("scale_text    {:.4}", factors.scale_text);

    Ok(())
}

fn cmd_scale(values: &[f64], scale_type: ScaleType, args: &EngineArgs) -> Result<()> {
    let engine = build_engine(args)?;
    info!("Scaling {} value(s) by {}", values.len(), scale_type);

    let scaled = engine.batch_scale(values, scale_type);
    for (value, result) in values.iter().zip(scaled) {
        println!("{} -> {:.4}", value, result);
    }

    Ok(())
}

fn cmd_presets() -> Result<()> {
    let default = Configuration::default();
    for (name, config) in NAMED_PRESETS {
        let marker = if *config == default { " (default)" } else { "" };
        println!(
            "{:<16} {}x{}  limits [{}, {}]{}",
            name,
            config.design_size.width,
            config.design_size.height,
            config.scaling_limits.min_scale(),
            config.scaling_limits.max_scale(),
            marker
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> EngineArgs {
        EngineArgs {
            design: None,
            screen: None,
            pixel_scale: None,
            preset: None,
            no_min_text_adapt: false,
            limits: None,
            config: None,
        }
    }

    #[test]
    fn test_parse_limits() {
        assert_eq!(parse_limits("0.8, 1.25"), Ok(ScalingLimits::STRICT));
        assert!(parse_limits("2.0,1.0").is_err());
        assert!(parse_limits("1.0").is_err());
        assert!(parse_limits("6,9").is_err());
        assert_eq!(parse_limits("0.01,9"), Ok(ScalingLimits::new(0.1, 5.0)));
    }

    #[test]
    fn test_flags_override_preset() {
        let mut args = args();
        args.preset = Some(ConfigurationPreset::TabletStandard);
        args.design = Some(Size::new(800.0, 1200.0));
        args.no_min_text_adapt = true;

        let config = resolve_settings(&args).unwrap().configuration;
        assert_eq!(config.design_size, Size::new(800.0, 1200.0));
        assert_eq!(config.scaling_limits, ScalingLimits::STRICT);
        assert!(!config.min_text_adapt);
    }

    #[test]
    fn test_invalid_design_is_an_error() {
        let mut args = args();
        args.design = Some(Size::new(4000.0, 800.0));
        assert!(resolve_settings(&args).is_err());
    }

    #[test]
    fn test_engine_from_flags() {
        let mut args = args();
        args.preset = Some(ConfigurationPreset::PhoneStandard);
        args.screen = Some(ScreenDimensions::new(780.0, 1688.0, 1.0));
        args.pixel_scale = Some(3.0);

        let engine = build_engine(&args).unwrap();
        assert_eq!(engine.scale_width(), 2.0);
        assert_eq!(engine.screen_metrics().pixel_scale, 3.0);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "screenfit", "scale", "16", "-8", "--type", "sp", "--screen", "428x926@3",
        ])
        .unwrap();
        match cli.command {
            Commands::Scale {
                values, scale_type, ..
            } => {
                assert_eq!(values, vec![16.0, -8.0]);
                assert_eq!(scale_type, ScaleType::Text);
            }
            _ => panic!("expected scale"),
        }
    }
}
