//! Moving Scheduler - Desktop admin dashboard for a moving company.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use moving_scheduler as app;
use tracing_subscriber::prelude::*;

use app::config::{AppConfig, ConfigLoadResult};
use app::store::Repository;
use app::ui::App;

/// Desktop admin dashboard for moving company customers, crews and appointments.
#[derive(Parser)]
#[command(name = "moving-scheduler")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Run against built-in sample data instead of the API
    #[arg(long)]
    mock: bool,

    /// Override the API base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging: stdout plus a daily rolling file
    let file_appender = tracing_appender::rolling::daily(AppConfig::log_dir(), "moving-scheduler.log");
    let (file_writer, _log_guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    tracing::info!("Moving Scheduler starting...");

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let mut config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            config
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            let config = AppConfig::default();
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Could not write default config: {}", e);
            }
            config
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid, using defaults: {}", e);
            AppConfig::default()
        }
    };

    config.apply_env();
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if cli.mock {
        config.data.mock = true;
    }
    config.validate().context("Invalid configuration")?;

    let repo = Repository::from_config(&config).context("Failed to create API client")?;
    tracing::info!("Data source: {}", repo.describe());

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Moving Company Scheduler")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([960.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Moving Company Scheduler",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(App::new(repo, config, rt)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
