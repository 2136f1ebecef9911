//! Configuration management for the Farm Layout Planner
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FLP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{Grid, GridSize, LayoutRules, DEFAULT_BOUNDARY_MARGIN, PLOT_SPACING};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Layout engine configuration
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LayoutConfig {
    /// Grid size used when a farm is created without one
    pub default_grid_size: GridSize,

    /// Cells kept free along every grid edge
    pub boundary_margin: i32,

    /// Preferred gap between automatically placed plots
    pub spacing: i32,

    /// Whether dragging may leave plots overlapping
    pub allow_overlap_on_drag: bool,
}

impl LayoutConfig {
    pub fn rules(&self) -> LayoutRules {
        LayoutRules {
            spacing: self.spacing,
            allow_overlap_on_drag: self.allow_overlap_on_drag,
        }
    }

    pub fn grid_for(&self, size: GridSize) -> Grid {
        Grid::from(size).with_margin(self.boundary_margin)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("FLP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("layout.default_grid_size", "medium")?
            .set_default("layout.boundary_margin", DEFAULT_BOUNDARY_MARGIN)?
            .set_default("layout.spacing", PLOT_SPACING)?
            .set_default("layout.allow_overlap_on_drag", true)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FLP_ prefix)
            .add_source(
                Environment::with_prefix("FLP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_grid_size: GridSize::default(),
            boundary_margin: DEFAULT_BOUNDARY_MARGIN,
            spacing: PLOT_SPACING,
            allow_overlap_on_drag: true,
        }
    }
}
