use std::path::PathBuf;

use config::ConfigError;
use ratatui::style::Color;
use serde::Deserialize;

use crate::model::drawer::DrawerProps;
use crate::model::position::Placement;
use crate::presentation::config::{parse_color, KeyBindings, Styles};
use crate::utils;

const CONFIG: &str = include_str!("../../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

/// Drawer settings, see `DrawerProps`
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DrawerConfig {
    #[serde(default = "DrawerConfig::default_placement")]
    pub placement: String,
    #[serde(default = "DrawerConfig::default_width")]
    pub drawer_width: f64,
    #[serde(default = "DrawerConfig::default_background")]
    pub drawer_background_color: String,
    #[serde(default)]
    pub recompute_on_resize: bool,
}

impl DrawerConfig {
    fn default_placement() -> String {
        String::from("left")
    }

    fn default_width() -> f64 {
        300.0
    }

    fn default_background() -> String {
        String::from("#fff")
    }

    pub fn placement(&self) -> Placement {
        Placement::parse(&self.placement)
    }

    pub fn background_color(&self) -> Result<Color, ConfigError> {
        parse_color(&self.drawer_background_color).map_err(|e| {
            ConfigError::Message(format!("drawer.drawer_background_color: {e}"))
        })
    }

    /// Props with this configuration and no-op callbacks
    pub fn props(&self) -> Result<DrawerProps, ConfigError> {
        Ok(DrawerProps::default()
            .placement(self.placement())
            .drawer_width(self.drawer_width)
            .drawer_background_color(self.background_color()?)
            .recompute_on_resize(self.recompute_on_resize))
    }
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            placement: Self::default_placement(),
            drawer_width: Self::default_width(),
            drawer_background_color: Self::default_background(),
            recompute_on_resize: false,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub drawer: DrawerConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub styles: Styles,
}

impl Config {
    /// Built-in defaults overlaid with `config.{json5,json,yaml,toml,ini}`
    /// from the config directory, when present.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_dir(utils::get_config_dir())
    }

    /// Only the built-in defaults, no user files
    pub fn builtin() -> Result<Self, ConfigError> {
        json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))
    }

    pub fn from_dir(config_dir: PathBuf) -> Result<Self, ConfigError> {
        let data_dir = utils::get_data_dir();
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5))
            .set_default("_data_dir", data_dir.display().to_string())?
            .set_default("_config_dir", config_dir.display().to_string())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let path = config_dir.join(file);
            if path.exists() {
                found_config = true;
            }
            builder = builder.add_source(config::File::from(path).format(*format).required(false));
        }
        if !found_config {
            log::info!(
                "No configuration file in {}, using defaults",
                config_dir.display()
            );
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.drawer.background_color()?;
        Ok(cfg)
    }
}
