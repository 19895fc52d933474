/// Simulator configuration
use crate::error::{Result, SimError};
use jukebox_widget::{Size, WidgetConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "jukebox.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SimConfig {
    #[serde(default)]
    pub widget: WidgetConfig,

    #[serde(default = "default_viewport")]
    pub viewport: ViewportSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewportSettings {
    #[serde(default = "default_viewport_width")]
    pub width: f32,

    #[serde(default = "default_viewport_height")]
    pub height: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    /// JSON catalog to play instead of the built-in one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// JSON metadata cache imported before enrichment
    #[serde(default)]
    pub metadata_path: Option<PathBuf>,

    /// Refuse playback until the first simulated user gesture
    #[serde(default = "default_require_activation")]
    pub require_activation: bool,

    /// Length reported for every simulated track
    #[serde(default = "default_track_secs")]
    pub track_secs: f64,
}

impl ViewportSettings {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl SimConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `jukebox.toml`. A missing default file is
    /// fine; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(SimError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. JUKEBOX_VIEWPORT__WIDTH
        settings = settings.add_source(
            config::Environment::with_prefix("JUKEBOX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| SimError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| SimError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let viewport = &self.viewport;
        if !positive(viewport.width) || !positive(viewport.height) {
            return Err(SimError::Config(format!(
                "Viewport must be positive, got {}x{}",
                viewport.width, viewport.height
            )));
        }

        let size = self.widget.widget_size;
        if !positive(size.width) || !positive(size.height) {
            return Err(SimError::Config(format!(
                "Widget size must be positive, got {}x{}",
                size.width, size.height
            )));
        }

        if !positive(self.widget.volume_bar_height) {
            return Err(SimError::Config(
                "Volume bar height must be positive".to_string(),
            ));
        }

        let track_secs = self.session.track_secs;
        if !track_secs.is_finite() || track_secs <= 0.0 {
            return Err(SimError::Config(format!(
                "Track length must be positive, got {}",
                track_secs
            )));
        }

        if let Some(path) = &self.session.catalog_path {
            if !path.exists() {
                return Err(SimError::Config(format!(
                    "Catalog not found at {:?}",
                    path
                )));
            }
        }

        if let Some(path) = &self.session.metadata_path {
            if !path.exists() {
                return Err(SimError::Config(format!(
                    "Metadata cache not found at {:?}",
                    path
                )));
            }
        }

        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

// Default values
fn default_viewport() -> ViewportSettings {
    ViewportSettings {
        width: default_viewport_width(),
        height: default_viewport_height(),
    }
}

fn default_viewport_width() -> f32 {
    1280.0
}

fn default_viewport_height() -> f32 {
    800.0
}

fn default_session() -> SessionSettings {
    SessionSettings {
        catalog_path: None,
        metadata_path: None,
        require_activation: default_require_activation(),
        track_secs: default_track_secs(),
    }
}

fn default_require_activation() -> bool {
    true
}

fn default_track_secs() -> f64 {
    180.0
}

impl Default for ViewportSettings {
    fn default() -> Self {
        default_viewport()
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        default_session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.viewport.size(), Size::new(1280.0, 800.0));
        assert!(config.session.require_activation);
    }

    #[test]
    fn loads_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[viewport]
width = 640.0

[widget]
volume_bar_height = 200.0

[widget.playback]
traversal_mode = "sequential"
volume = 0.5
"#
        )
        .unwrap();

        let config = SimConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.viewport.width, 640.0);
        assert_eq!(config.viewport.height, 800.0);
        assert_eq!(config.widget.volume_bar_height, 200.0);
        assert_eq!(config.widget.playback.volume.get(), 0.5);
        assert_eq!(
            config.widget.playback.traversal_mode,
            jukebox_playback::TraversalMode::Sequential
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = SimConfig::load(Some(Path::new("/nonexistent/jukebox.toml")));
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn rejects_degenerate_viewport() {
        let mut config = SimConfig::default();
        config.viewport.height = 0.0;
        assert!(config.validate().is_err());

        config.viewport.height = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_missing_catalog() {
        let mut config = SimConfig::default();
        config.session.catalog_path = Some(PathBuf::from("/nonexistent/catalog.json"));
        assert!(config.validate().is_err());
    }
}
