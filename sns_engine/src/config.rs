//! Game configuration
//!
//! Settings are read from a TOML file with three tables (`[window]`,
//! `[camera]`, `[scene]`). Every key is optional; missing keys keep their
//! default value.
//!
//! ```toml
//! [window]
//! width = 1600
//! height = 900
//!
//! [camera]
//! fov = 60.0
//! near = 0.1
//! far = 100000.0
//! ```

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::{engine_bail, engine_err, engine_info};

/// Window settings (consumed by the frame driver, only the aspect ratio reaches the core)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: u32,
    pub fullscreen: bool,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            refresh_rate: 60,
            fullscreen: false,
            title: "Sun'n'Slaughter".to_string(),
        }
    }
}

/// Camera projection settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees, exclusive range (0, 180)
    pub fov: f32,
    /// Width / height
    pub aspect: f32,
    /// Near clip distance (> 0)
    pub near: f32,
    /// Far clip distance (> near)
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100_000.0,
        }
    }
}

impl CameraSettings {
    /// Settings with the aspect ratio taken from a window size
    pub fn with_window(self, window: &WindowSettings) -> Self {
        Self {
            aspect: window.width.max(1) as f32 / window.height.max(1) as f32,
            ..self
        }
    }

    /// Check the projection constraints.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when `fov` is outside (0, 180), `aspect <= 0`,
    /// `near <= 0` or `near >= far`.
    pub fn validate(&self) -> Result<()> {
        if !(self.fov.is_finite() && self.fov > 0.0 && self.fov < 180.0) {
            engine_bail!("sns::Config", InvalidConfiguration,
                "Field of view must be in (0, 180) degrees, got {}", self.fov);
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            engine_bail!("sns::Config", InvalidConfiguration,
                "Aspect ratio must be positive, got {}", self.aspect);
        }
        if !(self.near.is_finite() && self.near > 0.0) {
            engine_bail!("sns::Config", InvalidConfiguration,
                "Near distance must be positive, got {}", self.near);
        }
        if !(self.far.is_finite() && self.near < self.far) {
            engine_bail!("sns::Config", InvalidConfiguration,
                "Near distance {} must be smaller than far distance {}", self.near, self.far);
        }
        Ok(())
    }
}

/// Scene import and gameplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Node name prefix for enemies (character controller, chase AI)
    pub enemy_prefix: String,
    /// Node name prefix for static colliders (terrain, walls)
    pub static_prefix: String,
    /// Frustum culling at startup (toggled at runtime by the debug key)
    pub culling_enabled: bool,
    pub enemy_speed: f32,
    pub enemy_damage: i32,
    pub enemy_hp: i32,
    pub character_hp: i32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            enemy_prefix: "mob_".to_string(),
            static_prefix: "cook_".to_string(),
            culling_enabled: true,
            enemy_speed: 8.0,
            enemy_damage: 5,
            enemy_hp: 50,
            character_hp: 100,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub scene: SceneSettings,
}

impl GameConfig {
    /// Parse a configuration from TOML text and validate it.
    ///
    /// When the `[camera]` table has no `aspect` key the aspect ratio is
    /// derived from the window size.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table = text.parse()
            .map_err(|e| engine_err!("sns::Config", InvalidConfiguration, "TOML parse error: {}", e))?;
        let has_aspect = table.get("camera")
            .and_then(|camera| camera.get("aspect"))
            .is_some();

        let mut config: GameConfig = toml::Value::Table(table).try_into()
            .map_err(|e| engine_err!("sns::Config", InvalidConfiguration, "Invalid settings: {}", e))?;
        if !has_aspect {
            config.camera = config.camera.with_window(&config.window);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| engine_err!("sns::Config", InvalidConfiguration,
                "Cannot read '{}': {}", path.display(), e))?;
        let config = Self::from_toml_str(&text)?;
        engine_info!("sns::Config", "Loaded settings from '{}'", path.display());
        Ok(config)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            engine_bail!("sns::Config", InvalidConfiguration,
                "Window size must be non-zero, got {}x{}", self.window.width, self.window.height);
        }
        self.camera.validate()?;
        if self.scene.enemy_prefix.is_empty() || self.scene.static_prefix.is_empty() {
            engine_bail!("sns::Config", InvalidConfiguration, "Node name prefixes must not be empty");
        }
        if self.scene.enemy_hp <= 0 || self.scene.character_hp <= 0 {
            engine_bail!("sns::Config", InvalidConfiguration, "Hit points must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
