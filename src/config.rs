//! Game configuration loaded from RON.
//!
//! Every struct is `#[serde(default)]`, so a config file only needs the
//! fields it overrides:
//!
//! ```ron
//! (world: (max_time: 60000.0, winning_score: 25), terminal: (bell: false))
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Session-wide rules and arena dimensions.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Logical canvas width in world units.
    pub width: f32,
    pub height: f32,
    /// Distance from the bottom edge to the ground line.
    pub ground_margin: f32,
    pub max_speed: f32,
    /// Session length in milliseconds.
    pub max_time: f32,
    pub winning_score: u32,
    pub lives: u32,
    /// Milliseconds between spawner firings.
    pub enemy_interval: f32,
    /// Probability that a moving-world spawn adds a ground enemy instead of a climber.
    pub ground_chance: f64,
    pub max_particles: usize,
    pub score_per_kill: u32,
    /// Splash particles thrown out by every collision.
    pub impact_particles: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 500.0,
            ground_margin: 40.0,
            max_speed: 4.0,
            max_time: 30_000.0,
            winning_score: 40,
            lives: 5,
            enemy_interval: 1000.0,
            ground_chance: 0.5,
            max_particles: 50,
            score_per_kill: 1,
            impact_particles: 10,
        }
    }
}

impl WorldConfig {
    /// Y coordinate of the ground line.
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_margin
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Gravity added to vertical velocity per reference frame.
    pub weight: f32,
    pub jump_impulse: f32,
    pub dive_velocity: f32,
    pub hit_recovery_ms: f32,
    /// Sprite animation rate.
    pub fps: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            x: 40.0,
            width: 100.0,
            height: 91.3,
            weight: 1.0,
            jump_impulse: 27.0,
            dive_velocity: 15.0,
            hit_recovery_ms: 500.0,
            fps: 20.0,
        }
    }
}

/// Settings for the terminal host only; the simulation never reads these.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TerminalConfig {
    /// Target frame period in milliseconds.
    pub frame_ms: u64,
    /// Ring the terminal bell on hits.
    pub bell: bool,
    /// Wall-clock seconds before the whole session is rebuilt.
    pub session_timeout_secs: u64,
    /// Grid requested by the fullscreen toggle.
    pub fullscreen_columns: u16,
    pub fullscreen_rows: u16,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            frame_ms: 33,
            bell: true,
            session_timeout_secs: 900,
            fullscreen_columns: 180,
            fullscreen_rows: 50,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub terminal: TerminalConfig,
}

impl GameConfig {
    pub fn from_ron(text: &str, path: &Path) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&data, path)
    }

    /// Fall back to defaults when the file is missing or malformed; the
    /// error is handed back so the caller can report it.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Human-readable warnings for values the simulation will tolerate but
    /// probably were not meant.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let w = &self.world;
        if w.width <= 0.0 || w.height <= 0.0 {
            warnings.push(format!("world size {}x{} is not positive", w.width, w.height));
        }
        if w.ground_margin >= w.height {
            warnings.push("world.ground_margin leaves no room above the ground".to_string());
        }
        if w.enemy_interval <= 0.0 {
            warnings.push("world.enemy_interval must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&w.ground_chance) {
            warnings.push(format!("world.ground_chance {} outside 0..=1", w.ground_chance));
        }
        if w.lives == 0 {
            warnings.push("world.lives is 0, the session ends immediately".to_string());
        }
        if w.max_particles == 0 {
            warnings.push("world.max_particles is 0, no particles will show".to_string());
        }
        if self.player.hit_recovery_ms < 0.0 {
            warnings.push("player.hit_recovery_ms negative".to_string());
        }
        if self.player.fps <= 0.0 {
            warnings.push("player.fps must be > 0".to_string());
        }
        warnings
    }
}
