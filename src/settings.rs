//! Simulation settings
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! classic nine-brick arena.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Rgb;
use crate::consts::*;
use crate::sim::BrickBehavior;

/// How particle colors are picked on spawn and on particle collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RecolorMode {
    /// Integer-divides a 15-bit random value by 10000, so every component
    /// lands in {0, 1, 2, 3}. Renderers clamp to 1, which leaves eight
    /// possible colors.
    #[default]
    Legacy,
    /// Uniform components in `[0, 1)`
    Visible,
}

impl RecolorMode {
    /// Draw a color from `rng`
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Rgb {
        match self {
            RecolorMode::Legacy => [
                legacy_component(rng),
                legacy_component(rng),
                legacy_component(rng),
            ],
            RecolorMode::Visible => [rng.random(), rng.random(), rng.random()],
        }
    }
}

fn legacy_component<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    (rng.random_range(0..=LEGACY_RAND_MAX) / LEGACY_COLOR_DIVISOR) as f32
}

/// Initial state of one brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickSpec {
    pub behavior: BrickBehavior,
    pub center: Vec2,
    pub half_extent: f32,
    pub strength: i32,
}

impl BrickSpec {
    pub fn destructible(x: f32, y: f32) -> Self {
        Self {
            behavior: BrickBehavior::Destructible,
            center: Vec2::new(x, y),
            half_extent: BRICK_HALF_EXTENT,
            strength: BRICK_START_STRENGTH,
        }
    }
}

/// The classic layout: a plus-shaped cluster plus a row underneath
pub fn default_layout() -> [BrickSpec; BRICK_COUNT] {
    [
        BrickSpec::destructible(0.0, 0.0),
        BrickSpec::destructible(0.0, 0.2),
        BrickSpec::destructible(-0.2, 0.0),
        BrickSpec::destructible(0.2, 0.0),
        BrickSpec::destructible(0.0, -0.2),
        BrickSpec::destructible(-0.2, -0.2),
        BrickSpec::destructible(0.2, -0.2),
        BrickSpec::destructible(-0.4, -0.2),
        BrickSpec::destructible(0.4, -0.2),
    ]
}

/// Knobs for the headless driver binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Frames to run before exiting
    pub frames: u64,
    /// Spawn a particle every this many frames (0 = never)
    pub spawn_every: u64,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            frames: 3600,
            spawn_every: 30,
        }
    }
}

/// World configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed; `None` picks one at startup
    pub seed: Option<u64>,
    /// Spawn ceiling; `None` leaves particle growth unbounded
    pub max_particles: Option<usize>,
    /// Speed floor applied after every particle update. Off by default,
    /// so wall decay can push speed below zero.
    pub min_speed: Option<f32>,
    /// Radius floor applied after every particle update. Off by default,
    /// so repeated collisions keep halving the radius.
    pub min_radius: Option<f32>,
    pub recolor: RecolorMode,
    pub bricks: [BrickSpec; BRICK_COUNT],
    pub demo: DemoSettings,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_particles: None,
            min_speed: None,
            min_radius: None,
            recolor: RecolorMode::Legacy,
            bricks: default_layout(),
            demo: DemoSettings::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Like [`SimConfig::load`], but logs failures and returns the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }
}

/// Errors that can occur while loading or saving settings.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or write the settings file.
    Io(std::io::Error),
    /// Settings file is not valid JSON for [`SimConfig`].
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to access settings file: {}", e),
            ConfigError::Parse(e) => write!(f, "Invalid settings: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
