//! Sandbox Configuration
//!
//! Describes the scene the sandbox simulates and how long to run it.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variable: `IMPULSE_SANDBOX_CONFIG=path/to/scene.toml`
//! 2. `sandbox.toml` in the working directory
//! 3. Built-in defaults: the two-sphere demo scene
//!
//! # Example Config File
//!
//! ```toml
//! frames = 900
//! report_every = 60
//! pairs = [[0, 1]]
//!
//! [physics]
//! restitution = 0.5
//!
//! [[bodies]]
//! position = [-10.0, 0.0, 0.0]
//! linear_velocity = [1.0, 0.0, 0.0]
//! shape = { type = "sphere", radius = 2.5 }
//!
//! [[bodies]]
//! position = [10.0, 0.0, 0.0]
//! linear_velocity = [-1.0, 0.0, 0.0]
//! shape = { type = "sphere", radius = 1.0 }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use impulse_physics::{PhysicsConfig, PhysicsError, PhysicsWorld, RigidBodyDesc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a config or building its scene
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Collision pair {0:?} does not name two configured bodies")]
    InvalidPair([u32; 2]),

    #[error("Timestep {0}s cannot be used as a frame interval")]
    FrameInterval(f32),

    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

/// Sandbox run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Number of frames to simulate
    pub frames: u32,
    /// Log every body's pose each time this many frames have run (0 disables)
    pub report_every: u32,
    /// Sleep between frames so the run takes wall-clock time
    pub realtime: bool,
    /// World configuration
    pub physics: PhysicsConfig,
    /// Bodies to create, in handle order. Empty means the demo scene.
    pub bodies: Vec<RigidBodyDesc>,
    /// Collision pairs as indices into `bodies`
    pub pairs: Vec<[u32; 2]>,
    /// Config file path the values came from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            frames: 1200,
            report_every: 60,
            realtime: false,
            physics: PhysicsConfig::default(),
            bodies: Vec::new(),
            pairs: Vec::new(),
            config_path: None,
        }
    }
}

impl SandboxConfig {
    /// Environment variable naming a config file
    pub const ENV_VAR: &'static str = "IMPULSE_SANDBOX_CONFIG";

    /// Config file looked up in the working directory
    pub const DEFAULT_PATH: &'static str = "sandbox.toml";

    /// Load configuration from all sources.
    ///
    /// A file that exists but cannot be read or parsed is an error rather
    /// than a silent fallback to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(Self::ENV_VAR) {
            if !path.is_empty() {
                return Self::load_from_file(path);
            }
        }

        let default_path = Path::new(Self::DEFAULT_PATH);
        if default_path.exists() {
            return Self::load_from_file(default_path);
        }

        log::info!("No sandbox config found, using the demo scene");
        Ok(Self::default())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_path = Some(path.to_path_buf());
        log::info!("Loaded sandbox config from {}", path.display());
        Ok(config)
    }

    /// Build the world this config describes
    pub fn build_world(&self) -> Result<PhysicsWorld, ConfigError> {
        if self.bodies.is_empty() {
            let (world, _) = PhysicsWorld::two_sphere_demo_with(self.physics.clone())?;
            return Ok(world);
        }

        let mut world = PhysicsWorld::new(self.physics.clone())?;
        let handles = self
            .bodies
            .iter()
            .map(|desc| world.create_body(desc))
            .collect::<impulse_physics::Result<Vec<_>>>()?;

        for &pair in &self.pairs {
            let [i, j] = pair;
            let (Some(&a), Some(&b)) = (handles.get(i as usize), handles.get(j as usize)) else {
                return Err(ConfigError::InvalidPair(pair));
            };
            world.add_collision_pair(a, b)?;
        }
        Ok(world)
    }

    /// Wall-clock interval between frames when running in realtime
    pub fn frame_interval(&self) -> Result<Duration, ConfigError> {
        let timestep = self.physics.timestep;
        Duration::try_from_secs_f32(timestep).map_err(|_| ConfigError::FrameInterval(timestep))
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        log::info!("Sandbox Configuration:");
        log::info!(
            "  Frames: {} at {:.4}s (realtime: {})",
            self.frames,
            self.physics.timestep,
            self.realtime
        );
        log::info!(
            "  Gravity: {:?}, restitution: {}",
            self.physics.gravity,
            self.physics.restitution
        );
        if self.bodies.is_empty() {
            log::info!("  Scene: two-sphere demo");
        } else {
            log::info!("  Scene: {} bodies, {} pairs", self.bodies.len(), self.pairs.len());
        }
        if let Some(path) = &self.config_path {
            log::info!("  Config: {}", path.display());
        }
    }
}
