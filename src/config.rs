//! Engine configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `sprite_actor.ron` file (if exists)
//! 3. Environment variables prefixed with `SPRITE_ACTOR_`
//!
//! Example environment variable: `SPRITE_ACTOR_WORLD__SCALE=2.0`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::actor::{DepthType, WalkingSpeed};
use crate::error::ActorError;

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub actor: ActorConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// World/asset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Assets-to-world ratio (2.0 = assets drawn at double size)
    pub scale: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Defaults for newly spawned actors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorConfig {
    /// Walking speed in world units/sec
    pub walking_speed: f32,
    /// How scale follows scene depth
    pub depth_type: DepthType,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            walking_speed: WalkingSpeed::DEFAULT,
            depth_type: DepthType::None,
        }
    }
}

/// Debug/development settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DebugConfig {
    /// Enable verbose logging
    pub verbose_logging: bool,
}

impl EngineConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `sprite_actor.ron` file (if exists)
    /// 3. Environment variables prefixed with `SPRITE_ACTOR_` (highest priority)
    pub fn load() -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("world.scale", 1.0)?
            .set_default("actor.walking_speed", f64::from(WalkingSpeed::DEFAULT))?
            .set_default("actor.depth_type", "NONE")?
            .set_default("debug.verbose_logging", false)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name("sprite_actor")
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (SPRITE_ACTOR_WORLD__SCALE, etc.)
            .add_source(Environment::with_prefix("SPRITE_ACTOR").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        let engine: EngineConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        engine.validate().context("Invalid configuration")?;
        Ok(engine)
    }

    /// Reject values no actor can run with.
    pub fn validate(&self) -> std::result::Result<(), ActorError> {
        if !(self.world.scale > 0.0 && self.world.scale.is_finite()) {
            return Err(ActorError::InvalidWorldScale(self.world.scale));
        }
        self.walking_speed().map(|_| ())
    }

    /// Configured walking speed, validated.
    pub fn walking_speed(&self) -> std::result::Result<WalkingSpeed, ActorError> {
        WalkingSpeed::new(self.actor.walking_speed)
    }
}
