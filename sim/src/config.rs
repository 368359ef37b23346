//! Runtime settings. Every field has a default that reproduces the stock behaviour (10 kHz physics, 50 Hz telemetry
//! to 127.0.0.1:8080, 400 km LEO start), so an empty or missing config file changes nothing.

use std::{
    env, fs,
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    path::Path,
    time::Duration,
};

use hyperion_physics::{Body, State};
use hyperion_utils::Vec3D;
use serde::Deserialize;
use thiserror::Error;

use crate::{driver::tick_length, governor::GovernorKind};

/// environment variable naming an optional RON config file.
pub const CONFIG_ENV_VAR: &str = "HYPERION_CONFIG";

/// Errors from reading or checking a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// the config file could not be read.
    #[error("can't read config: {0}")]
    Io(#[from] std::io::Error),

    /// the config file is not valid RON for [`SimConfig`].
    #[error("can't parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// parsed fine, but a value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Starting orbit. Position is over the equator on +x, velocity along +y, attitude identity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    /// height above the body radius, m.
    pub altitude: f64,
    /// initial speed, m/s. Not forced to circular.
    pub speed: f64,
    /// constant body rate, rad/s.
    pub angular_rate: [f64; 3],
}

impl Default for InitialConditions {
    fn default() -> Self {
        InitialConditions {
            altitude: 400_000.0,
            speed: 7660.0,
            angular_rate: [0.01, 0.05, 0.001], // slow tumble
        }
    }
}

/// Top level settings for the real-time simulation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// fixed integration step and tick length, s.
    pub physics_dt: f64,
    /// consumer cadence, ms.
    pub telemetry_interval_ms: u64,
    /// where telemetry datagrams go.
    pub telemetry_target: SocketAddr,
    /// log a status line every this many consumer ticks.
    pub status_every: u32,
    /// how the driver waits out the remainder of each tick.
    pub governor: GovernorKind,
    /// for [`GovernorKind::Sleep`]: how much of the tick is spun rather than slept, us.
    pub sleep_spin_margin_us: u64,
    /// starting orbit.
    pub initial: InitialConditions,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            physics_dt: 1e-4,
            telemetry_interval_ms: 20,
            telemetry_target: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8080)),
            status_every: 50,
            governor: GovernorKind::Spin,
            sleep_spin_margin_us: 50,
            initial: InitialConditions::default(),
        }
    }
}

impl SimConfig {
    /// Parses a RON file and validates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Parses RON text and validates it. Missing fields take their defaults.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file named by `HYPERION_CONFIG`, or the defaults when it isn't set.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Range checks that serde can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tick()?;
        if self.telemetry_interval_ms == 0 {
            return Err(ConfigError::Invalid("telemetry_interval_ms must be at least 1".into()));
        }
        if self.status_every == 0 {
            return Err(ConfigError::Invalid("status_every must be at least 1".into()));
        }
        if !(self.initial.altitude.is_finite() && self.initial.altitude > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "initial altitude must be positive, got {}",
                self.initial.altitude
            )));
        }
        if !self.initial.speed.is_finite() || !self.initial.angular_rate.iter().all(|w| w.is_finite()) {
            return Err(ConfigError::Invalid("initial speed and rates must be finite".into()));
        }
        Ok(())
    }

    /// The tick length as a wall-clock duration. Fails unless `physics_dt` is positive and fits a `Duration`.
    pub fn tick(&self) -> Result<Duration, ConfigError> {
        tick_length(self.physics_dt).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "physics_dt must be a positive number of seconds a tick can last, got {}",
                self.physics_dt
            ))
        })
    }

    /// The consumer cadence.
    pub fn telemetry_interval(&self) -> Duration {
        Duration::from_millis(self.telemetry_interval_ms)
    }

    /// Builds the initial state about `body`.
    pub fn initial_state(&self, body: &Body) -> State {
        let [wx, wy, wz] = self.initial.angular_rate;
        State::circular_leo(body, self.initial.altitude, self.initial.speed, Vec3D(wx, wy, wz))
    }
}
