//! Configuration system with YAML schema and validation.
//!
//! Implements Poka-Yoke (mistake-proofing) through:
//! - Type-safe configuration structs
//! - Schema validation via serde and `validator`
//! - Runtime semantic validation (speed ordering, sane limits)

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{VizError, VizResult};

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Playback timing.
    #[validate(nested)]
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Input bounds that keep every trace small enough to materialize.
    #[validate(nested)]
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Logging configuration.
    #[validate(nested)]
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl VizConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> VizResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        config.validate()?;
        config.validate_semantic()?;

        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VizConfigBuilder {
        VizConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    ///
    /// # Errors
    ///
    /// Returns error if the speed range is inverted or the default speed
    /// falls outside it.
    pub fn validate_semantic(&self) -> VizResult<()> {
        let playback = &self.playback;
        if playback.min_speed >= playback.max_speed {
            return Err(VizError::config(format!(
                "min_speed ({}) must be below max_speed ({})",
                playback.min_speed, playback.max_speed
            )));
        }
        if !(playback.min_speed..=playback.max_speed).contains(&playback.default_speed) {
            return Err(VizError::config(format!(
                "default_speed {} outside [{}, {}]",
                playback.default_speed, playback.min_speed, playback.max_speed
            )));
        }

        Ok(())
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            playback: PlaybackConfig::default(),
            limits: LimitsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VizConfigBuilder {
    speed_range: Option<(u32, u32)>,
    default_speed: Option<u32>,
    replay_delay_ms: Option<u64>,
    limits: Option<LimitsConfig>,
    log_level: Option<String>,
}

impl VizConfigBuilder {
    /// Set the accepted speed range.
    #[must_use]
    pub const fn speed_range(mut self, min: u32, max: u32) -> Self {
        self.speed_range = Some((min, max));
        self
    }

    /// Set the speed a fresh controller starts with.
    #[must_use]
    pub const fn default_speed(mut self, speed: u32) -> Self {
        self.default_speed = Some(speed);
        self
    }

    /// Set the pause between "play again" regeneration and resumed playback.
    #[must_use]
    pub const fn replay_delay_ms(mut self, delay: u64) -> Self {
        self.replay_delay_ms = Some(delay);
        self
    }

    /// Replace the input limits.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn limits(mut self, limits: LimitsConfig) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Set the default log level.
    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the assembled configuration fails semantic validation.
    pub fn build(self) -> VizResult<VizConfig> {
        let mut config = VizConfig::default();

        if let Some((min, max)) = self.speed_range {
            config.playback.min_speed = min;
            config.playback.max_speed = max;
            if self.default_speed.is_none() {
                config.playback.default_speed = min + (max.saturating_sub(min)) / 2;
            }
        }
        if let Some(speed) = self.default_speed {
            config.playback.default_speed = speed;
        }
        if let Some(delay) = self.replay_delay_ms {
            config.playback.replay_delay_ms = delay;
        }
        if let Some(limits) = self.limits {
            config.limits = limits;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }

        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }
}

/// Playback timing.
///
/// The delay between two advances is `max_speed - speed + min_speed`
/// milliseconds, so a larger speed means a shorter delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PlaybackConfig {
    /// Smallest accepted speed (and shortest delay in ms).
    #[validate(range(min = 1))]
    #[serde(default = "default_min_speed")]
    pub min_speed: u32,
    /// Largest accepted speed.
    #[validate(range(min = 2, max = 60_000))]
    #[serde(default = "default_max_speed")]
    pub max_speed: u32,
    /// Speed a fresh controller starts with.
    #[serde(default = "default_speed")]
    pub default_speed: u32,
    /// Pause between a "play again" regeneration and resumed playback.
    #[validate(range(max = 10_000))]
    #[serde(default = "default_replay_delay")]
    pub replay_delay_ms: u64,
}

const fn default_min_speed() -> u32 {
    50
}

const fn default_max_speed() -> u32 {
    1000
}

const fn default_speed() -> u32 {
    500
}

const fn default_replay_delay() -> u64 {
    100
}

impl PlaybackConfig {
    /// Speed bounds as `(low, high)`. An unvalidated, inverted range is
    /// read with its ends swapped.
    fn speed_bounds(&self) -> (u32, u32) {
        (
            self.min_speed.min(self.max_speed),
            self.min_speed.max(self.max_speed),
        )
    }

    /// Clamp a requested speed into the accepted range.
    #[must_use]
    pub fn clamp_speed(&self, speed: u32) -> u32 {
        let (low, high) = self.speed_bounds();
        speed.clamp(low, high)
    }

    /// Milliseconds between two advances at the given speed.
    #[must_use]
    pub fn delay_ms(&self, speed: u32) -> u64 {
        let (low, high) = self.speed_bounds();
        let speed = self.clamp_speed(speed);
        u64::from(high - speed) + u64::from(low)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            min_speed: default_min_speed(),
            max_speed: default_max_speed(),
            default_speed: default_speed(),
            replay_delay_ms: default_replay_delay(),
        }
    }
}

/// Input bounds for the trace generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LimitsConfig {
    /// Longest accepted number list.
    #[validate(range(min = 1, max = 50))]
    #[serde(default = "default_max_array_len")]
    pub max_array_len: usize,
    /// Largest N-Queens board.
    #[validate(range(min = 1, max = 10))]
    #[serde(default = "default_max_board_size")]
    pub max_board_size: usize,
    /// Most disks for Tower of Hanoi.
    #[validate(range(min = 1, max = 10))]
    #[serde(default = "default_max_disks")]
    pub max_disks: usize,
    /// Largest Fibonacci index.
    #[validate(range(min = 1, max = 40))]
    #[serde(default = "default_max_fib")]
    pub max_fib: u32,
    /// Longest text for the permutation generator.
    #[validate(range(min = 1, max = 7))]
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
    /// Longest string for the string DP generators.
    #[validate(range(min = 1, max = 30))]
    #[serde(default = "default_max_string_len")]
    pub max_string_len: usize,
    /// Most randomly generated activities.
    #[validate(range(min = 1, max = 50))]
    #[serde(default = "default_max_activities")]
    pub max_activities: usize,
    /// Largest knapsack capacity / coin change amount.
    #[validate(range(min = 1, max = 500))]
    #[serde(default = "default_max_amount")]
    pub max_amount: usize,
    /// Most items for the exponential subset-sum search.
    #[validate(range(min = 1, max = 20))]
    #[serde(default = "default_max_subset_items")]
    pub max_subset_items: usize,
    /// Largest DP table, in cells. Every step stores its own copy.
    #[validate(range(min = 1, max = 5000))]
    #[serde(default = "default_max_table_cells")]
    pub max_table_cells: usize,
}

const fn default_max_array_len() -> usize {
    50
}

const fn default_max_board_size() -> usize {
    10
}

const fn default_max_disks() -> usize {
    8
}

const fn default_max_fib() -> u32 {
    20
}

const fn default_max_text_len() -> usize {
    6
}

const fn default_max_string_len() -> usize {
    12
}

const fn default_max_activities() -> usize {
    20
}

const fn default_max_amount() -> usize {
    100
}

const fn default_max_subset_items() -> usize {
    12
}

const fn default_max_table_cells() -> usize {
    600
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_array_len: default_max_array_len(),
            max_board_size: default_max_board_size(),
            max_disks: default_max_disks(),
            max_fib: default_max_fib(),
            max_text_len: default_max_text_len(),
            max_string_len: default_max_string_len(),
            max_activities: default_max_activities(),
            max_amount: default_max_amount(),
            max_subset_items: default_max_subset_items(),
            max_table_cells: default_max_table_cells(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[validate(length(min = 1))]
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
