use std::time::Duration;

use thiserror::Error;

use crate::render::Shape;
use crate::render::ShapeError;
use crate::render::Style;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}=\"{value}\" is not valid, expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),

    #[error("Invalid shape: {0}")]
    Shape(#[from] ShapeError),
}

/// Everything that can be tuned before a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Grid width, in cells
    pub width: usize,

    /// Grid height, in cells
    pub height: usize,

    /// Generations per second while running
    pub ticks_per_second: u32,

    pub style: Style,

    pub rules: RuleSet,

    /// Seed for the random number generator. Drawn from entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            ticks_per_second: 4,
            style: Style::default(),
            rules: RuleSet::default(),
            rng_seed: None,
        }
    }
}

impl Config {
    /// Largest width or height accepted from the environment
    pub const MAX_SIDE: usize = 1024;

    pub const SIZE: &'static str = "GRIDLIFE_SIZE";
    pub const TPS: &'static str = "GRIDLIFE_TPS";
    pub const SHAPE: &'static str = "GRIDLIFE_SHAPE";
    pub const GRIDLINES: &'static str = "GRIDLIFE_GRIDLINES";
    pub const SEED: &'static str = "GRIDLIFE_SEED";
    pub const RULE: &'static str = "GRIDLIFE_RULE";

    /// The default config, overridden by whichever `GRIDLIFE_*` environment variables are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup(Self::SIZE) {
            (config.width, config.height) = parse_size(&value).ok_or(ConfigError::InvalidValue {
                key: Self::SIZE,
                value,
                expected: "WIDTHxHEIGHT with both sides between 1 and 1024, like 20x20",
            })?;
        }

        if let Some(value) = lookup(Self::TPS) {
            config.ticks_per_second = match value.trim().parse::<u32>() {
                Ok(tps) if tps > 0 => tps,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: Self::TPS,
                        value,
                        expected: "a positive whole number of generations per second",
                    });
                }
            };
        }

        if let Some(value) = lookup(Self::SHAPE) {
            config.style.shape = value.parse::<Shape>()?;
        }

        if let Some(value) = lookup(Self::GRIDLINES) {
            config.style.gridlines = match value.trim() {
                "on" | "1" | "true" => true,
                "off" | "0" | "false" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: Self::GRIDLINES,
                        value,
                        expected: "on or off",
                    });
                }
            };
        }

        if let Some(value) = lookup(Self::SEED) {
            let Ok(seed) = value.trim().parse::<u64>() else {
                return Err(ConfigError::InvalidValue {
                    key: Self::SEED,
                    value,
                    expected: "an unsigned 64 bit number",
                });
            };

            config.rng_seed = Some(seed);
        }

        if let Some(value) = lookup(Self::RULE) {
            config.rules = value.parse()?;
        }

        Ok(config)
    }

    /// Time between two generations
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

/// Parse sizes that look like 20x15
fn parse_size(s: &str) -> Option<(usize, usize)> {
    let (w, h) = s.trim().split_once(['x', 'X'])?;
    let (w, h): (usize, usize) = (w.trim().parse().ok()?, h.trim().parse().ok()?);
    let side = 1..=Config::MAX_SIDE;

    (side.contains(&w) && side.contains(&h)).then_some((w, h))
}
