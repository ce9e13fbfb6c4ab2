//! Configuration for a simulation run.
//!
//! Loaded from an optional TOML file via `--config`. Every field has a
//! default so a run with no config file at all behaves like one
//! loading an empty `[run]` table.

use serde::Deserialize;

const DEFAULT_MAX_CYCLES: u64 = 1_000_000;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    /// Cycle ceiling. If x9 never reaches 10 within this many cycles,
    /// the run is reported as non-terminating rather than looping forever.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,

    /// Enables per-stage trace lines on stderr.
    #[serde(default)]
    pub trace: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_cycles: default_max_cycles(),
            trace: false,
        }
    }
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run: RunConfig::default(),
        }
    }
}
