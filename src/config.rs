//! TOML configuration: pairing policy, interstitial cadence, table overrides.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! shipped behaviour.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregate::Aggregate;
use crate::engine::{EngineConfig, FortuneEngine};
use crate::error::MgResult;
use crate::gate::UsageGate;
use crate::hexagram::{Base, Operand, Pairing, PairingPolicy};

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(mg::config::read),
        help("Ensure the config file exists, or run `myeonggyeong config init` to create one.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(code(mg::config::parse), help("Check the TOML syntax in the config file."))]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(mg::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("pairing for stage \"{stage}\" has a zero {side} base")]
    #[diagnostic(
        code(mg::config::zero_base),
        help("Bases are moduli and must be at least 1. The shipped policy uses 8 and 6.")
    )]
    ZeroBase { stage: Aggregate, side: &'static str },

    #[error("pairings must be listed as origin, growth, benefit, destiny")]
    #[diagnostic(code(mg::config::pairing_order))]
    PairingOrder,

    #[error("expected 4 pairings, found {count}")]
    #[diagnostic(
        code(mg::config::pairing_count),
        help("Give exactly one [[pairings]] table per stage, or omit them all for the default.")
    )]
    PairingCount { count: usize },

    #[error("gate_every must be at least 1")]
    #[diagnostic(code(mg::config::zero_cadence))]
    ZeroCadence,
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// One side of a configured pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperandConfig {
    pub aggregate: Aggregate,
    pub base: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingConfig {
    pub stage: Aggregate,
    pub upper: OperandConfig,
    pub lower: OperandConfig,
}

impl From<&Pairing> for PairingConfig {
    fn from(p: &Pairing) -> Self {
        let side = |o: Operand| OperandConfig {
            aggregate: o.aggregate,
            base: o.base.get(),
        };
        Self {
            stage: p.stage,
            upper: side(p.upper),
            lower: side(p.lower),
        }
    }
}

impl PairingConfig {
    fn to_pairing(self) -> ConfigResult<Pairing> {
        let side = |o: OperandConfig, side: &'static str| {
            Base::new(o.base)
                .map(|base| Operand::new(o.aggregate, base))
                .ok_or(ConfigError::ZeroBase {
                    stage: self.stage,
                    side,
                })
        };
        Ok(Pairing {
            stage: self.stage,
            upper: side(self.upper, "upper")?,
            lower: side(self.lower, "lower")?,
        })
    }
}

/// Engine and CLI configuration, persisted as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Show the interstitial on every n-th analysis.
    #[serde(default = "default_gate_every")]
    pub gate_every: u32,
    /// Replacement hexagram table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hexagram_table: Option<PathBuf>,
    /// Replacement Hanja table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hanja_table: Option<PathBuf>,
    /// Replacement jamo weight table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jamo_table: Option<PathBuf>,
    /// One pairing per stage, in report order.
    #[serde(default = "default_pairings")]
    pub pairings: Vec<PairingConfig>,
}

fn default_pairings() -> Vec<PairingConfig> {
    PairingPolicy::standard().iter().map(PairingConfig::from).collect()
}
fn default_gate_every() -> u32 {
    UsageGate::DEFAULT_EVERY.get()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gate_every: default_gate_every(),
            hexagram_table: None,
            hanja_table: None,
            jamo_table: None,
            pairings: default_pairings(),
        }
    }
}

impl Config {
    /// Validated pairing policy.
    pub fn policy(&self) -> ConfigResult<PairingPolicy> {
        let pairings: Vec<Pairing> = self
            .pairings
            .iter()
            .map(|p| p.to_pairing())
            .collect::<ConfigResult<_>>()?;
        let pairings: [Pairing; 4] = pairings
            .try_into()
            .map_err(|v: Vec<Pairing>| ConfigError::PairingCount { count: v.len() })?;
        PairingPolicy::new(pairings).ok_or(ConfigError::PairingOrder)
    }

    pub fn gate(&self) -> ConfigResult<UsageGate> {
        NonZeroU32::new(self.gate_every)
            .map(UsageGate::new)
            .ok_or(ConfigError::ZeroCadence)
    }

    pub fn to_engine_config(&self) -> ConfigResult<EngineConfig> {
        Ok(EngineConfig {
            policy: self.policy()?,
            hexagram_table: self.hexagram_table.clone(),
            hanja_table: self.hanja_table.clone(),
            jamo_table: self.jamo_table.clone(),
        })
    }

    pub fn into_engine(self) -> MgResult<FortuneEngine> {
        FortuneEngine::new(self.to_engine_config()?)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        // Reject bad values at load, not at first use.
        config.policy()?;
        config.gate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = self.to_toml(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Pretty TOML text. `path` only labels errors.
    pub fn to_toml(&self, path: &Path) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
