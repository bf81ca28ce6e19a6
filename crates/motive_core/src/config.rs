use crate::catalog::AgentCatalog;
use crate::error::{invalid, MotiveResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MotiveConfig {
    pub settings: Settings,
    pub engine: EngineTuning,
    /// Replaces the reference agent when present
    pub catalog: Option<AgentCatalog>,
}

impl MotiveConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: MotiveConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        config.settings.validate()?;
        config.engine.validate()?;
        if let Some(catalog) = &config.catalog {
            catalog.validate()?;
        }
        Ok(config)
    }

    /// Load from path if the file exists; a missing file yields defaults with
    /// env overrides. A file that exists but fails to parse or validate is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::metadata(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("Config file {} not found, using defaults", path.display());
                Ok(Self::from_env())
            }
            _ => Self::load(path),
        }
    }

    /// Defaults with env var overrides applied.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        cfg
    }

    /// The catalog to build a model from.
    pub fn catalog(&self) -> AgentCatalog {
        self.catalog.clone().unwrap_or_default()
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("MOTIVE_TICK_MS") {
            match v.parse::<f64>() {
                Ok(ms) if ms > 0.0 => self.settings.tick_seconds = ms / 1000.0,
                _ => tracing::warn!("Ignoring invalid MOTIVE_TICK_MS={}", v),
            }
        }
        if let Ok(v) = std::env::var("MOTIVE_MAX_TICKS") {
            match v.parse() {
                Ok(n) => self.settings.max_ticks = n,
                Err(_) => tracing::warn!("Ignoring invalid MOTIVE_MAX_TICKS={}", v),
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

/// Clock of the simulation. Ticks are logical: one call to advance is one
/// tick of `tick_seconds`, however much wall-clock time passes in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tick_seconds: f64,
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_seconds: 0.1,
            max_ticks: 1_000_000,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> MotiveResult<()> {
        if !self.tick_seconds.is_finite() || self.tick_seconds <= 0.0 {
            return Err(invalid(format!(
                "tick_seconds must be positive, got {}",
                self.tick_seconds
            )));
        }
        Ok(())
    }

    /// Number of ticks covering `seconds` of simulated time.
    pub fn ticks_for(&self, seconds: f64) -> u64 {
        (seconds / self.tick_seconds).round().max(0.0) as u64
    }
}

/// Tuning of the aggregation and event handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineTuning {
    /// Extra weight of the leading motive per unit of focus
    pub leading_motive_amplification: f64,
    /// Steepness of the `1 - e^(-k x)` compression of aggregates
    pub saturation_factor: f64,
    /// Largest deviation from an expected reward that still confirms it
    pub confirmation_tolerance: f64,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            leading_motive_amplification: 2.0,
            saturation_factor: 6.0,
            confirmation_tolerance: 0.1,
        }
    }
}

impl EngineTuning {
    pub fn validate(&self) -> MotiveResult<()> {
        for (field, value) in [
            ("leading_motive_amplification", self.leading_motive_amplification),
            ("saturation_factor", self.saturation_factor),
            ("confirmation_tolerance", self.confirmation_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "engine.{} must be a finite non-negative number, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
