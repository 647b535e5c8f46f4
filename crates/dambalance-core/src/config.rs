//! Basin and lake configuration.
//!
//! Field names follow the core vocabulary; the keys used by the legacy
//! `dam_config.json` files (`dam_volume`, `lake_volume`,
//! `init_water_volume`, `evap_factor`) are accepted as aliases.
use serde::{Deserialize, Serialize};

use crate::balance::constants::MAX_REDUCTION_PCT;
use crate::error::{BalanceError, Result};
use crate::geometry::{BasinGeometry, FractionMode};

/// Capacity, starting storage and shape of one impoundment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasinConfig {
    /// Maximum storable volume.
    #[serde(alias = "dam_volume", alias = "lake_volume")]
    pub capacity_volume: f64,
    /// Stored volume on day 0. Values above capacity are clamped down.
    #[serde(alias = "init_water_volume")]
    pub initial_volume: f64,
    /// Horizontal run per unit vertical rise of the sides.
    pub slope: f64,
    /// Side length of the square floor.
    pub base: f64,
    #[serde(default)]
    pub fractions: FractionMode,
}

impl BasinConfig {
    pub fn new(capacity_volume: f64, initial_volume: f64, slope: f64, base: f64) -> Self {
        Self {
            capacity_volume,
            initial_volume,
            slope,
            base,
            fractions: FractionMode::default(),
        }
    }

    pub fn with_fractions(mut self, fractions: FractionMode) -> Self {
        self.fractions = fractions;
        self
    }

    /// Validated basin shape.
    pub fn geometry(&self) -> Result<BasinGeometry> {
        Ok(BasinGeometry::new(self.base, self.slope)?.with_fractions(self.fractions))
    }

    /// Check every field; shape errors surface as `InvalidGeometry`.
    pub fn validate(&self) -> Result<()> {
        if !self.capacity_volume.is_finite() || self.capacity_volume <= 0.0 {
            return Err(BalanceError::InvalidConfig(format!(
                "capacity_volume = {} must be finite and > 0",
                self.capacity_volume
            )));
        }
        if !self.initial_volume.is_finite() || self.initial_volume < 0.0 {
            return Err(BalanceError::InvalidConfig(format!(
                "initial_volume = {} must be finite and >= 0",
                self.initial_volume
            )));
        }
        self.geometry()?;
        Ok(())
    }

    /// Parse and validate the JSON form.
    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| BalanceError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Lake-only switches.
///
/// - `leaky`: subtract a fixed 5 mm/day seepage over the wetted area
/// - `evaporation_reduction_pct`: evaporation suppression, 0 (none) to 100 (all)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LakeOptions {
    #[serde(default)]
    pub leaky: bool,
    #[serde(default, alias = "evap_factor")]
    pub evaporation_reduction_pct: f64,
}

impl LakeOptions {
    pub fn new(leaky: bool, evaporation_reduction_pct: f64) -> Self {
        Self {
            leaky,
            evaporation_reduction_pct,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_reduction_pct(self.evaporation_reduction_pct)
    }
}

pub(crate) fn check_reduction_pct(pct: f64) -> Result<()> {
    if !(0.0..=MAX_REDUCTION_PCT).contains(&pct) {
        return Err(BalanceError::InvalidConfig(format!(
            "evaporation_reduction_pct = {pct} is out of bounds [0, {MAX_REDUCTION_PCT}]"
        )));
    }
    Ok(())
}

/// Basin plus lake options, as read from a single flat mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LakeConfig {
    #[serde(alias = "lake_volume", alias = "dam_volume")]
    pub capacity_volume: f64,
    #[serde(alias = "init_water_volume")]
    pub initial_volume: f64,
    pub slope: f64,
    pub base: f64,
    #[serde(default)]
    pub fractions: FractionMode,
    #[serde(default)]
    pub leaky: bool,
    #[serde(default, alias = "evap_factor")]
    pub evaporation_reduction_pct: f64,
}

impl LakeConfig {
    pub fn new(basin: BasinConfig, options: LakeOptions) -> Self {
        Self {
            capacity_volume: basin.capacity_volume,
            initial_volume: basin.initial_volume,
            slope: basin.slope,
            base: basin.base,
            fractions: basin.fractions,
            leaky: options.leaky,
            evaporation_reduction_pct: options.evaporation_reduction_pct,
        }
    }

    pub fn basin(&self) -> BasinConfig {
        BasinConfig {
            capacity_volume: self.capacity_volume,
            initial_volume: self.initial_volume,
            slope: self.slope,
            base: self.base,
            fractions: self.fractions,
        }
    }

    pub fn options(&self) -> LakeOptions {
        LakeOptions::new(self.leaky, self.evaporation_reduction_pct)
    }

    pub fn validate(&self) -> Result<()> {
        self.basin().validate()?;
        self.options().validate()
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| BalanceError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
