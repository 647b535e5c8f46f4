//! Frustum geometry solver.
//!
//! The basin is a square frustum: a pyramid standing on its apex with the
//! tip sliced off at the true bottom. Extending the sides down to the
//! virtual apex turns the volume→depth inversion into a plain cube root:
//!
//! - `virtual_depth = (base / 2) / slope`
//! - `virtual_volume = 1/3 * base² * virtual_depth`
//! - `total_depth = ((volume + virtual_volume) / (4/3 * slope²))^(1/3)`
//! - `depth = total_depth - virtual_depth`
use serde::{Deserialize, Serialize};

use crate::error::{BalanceError, Result};

/// 1/3 as written in the legacy calculator.
pub const LEGACY_THIRD: f64 = 0.3333333333;

/// 4/3 as written in the legacy calculator.
pub const LEGACY_FOUR_THIRDS: f64 = 1.33333333;

/// Cube-root exponent as written in the legacy calculator.
pub const LEGACY_CUBE_ROOT_EXP: f64 = 0.33333333;

/// How the fractions 1/3 and 4/3 are evaluated.
///
/// `Legacy` reproduces the truncated decimal literals of the legacy calculator,
/// so outputs match it bit for bit. `Exact` uses true fractions and `cbrt`;
/// results then differ from the legacy tool around the 6th-7th significant
/// digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FractionMode {
    #[default]
    Legacy,
    Exact,
}

impl FractionMode {
    #[inline]
    pub fn third(self) -> f64 {
        match self {
            FractionMode::Legacy => LEGACY_THIRD,
            FractionMode::Exact => 1.0 / 3.0,
        }
    }

    #[inline]
    pub fn four_thirds(self) -> f64 {
        match self {
            FractionMode::Legacy => LEGACY_FOUR_THIRDS,
            FractionMode::Exact => 4.0 / 3.0,
        }
    }

    #[inline]
    fn cube_root(self, x: f64) -> f64 {
        match self {
            FractionMode::Legacy => x.powf(LEGACY_CUBE_ROOT_EXP),
            FractionMode::Exact => x.cbrt(),
        }
    }

    /// Inverse of [`FractionMode::cube_root`].
    #[inline]
    fn cube(self, x: f64) -> f64 {
        match self {
            FractionMode::Legacy => x.powf(1.0 / LEGACY_CUBE_ROOT_EXP),
            FractionMode::Exact => x * x * x,
        }
    }
}

/// Validated basin shape: square base side length and side slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasinGeometry {
    base: f64,
    slope: f64,
    fractions: FractionMode,
}

impl BasinGeometry {
    /// Create a basin with legacy fractions.
    ///
    /// `base` may be zero (a full pyramid); `slope` must be strictly positive.
    pub fn new(base: f64, slope: f64) -> Result<Self> {
        check_shape(base, slope)?;
        Ok(Self {
            base,
            slope,
            fractions: FractionMode::default(),
        })
    }

    pub fn with_fractions(mut self, fractions: FractionMode) -> Self {
        self.fractions = fractions;
        self
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn fractions(&self) -> FractionMode {
        self.fractions
    }

    /// Depth below the true bottom at which the extended sides meet.
    #[inline]
    pub fn virtual_depth(&self) -> f64 {
        (self.base / 2.0) / self.slope
    }

    /// Volume of the virtual pyramid below the true bottom.
    #[inline]
    pub fn virtual_volume(&self) -> f64 {
        self.fractions.third() * (self.base * self.base) * self.virtual_depth()
    }

    /// Water depth holding `volume`.
    ///
    /// Under legacy fractions an empty basin yields a tiny negative depth;
    /// callers that need an exact zero special-case it.
    pub fn depth(&self, volume: f64) -> Result<f64> {
        if !volume.is_finite() || volume < 0.0 {
            return Err(BalanceError::InvalidVolume { volume });
        }
        let virtual_depth = self.virtual_depth();
        let total_volume = volume + self.virtual_volume();
        let total_depth = self
            .fractions
            .cube_root(total_volume / (self.fractions.four_thirds() * self.slope * self.slope));
        Ok(total_depth - virtual_depth)
    }

    /// Top surface area of the water at `depth`.
    pub fn surface_area(&self, depth: f64) -> Result<f64> {
        self.check_depth(depth)?;
        let top_length = self.top_length(depth);
        Ok(top_length * top_length)
    }

    /// Lateral area of the submerged frustum plus its base area.
    pub fn wetted_area(&self, depth: f64) -> Result<f64> {
        self.check_depth(depth)?;
        let top_length = self.top_length(depth);
        let rise = top_length - self.base;
        let lateral = (top_length + self.base) * (rise * rise + 4.0 * depth * depth).sqrt();
        Ok(lateral + self.base * self.base)
    }

    /// Stored volume at `depth`; inverse of [`BasinGeometry::depth`].
    pub fn volume(&self, depth: f64) -> Result<f64> {
        self.check_depth(depth)?;
        let total_depth = depth + self.virtual_depth();
        let volume = self.fractions.four_thirds()
            * self.slope
            * self.slope
            * self.fractions.cube(total_depth)
            - self.virtual_volume();
        if !volume.is_finite() {
            return Err(BalanceError::InvalidVolume { volume });
        }
        Ok(volume)
    }

    /// Depths are measured from the true bottom and may dip to the virtual apex.
    fn check_depth(&self, depth: f64) -> Result<()> {
        let min_depth = -self.virtual_depth();
        if !depth.is_finite() || depth < min_depth {
            return Err(BalanceError::InvalidDepth { depth, min_depth });
        }
        Ok(())
    }

    #[inline]
    fn top_length(&self, depth: f64) -> f64 {
        2.0 * (depth * self.slope) + self.base
    }
}

fn check_shape(base: f64, slope: f64) -> Result<()> {
    if !base.is_finite() || !slope.is_finite() || base < 0.0 || slope <= 0.0 {
        return Err(BalanceError::InvalidGeometry { base, slope });
    }
    Ok(())
}

/// Water depth for `volume` in a basin of the given shape (legacy fractions).
pub fn solve_depth(base: f64, slope: f64, volume: f64) -> Result<f64> {
    BasinGeometry::new(base, slope)?.depth(volume)
}

/// Top surface area at `depth`.
pub fn surface_area(base: f64, slope: f64, depth: f64) -> Result<f64> {
    BasinGeometry::new(base, slope)?.surface_area(depth)
}

/// Area of water touching the basin sides and floor at `depth`.
pub fn wetted_surface_area(base: f64, slope: f64, depth: f64) -> Result<f64> {
    BasinGeometry::new(base, slope)?.wetted_area(depth)
}

/// Stored volume at `depth` (legacy fractions).
pub fn volume_at_depth(base: f64, slope: f64, depth: f64) -> Result<f64> {
    BasinGeometry::new(base, slope)?.volume(depth)
}
