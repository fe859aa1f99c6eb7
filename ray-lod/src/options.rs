//! Run-time choice of texture level-of-detail technique.

use core::fmt;
use core::str::FromStr;

use crate::{
    ScreenSpaceDerivatives, SpreadAngleFactors, compute_screen_space_surface_spread_angle,
};

#[cfg(doc)]
use crate::{RayCone, RayDiff};

/// Options for texture level-of-detail selection, as a renderer might expose them to
/// its user.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
pub struct LodOptions {
    /// Technique used to pick texture gradients.
    pub mode: TexLodMode,

    /// Scaling of the curvature estimate used by
    /// [`compute_screen_space_surface_spread_angle()`] when [`mode`](Self::mode) is
    /// [`TexLodMode::RayCones`]. [`LodOptions::surface_spread_angle()`] applies them.
    pub spread_angle_factors: SpreadAngleFactors,
}

impl LodOptions {
    /// The default options, as a constant.
    pub const DEFAULT: Self = Self {
        mode: TexLodMode::RayCones,
        spread_angle_factors: SpreadAngleFactors::DEFAULT,
    };

    /// Replaces values that would produce meaningless level-of-detail values.
    ///
    /// Non-finite spread angle factors are reset to their defaults.
    #[must_use]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn repair(mut self) -> Self {
        let factors = &mut self.spread_angle_factors;
        if !factors.k1.is_finite() {
            log::warn!("ignoring non-finite spread angle factor k1 = {}", factors.k1);
            factors.k1 = SpreadAngleFactors::DEFAULT.k1;
        }
        if !factors.k2.is_finite() {
            log::warn!("ignoring non-finite spread angle factor k2 = {}", factors.k2);
            factors.k2 = SpreadAngleFactors::DEFAULT.k2;
        }
        self
    }

    /// Computes the spread angle a surface adds to a [`RayCone`], using
    /// [`Self::spread_angle_factors`].
    ///
    /// Returns zero unless [`Self::mode`] is [`TexLodMode::RayCones`], since no other mode
    /// tracks a spread angle.
    #[inline]
    pub fn surface_spread_angle(&self, derivatives: &ScreenSpaceDerivatives) -> f32 {
        match self.mode {
            TexLodMode::RayCones => {
                compute_screen_space_surface_spread_angle(derivatives, self.spread_angle_factors)
            }
            TexLodMode::Mip0 | TexLodMode::RayDiffs => 0.0,
        }
    }
}

impl Default for LodOptions {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Choices for [`LodOptions::mode`].
///
/// The [`Display`](fmt::Display) and [`FromStr`] forms are `"mip0"`, `"ray-cones"` and
/// `"ray-diffs"`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[non_exhaustive]
pub enum TexLodMode {
    /// Always sample the most detailed mip level.
    Mip0,

    /// Track a [`RayCone`] along each path and compute a single level per hit.
    #[default]
    RayCones,

    /// Track a [`RayDiff`] along each path and sample with anisotropic gradients.
    RayDiffs,
}

impl TexLodMode {
    /// Returns the name used by [`Display`](fmt::Display) and [`FromStr`].
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mip0 => "mip0",
            Self::RayCones => "ray-cones",
            Self::RayDiffs => "ray-diffs",
        }
    }
}

impl fmt::Display for TexLodMode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TexLodMode {
    type Err = ParseTexLodModeError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mip0" => Ok(Self::Mip0),
            "ray-cones" => Ok(Self::RayCones),
            "ray-diffs" => Ok(Self::RayDiffs),
            _ => Err(ParseTexLodModeError(())),
        }
    }
}

/// Error from parsing a string as a [`TexLodMode`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, displaydoc::Display)]
#[displaydoc("unknown texture LOD mode; expected “mip0”, “ray-cones”, or “ray-diffs”")]
pub struct ParseTexLodModeError(());

#[cfg(feature = "std")]
impl std::error::Error for ParseTexLodModeError {}
