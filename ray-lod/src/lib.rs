//! Texture level-of-detail estimation for ray tracing.
//!
//! When a ray hits a textured triangle, the texture lookup should be filtered according to
//! the footprint of the ray (and the pixel it came from) on that surface. This library
//! offers two independent ways to track that footprint from bounce to bounce:
//!
//! * [`RayCone`]: a scalar width and spread angle, cheap to carry in a ray payload,
//!   producing a single isotropic LOD value per hit.
//! * [`RayDiff`]: the first-order derivatives of ray origin and direction with respect to
//!   screen position, producing texture-coordinate gradients per hit.
//!
//! Neither owns any scene, camera, or texture data; the host renderer supplies the hit
//! geometry and consumes the LOD or gradients.
//!
//! ## Crate features
//!
//! This crate, `ray_lod`, defines the following feature flags:
//!
//! * `"classic-igehy"` (enabled by default):
//!   Makes [`Igehy`] the [`DefaultMethod`] for ray differentials.
//!   If disabled, [`RayTracingGems`] is the default.
//!   Both are always available by naming them explicitly.
//! * `"half-precision-cones"`:
//!   Makes [`PackedHalf`] the [`DefaultConeEncoding`], so that a [`RayCone`] occupies
//!   one 32-bit word.
//! * `"serde"`:
//!   Adds `serde::Serialize` and `serde::Deserialize` implementations for the
//!   [`options`] types.
//! * `"std"` (enabled by default):
//!   If disabled, the library becomes `no_std` compatible, at this cost:
//!   * Error types do not implement [`std::error::Error`].
//!   * Transcendental functions are computed by `libm` instead of the platform.

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]
#![warn(clippy::missing_inline_in_public_items)]

#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;

// -------------------------------------------------------------------------------------------------

pub mod math;

pub mod camera;
pub use camera::{pixel_spread_angle, ray_direction_differentials};

mod cone;
pub use cone::*;

mod differential;
pub use differential::*;

pub mod options;

mod triangle;
pub use triangle::*;

// reexport for convenience of our tests and callers constructing vectors
#[doc(hidden)]
pub use euclid;
