//! Ray cones: a scalar footprint (width and spread angle) tracked along a ray path.
//! This module is private but reexported by its parent.

use core::fmt;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::math::{TextureSize, WorldVector};

mod encoding;
pub use encoding::*;

/// The footprint of a ray, approximated as a cone.
///
/// The cone is described at a particular point along the ray path (initially the camera,
/// later each hit point) by its `width` there and its `spread_angle`, the angle at which
/// the width grows with further distance. A negative spread angle describes a converging
/// cone, as produced by concave reflectors.
///
/// A `RayCone` is a value; every operation returns a new cone. The storage form is chosen
/// by the type parameter `E`; see [`ConeEncoding`].
///
/// Width must not be negative. This is not checked.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct RayCone<E = DefaultConeEncoding> {
    encoded: E,
}

impl<E: ConeEncoding> RayCone<E> {
    /// Constructs a cone with the given width and spread angle (in radians).
    #[inline]
    pub fn new(width: f32, spread_angle: f32) -> Self {
        Self {
            encoded: E::encode(width, spread_angle),
        }
    }

    /// Constructs the cone of a ray leaving the camera, which has no width yet.
    ///
    /// `pixel_spread_angle` is typically obtained from [`crate::pixel_spread_angle()`].
    #[inline]
    pub fn for_primary_ray(pixel_spread_angle: f32) -> Self {
        Self::new(0.0, pixel_spread_angle)
    }

    /// Wraps an already-encoded value, such as one read back from a ray payload buffer.
    #[inline]
    pub const fn from_encoding(encoded: E) -> Self {
        Self { encoded }
    }

    /// Returns the encoded value, suitable for storing in a ray payload buffer.
    #[inline]
    pub const fn encoding(self) -> E {
        self.encoded
    }

    /// Returns the width of the cone at the current point.
    #[inline]
    pub fn width(self) -> f32 {
        self.encoded.width()
    }

    /// Returns the spread angle of the cone, in radians.
    #[inline]
    pub fn spread_angle(self) -> f32 {
        self.encoded.spread_angle()
    }

    /// Converts this cone to a different storage form.
    #[inline]
    #[must_use]
    pub fn reencode<E2: ConeEncoding>(self) -> RayCone<E2> {
        RayCone::new(self.width(), self.spread_angle())
    }

    /// Moves the cone along its ray by `hit_t`, growing its width according to its
    /// spread angle. The spread angle is unchanged.
    #[inline]
    #[must_use]
    pub fn propagate_distance(self, hit_t: f32) -> Self {
        let spread_angle = self.spread_angle();
        Self::new(spread_angle * hit_t + self.width(), spread_angle)
    }

    /// Adds `angle` to the spread angle, as a surface interaction does.
    /// The width is unchanged.
    #[inline]
    #[must_use]
    pub fn add_to_spread_angle(self, angle: f32) -> Self {
        Self::new(self.width(), self.spread_angle() + angle)
    }

    /// Returns the cone at a new hit point, `hit_t` distant along the ray from the point
    /// `self` describes, after interacting with a surface which contributes
    /// `surface_spread_angle` (see [`crate::compute_screen_space_surface_spread_angle()`]).
    ///
    /// This must be done before [`RayCone::compute_lod()`] at the new hit point, so that
    /// the width accounts for the distance travelled.
    #[inline]
    #[must_use]
    pub fn propagate(self, surface_spread_angle: f32, hit_t: f32) -> Self {
        let width = self.width();
        let spread_angle = self.spread_angle();
        Self::new(
            spread_angle * hit_t + width,
            spread_angle + surface_spread_angle,
        )
    }

    /// Computes the texture level of detail for sampling a texture of size `texture_size`
    /// at the hit point this cone has been propagated to.
    ///
    /// * `tri_lod_constant` is [`TriangleLod::lod_constant`] for the hit triangle.
    /// * `ray_dir` is the (unit) direction of the ray which hit the triangle.
    /// * `normal` is the (unit) surface normal at the hit point.
    ///
    /// The result is
    /// `tri_lod_constant + 0.5 * log2(width * height * cone_width² / (ray_dir · normal)²)`.
    /// If the ray grazes the surface (`ray_dir · normal = 0`), the result is infinite.
    ///
    /// [`TriangleLod::lod_constant`]: crate::TriangleLod::lod_constant
    #[inline]
    pub fn compute_lod(
        self,
        tri_lod_constant: f32,
        ray_dir: WorldVector,
        normal: WorldVector,
        texture_size: TextureSize,
    ) -> f32 {
        self.compute_lod_without_texture_size(tri_lod_constant, ray_dir, normal)
            + texture_size_lod_offset(texture_size)
    }

    /// Computes the part of [`RayCone::compute_lod()`] which does not depend on the
    /// texture, so that one cone can be used for several textures of differing sizes at
    /// the same hit point. Add [`texture_size_lod_offset()`] to obtain the LOD for a
    /// particular texture.
    #[inline]
    pub fn compute_lod_without_texture_size(
        self,
        tri_lod_constant: f32,
        ray_dir: WorldVector,
        normal: WorldVector,
    ) -> f32 {
        // 0.5 * log2(w² / (d·n)²), written so the squares can't overflow.
        let filter_width = self.width().abs();
        let cos_incidence = ray_dir.dot(normal).abs();
        tri_lod_constant + filter_width.log2() - cos_incidence.log2()
    }
}

impl<E: ConeEncoding> fmt::Debug for RayCone<E> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RayCone")
            .field("width", &self.width())
            .field("spread_angle", &self.spread_angle())
            .finish()
    }
}

/// Returns the term of [`RayCone::compute_lod()`] contributed by the size of the texture,
/// `0.5 * log2(width * height)`.
#[inline]
pub fn texture_size_lod_offset(texture_size: TextureSize) -> f32 {
    0.5 * (texture_size.width as f32 * texture_size.height as f32).log2()
}
