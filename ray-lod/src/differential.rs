//! Ray differentials: derivatives of ray origin and direction with respect to screen
//! position, tracked along a ray path.
//! This module is private but reexported by its parent.

use core::fmt;
use core::marker::PhantomData;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::HitTriangle;
use crate::camera::ray_direction_differentials;
use crate::math::{BaryVector, UvVector, ViewportSize, WorldVector};

mod method;
pub use method::*;


/// First-order sensitivity of a ray to a one-pixel shift of the pixel it was traced for.
///
/// * `origin_dx`, `origin_dy`: ∂O/∂x and ∂O/∂y, the change of the ray origin.
/// * `direction_dx`, `direction_dy`: ∂D/∂x and ∂D/∂y, the change of the (unit) ray direction.
///
/// A `RayDiff` is a value; every operation returns a new one. The type parameter `M`
/// selects the [`DifferentialMethod`]; all operations on one ray path use the same method.
///
/// Typical use, per ray path:
///
/// 1. [`RayDiff::for_primary_ray()`] at the camera.
/// 2. At each hit, [`RayDiff::propagate()`] to the hit point, then
///    [`RayDiff::surface_differentials()`] to obtain texture-coordinate gradients.
/// 3. If the path continues by specular reflection, [`RayDiff::reflect()`].
pub struct RayDiff<M = DefaultMethod> {
    origin_dx: WorldVector,
    origin_dy: WorldVector,
    direction_dx: WorldVector,
    direction_dy: WorldVector,
    method: PhantomData<fn() -> M>,
}

/// Derivatives at a hit point, as computed by [`RayDiff::surface_differentials()`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct SurfaceDifferentials {
    /// Derivative of the barycentric coordinates (weights of vertices 0 and 1) with
    /// respect to screen *x*.
    pub bary_dx: BaryVector,
    /// Derivative of the barycentric coordinates with respect to screen *y*.
    pub bary_dy: BaryVector,
    /// Derivative of the texture coordinates with respect to screen *x*.
    pub uv_dx: UvVector,
    /// Derivative of the texture coordinates with respect to screen *y*.
    pub uv_dy: UvVector,
}

impl<M: DifferentialMethod> RayDiff<M> {
    /// Constructs a [`RayDiff`] from its four derivatives.
    #[inline]
    pub fn new(
        origin_dx: WorldVector,
        origin_dy: WorldVector,
        direction_dx: WorldVector,
        direction_dy: WorldVector,
    ) -> Self {
        Self {
            origin_dx,
            origin_dy,
            direction_dx,
            direction_dy,
            method: PhantomData,
        }
    }

    /// Constructs the [`RayDiff`] of a ray leaving a pinhole camera.
    ///
    /// The origin does not vary with the pixel, so its derivatives are zero; the direction
    /// derivatives are computed by [`ray_direction_differentials()`], whose documentation
    /// explains the parameters.
    #[inline]
    pub fn for_primary_ray(
        non_normalized_dir: WorldVector,
        camera_right: WorldVector,
        camera_up: WorldVector,
        viewport_size: ViewportSize,
    ) -> Self {
        let [direction_dx, direction_dy] =
            ray_direction_differentials(non_normalized_dir, camera_right, camera_up, viewport_size);
        Self::new(
            WorldVector::zero(),
            WorldVector::zero(),
            direction_dx,
            direction_dy,
        )
    }

    /// ∂O/∂x: derivative of the ray origin with respect to screen *x*.
    #[inline]
    pub fn origin_dx(&self) -> WorldVector {
        self.origin_dx
    }

    /// ∂O/∂y: derivative of the ray origin with respect to screen *y*.
    #[inline]
    pub fn origin_dy(&self) -> WorldVector {
        self.origin_dy
    }

    /// ∂D/∂x: derivative of the ray direction with respect to screen *x*.
    #[inline]
    pub fn direction_dx(&self) -> WorldVector {
        self.direction_dx
    }

    /// ∂D/∂y: derivative of the ray direction with respect to screen *y*.
    #[inline]
    pub fn direction_dy(&self) -> WorldVector {
        self.direction_dy
    }

    /// Carries the differential from the ray origin to a hit point.
    ///
    /// * `ray_dir` is the unit direction of the ray.
    /// * `hit_t` is the distance from the ray origin to the hit point.
    /// * `normal` is the normal of the surface that was hit.
    ///
    /// With [`Igehy`], the origin differential is moved along the ray and then onto the
    /// plane of the hit, which is undefined (infinite) if `ray_dir · normal = 0`.
    /// With [`RayTracingGems`], this leaves the differential unchanged.
    /// In both cases, the direction differential is unchanged.
    #[inline]
    #[must_use]
    pub fn propagate(self, ray_dir: WorldVector, hit_t: f32, normal: WorldVector) -> Self {
        let [origin_dx, origin_dy] = M::propagate_origin(&self, ray_dir, hit_t, normal);
        Self {
            origin_dx,
            origin_dy,
            ..self
        }
    }

    /// Computes the derivatives of the barycentric and texture coordinates of a hit point
    /// with respect to screen position.
    ///
    /// `self` must have been [propagated](Self::propagate) to this hit, and `ray_dir` and
    /// `hit_t` must be the same as were given to that call.
    ///
    /// The resulting [`SurfaceDifferentials::uv_dx`] and [`SurfaceDifferentials::uv_dy`]
    /// are the gradients to use for sampling textures at the hit point.
    #[inline]
    pub fn surface_differentials(
        &self,
        ray_dir: WorldVector,
        triangle: &HitTriangle,
        hit_t: f32,
    ) -> SurfaceDifferentials {
        let [bary_dx, bary_dy] = M::barycentric_differentials(self, ray_dir, triangle, hit_t);
        SurfaceDifferentials {
            bary_dx,
            bary_dy,
            uv_dx: triangle.uv_differential(bary_dx),
            uv_dy: triangle.uv_differential(bary_dy),
        }
    }

    /// Computes the differential of the ray produced by perfect specular reflection at the
    /// hit point, taking into account the variation of the interpolated shading normal.
    ///
    /// * `ray_dir` is the unit direction of the incoming ray.
    /// * `unnormalized_normal` is the barycentric interpolation of the triangle's vertex
    ///   normals at the hit point ([`HitTriangle::interpolated_normal()`]), and
    ///   `normal` is that vector normalized.
    /// * `surface` is the result of [`RayDiff::surface_differentials()`] at this hit.
    #[allow(clippy::missing_inline_in_public_items)]
    #[must_use]
    pub fn reflect(
        self,
        ray_dir: WorldVector,
        unnormalized_normal: WorldVector,
        normal: WorldVector,
        surface: &SurfaceDifferentials,
        triangle: &HitTriangle,
    ) -> Self {
        let SurfaceDifferentials {
            bary_dx, bary_dy, ..
        } = *surface;
        let [n0, n1, n2] = *triangle.normals();

        // Derivative of the unnormalized interpolated normal.
        let dndx = (n0 - n2) * bary_dx.x + (n1 - n2) * bary_dx.y;
        let dndy = (n0 - n2) * bary_dy.x + (n1 - n2) * bary_dy.y;

        // Derivative of the normalized normal: (dn * NN - N * (N · dn)) / NN^1.5.
        let nn = unnormalized_normal.square_length();
        let rcp_nn = 1.0 / (nn * nn.sqrt());
        let dndx = (dndx * nn - unnormalized_normal * unnormalized_normal.dot(dndx)) * rcp_nn;
        let dndy = (dndy * nn - unnormalized_normal * unnormalized_normal.dot(dndy)) * rcp_nn;

        // Derivatives of D · N.
        let dn = ray_dir.dot(normal);
        let ddn_dx = self.direction_dx.dot(normal) + ray_dir.dot(dndx);
        let ddn_dy = self.direction_dy.dot(normal) + ray_dir.dot(dndy);

        let [origin_dx, origin_dy] = M::reflected_origin(&self, bary_dx, bary_dy, triangle);

        // Reflected direction is D - 2 (D · N) N.
        Self::new(
            origin_dx,
            origin_dy,
            self.direction_dx - (dndx * dn + normal * ddn_dx) * 2.0,
            self.direction_dy - (dndy * dn + normal * ddn_dy) * 2.0,
        )
    }
}

// Manual impls so that no bounds are placed on `M`.
impl<M> Clone for RayDiff<M> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for RayDiff<M> {}

impl<M> PartialEq for RayDiff<M> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.origin_dx == other.origin_dx
            && self.origin_dy == other.origin_dy
            && self.direction_dx == other.direction_dx
            && self.direction_dy == other.direction_dy
    }
}

impl<M: DifferentialMethod> fmt::Debug for RayDiff<M> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            origin_dx,
            origin_dy,
            direction_dx,
            direction_dy,
            method: _,
        } = self;
        f.debug_struct("RayDiff")
            .field("method", &M::NAME)
            .field("origin_dx", origin_dx)
            .field("origin_dy", origin_dy)
            .field("direction_dx", direction_dx)
            .field("direction_dy", direction_dy)
            .finish()
    }
}
