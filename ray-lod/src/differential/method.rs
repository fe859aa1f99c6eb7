//! The two formulations of ray differential propagation.
//! This module is private but reexported by its parent.

use core::fmt;
use core::hash::Hash;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use euclid::vec2;

use crate::math::{BaryVector, WorldVector};
use crate::{HitTriangle, RayDiff};

/// Selects how a [`RayDiff`] is carried to a hit point and projected onto the hit triangle.
///
/// The two implementations differ in where the origin differential is moved onto the
/// hit plane:
///
/// * [`Igehy`] does it in [`RayDiff::propagate()`], and then obtains barycentric
///   derivatives from the triangle's edge plane equations.
/// * [`RayTracingGems`] leaves the origin differential at the previous hit in
///   [`RayDiff::propagate()`], and instead projects along the ray when computing
///   barycentric derivatives, reconstructing the origin differential on reflection.
///
/// Both give the same texture-coordinate derivatives up to rounding. Since the method is a
/// type parameter of [`RayDiff`], one ray's differential cannot be mixed between them.
///
/// This trait is sealed; it cannot be implemented outside this crate.
pub trait DifferentialMethod:
    Copy + fmt::Debug + Eq + Hash + Send + Sync + 'static + sealed::Sealed
{
    /// Name of the method, for diagnostics.
    const NAME: &'static str;

    #[doc(hidden)]
    fn propagate_origin(
        diff: &RayDiff<Self>,
        ray_dir: WorldVector,
        hit_t: f32,
        normal: WorldVector,
    ) -> [WorldVector; 2];

    #[doc(hidden)]
    fn barycentric_differentials(
        diff: &RayDiff<Self>,
        ray_dir: WorldVector,
        triangle: &HitTriangle,
        hit_t: f32,
    ) -> [BaryVector; 2];

    #[doc(hidden)]
    fn reflected_origin(
        diff: &RayDiff<Self>,
        bary_dx: BaryVector,
        bary_dy: BaryVector,
        triangle: &HitTriangle,
    ) -> [WorldVector; 2];
}

cfg_if::cfg_if! {
    if #[cfg(feature = "classic-igehy")] {
        /// The [`DifferentialMethod`] used by [`RayDiff`] when none is specified.
        ///
        /// This is [`Igehy`] because the `"classic-igehy"` feature is enabled.
        pub type DefaultMethod = Igehy;
    } else {
        /// The [`DifferentialMethod`] used by [`RayDiff`] when none is specified.
        ///
        /// This is [`RayTracingGems`] because the `"classic-igehy"` feature is disabled.
        pub type DefaultMethod = RayTracingGems;
    }
}

/// Ray differentials as originally described in Homan Igehy,
/// “Tracing Ray Differentials”, SIGGRAPH 1999.
///
/// The origin differential is transferred to the hit plane during propagation
/// (Igehy equations 10 and 12), and barycentric derivatives are read off the edge plane
/// equations of the triangle (“Normal-Interpolated Triangles”).
#[allow(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Igehy {}

/// Ray differentials as formulated in Tomas Akenine-Möller et al.,
/// “Texture Level of Detail Strategies for Real-Time Ray Tracing”, *Ray Tracing Gems*, 2019.
///
/// Barycentric derivatives are computed directly from the un-propagated differential with
/// Cramer's rule, so propagation leaves the origin differential untouched.
#[allow(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RayTracingGems {}

impl DifferentialMethod for Igehy {
    const NAME: &'static str = "Igehy";

    #[inline]
    fn propagate_origin(
        diff: &RayDiff<Self>,
        ray_dir: WorldVector,
        hit_t: f32,
        normal: WorldVector,
    ) -> [WorldVector; 2] {
        let rcp_dn = 1.0 / ray_dir.dot(normal);
        [
            (diff.origin_dx(), diff.direction_dx()),
            (diff.origin_dy(), diff.direction_dy()),
        ]
        .map(|(origin, direction)| {
            let origin = origin + direction * hit_t;
            let dt = -origin.dot(normal) * rcp_dn;
            origin + ray_dir * dt
        })
    }

    #[inline]
    fn barycentric_differentials(
        diff: &RayDiff<Self>,
        _ray_dir: WorldVector,
        triangle: &HitTriangle,
        _hit_t: f32,
    ) -> [BaryVector; 2] {
        let [v0, v1, v2] = *triangle.vertices();
        let face_normal = triangle.face_normal();

        // Normals of the planes through each edge perpendicular to the triangle, scaled so
        // that the plane equation is 1 at the opposite vertex. Only the gradient is needed,
        // so the plane offsets are not computed.
        let nu = (v2 - v1).cross(face_normal);
        let nv = (v0 - v2).cross(face_normal);
        let lu = nu / nu.dot(v0 - v1);
        let lv = nv / nv.dot(v1 - v2);

        [diff.origin_dx(), diff.origin_dy()].map(|d_origin| vec2(lu.dot(d_origin), lv.dot(d_origin)))
    }

    #[inline]
    fn reflected_origin(
        diff: &RayDiff<Self>,
        _bary_dx: BaryVector,
        _bary_dy: BaryVector,
        _triangle: &HitTriangle,
    ) -> [WorldVector; 2] {
        // Already on the hit plane.
        [diff.origin_dx(), diff.origin_dy()]
    }
}

/// Below this magnitude, the determinant of the ray/triangle system is treated as zero.
const DETERMINANT_EPSILON: f32 = 1e-4;

impl DifferentialMethod for RayTracingGems {
    const NAME: &'static str = "RayTracingGems";

    #[inline]
    fn propagate_origin(
        diff: &RayDiff<Self>,
        _ray_dir: WorldVector,
        _hit_t: f32,
        _normal: WorldVector,
    ) -> [WorldVector; 2] {
        [diff.origin_dx(), diff.origin_dy()]
    }

    #[inline]
    fn barycentric_differentials(
        diff: &RayDiff<Self>,
        ray_dir: WorldVector,
        triangle: &HitTriangle,
        hit_t: f32,
    ) -> [BaryVector; 2] {
        let edge10 = triangle.edge10();
        let edge20 = triangle.edge20();

        let cu = edge20.cross(ray_dir);
        let cv = ray_dir.cross(edge10);
        let k = cu.dot(edge10);
        let rcp_k = if k.abs() > DETERMINANT_EPSILON {
            1.0 / k
        } else {
            log::trace!("ray differential projection skipped: determinant {k} for {triangle:?}");
            0.0
        };
        let cu = cu * rcp_k;
        let cv = cv * rcp_k;

        [
            (diff.origin_dx(), diff.direction_dx()),
            (diff.origin_dy(), diff.direction_dy()),
        ]
        .map(|(origin, direction)| {
            let q = origin + direction * hit_t;
            // Derivatives of the weights of vertices 1 and 2; vertex 0 gets the rest.
            let d1 = cu.dot(q);
            let d2 = cv.dot(q);
            vec2(-d1 - d2, d1)
        })
    }

    #[inline]
    fn reflected_origin(
        _diff: &RayDiff<Self>,
        bary_dx: BaryVector,
        bary_dy: BaryVector,
        triangle: &HitTriangle,
    ) -> [WorldVector; 2] {
        // The hit point is v0 + w1 * edge10 + w2 * edge20, with w2 = 1 - w0 - w1.
        let edge10 = triangle.edge10();
        let edge20 = triangle.edge20();
        [bary_dx, bary_dy].map(|d_bary| {
            let d_w2 = -d_bary.x - d_bary.y;
            edge10 * d_bary.y + edge20 * d_w2
        })
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Igehy {}
    impl Sealed for super::RayTracingGems {}
}
