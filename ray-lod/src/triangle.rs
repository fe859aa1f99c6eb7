//! Per-triangle quantities needed by both footprint methods.
//! This module is private but reexported by its parent.

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::math::{
    BaryVector, LocalPoint, UvPoint, UvVector, WorldMatrix, WorldPoint, WorldVector, sign,
};

// -------------------------------------------------------------------------------------------------

/// Result of [`compute_ray_cone_triangle_lod_value()`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct TriangleLod {
    /// `0.5 * log2(texture-space area / world-space area)`, constant for the triangle.
    ///
    /// Pass this to [`RayCone::compute_lod()`](crate::RayCone::compute_lod) for every
    /// ray that hits this triangle.
    pub lod_constant: f32,

    /// Unit-length geometric normal of the triangle, in world space.
    pub normal: WorldVector,
}

/// Computes the ray-cone LOD constant of a triangle, and its world-space normal.
///
/// `vertices` are in object space and are transformed by the linear part of
/// `world_matrix`; `tex_coords` are the texture coordinates of the same vertices.
///
/// The result depends only on the triangle, so it may be computed once and reused for
/// every ray that hits it. A degenerate triangle (zero world-space area) produces
/// non-finite results.
#[allow(clippy::missing_inline_in_public_items)]
pub fn compute_ray_cone_triangle_lod_value(
    vertices: &[LocalPoint; 3],
    tex_coords: &[UvPoint; 3],
    world_matrix: &WorldMatrix,
) -> TriangleLod {
    let tx10 = tex_coords[1] - tex_coords[0];
    let tx20 = tex_coords[2] - tex_coords[0];
    let texture_area = tx10.cross(tx20).abs();

    let edge10 = world_matrix.transform_vector3d(vertices[1] - vertices[0]);
    let edge20 = world_matrix.transform_vector3d(vertices[2] - vertices[0]);

    // Length of the cross product is twice the world-space triangle area, just as
    // texture_area is twice the texture-space triangle area.
    let triangle_normal = edge10.cross(edge20);
    let world_area = triangle_normal.length();

    TriangleLod {
        lod_constant: 0.5 * (texture_area / world_area).log2(),
        normal: triangle_normal / world_area,
    }
}

// -------------------------------------------------------------------------------------------------

/// Screen-space partial derivatives of world position and world normal at a shading point,
/// typically computed by differencing adjacent pixels in a G-buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct ScreenSpaceDerivatives {
    /// ∂P/∂x, the change in world position per pixel horizontally.
    pub position_dx: WorldVector,
    /// ∂P/∂y, the change in world position per pixel vertically.
    pub position_dy: WorldVector,
    /// ∂N/∂x, the change in world normal per pixel horizontally.
    pub normal_dx: WorldVector,
    /// ∂N/∂y, the change in world normal per pixel vertically.
    pub normal_dy: WorldVector,
}

/// Calibration constants for [`compute_screen_space_surface_spread_angle()`].
///
/// The surface spread angle is `2 * k1 * beta + k2`; the defaults leave `beta` unscaled.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[expect(clippy::exhaustive_structs)]
pub struct SpreadAngleFactors {
    /// Scale applied to the curvature estimate.
    pub k1: f32,
    /// Offset added to the result.
    pub k2: f32,
}

impl SpreadAngleFactors {
    /// `k1 = 1`, `k2 = 0`.
    pub const DEFAULT: Self = Self { k1: 1.0, k2: 0.0 };
}

impl Default for SpreadAngleFactors {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Estimates the spread angle a ray cone gains when it reflects off a curved surface,
/// from how quickly the surface normal changes across the screen.
///
/// The magnitude is `sqrt(|∂N/∂x|² + |∂N/∂y|²)`. Its sign is that of
/// `∂N/∂x · ∂P/∂x + ∂N/∂y · ∂P/∂y`: positive for convex surfaces, whose reflections
/// diverge, and negative for concave ones. A flat surface contributes `factors.k2`.
#[inline]
pub fn compute_screen_space_surface_spread_angle(
    derivatives: &ScreenSpaceDerivatives,
    factors: SpreadAngleFactors,
) -> f32 {
    let ScreenSpaceDerivatives {
        position_dx,
        position_dy,
        normal_dx,
        normal_dy,
    } = *derivatives;
    let beta = (normal_dx.square_length() + normal_dy.square_length()).sqrt()
        * sign(normal_dx.dot(position_dx) + normal_dy.dot(position_dy));
    2.0 * beta * factors.k1 + factors.k2
}

// -------------------------------------------------------------------------------------------------

/// World-space data of the triangle a ray hit, as needed to project and reflect
/// [`RayDiff`](crate::RayDiff)s.
///
/// Barycentric coordinates used with a `HitTriangle` weight `vertices[0]` by the first
/// component, `vertices[1]` by the second, and `vertices[2]` by the remainder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitTriangle {
    vertices: [WorldPoint; 3],
    tex_coords: [UvPoint; 3],
    normals: [WorldVector; 3],
    edge10: WorldVector,
    edge20: WorldVector,
    face_normal: WorldVector,
}

impl HitTriangle {
    /// Constructs a [`HitTriangle`] from its world-space vertices, texture coordinates,
    /// and (shading) vertex normals, computing its edges and unit face normal.
    #[inline]
    pub fn new(
        vertices: [WorldPoint; 3],
        tex_coords: [UvPoint; 3],
        normals: [WorldVector; 3],
    ) -> Self {
        let edge10 = vertices[1] - vertices[0];
        let edge20 = vertices[2] - vertices[0];
        Self {
            vertices,
            tex_coords,
            normals,
            edge10,
            edge20,
            face_normal: edge10.cross(edge20).normalize(),
        }
    }

    /// Constructs a [`HitTriangle`] whose vertex normals all equal its face normal,
    /// i.e. a flat-shaded triangle.
    #[inline]
    pub fn flat(vertices: [WorldPoint; 3], tex_coords: [UvPoint; 3]) -> Self {
        let mut triangle = Self::new(vertices, tex_coords, [WorldVector::zero(); 3]);
        triangle.normals = [triangle.face_normal; 3];
        triangle
    }

    /// World-space vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[WorldPoint; 3] {
        &self.vertices
    }

    /// Texture coordinates of the vertices.
    #[inline]
    pub fn tex_coords(&self) -> &[UvPoint; 3] {
        &self.tex_coords
    }

    /// World-space vertex normals.
    #[inline]
    pub fn normals(&self) -> &[WorldVector; 3] {
        &self.normals
    }

    /// `vertices[1] - vertices[0]`.
    #[inline]
    pub fn edge10(&self) -> WorldVector {
        self.edge10
    }

    /// `vertices[2] - vertices[0]`.
    #[inline]
    pub fn edge20(&self) -> WorldVector {
        self.edge20
    }

    /// Unit normal of the triangle's plane, oriented by the winding of its vertices.
    #[inline]
    pub fn face_normal(&self) -> WorldVector {
        self.face_normal
    }

    /// Interpolates the vertex normals at the given barycentric coordinates,
    /// without normalizing the result.
    ///
    /// Both this value and its normalization are needed by
    /// [`RayDiff::reflect()`](crate::RayDiff::reflect).
    #[inline]
    pub fn interpolated_normal(&self, barycentrics: BaryVector) -> WorldVector {
        let [n0, n1, n2] = self.normals;
        n0 * barycentrics.x + n1 * barycentrics.y + n2 * (1.0 - barycentrics.x - barycentrics.y)
    }

    /// Maps derivatives of barycentric coordinates to derivatives of texture coordinates.
    #[inline]
    pub(crate) fn uv_differential(&self, d_bary: BaryVector) -> UvVector {
        let [uv0, uv1, uv2] = self.tex_coords;
        (uv0 - uv2) * d_bary.x + (uv1 - uv2) * d_bary.y
    }
}
