//! Coordinate systems and vector types used throughout this library.
//!
//! All computation is done in `f32`, matching the precision of the ray payloads and
//! shading data this library is meant to accompany.

use euclid::{Point2D, Point3D, Size2D, Vector2D, Vector3D};

/// Unit-of-measure type for world space, in which rays travel.
#[allow(clippy::exhaustive_enums)]
#[derive(Debug)]
pub enum World {}

/// Unit-of-measure type for the object (model) space of a mesh, before its world transform.
#[allow(clippy::exhaustive_enums)]
#[derive(Debug)]
pub enum Local {}

/// Unit-of-measure type for normalized texture coordinates, where the whole texture is
/// the unit square.
#[allow(clippy::exhaustive_enums)]
#[derive(Debug)]
pub enum Uv {}

/// Unit-of-measure type for barycentric coordinates on a triangle.
///
/// A `Vector2D<_, Bary>` holds the weights of vertex 0 (`x`) and vertex 1 (`y`);
/// the weight of vertex 2 is implicitly `1 - x - y`.
#[allow(clippy::exhaustive_enums)]
#[derive(Debug)]
pub enum Bary {}

/// Unit-of-measure type for screen space, measured in pixels.
#[allow(clippy::exhaustive_enums)]
#[derive(Debug)]
pub enum Pixel {}

/// Unit-of-measure type for texture dimensions, measured in texels of mip level 0.
#[allow(clippy::exhaustive_enums)]
#[derive(Debug)]
pub enum Texel {}

/// Positions in world space.
pub type WorldPoint = Point3D<f32, World>;

/// Vectors in world space: directions, normals, and their derivatives.
pub type WorldVector = Vector3D<f32, World>;

/// Positions in object space.
pub type LocalPoint = Point3D<f32, Local>;

/// A 3×3 (or affine, whose translation is ignored) transformation from object space
/// to world space.
pub type WorldMatrix = euclid::Transform3D<f32, Local, World>;

/// Texture coordinates.
pub type UvPoint = Point2D<f32, Uv>;

/// Differences or derivatives of texture coordinates.
pub type UvVector = Vector2D<f32, Uv>;

/// Barycentric coordinates, or their derivatives; see [`Bary`] for the layout.
pub type BaryVector = Vector2D<f32, Bary>;

/// Dimensions of a viewport, in pixels.
pub type ViewportSize = Size2D<f32, Pixel>;

/// Dimensions of a texture, in texels.
pub type TextureSize = Size2D<u32, Texel>;

/// Sign function which, unlike [`f32::signum()`], returns zero for zero (and for NaN),
/// as shading languages' `sign()` does.
#[inline]
pub(crate) fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
