//! Footprints of primary rays, which depend on the camera projection.
//!
//! These functions assume a pinhole camera generating, for the pixel at normalized device
//! coordinates `ndc` (each in the range -1 to 1, *y* up), the non-normalized ray direction
//! `ndc.x * right + ndc.y * up + forward`, where the lengths of `right` and `up` encode the
//! field of view and aspect ratio.

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::math::{ViewportSize, WorldVector};

#[cfg(doc)]
use crate::{RayCone, RayDiff};

/// Computes the derivatives of the normalized primary ray direction with respect to pixel
/// *x* and *y* (Igehy, “Tracing Ray Differentials”, equation 8).
///
/// * `non_normalized_dir` is the direction as generated by the camera, before
///   normalization.
/// * `camera_right` and `camera_up` are the camera's scaled basis vectors, as described
///   in the [module documentation](self).
/// * `viewport_size` is the size of the image in pixels. Pixel *y* increases downward,
///   so `∂D/∂y` points against `camera_up`.
///
/// Returns `[∂D/∂x, ∂D/∂y]`. Use [`RayDiff::for_primary_ray()`] to obtain a complete
/// differential.
#[inline]
pub fn ray_direction_differentials(
    non_normalized_dir: WorldVector,
    camera_right: WorldVector,
    camera_up: WorldVector,
    viewport_size: ViewportSize,
) -> [WorldVector; 2] {
    let dd = non_normalized_dir.square_length();
    // 2 from the NDC range being 2 wide; dd^1.5 from differentiating the normalization.
    let divd = 2.0 / (dd * dd.sqrt());
    let dr = non_normalized_dir.dot(camera_right);
    let du = non_normalized_dir.dot(camera_up);
    [
        (camera_right * dd - non_normalized_dir * dr) * (divd / viewport_size.width),
        -(camera_up * dd - non_normalized_dir * du) * (divd / viewport_size.height),
    ]
}

/// Computes the spread angle of a primary [`RayCone`]: the angle subtended by one pixel
/// at the center of the image, for a vertical field of view of `fov_y` radians.
#[inline]
pub fn pixel_spread_angle(fov_y: f32, viewport_height: f32) -> f32 {
    (2.0 * (fov_y * 0.5).tan() / viewport_height).atan()
}
