//! Storage forms for [`RayCone`](super::RayCone).
//! This module is private but reexported by its parent.

use core::fmt;

use half::f16;

/// A way of storing the width and spread angle of a [`RayCone`](super::RayCone).
///
/// Encodings differ only in size and precision; every operation on a cone decodes to
/// `f32`, computes, and re-encodes, so results differ at most by the rounding of the
/// encoding.
///
/// This trait is sealed; the available encodings are [`FullPrecision`] and [`PackedHalf`].
pub trait ConeEncoding: Copy + fmt::Debug + PartialEq + bytemuck::Pod + sealed::Sealed {
    /// Stores the given values, rounding them if necessary.
    fn encode(width: f32, spread_angle: f32) -> Self;

    /// Returns the stored width.
    fn width(self) -> f32;

    /// Returns the stored spread angle.
    fn spread_angle(self) -> f32;
}

cfg_if::cfg_if! {
    if #[cfg(feature = "half-precision-cones")] {
        /// The [`ConeEncoding`] used by [`RayCone`](super::RayCone) when none is specified.
        ///
        /// This is [`PackedHalf`] because the `"half-precision-cones"` feature is enabled.
        pub type DefaultConeEncoding = PackedHalf;
    } else {
        /// The [`ConeEncoding`] used by [`RayCone`](super::RayCone) when none is specified.
        ///
        /// This is [`FullPrecision`] unless the `"half-precision-cones"` feature is enabled.
        pub type DefaultConeEncoding = FullPrecision;
    }
}

/// Stores width and spread angle as two independent `f32`s (8 bytes).
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct FullPrecision {
    width: f32,
    spread_angle: f32,
}

impl ConeEncoding for FullPrecision {
    #[inline]
    fn encode(width: f32, spread_angle: f32) -> Self {
        Self {
            width,
            spread_angle,
        }
    }

    #[inline]
    fn width(self) -> f32 {
        self.width
    }

    #[inline]
    fn spread_angle(self) -> f32 {
        self.spread_angle
    }
}

/// Stores width and spread angle as two [`f16`]s packed into one `u32` (4 bytes).
///
/// The width occupies the high 16 bits and the spread angle the low 16 bits, so the
/// word can be unpacked by shader code with `f16tof32(w >> 16)` and `f16tof32(w)`.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct PackedHalf(u32);

impl PackedHalf {
    /// Returns the packed bits.
    #[inline]
    pub const fn to_bits(self) -> u32 {
        self.0
    }

    /// Reinterprets bits produced by [`PackedHalf::to_bits()`] (or by equivalent shader code).
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }
}

impl ConeEncoding for PackedHalf {
    #[inline]
    fn encode(width: f32, spread_angle: f32) -> Self {
        let width_bits = u32::from(f16::from_f32(width).to_bits());
        let angle_bits = u32::from(f16::from_f32(spread_angle).to_bits());
        Self((width_bits << 16) | angle_bits)
    }

    #[inline]
    fn width(self) -> f32 {
        f16::from_bits((self.0 >> 16) as u16).to_f32()
    }

    #[inline]
    fn spread_angle(self) -> f32 {
        f16::from_bits((self.0 & 0xFFFF) as u16).to_f32()
    }
}

impl fmt::Debug for PackedHalf {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PackedHalf")
            .field(&self.width())
            .field(&self.spread_angle())
            .finish()
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::FullPrecision {}
    impl Sealed for super::PackedHalf {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_layout() {
        let packed = PackedHalf::encode(1.0, -2.0);
        // f16 1.0 = 0x3C00, f16 -2.0 = 0xC000
        assert_eq!(packed.to_bits(), 0x3C00_C000);
        assert_eq!(PackedHalf::from_bits(0x3C00_C000), packed);
    }

    #[test]
    fn packed_rounds_to_f16() {
        let packed = PackedHalf::encode(0.1, 1.0 / 3.0);
        assert_eq!(packed.width(), f16::from_f32(0.1).to_f32());
        assert_eq!(packed.spread_angle(), f16::from_f32(1.0 / 3.0).to_f32());
        assert!((packed.width() - 0.1).abs() < 1e-4);
    }

    #[test]
    fn sizes() {
        assert_eq!(size_of::<FullPrecision>(), 8);
        assert_eq!(size_of::<PackedHalf>(), 4);
    }

    #[test]
    fn debug_shows_decoded_values() {
        assert_eq!(
            format!("{:?}", PackedHalf::encode(0.5, 0.25)),
            "PackedHalf(0.5, 0.25)"
        );
    }
}
