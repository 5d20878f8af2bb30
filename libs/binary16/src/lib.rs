//! IEEE-754 binary16 ("half precision") floating-point numbers.
//!
//! [`Half`] stores the raw 16-bit pattern and implements classification,
//! comparison and conversion directly on its three bit fields:
//!
//! ```text
//!  15 | 14 .. 10 | 9 .. 0
//!  s  | exponent | significand
//! ```
//!
//! Conversions from [`f32`] and [`f64`] round to nearest, ties to even, and
//! saturate to infinity. Widening to [`f32`] is exact.
//!
//! Arithmetic widens both operands to [`f32`], computes there and rounds the
//! result back. This is not guaranteed to match hardware half-precision
//! arithmetic bit for bit, so don't rely on it where that matters.
//!
//! # Examples
//!
//! ```
//! use binary16::Half;
//!
//! let x = Half::from_f32(1.5);
//! assert_eq!(x.to_bits(), 0x3E00);
//! assert_eq!((x + Half::ONE).to_f32(), 2.5);
//! assert!(Half::from_f32(1e6).is_infinite());
//! ```

mod classify;
mod cmp;
mod convert;
mod fmt;
mod macros;
mod ops;
#[cfg(feature = "serde")]
mod serde_impl;


// for benchmarks
#[cfg(test)]
use criterion as _;

const SIGN_MASK: u16 = 0x8000;
const EXP_MASK: u16 = 0x7C00;
const MAN_MASK: u16 = 0x03FF;
const QUIET_BIT: u16 = 0x0200;
const EXP_BIAS: i32 = 15;

/// A 16-bit IEEE-754 floating-point number.
///
/// This is a plain wrapper around the bit pattern. Every `u16` is a valid
/// [`Half`], so [`Half::from_bits`] never fails.
///
/// [`PartialEq`] and [`PartialOrd`] follow IEEE semantics: NaN is unordered
/// and unequal to everything, and both zeros compare equal. Use
/// [`Half::total_cmp`] for a total order over all bit patterns.
#[derive(Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct Half(u16);

/// The sign of a [`Half`], as stored in its top bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// The sign bit is clear.
    Plus,
    /// The sign bit is set.
    Minus,
}

impl Half {
    /// Positive zero.
    pub const ZERO: Self = Self(0x0000);
    /// Negative zero.
    pub const NEG_ZERO: Self = Self(0x8000);
    /// One.
    pub const ONE: Self = Self(0x3C00);
    /// Negative one.
    pub const NEG_ONE: Self = Self(0xBC00);
    /// Positive infinity.
    pub const INFINITY: Self = Self(0x7C00);
    /// Negative infinity.
    pub const NEG_INFINITY: Self = Self(0xFC00);
    /// The canonical quiet NaN.
    pub const NAN: Self = Self(0x7E00);
    /// A signaling NaN.
    pub const SIGNALING_NAN: Self = Self(0x7D00);
    /// The largest finite value, `65504`.
    pub const MAX: Self = Self(0x7BFF);
    /// The smallest finite value, `-65504`.
    pub const MIN: Self = Self(0xFBFF);
    /// The smallest positive normal value, `2^-14`.
    pub const MIN_POSITIVE: Self = Self(0x0400);
    /// The smallest positive subnormal value, `2^-24`.
    pub const MIN_POSITIVE_SUBNORMAL: Self = Self(0x0001);
    /// The difference between `1.0` and the next larger value, `2^-10`.
    pub const EPSILON: Self = Self(0x1400);
    /// The value closest to π.
    pub const PI: Self = Self(0x4248);

    /// Number of significant binary digits, including the implicit bit.
    pub const MANTISSA_DIGITS: u32 = 11;
    /// The exponent reported for subnormal values.
    pub const MIN_EXPONENT: i32 = 1 - EXP_BIAS;
    /// The largest exponent of a finite value.
    pub const MAX_EXPONENT: i32 = EXP_BIAS;

    /// Creates a value from its raw bit pattern.
    #[must_use]
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Gets the raw bit pattern.
    #[must_use]
    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Assembles a value from its sign, biased exponent field and significand
    /// field.
    ///
    /// Only the low 5 bits of `exponent_bits` and the low 10 bits of
    /// `significand_bits` are used.
    #[must_use]
    pub const fn from_parts(sign: Sign, exponent_bits: u16, significand_bits: u16) -> Self {
        let sign = match sign {
            Sign::Plus => 0,
            Sign::Minus => SIGN_MASK,
        };

        Self(sign | ((exponent_bits << 10) & EXP_MASK) | (significand_bits & MAN_MASK))
    }

    /// Gets the biased exponent field, in `0..=0x1F`.
    #[must_use]
    #[inline]
    pub const fn exponent_bits(self) -> u16 {
        (self.0 & EXP_MASK) >> 10
    }

    /// Gets the significand field, in `0..=0x3FF`.
    #[must_use]
    #[inline]
    pub const fn significand_bits(self) -> u16 {
        self.0 & MAN_MASK
    }

    /// Gets the sign. Zeros and NaNs have a sign too.
    #[must_use]
    #[inline]
    pub const fn sign(self) -> Sign {
        if self.is_sign_negative() {
            Sign::Minus
        } else {
            Sign::Plus
        }
    }

    /// Whether the sign bit is set.
    #[must_use]
    #[inline]
    pub const fn is_sign_negative(self) -> bool {
        self.0 & SIGN_MASK != 0
    }

    /// Whether the sign bit is clear.
    #[must_use]
    #[inline]
    pub const fn is_sign_positive(self) -> bool {
        !self.is_sign_negative()
    }
}
