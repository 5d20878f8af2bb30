use std::num::FpCategory;

use crate::{EXP_BIAS, EXP_MASK, Half, MAN_MASK, QUIET_BIT, SIGN_MASK};

impl Half {
    /// Whether this is positive or negative zero.
    #[must_use]
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 & !SIGN_MASK == 0
    }

    /// Whether this is a subnormal value, that is, non-zero with a zero
    /// exponent field.
    #[must_use]
    #[inline]
    pub const fn is_subnormal(self) -> bool {
        self.0 & EXP_MASK == 0 && self.0 & MAN_MASK != 0
    }

    /// Whether this is a normal value: neither zero, subnormal, infinite nor
    /// NaN.
    #[must_use]
    #[inline]
    pub const fn is_normal(self) -> bool {
        let exp = self.0 & EXP_MASK;
        exp != 0 && exp != EXP_MASK
    }

    /// Whether this is neither infinite nor NaN.
    #[must_use]
    #[inline]
    pub const fn is_finite(self) -> bool {
        self.0 & EXP_MASK != EXP_MASK
    }

    /// Whether this is positive or negative infinity.
    #[must_use]
    #[inline]
    pub const fn is_infinite(self) -> bool {
        self.0 & !SIGN_MASK == EXP_MASK
    }

    /// Whether this is NaN, quiet or signaling.
    #[must_use]
    #[inline]
    pub const fn is_nan(self) -> bool {
        self.0 & EXP_MASK == EXP_MASK && self.0 & MAN_MASK != 0
    }

    /// Whether this is a NaN with the quiet bit clear.
    #[must_use]
    #[inline]
    pub const fn is_signaling_nan(self) -> bool {
        self.is_nan() && self.0 & QUIET_BIT == 0
    }

    /// Whether this is the canonical encoding of its value.
    ///
    /// Every non-NaN value only has one encoding. NaNs are canonical only if
    /// they carry no payload besides the quiet bit.
    #[must_use]
    #[inline]
    pub const fn is_canonical(self) -> bool {
        !self.is_nan() || self.0 & MAN_MASK == QUIET_BIT
    }

    /// Gets the floating-point category.
    #[must_use]
    pub const fn classify(self) -> FpCategory {
        match (self.exponent_bits(), self.significand_bits()) {
            (0, 0) => FpCategory::Zero,
            (0, _) => FpCategory::Subnormal,
            (0x1F, 0) => FpCategory::Infinite,
            (0x1F, _) => FpCategory::Nan,
            _ => FpCategory::Normal,
        }
    }

    /// Gets the unbiased exponent.
    ///
    /// Subnormals report [`Half::MIN_EXPONENT`]. Zero reports [`i32::MIN`],
    /// infinities and NaN report [`i32::MAX`].
    #[must_use]
    pub const fn exponent(self) -> i32 {
        match self.exponent_bits() {
            0x1F => i32::MAX,
            0 if self.significand_bits() == 0 => i32::MIN,
            0 => Self::MIN_EXPONENT,
            exp => exp as i32 - EXP_BIAS,
        }
    }

    /// Gets the significand, always positive.
    ///
    /// For normal values, this is in `[1, 2)`. Subnormals have no implicit
    /// bit and report a value in `(0, 1)`, so that
    /// `significand * 2^exponent` still gives the magnitude. The significand
    /// of infinity is `1`, that of zero is `0` and that of NaN is NaN.
    #[must_use]
    pub fn significand(self) -> Self {
        match (self.exponent_bits(), self.significand_bits()) {
            (0x1F, 0) => Self::ONE,
            (0x1F, _) => Self::NAN,
            (0, man) => Self::from_f32(f32::from(man) / 1024.0),
            (_, man) => Self(Self::ONE.0 | man),
        }
    }

    /// Gets the number of significant fractional bits in the significand.
    ///
    /// Zero, infinities and NaN report `-1`.
    #[must_use]
    pub const fn significand_width(self) -> i32 {
        let man = self.significand_bits();
        match self.exponent_bits() {
            0x1F => -1,
            0 if man == 0 => -1,
            0 => (15 - man.leading_zeros() - man.trailing_zeros()) as i32,
            _ if man == 0 => 0,
            _ => 10 - man.trailing_zeros() as i32,
        }
    }

    /// Gets the power of two with the same sign and exponent, so the
    /// magnitude is in `[binade, 2 * binade)`.
    ///
    /// Zeros and infinities return themselves, NaN returns [`Half::NAN`].
    #[must_use]
    pub const fn binade(self) -> Self {
        let man = self.significand_bits();
        match self.exponent_bits() {
            0x1F if man != 0 => Self::NAN,
            0 if man != 0 => Self((self.0 & SIGN_MASK) | (1 << (15 - man.leading_zeros()))),
            _ => Self(self.0 & (SIGN_MASK | EXP_MASK)),
        }
    }

    /// Gets the unit in the last place: the distance from this value's
    /// magnitude to the next larger representable magnitude of its binade.
    ///
    /// Infinities and NaN return NaN.
    #[must_use]
    pub const fn ulp(self) -> Self {
        match self.exponent_bits() {
            0x1F => Self::NAN,
            0 => Self::MIN_POSITIVE_SUBNORMAL,
            // 2^(exp - 25) is still subnormal
            exp @ 1..=10 => Self(1 << (exp - 1)),
            exp => Self((exp - 10) << 10),
        }
    }

    /// Clears the sign bit.
    #[must_use]
    #[inline]
    pub const fn magnitude(self) -> Self {
        Self(self.0 & !SIGN_MASK)
    }

    /// Alias for [`Half::magnitude`].
    #[must_use]
    #[inline]
    pub const fn abs(self) -> Self {
        self.magnitude()
    }

    /// Returns `self` with the sign of `sign`.
    #[must_use]
    #[inline]
    pub const fn copysign(self, sign: Self) -> Self {
        Self((self.0 & !SIGN_MASK) | (sign.0 & SIGN_MASK))
    }

    /// Gets the least value that compares greater than `self`.
    ///
    /// NaN and positive infinity return themselves. Both zeros step to the
    /// smallest positive subnormal.
    #[must_use]
    pub const fn next_up(self) -> Self {
        if self.is_nan() || self.0 == Self::INFINITY.0 {
            return self;
        }

        if self.0 == Self::NEG_ZERO.0 {
            return Self::MIN_POSITIVE_SUBNORMAL;
        }

        if self.is_sign_negative() {
            Self(self.0 - 1)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Gets the greatest value that compares less than `self`.
    ///
    /// NaN and negative infinity return themselves. Both zeros step to the
    /// smallest negative subnormal.
    #[must_use]
    pub const fn next_down(self) -> Self {
        Self(Self(self.0 ^ SIGN_MASK).next_up().0 ^ SIGN_MASK)
    }
}
