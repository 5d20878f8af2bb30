use std::iter::{Product, Sum};
use std::ops::Neg;

use crate::macros::impl_f32_op;
use crate::{Half, SIGN_MASK};

impl_f32_op!(Half, [AddAssign]::add_assign, [Add]::add);
impl_f32_op!(Half, [SubAssign]::sub_assign, [Sub]::sub);
impl_f32_op!(Half, [MulAssign]::mul_assign, [Mul]::mul);
impl_f32_op!(Half, [DivAssign]::div_assign, [Div]::div);
impl_f32_op!(Half, [RemAssign]::rem_assign, [Rem]::rem);

impl Neg for Half {
    type Output = Self;

    /// Flips the sign bit. This also applies to zeros and NaN.
    #[inline]
    fn neg(self) -> Self {
        Self(self.0 ^ SIGN_MASK)
    }
}

impl Neg for &Half {
    type Output = Half;

    #[inline]
    fn neg(self) -> Half {
        -*self
    }
}

impl Sum for Half {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self::from_f32(iter.map(Self::to_f32).sum())
    }
}

impl Product for Half {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self::from_f32(iter.map(Self::to_f32).product())
    }
}

impl Half {
    fn map_f32(self, f: impl FnOnce(f32) -> f32) -> Self {
        Self::from_f32(f(self.to_f32()))
    }

    /// Gets the square root. Negative values other than `-0` give NaN.
    #[must_use]
    pub fn sqrt(self) -> Self {
        self.map_f32(f32::sqrt)
    }

    /// Computes `self * a + b` with a single rounding at [`f32`] precision.
    #[must_use]
    pub fn mul_add(self, a: Self, b: Self) -> Self {
        self.map_f32(|v| v.mul_add(a.to_f32(), b.to_f32()))
    }

    /// Rounds towards negative infinity.
    #[must_use]
    pub fn floor(self) -> Self {
        self.map_f32(f32::floor)
    }

    /// Rounds towards positive infinity.
    #[must_use]
    pub fn ceil(self) -> Self {
        self.map_f32(f32::ceil)
    }

    /// Rounds towards zero.
    #[must_use]
    pub fn trunc(self) -> Self {
        self.map_f32(f32::trunc)
    }

    /// Rounds to the nearest integer, half-way cases away from zero.
    #[must_use]
    pub fn round(self) -> Self {
        self.map_f32(f32::round)
    }

    /// Gets the smaller value, ignoring NaN unless both are NaN.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::from_f32(self.to_f32().min(other.to_f32()))
    }

    /// Gets the larger value, ignoring NaN unless both are NaN.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::from_f32(self.to_f32().max(other.to_f32()))
    }
}
