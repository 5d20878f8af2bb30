//! Narrowing and widening conversions.
//!
//! Narrowing rounds to nearest, ties to even. A value rounds up when the
//! first dropped bit is set and either any lower dropped bit or the lowest
//! kept bit is set. The `3 * round_bit - 1` mask covers exactly those bits.
//! Rounding up may carry into the exponent field, which correctly produces
//! the next binade or infinity.

use crate::{EXP_BIAS, EXP_MASK, Half, MAN_MASK, QUIET_BIT, SIGN_MASK};

impl Half {
    /// Rounds an [`f32`] to the nearest [`Half`].
    ///
    /// Values too large in magnitude become infinity, values too small become
    /// zero of the same sign. NaN becomes a quiet NaN with the same sign.
    #[must_use]
    pub const fn from_f32(value: f32) -> Self {
        Self(narrow_f32(value.to_bits()))
    }

    /// Rounds an [`f64`] to the nearest [`Half`].
    ///
    /// This rounds once, directly from the 64-bit value, so it can differ from
    /// `Half::from_f32(value as f32)` for values close to a rounding tie.
    #[must_use]
    pub const fn from_f64(value: f64) -> Self {
        Self(narrow_f64(value.to_bits()))
    }

    /// Converts to [`f32`]. This is exact for every non-NaN value.
    ///
    /// NaN payloads are kept, but the result is always a quiet NaN.
    #[must_use]
    pub const fn to_f32(self) -> f32 {
        f32::from_bits(widen(self.0))
    }

    /// Converts to [`f64`]. This is exact for every non-NaN value.
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn to_f64(self) -> f64 {
        self.to_f32() as f64
    }

    /// Converts each element of a slice of [`f32`].
    #[must_use]
    pub fn from_f32_slice(values: &[f32]) -> Vec<Self> {
        values.iter().map(|&v| Self::from_f32(v)).collect()
    }

    /// Converts each element of a slice of [`f64`].
    #[must_use]
    pub fn from_f64_slice(values: &[f64]) -> Vec<Self> {
        values.iter().map(|&v| Self::from_f64(v)).collect()
    }

    /// Widens each element to [`f32`].
    #[must_use]
    pub fn to_f32_vec(values: &[Self]) -> Vec<f32> {
        values.iter().map(|v| v.to_f32()).collect()
    }

    /// Widens each element to [`f64`].
    #[must_use]
    pub fn to_f64_vec(values: &[Self]) -> Vec<f64> {
        values.iter().map(|v| v.to_f64()).collect()
    }

    /// Views a slice of values as their bit patterns without copying.
    #[must_use]
    pub fn slice_as_bits(values: &[Self]) -> &[u16] {
        bytemuck::cast_slice(values)
    }

    /// Views a slice of bit patterns as values without copying.
    #[must_use]
    pub fn slice_from_bits(bits: &[u16]) -> &[Self] {
        bytemuck::cast_slice(bits)
    }
}

impl From<Half> for f32 {
    fn from(value: Half) -> Self {
        value.to_f32()
    }
}

impl From<Half> for f64 {
    fn from(value: Half) -> Self {
        value.to_f64()
    }
}

impl From<u8> for Half {
    fn from(value: u8) -> Self {
        Self::from_f32(f32::from(value))
    }
}

impl From<i8> for Half {
    fn from(value: i8) -> Self {
        Self::from_f32(f32::from(value))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn narrow_f32(x: u32) -> u16 {
    let sign = (x >> 16) as u16 & SIGN_MASK;
    let exp = ((x >> 23) & 0xFF) as i32;
    let man = x & 0x007F_FFFF;

    if exp == 0xFF {
        if man == 0 {
            return sign | EXP_MASK;
        }

        return sign | EXP_MASK | QUIET_BIT | (man >> 13) as u16;
    }

    let half_exp = exp - 127 + EXP_BIAS;
    if half_exp >= 0x1F {
        return sign | EXP_MASK;
    }

    if half_exp <= 0 {
        // below 2^-25 nothing can round up to the smallest subnormal
        if half_exp < -10 {
            return sign;
        }

        let man = man | 0x0080_0000;
        let shift = (14 - half_exp) as u32;
        let round_bit = 1u32 << (shift - 1);
        let mut half_man = man >> shift;
        if man & round_bit != 0 && man & (3 * round_bit - 1) != 0 {
            half_man += 1;
        }

        return sign | half_man as u16;
    }

    let round_bit = 0x1000u32;
    let mut bits = ((half_exp as u32) << 10) | (man >> 13);
    if man & round_bit != 0 && man & (3 * round_bit - 1) != 0 {
        bits += 1;
    }

    sign | bits as u16
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn narrow_f64(x: u64) -> u16 {
    let sign = (x >> 48) as u16 & SIGN_MASK;
    let exp = ((x >> 52) & 0x7FF) as i32;
    let man = x & 0x000F_FFFF_FFFF_FFFF;

    if exp == 0x7FF {
        if man == 0 {
            return sign | EXP_MASK;
        }

        return sign | EXP_MASK | QUIET_BIT | (man >> 42) as u16;
    }

    let half_exp = exp - 1023 + EXP_BIAS;
    if half_exp >= 0x1F {
        return sign | EXP_MASK;
    }

    if half_exp <= 0 {
        if half_exp < -10 {
            return sign;
        }

        let man = man | 0x0010_0000_0000_0000;
        let shift = (43 - half_exp) as u32;
        let round_bit = 1u64 << (shift - 1);
        let mut half_man = man >> shift;
        if man & round_bit != 0 && man & (3 * round_bit - 1) != 0 {
            half_man += 1;
        }

        return sign | half_man as u16;
    }

    let round_bit = 0x0200_0000_0000u64;
    let mut bits = ((half_exp as u64) << 10) | (man >> 42);
    if man & round_bit != 0 && man & (3 * round_bit - 1) != 0 {
        bits += 1;
    }

    sign | bits as u16
}

const fn widen(bits: u16) -> u32 {
    let sign = ((bits & SIGN_MASK) as u32) << 16;
    let exp = bits & EXP_MASK;
    let man = (bits & MAN_MASK) as u32;

    if exp == EXP_MASK {
        if man == 0 {
            return sign | 0x7F80_0000;
        }

        return sign | 0x7FC0_0000 | (man << 13);
    }

    if exp == 0 {
        if man == 0 {
            return sign;
        }

        // shift the leading one into the implicit bit position
        let shift = man.leading_zeros() - 21;
        let man = (man << shift) & MAN_MASK as u32;
        return sign | ((113 - shift) << 23) | (man << 13);
    }

    sign | (((exp >> 10) as u32 + 112) << 23) | (man << 13)
}
