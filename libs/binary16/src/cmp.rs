use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::Half;

impl Half {
    /// IEEE equality: NaN equals nothing, and both zeros are equal.
    #[must_use]
    pub const fn is_equal(self, other: Self) -> bool {
        if self.is_nan() || other.is_nan() {
            return false;
        }

        self.0 == other.0 || (self.is_zero() && other.is_zero())
    }

    /// IEEE less-than: false if either side is NaN, and zeros are equal.
    #[must_use]
    pub const fn is_less(self, other: Self) -> bool {
        if self.is_nan() || other.is_nan() || (self.is_zero() && other.is_zero()) {
            return false;
        }

        match (self.is_sign_negative(), other.is_sign_negative()) {
            (true, false) => true,
            (false, true) => false,
            (false, false) => self.0 < other.0,
            (true, true) => self.0 > other.0,
        }
    }

    /// IEEE less-than-or-equal: false if either side is NaN.
    #[must_use]
    pub const fn is_less_or_equal(self, other: Self) -> bool {
        self.is_less(other) || self.is_equal(other)
    }

    /// Whether `self` precedes or equals `other` in the IEEE total order.
    ///
    /// The order is `-NaN < -inf < negative finite < -0 < +0 < positive finite
    /// < +inf < +NaN`, with NaNs ordered by payload.
    #[must_use]
    pub const fn is_totally_ordered_below_or_equal(self, other: Self) -> bool {
        self.total_key() <= other.total_key()
    }

    /// Compares by the IEEE total order. See
    /// [`Half::is_totally_ordered_below_or_equal`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.total_key().cmp(&other.total_key())
    }

    /// Maps the bits to an integer whose natural order is the total order.
    /// Negative values get their magnitude bits flipped.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    const fn total_key(self) -> i16 {
        let bits = self.0 as i16;
        bits ^ ((((bits >> 15) as u16) >> 1) as i16)
    }
}

impl PartialEq for Half {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(*other)
    }
}

impl PartialOrd for Half {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_less(*other) {
            Some(Ordering::Less)
        } else if other.is_less(*self) {
            Some(Ordering::Greater)
        } else if self.is_equal(*other) {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    #[inline]
    fn lt(&self, other: &Self) -> bool {
        self.is_less(*other)
    }

    #[inline]
    fn le(&self, other: &Self) -> bool {
        self.is_less_or_equal(*other)
    }

    #[inline]
    fn gt(&self, other: &Self) -> bool {
        other.is_less(*self)
    }

    #[inline]
    fn ge(&self, other: &Self) -> bool {
        other.is_less_or_equal(*self)
    }
}

impl Hash for Half {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // -0 == +0, so they must hash alike
        let bits = if self.is_zero() { 0 } else { self.0 };
        bits.hash(state);
    }
}
