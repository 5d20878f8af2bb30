//! Fixed-width primitives and their big-endian byte form.

use binary16::Half;

/// A value with a fixed-size big-endian representation.
///
/// Implemented for every primitive integer, [`f32`], [`f64`] and [`Half`].
/// Pointer-sized integers are excluded as their width differs between hosts.
pub trait FixedWidth: Sized + Copy {
    /// The byte array holding the encoded value.
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    /// Encodes the value, most significant byte first.
    fn to_be_bytes(self) -> Self::Bytes;

    /// Decodes a value from its big-endian bytes.
    fn from_be_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_fixed_width {
    ($($Ty:ty)*) => {$(
        impl FixedWidth for $Ty {
            type Bytes = [u8; size_of::<$Ty>()];

            #[inline]
            fn to_be_bytes(self) -> Self::Bytes {
                <$Ty>::to_be_bytes(self)
            }

            #[inline]
            fn from_be_bytes(bytes: Self::Bytes) -> Self {
                <$Ty>::from_be_bytes(bytes)
            }
        }
    )*};
}

impl_fixed_width!(u8 u16 u32 u64 u128 i8 i16 i32 i64 i128 f32 f64);

impl FixedWidth for Half {
    type Bytes = [u8; 2];

    #[inline]
    fn to_be_bytes(self) -> Self::Bytes {
        self.to_bits().to_be_bytes()
    }

    #[inline]
    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        Self::from_bits(u16::from_be_bytes(bytes))
    }
}

/// Packs four ASCII characters into a big-endian [`u32`], as used for the
/// collection markers.
#[must_use]
pub const fn four_cc(code: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*code)
}
