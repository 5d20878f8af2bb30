/// Provides the remaining overloads of a binary operator for a [`Copy`] type
/// given its `[Op]Assign<Self>` implementation.
///
/// This covers `Lhs op Rhs` with either side by reference, and
/// `[Op]Assign<&Self>`.
macro_rules! impl_op_via_assign {
    ($Ty:ty, [$TrAssign:ident] :: $assign:ident, [$Tr:ident] :: $inline:ident) => {
        impl ::std::ops::$Tr for $Ty {
            type Output = $Ty;

            #[inline]
            fn $inline(mut self, rhs: $Ty) -> $Ty {
                ::std::ops::$TrAssign::$assign(&mut self, rhs);
                self
            }
        }

        impl ::std::ops::$Tr<&$Ty> for $Ty {
            type Output = $Ty;

            #[inline]
            fn $inline(self, rhs: &$Ty) -> $Ty {
                ::std::ops::$Tr::$inline(self, *rhs)
            }
        }

        impl ::std::ops::$Tr<$Ty> for &$Ty {
            type Output = $Ty;

            #[inline]
            fn $inline(self, rhs: $Ty) -> $Ty {
                ::std::ops::$Tr::$inline(*self, rhs)
            }
        }

        impl ::std::ops::$Tr<&$Ty> for &$Ty {
            type Output = $Ty;

            #[inline]
            fn $inline(self, rhs: &$Ty) -> $Ty {
                ::std::ops::$Tr::$inline(*self, *rhs)
            }
        }

        impl ::std::ops::$TrAssign<&$Ty> for $Ty {
            #[inline]
            fn $assign(&mut self, rhs: &$Ty) {
                ::std::ops::$TrAssign::$assign(self, *rhs);
            }
        }
    };
}

/// Implements `[Op]Assign<Self>` by widening both sides to [`f32`] and
/// narrowing the result, then fills in the other overloads.
macro_rules! impl_f32_op {
    ($Ty:ty, [$TrAssign:ident] :: $assign:ident, [$Tr:ident] :: $inline:ident) => {
        impl ::std::ops::$TrAssign for $Ty {
            #[inline]
            fn $assign(&mut self, rhs: $Ty) {
                let mut value = self.to_f32();
                ::std::ops::$TrAssign::$assign(&mut value, rhs.to_f32());
                *self = <$Ty>::from_f32(value);
            }
        }

        $crate::macros::impl_op_via_assign!($Ty, [$TrAssign]::$assign, [$Tr]::$inline);
    };
}

pub(crate) use {impl_f32_op, impl_op_via_assign};
