#[macro_export]
macro_rules! pub_const_flag {
    // The pattern for a single bitflag
    ($name:ident, $t:ty, $($rest:ident),*) => {
        pub const $name: $t = <$t>::from_bits_truncate(
            $crate::bitor_variadic!($t, $($rest),*)
        );
    };
}

#[macro_export]
// Used by `pub_const_flag!` to combine bitflags using | on .bits()
macro_rules! bitor_variadic {
    // Match the trivial case
    ($t:ty, $i:ident) => {
        <$t>::$i.bits()
    };
    // Match case with two identifiers
    ($t:ty, $i1:ident, $i2:ident) => {
        <$t>::$i1.bits() | <$t>::$i2.bits()
    };
    // Match case with list of identifiers.
    // The first two are folded into an expr and the rest are appended one by one.
    ($t:ty, $i1:ident, $i2:ident, $($rest:ident),*) => {
        $crate::bitor_variadic!(@fold $t, <$t>::$i1.bits() | <$t>::$i2.bits(), $($rest),*)
    };
    (@fold $t:ty, $e:expr, $i:ident, $($rest:ident),*) => {
        $crate::bitor_variadic!(@fold $t, $e | <$t>::$i.bits(), $($rest),*)
    };
    (@fold $t:ty, $e:expr, $i:ident) => {
        $e | <$t>::$i.bits()
    };
}

/// Implements `Deref` to the wrapped wgpu type stored in the `inner` field.
#[macro_export]
macro_rules! wgpu_inner_deref {
    ($name:ident, $target:ident) => {
        impl ::std::ops::Deref for $name {
            type Target = ::wgpu::$target;
            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }
    };
    ($name:ident) => {
        $crate::wgpu_inner_deref!($name, $name);
    };
}
