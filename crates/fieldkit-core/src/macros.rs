// enum_domain
/// Implement `EnumDomain` for a fieldless enum; constants are listed in
/// ordinal order and named by their identifier.
///
/// ```ignore
/// enum_domain!(Status, "shop::Status", [Draft, Active, Retired]);
/// ```
#[macro_export]
macro_rules! enum_domain {
    ($ty:ident, $path:expr, [$($variant:ident),+ $(,)?]) => {
        impl $crate::expr::EnumDomain for $ty {
            const PATH: &'static str = $path;
            const VALUES: &'static [Self] = &[$($ty::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => stringify!($variant),)+
                }
            }
        }
    };
}
