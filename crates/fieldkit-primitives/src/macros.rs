#[macro_export]
macro_rules! expression_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Boolean,
                BooleanNullable,
                "boolean",
                Bool,
                is_numeric = false,
                is_integral = false,
                is_floating = false,
                supports_ordering = true
            ),
            (
                Byte,
                ByteNullable,
                "byte",
                Numeric,
                is_numeric = true,
                is_integral = true,
                is_floating = false,
                supports_ordering = true
            ),
            (
                Short,
                ShortNullable,
                "short",
                Numeric,
                is_numeric = true,
                is_integral = true,
                is_floating = false,
                supports_ordering = true
            ),
            (
                Char,
                CharNullable,
                "char",
                Char,
                is_numeric = false,
                is_integral = false,
                is_floating = false,
                supports_ordering = true
            ),
            (
                Int,
                IntNullable,
                "int",
                Numeric,
                is_numeric = true,
                is_integral = true,
                is_floating = false,
                supports_ordering = true
            ),
            (
                Long,
                LongNullable,
                "long",
                Numeric,
                is_numeric = true,
                is_integral = true,
                is_floating = false,
                supports_ordering = true
            ),
            (
                Float,
                FloatNullable,
                "float",
                Numeric,
                is_numeric = true,
                is_integral = false,
                is_floating = true,
                supports_ordering = true
            ),
            (
                Double,
                DoubleNullable,
                "double",
                Numeric,
                is_numeric = true,
                is_integral = false,
                is_floating = true,
                supports_ordering = true
            ),
            (
                BigDecimal,
                BigDecimalNullable,
                "big_decimal",
                Numeric,
                is_numeric = true,
                is_integral = false,
                is_floating = false,
                supports_ordering = true
            ),
            (
                String,
                StringNullable,
                "string",
                Textual,
                is_numeric = false,
                is_integral = false,
                is_floating = false,
                supports_ordering = true
            ),
            (
                Enum,
                EnumNullable,
                "enum",
                Enum,
                is_numeric = false,
                is_integral = false,
                is_floating = false,
                supports_ordering = true
            ),
            (
                Reference,
                ReferenceNullable,
                "reference",
                Opaque,
                is_numeric = false,
                is_integral = false,
                is_floating = false,
                supports_ordering = false
            ),
        }
    };
}

#[macro_export]
macro_rules! expression_kind_registry {
    ($macro:ident) => {
        $crate::expression_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::expression_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($base:ident, $nullable:ident, $label:literal, $family:ident, is_numeric = $is_numeric:expr, is_integral = $is_integral:expr, is_floating = $is_floating:expr, supports_ordering = $supports_ordering:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::ExpressionKind::$base | $crate::ExpressionKind::$nullable => {
                    $crate::KindMetadata {
                        family: $crate::KindFamily::$family,
                        label: $label,
                        is_numeric: $is_numeric,
                        is_integral: $is_integral,
                        is_floating: $is_floating,
                        supports_ordering: $supports_ordering,
                    }
                }
            )*
        }
    };
}

macro_rules! nullable_from_registry {
    ( @args $kind:expr; @entries $( ($base:ident, $nullable:ident, $label:literal, $family:ident, is_numeric = $is_numeric:expr, is_integral = $is_integral:expr, is_floating = $is_floating:expr, supports_ordering = $supports_ordering:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::ExpressionKind::$base | $crate::ExpressionKind::$nullable => {
                    $crate::ExpressionKind::$nullable
                }
            )*
        }
    };
}

macro_rules! non_null_from_registry {
    ( @args $kind:expr; @entries $( ($base:ident, $nullable:ident, $label:literal, $family:ident, is_numeric = $is_numeric:expr, is_integral = $is_integral:expr, is_floating = $is_floating:expr, supports_ordering = $supports_ordering:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::ExpressionKind::$base | $crate::ExpressionKind::$nullable => {
                    $crate::ExpressionKind::$base
                }
            )*
        }
    };
}

macro_rules! is_nullable_from_registry {
    ( @args $kind:expr; @entries $( ($base:ident, $nullable:ident, $label:literal, $family:ident, is_numeric = $is_numeric:expr, is_integral = $is_integral:expr, is_floating = $is_floating:expr, supports_ordering = $supports_ordering:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::ExpressionKind::$base => false,
                $crate::ExpressionKind::$nullable => true,
            )*
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($base:ident, $nullable:ident, $label:literal, $family:ident, is_numeric = $is_numeric:expr, is_integral = $is_integral:expr, is_floating = $is_floating:expr, supports_ordering = $supports_ordering:expr) ),* $(,)? ) => {
        [ $( $crate::ExpressionKind::$base, $crate::ExpressionKind::$nullable ),* ]
    };
}
