use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// predicate_types
///
/// Declares `PredicateType` from complement pairs; both directions of each
/// pair are generated so `complement` is an involution by construction.
///

macro_rules! predicate_types {
    ($(($left:ident, $left_tag:literal, $left_label:literal) <=> ($right:ident, $right_tag:literal, $right_label:literal)),* $(,)?) => {
        ///
        /// PredicateType
        ///
        /// Structural kind of a field predicate, as seen by translators.
        ///

        #[derive(
            Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
        )]
        pub enum PredicateType {
            $(
                #[display($left_label)]
                $left,
                #[display($right_label)]
                $right,
            )*
        }

        impl PredicateType {
            /// Every predicate type, complement pairs adjacent.
            pub const ALL: &'static [Self] = &[$(Self::$left, Self::$right,)*];

            /// The type describing the logical negation of this one.
            #[must_use]
            pub const fn complement(self) -> Self {
                match self {
                    $(
                        Self::$left => Self::$right,
                        Self::$right => Self::$left,
                    )*
                }
            }

            /// Stable one-byte tag used in fingerprints.
            #[must_use]
            pub const fn tag(self) -> u8 {
                match self {
                    $(
                        Self::$left => $left_tag,
                        Self::$right => $right_tag,
                    )*
                }
            }

            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(
                        Self::$left => $left_label,
                        Self::$right => $right_label,
                    )*
                }
            }
        }
    };
}

predicate_types! {
    (AlwaysTrue, 0x01, "always_true") <=> (AlwaysFalse, 0x02, "always_false"),
    (IsNull, 0x03, "is_null") <=> (IsNotNull, 0x04, "is_not_null"),
    (Equal, 0x05, "equal") <=> (NotEqual, 0x06, "not_equal"),
    (GreaterThan, 0x07, "greater_than") <=> (LessOrEqual, 0x08, "less_or_equal"),
    (GreaterOrEqual, 0x09, "greater_or_equal") <=> (LessThan, 0x0a, "less_than"),
    (Between, 0x0b, "between") <=> (NotBetween, 0x0c, "not_between"),
    (In, 0x0d, "in") <=> (NotIn, 0x0e, "not_in"),
    (EqualIgnoreCase, 0x10, "equal_ignore_case") <=> (NotEqualIgnoreCase, 0x11, "not_equal_ignore_case"),
    (StartsWith, 0x12, "starts_with") <=> (NotStartsWith, 0x13, "not_starts_with"),
    (StartsWithIgnoreCase, 0x14, "starts_with_ignore_case") <=> (NotStartsWithIgnoreCase, 0x15, "not_starts_with_ignore_case"),
    (EndsWith, 0x16, "ends_with") <=> (NotEndsWith, 0x17, "not_ends_with"),
    (EndsWithIgnoreCase, 0x18, "ends_with_ignore_case") <=> (NotEndsWithIgnoreCase, 0x19, "not_ends_with_ignore_case"),
    (Contains, 0x1a, "contains") <=> (NotContains, 0x1b, "not_contains"),
    (ContainsIgnoreCase, 0x1c, "contains_ignore_case") <=> (NotContainsIgnoreCase, 0x1d, "not_contains_ignore_case"),
    (IsEmpty, 0x1e, "is_empty") <=> (IsNotEmpty, 0x1f, "is_not_empty"),
}

impl PredicateType {
    /// Whether the type compares a field against exactly one other operand.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::LessThan
                | Self::LessOrEqual
                | Self::GreaterThan
                | Self::GreaterOrEqual
        )
    }

    /// Whether the type is evaluated under a case fold.
    #[must_use]
    pub const fn is_case_insensitive(self) -> bool {
        matches!(
            self,
            Self::EqualIgnoreCase
                | Self::NotEqualIgnoreCase
                | Self::StartsWithIgnoreCase
                | Self::NotStartsWithIgnoreCase
                | Self::EndsWithIgnoreCase
                | Self::NotEndsWithIgnoreCase
                | Self::ContainsIgnoreCase
                | Self::NotContainsIgnoreCase
        )
    }

    /// Whether the type ignores its field entirely.
    #[must_use]
    pub const fn is_constant(self) -> bool {
        matches!(self, Self::AlwaysTrue | Self::AlwaysFalse)
    }
}
