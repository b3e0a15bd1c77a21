#[macro_use]
mod macros;

#[cfg(test)]
mod tests;

///
/// ExpressionKind
///
/// Fixed tag identifying the value domain of an expression or field.
/// Used by external translators for dispatch without type reflection.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ExpressionKind {
    Boolean,
    BooleanNullable,
    Byte,
    ByteNullable,
    Short,
    ShortNullable,
    Char,
    CharNullable,
    Int,
    IntNullable,
    Long,
    LongNullable,
    Float,
    FloatNullable,
    Double,
    DoubleNullable,
    BigDecimal,
    BigDecimalNullable,
    String,
    StringNullable,
    Enum,
    EnumNullable,
    Reference,
    ReferenceNullable,
}

impl ExpressionKind {
    /// Return the full metadata descriptor for one kind.
    #[must_use]
    pub const fn metadata(self) -> KindMetadata {
        expression_kind_registry!(metadata_from_registry, self)
    }

    /// Stable lowercase label, shared by a kind and its nullable counterpart.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.metadata().label
    }

    #[must_use]
    pub const fn family(self) -> KindFamily {
        self.metadata().family
    }

    #[must_use]
    pub const fn is_nullable(self) -> bool {
        expression_kind_registry!(is_nullable_from_registry, self)
    }

    /// Nullable counterpart of this kind (identity for nullable kinds).
    #[must_use]
    pub const fn nullable(self) -> Self {
        expression_kind_registry!(nullable_from_registry, self)
    }

    /// Non-null counterpart of this kind (identity for non-null kinds).
    #[must_use]
    pub const fn non_null(self) -> Self {
        expression_kind_registry!(non_null_from_registry, self)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.metadata().is_numeric
    }

    #[must_use]
    pub const fn is_integral(self) -> bool {
        self.metadata().is_integral
    }

    #[must_use]
    pub const fn is_floating(self) -> bool {
        self.metadata().is_floating
    }

    #[must_use]
    pub const fn supports_ordering(self) -> bool {
        self.metadata().supports_ordering
    }

    ///
    /// PROMOTION
    ///

    /// Result kind of `plus`, `minus` and `multiply` for `self op other`.
    ///
    /// Nullability of either side makes the result nullable.
    /// Returns `None` when the pair has no arithmetic defined.
    #[must_use]
    pub const fn promote(self, other: Self) -> Option<Self> {
        let Some(base) = promote_base(self.non_null(), other.non_null()) else {
            return None;
        };

        Some(Self::with_nullability(
            base,
            self.is_nullable() || other.is_nullable(),
        ))
    }

    /// Result kind of `divide`: always double for primitive numeric pairs.
    #[must_use]
    pub const fn quotient(self, other: Self) -> Option<Self> {
        let left = self.non_null();
        let right = other.non_null();
        if !left.is_numeric()
            || !right.is_numeric()
            || matches!(left, Self::BigDecimal)
            || matches!(right, Self::BigDecimal)
        {
            return None;
        }

        Some(Self::with_nullability(
            Self::Double,
            self.is_nullable() || other.is_nullable(),
        ))
    }

    /// Result kind of `divide_floor`: integral pairs only, same table as `promote`.
    #[must_use]
    pub const fn floor_quotient(self, other: Self) -> Option<Self> {
        if !self.is_integral() || !other.is_integral() {
            return None;
        }

        self.promote(other)
    }

    /// Result kind of a unary operator applied to `self`.
    #[must_use]
    pub const fn unary(self, op: UnaryOp) -> Option<Self> {
        if !self.is_numeric() {
            return None;
        }

        let base = match op {
            UnaryOp::Negate | UnaryOp::Abs => self.non_null(),
            UnaryOp::Sign => Self::Byte,
            UnaryOp::Sqrt | UnaryOp::Pow => {
                if matches!(self.non_null(), Self::BigDecimal) {
                    return None;
                }
                Self::Double
            }
        };

        Some(Self::with_nullability(base, self.is_nullable()))
    }

    const fn with_nullability(base: Self, nullable: bool) -> Self {
        if nullable { base.nullable() } else { base }
    }
}

impl std::fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_nullable() {
            write!(f, "{}_nullable", self.label())
        } else {
            write!(f, "{}", self.label())
        }
    }
}

// Promotion over non-null numeric kinds.
const fn promote_base(left: ExpressionKind, right: ExpressionKind) -> Option<ExpressionKind> {
    use ExpressionKind::{BigDecimal, Byte, Double, Float, Int, Long, Short};

    if !left.is_numeric() || !right.is_numeric() {
        return None;
    }

    let kind = match (left, right) {
        (Byte, Byte) => Short,
        (BigDecimal, other) | (other, BigDecimal) => {
            if other.is_integral() || matches!(other, BigDecimal) {
                BigDecimal
            } else {
                return None;
            }
        }
        (Double, _) | (_, Double) | (Float, Long) | (Long, Float) => Double,
        (Float, _) | (_, Float) => Float,
        (Long, _) | (_, Long) => Long,
        (Short | Int, _) | (_, Short | Int) => Int,
        _ => return None,
    };

    Some(kind)
}

///
/// KindMetadata
///
/// Capability metadata for one expression kind.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct KindMetadata {
    pub family: KindFamily,
    pub label: &'static str,
    pub is_numeric: bool,
    pub is_integral: bool,
    pub is_floating: bool,
    pub supports_ordering: bool,
}

///
/// KindFamily
///
/// Coarse routing family used by translators and value coercion.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KindFamily {
    Bool,
    Numeric,
    Char,
    Textual,
    Enum,
    Opaque,
}

///
/// UnaryOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UnaryOp {
    Negate,
    Abs,
    Sign,
    Sqrt,
    Pow,
}

///
/// Inclusion
///
/// Endpoint inclusion of a `between` range.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Inclusion {
    StartExclusiveEndExclusive,
    #[default]
    StartInclusiveEndExclusive,
    StartExclusiveEndInclusive,
    StartInclusiveEndInclusive,
}

impl Inclusion {
    #[must_use]
    pub const fn is_start_inclusive(self) -> bool {
        matches!(
            self,
            Self::StartInclusiveEndExclusive | Self::StartInclusiveEndInclusive
        )
    }

    #[must_use]
    pub const fn is_end_inclusive(self) -> bool {
        matches!(
            self,
            Self::StartExclusiveEndInclusive | Self::StartInclusiveEndInclusive
        )
    }

    /// Stable one-byte tag used by predicate fingerprints.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::StartExclusiveEndExclusive => 0x01,
            Self::StartInclusiveEndExclusive => 0x02,
            Self::StartExclusiveEndInclusive => 0x03,
            Self::StartInclusiveEndInclusive => 0x04,
        }
    }
}

///
/// NullOrder
///
/// Placement of absent values in a comparator.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum NullOrder {
    First,
    #[default]
    Last,
}

///
/// CaseFold
///
/// Canonical casing used by case-insensitive text predicates.
///
/// `Unicode` lowercases with the locale-independent Unicode mapping.
/// `Ascii` only folds `A-Z`, leaving every other code point untouched.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CaseFold {
    #[default]
    Unicode,
    Ascii,
}

///
/// MapperOrdering
///
/// Relationship between stored order and exposed order of a type mapper.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum MapperOrdering {
    #[default]
    Retain,
    Invert,
    Unspecified,
}

/// Ordered list of all expression kinds in registry order.
pub const ALL_EXPRESSION_KINDS: [ExpressionKind; 24] =
    expression_kind_registry!(all_kinds_from_registry);

/// Numeric non-null kinds that take part in the promotion table.
pub const PROMOTION_KINDS: [ExpressionKind; 6] = [
    ExpressionKind::Byte,
    ExpressionKind::Short,
    ExpressionKind::Int,
    ExpressionKind::Long,
    ExpressionKind::Float,
    ExpressionKind::Double,
];
