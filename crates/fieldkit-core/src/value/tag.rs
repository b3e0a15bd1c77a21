use crate::value::Value;

///
/// ValueTag
///
/// Stable value-variant tag used by fingerprints and cross-variant ordering.
/// Tag values are part of stable behavior and must not be renumbered.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueTag {
    Null = 1,
    Bool = 2,
    Byte = 3,
    Short = 4,
    Char = 5,
    Int = 6,
    Long = 7,
    Float = 8,
    Double = 9,
    Decimal = 10,
    Text = 11,
    Enum = 12,
    Blob = 13,
    List = 14,
}

impl ValueTag {
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Human-readable variant label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Char => "Char",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Decimal => "Decimal",
            Self::Text => "Text",
            Self::Enum => "Enum",
            Self::Blob => "Blob",
            Self::List => "List",
        }
    }
}

#[must_use]
pub const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Null => ValueTag::Null,
        Value::Bool(_) => ValueTag::Bool,
        Value::Byte(_) => ValueTag::Byte,
        Value::Short(_) => ValueTag::Short,
        Value::Char(_) => ValueTag::Char,
        Value::Int(_) => ValueTag::Int,
        Value::Long(_) => ValueTag::Long,
        Value::Float(_) => ValueTag::Float,
        Value::Double(_) => ValueTag::Double,
        Value::Decimal(_) => ValueTag::Decimal,
        Value::Text(_) => ValueTag::Text,
        Value::Enum(_) => ValueTag::Enum,
        Value::Blob(_) => ValueTag::Blob,
        Value::List(_) => ValueTag::List,
    }
}

/// Stable rank used for cross-variant ordering; tags are 1-based, rank is 0-based.
#[must_use]
pub const fn canonical_rank(value: &Value) -> u8 {
    canonical_tag(value).to_u8() - 1
}
