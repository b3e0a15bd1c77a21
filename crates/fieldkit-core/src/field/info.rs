use crate::column::ColumnIdentifier;
use fieldkit_primitives::ExpressionKind;
use serde::{Deserialize, Serialize};

///
/// FieldInfo
///
/// Structural description of a field, shared by every predicate and
/// comparator built from it.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct FieldInfo {
    pub identifier: ColumnIdentifier,
    #[serde(with = "kind_label")]
    pub kind: ExpressionKind,
    pub unique: bool,
}

impl FieldInfo {
    #[must_use]
    pub const fn new(identifier: ColumnIdentifier, kind: ExpressionKind, unique: bool) -> Self {
        Self {
            identifier,
            kind,
            unique,
        }
    }
}

// ExpressionKind travels as its display label, e.g. "int_nullable".
mod kind_label {
    use fieldkit_primitives::{ALL_EXPRESSION_KINDS, ExpressionKind};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub(super) fn serialize<S: Serializer>(
        kind: &ExpressionKind,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(kind)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<ExpressionKind, D::Error> {
        let label = String::deserialize(deserializer)?;

        ALL_EXPRESSION_KINDS
            .iter()
            .copied()
            .find(|kind| kind.to_string() == label)
            .ok_or_else(|| D::Error::custom(format!("unknown expression kind '{label}'")))
    }
}
