use fieldkit_primitives::CaseFold;
use std::borrow::Cow;

/// Fold `text` to the canonical casing used by case-insensitive predicates.
///
/// Ascii folding borrows when the input has no uppercase ASCII letters.
#[must_use]
pub fn fold(text: &str, fold: CaseFold) -> Cow<'_, str> {
    match fold {
        CaseFold::Unicode => Cow::Owned(text.to_lowercase()),
        CaseFold::Ascii => {
            if text.bytes().any(|b| b.is_ascii_uppercase()) {
                Cow::Owned(text.to_ascii_lowercase())
            } else {
                Cow::Borrowed(text)
            }
        }
    }
}

/// Number of Unicode scalar values in `text`, saturated to `i32`.
#[must_use]
pub fn char_len(text: &str) -> i32 {
    i32::try_from(text.chars().count()).unwrap_or(i32::MAX)
}
