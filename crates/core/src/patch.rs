//! Helpers for sparse (PATCH-style) request bodies.
//!
//! A plain `Option<T>` cannot tell "field omitted" from "field set to null".
//! Fields that may be explicitly cleared use `Option<Option<T>>` together
//! with [`double_option`]:
//!
//! ```ignore
//! #[serde(default, deserialize_with = "double_option")]
//! pub review_comment: Option<Option<String>>,
//! ```
//!
//! | JSON                         | value              |
//! |------------------------------|--------------------|
//! | key absent                   | `None`             |
//! | `"review_comment": null`     | `Some(None)`       |
//! | `"review_comment": "text"`   | `Some(Some(text))` |

use serde::{Deserialize, Deserializer};

/// Deserialize a present field into `Some(..)`, keeping an explicit `null`
/// as `Some(None)`. Must be combined with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        comment: Option<Option<String>>,
    }

    #[test]
    fn absent_field_is_none() {
        let p: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(p.comment, None);
    }

    #[test]
    fn null_field_is_some_none() {
        let p: Patch = serde_json::from_str(r#"{"comment": null}"#).unwrap();
        assert_eq!(p.comment, Some(None));
    }

    #[test]
    fn value_field_is_some_some() {
        let p: Patch = serde_json::from_str(r#"{"comment": "blurry"}"#).unwrap();
        assert_eq!(p.comment, Some(Some("blurry".to_string())));
    }
}
