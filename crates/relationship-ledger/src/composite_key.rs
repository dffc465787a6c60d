//! Composite key codec.
//!
//! A composite key packs a namespace and an ordered tuple of strings into a
//! single state key:
//!
//! ```text
//! \u{0} namespace \u{0} part_1 \u{0} part_2 \u{0} ... part_n \u{0}
//! ```
//!
//! Every component is terminated by the delimiter, so no component may
//! contain it. `U+10FFFF` is also reserved: a prefix scan covers
//! `[prefix, prefix + U+10FFFF)`, which only works if no key continues past
//! the prefix with that character. UTF-8 byte order equals code point
//! order, so encoded keys sort the same way the store sorts them.

use relationship_types::{RelationshipError, Result, constants};

const DELIM: char = constants::COMPOSITE_KEY_DELIMITER;

/// Stateless codec for composite state keys.
pub struct CompositeKey;

impl CompositeKey {
    /// Encode `namespace` and `parts` into a full key.
    ///
    /// # Errors
    /// Returns [`RelationshipError::InvalidArgument`] if the namespace is
    /// empty or any component carries a reserved character.
    pub fn encode<S: AsRef<str>>(namespace: &str, parts: &[S]) -> Result<String> {
        Self::check_namespace(namespace)?;
        let mut key = String::with_capacity(
            2 + namespace.len() + parts.iter().map(|p| p.as_ref().len() + 1).sum::<usize>(),
        );
        key.push(DELIM);
        key.push_str(namespace);
        key.push(DELIM);
        for (idx, part) in parts.iter().enumerate() {
            let part = part.as_ref();
            Self::check_part(idx, part)?;
            key.push_str(part);
            key.push(DELIM);
        }
        Ok(key)
    }

    /// Partial key over `namespace` and a leading subset of parts.
    ///
    /// The layout is identical to [`CompositeKey::encode`]; every full key
    /// that starts with these components starts with the returned string.
    pub fn prefix<S: AsRef<str>>(namespace: &str, parts: &[S]) -> Result<String> {
        Self::encode(namespace, parts)
    }

    /// Exclusive upper bound of a prefix scan.
    #[must_use]
    pub fn range_end(prefix: &str) -> String {
        let mut end = String::with_capacity(prefix.len() + 4);
        end.push_str(prefix);
        end.push(constants::MAX_UNICODE_RUNE);
        end
    }

    /// Split a full key back into its namespace and parts.
    ///
    /// # Errors
    /// Returns [`RelationshipError::MalformedKey`] if the key is not in
    /// composite layout.
    pub fn decode(key: &str) -> Result<(String, Vec<String>)> {
        let Some(body) = key.strip_prefix(DELIM) else {
            return Err(RelationshipError::malformed_key(format!(
                "{key:?} does not start with the composite key delimiter"
            )));
        };
        let Some(body) = body.strip_suffix(DELIM) else {
            return Err(RelationshipError::malformed_key(format!(
                "{key:?} is not delimiter-terminated"
            )));
        };

        let mut components = body.split(DELIM);
        let namespace = components.next().unwrap_or_default();
        if namespace.is_empty() {
            return Err(RelationshipError::malformed_key(format!(
                "{key:?} has an empty namespace"
            )));
        }
        let parts = components.map(str::to_owned).collect();
        Ok((namespace.to_owned(), parts))
    }

    /// Decode `key` and require it to live in `namespace`.
    pub fn decode_in(namespace: &str, key: &str) -> Result<Vec<String>> {
        let (found, parts) = Self::decode(key)?;
        if found != namespace {
            return Err(RelationshipError::malformed_key(format!(
                "expected namespace {namespace:?}, found {found:?}"
            )));
        }
        Ok(parts)
    }

    fn check_namespace(namespace: &str) -> Result<()> {
        if namespace.is_empty() {
            return Err(RelationshipError::invalid_argument(
                "composite key namespace must not be empty",
            ));
        }
        if Self::is_reserved(namespace) {
            return Err(RelationshipError::invalid_argument(format!(
                "composite key namespace {namespace:?} contains a reserved character"
            )));
        }
        Ok(())
    }

    fn check_part(idx: usize, part: &str) -> Result<()> {
        if Self::is_reserved(part) {
            return Err(RelationshipError::invalid_argument(format!(
                "composite key part {idx} ({part:?}) contains a reserved character"
            )));
        }
        Ok(())
    }

    fn is_reserved(s: &str) -> bool {
        s.contains(DELIM) || s.contains(constants::MAX_UNICODE_RUNE)
    }
}
