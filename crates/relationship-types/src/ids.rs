//! Party identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{RelationshipError, Result};

// ---------------------------------------------------------------------------
// Organization
// ---------------------------------------------------------------------------

/// Name of the organization a transaction is submitted on behalf of.
///
/// Only the identity resolver builds one for the caller; counterparties
/// named in arguments go through [`Organization::new`] as well so an empty
/// name can never reach a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Organization(String);

impl Organization {
    /// Wrap a non-empty organization name.
    ///
    /// # Errors
    /// Returns [`RelationshipError::InvalidArgument`] if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(RelationshipError::invalid_argument(
                "organization name must not be empty",
            ));
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Organization {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
