//! Replica state digests.
//!
//! Every replica that executed the same ordered transaction log must hold
//! the same state. The `state_root` is a SHA-256 digest over the ordered
//! entries of a key range, so two replicas can be compared without
//! shipping their full state.

use relationship_types::Result;
use sha2::{Digest, Sha256};

use crate::state::StateStore;

/// Compute the state root over entries given in key order.
///
/// Keys and values are length-prefixed, so the boundary between
/// consecutive entries is unambiguous.
#[must_use]
pub fn compute_state_root<'a, I>(entries: I) -> [u8; 32]
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut hasher = Sha256::new();
    hasher.update(b"relationship:state_root:v1:");

    let mut count: u64 = 0;
    for (key, value) in entries {
        hasher.update((key.len() as u64).to_le_bytes());
        hasher.update(key.as_bytes());
        hasher.update((value.len() as u64).to_le_bytes());
        hasher.update(value);
        count += 1;
    }
    hasher.update(count.to_le_bytes());

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// State root over every entry under `prefix`, read through a store view.
///
/// # Errors
/// Propagates the first scan error.
pub fn scan_state_root(store: &dyn StateStore, prefix: &str) -> Result<[u8; 32]> {
    let entries = store.get_state_by_prefix(prefix)?.collect::<Result<Vec<_>>>()?;
    Ok(compute_state_root(
        entries.iter().map(|kv| (kv.key.as_str(), kv.value.as_slice())),
    ))
}

/// Verify that the entries hash to `expected_root`.
#[must_use]
pub fn verify_state_root<'a, I>(entries: I, expected_root: &[u8; 32]) -> bool
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    compute_state_root(entries) == *expected_root
}
