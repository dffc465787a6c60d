//! In-memory ledger host.
//!
//! [`MemoryLedger`] holds committed state in a `BTreeMap`, so range scans
//! come back in key byte order. Each transaction runs against a
//! [`TxOverlay`]: reads go to committed state, writes are buffered in a
//! [`WriteSet`] that is applied only if the invocation succeeded. A
//! rejected transaction leaves committed state untouched.

use std::collections::BTreeMap;

use relationship_types::Result;

use crate::composite_key::CompositeKey;
use crate::state::{KeyValue, StateIter, StateStore};

/// Committed key-value state of one replica.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    state: BTreeMap<String, Vec<u8>>,
    /// Number of write sets applied so far.
    commits: u64,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction view over the current committed state.
    #[must_use]
    pub fn begin(&self) -> TxOverlay<'_> {
        TxOverlay {
            committed: self,
            writes: WriteSet::default(),
        }
    }

    /// Apply a transaction's buffered writes.
    pub fn commit(&mut self, writes: WriteSet) {
        tracing::debug!(
            commit = self.commits,
            writes = writes.len(),
            "Applying write set"
        );
        self.state.extend(writes.0);
        self.commits += 1;
    }

    /// Committed value at `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.state.get(key).map(Vec::as_slice)
    }

    /// Number of committed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Number of write sets applied.
    #[must_use]
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Committed entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.state.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Writes buffered by one transaction, keyed for deterministic application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet(BTreeMap<String, Vec<u8>>);

impl WriteSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.0.get(key).map(Vec::as_slice)
    }
}

/// Transaction-scoped view: committed reads, buffered writes.
///
/// Like the ledger platform, reads and scans do not observe the
/// transaction's own pending writes.
#[derive(Debug)]
pub struct TxOverlay<'a> {
    committed: &'a MemoryLedger,
    writes: WriteSet,
}

impl TxOverlay<'_> {
    /// Give up the view and keep the buffered writes for commit.
    #[must_use]
    pub fn into_write_set(self) -> WriteSet {
        self.writes
    }

    /// Writes buffered so far.
    #[must_use]
    pub fn pending(&self) -> &WriteSet {
        &self.writes
    }
}

impl StateStore for TxOverlay<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.committed.state.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.writes.0.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn get_state_by_prefix(&self, prefix: &str) -> Result<StateIter<'_>> {
        let range = prefix.to_owned()..CompositeKey::range_end(prefix);
        Ok(Box::new(self.committed.state.range(range).map(|(key, value)| -> Result<KeyValue> {
            Ok(KeyValue {
                key: key.clone(),
                value: value.clone(),
            })
        })))
    }
}
