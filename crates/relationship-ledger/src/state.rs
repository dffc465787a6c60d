//! State store boundary.
//!
//! The ledger's key-value store is an external collaborator. The chaincode
//! only ever sees it through [`StateStore`], scoped to one transaction and
//! one consistent snapshot.

use relationship_types::Result;

/// One entry returned by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// Ordered scan results. Each item may fail independently; callers abort
/// on the first error.
pub type StateIter<'a> = Box<dyn Iterator<Item = Result<KeyValue>> + 'a>;

/// Transaction-scoped view of the ledger state.
///
/// Implementations must return scan results in ascending key byte order so
/// every replica iterates the same sequence.
pub trait StateStore {
    /// Read the value at `key`. `Ok(None)` when nothing is stored there.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write `value` at `key`, replacing whatever was there.
    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Every entry whose key starts with `prefix`, in ascending key order.
    fn get_state_by_prefix(&self, prefix: &str) -> Result<StateIter<'_>>;
}
