//! Fault-injecting store wrapper for tests.

use relationship_types::{RelationshipError, Result};

use crate::state::{StateIter, StateStore};

/// Which store operation should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Get,
    Put,
    /// Opening the range scan fails.
    ScanOpen,
    /// The scan yields this many entries, then an error.
    ScanAfter(usize),
}

/// Wraps a store and fails one kind of operation. Successful writes are
/// still forwarded, so callers can check nothing leaked through.
#[derive(Debug)]
pub struct FaultyStore<S> {
    inner: S,
    fault: Fault,
    puts: usize,
}

impl<S: StateStore> FaultyStore<S> {
    pub fn new(inner: S, fault: Fault) -> Self {
        Self {
            inner,
            fault,
            puts: 0,
        }
    }

    /// Number of writes that reached the inner store.
    pub fn puts(&self) -> usize {
        self.puts
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: StateStore> StateStore for FaultyStore<S> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.fault == Fault::Get {
            return Err(RelationshipError::Storage(format!("injected read failure at {key:?}")));
        }
        self.inner.get_state(key)
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<()> {
        if self.fault == Fault::Put {
            return Err(RelationshipError::Storage(format!("injected write failure at {key:?}")));
        }
        self.puts += 1;
        self.inner.put_state(key, value)
    }

    fn get_state_by_prefix(&self, prefix: &str) -> Result<StateIter<'_>> {
        match self.fault {
            Fault::ScanOpen => Err(RelationshipError::Storage(
                "injected range query failure".into(),
            )),
            Fault::ScanAfter(n) => {
                let inner = self.inner.get_state_by_prefix(prefix)?;
                Ok(Box::new(inner.take(n).chain(std::iter::once(Err(
                    RelationshipError::Storage("injected iterator failure".into()),
                )))))
            }
            Fault::Get | Fault::Put => self.inner.get_state_by_prefix(prefix),
        }
    }
}
